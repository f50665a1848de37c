// src/api.rs

//! Branch export API client
//!
//! Fetches the binary package list for a named branch from the public
//! ALT Linux repository database. The endpoint returns a JSON document
//! with a `packages` array; each entry carries at least a package
//! name, and usually an architecture, version, release and epoch.
//! Any further fields are kept as-is so they survive into the report.

use crate::error::{Error, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Base URL of the branch binary package export endpoint
pub const DEFAULT_API_URL: &str = "https://rdb.altlinux.org/api/export/branch_binary_packages";

/// Default timeout for HTTP requests (30 seconds)
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// A single binary package record from the branch export.
///
/// `version` and `release` are optional at this boundary: a record may
/// legitimately be missing them as long as it never reaches the
/// version comparison. Unrecognized fields land in `extra` and are
/// re-emitted verbatim on serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Package {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epoch: Option<i64>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Branch export payload; top-level fields other than `packages` are
/// ignored
#[derive(Debug, Deserialize)]
pub struct BranchExport {
    pub packages: Vec<Package>,
}

/// HTTP client wrapper for the branch export API
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client against the default endpoint
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_API_URL)
    }

    /// Create a client against a custom endpoint (used by tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::InitError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Fetch the package export for one branch.
    ///
    /// Single attempt: a transport failure or non-success status aborts
    /// the run, there is no retry.
    pub fn fetch_branch(&self, branch: &str) -> Result<BranchExport> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), branch);
        info!("Fetching package export for branch '{}' from {}", branch, url);

        let response = self.client.get(&url).send().map_err(|e| Error::Fetch {
            branch: branch.to_string(),
            reason: e.to_string(),
        })?;

        if !response.status().is_success() {
            return Err(Error::Fetch {
                branch: branch.to_string(),
                reason: format!("HTTP {} from {}", response.status(), url),
            });
        }

        let export: BranchExport = response.json().map_err(|e| Error::Fetch {
            branch: branch.to_string(),
            reason: format!("Failed to parse export JSON: {}", e),
        })?;

        debug!(
            "Branch '{}' export contains {} packages",
            branch,
            export.packages.len()
        );
        Ok(export)
    }
}
