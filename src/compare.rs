// src/compare.rs

//! Branch comparison core
//!
//! Packages are first grouped by CPU architecture per branch, then the
//! two branches are diffed architecture by architecture:
//!
//! - packages whose name appears only in the first branch's group
//! - packages whose name appears only in the second branch's group
//! - packages shared by name whose (epoch, version, release) orders
//!   strictly greater in the first branch under RPM rules
//!
//! Architectures and shared names are walked in sorted order so the
//! report is reproducible for identical inputs.

use crate::api::Package;
use crate::error::{Error, Result};
use crate::version::Evr;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

/// Packages of one branch, grouped by architecture
pub type ArchGroups = BTreeMap<String, Vec<Package>>;

/// Partition a flat package list by architecture.
///
/// Records without an `arch` field are silently skipped. Relative
/// input order is preserved within each group.
pub fn group_by_arch(packages: Vec<Package>) -> ArchGroups {
    let mut groups = ArchGroups::new();
    for pkg in packages {
        if let Some(arch) = pkg.arch.clone() {
            groups.entry(arch).or_default().push(pkg);
        }
    }
    groups
}

/// The three-way comparison result for a branch pair.
///
/// Serializes as a map whose keys interpolate the branch labels:
/// `only_in_<first>`, `only_in_<second>`, `newer_in_<first>`.
#[derive(Debug)]
pub struct DiffReport {
    pub first_label: String,
    pub second_label: String,
    pub only_in_first: Vec<Package>,
    pub only_in_second: Vec<Package>,
    pub newer_in_first: Vec<Package>,
}

impl DiffReport {
    /// Create an empty report for the given branch labels
    pub fn new(first_label: impl Into<String>, second_label: impl Into<String>) -> Self {
        Self {
            first_label: first_label.into(),
            second_label: second_label.into(),
            only_in_first: Vec::new(),
            only_in_second: Vec::new(),
            newer_in_first: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.only_in_first.is_empty()
            && self.only_in_second.is_empty()
            && self.newer_in_first.is_empty()
    }
}

impl Serialize for DiffReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry(&format!("only_in_{}", self.first_label), &self.only_in_first)?;
        map.serialize_entry(
            &format!("only_in_{}", self.second_label),
            &self.only_in_second,
        )?;
        map.serialize_entry(
            &format!("newer_in_{}", self.first_label),
            &self.newer_in_first,
        )?;
        map.end()
    }
}

/// Diff two architecture-grouped branches into a [`DiffReport`].
///
/// Only architectures present in both branches participate; packages
/// under an architecture that exists in a single branch are excluded
/// from all three result lists.
///
/// Within one branch and architecture, package names are expected to
/// be unique. If a name repeats, the last record wins in the per-name
/// lookup used for the version comparison.
// TODO: fold packages from architectures present in only one branch
// into the corresponding only_in list
pub fn diff_branches(
    first: &ArchGroups,
    second: &ArchGroups,
    first_label: &str,
    second_label: &str,
) -> Result<DiffReport> {
    let mut report = DiffReport::new(first_label, second_label);

    for (arch, first_pkgs) in first {
        let Some(second_pkgs) = second.get(arch) else {
            continue;
        };

        let first_names: BTreeSet<&str> = first_pkgs.iter().map(|p| p.name.as_str()).collect();
        let second_names: BTreeSet<&str> = second_pkgs.iter().map(|p| p.name.as_str()).collect();

        // Names unique to one branch: gather the full records in list order
        report.only_in_first.extend(
            first_pkgs
                .iter()
                .filter(|p| !second_names.contains(p.name.as_str()))
                .cloned(),
        );
        report.only_in_second.extend(
            second_pkgs
                .iter()
                .filter(|p| !first_names.contains(p.name.as_str()))
                .cloned(),
        );

        // Shared names: compare version-release triples under RPM rules
        let first_by_name: HashMap<&str, &Package> =
            first_pkgs.iter().map(|p| (p.name.as_str(), p)).collect();
        let second_by_name: HashMap<&str, &Package> =
            second_pkgs.iter().map(|p| (p.name.as_str(), p)).collect();

        for name in first_names.intersection(&second_names) {
            let first_pkg = first_by_name[name];
            let second_pkg = second_by_name[name];

            let first_evr = evr_of(first_pkg, first_label)?;
            let second_evr = evr_of(second_pkg, second_label)?;

            if first_evr.cmp(&second_evr) == Ordering::Greater {
                report.newer_in_first.push(first_pkg.clone());
            }
        }

        debug!(
            "Diffed arch '{}': {} vs {} packages",
            arch,
            first_pkgs.len(),
            second_pkgs.len()
        );
    }

    Ok(report)
}

/// Extract the comparison triple of a package, failing with a typed
/// error naming the package and branch when version or release is
/// absent
fn evr_of(pkg: &Package, branch: &str) -> Result<Evr> {
    let version = pkg.version.as_deref().ok_or_else(|| Error::MissingField {
        package: pkg.name.clone(),
        branch: branch.to_string(),
        field: "version",
    })?;
    let release = pkg.release.as_deref().ok_or_else(|| Error::MissingField {
        package: pkg.name.clone(),
        branch: branch.to_string(),
        field: "release",
    })?;

    Ok(Evr::new(pkg.epoch, version, release))
}
