// src/lib.rs

//! branchdiff
//!
//! Command-line utility for comparing the binary package sets of two
//! ALT Linux branches.
//!
//! # Architecture
//!
//! - API boundary: typed package records fetched from the public
//!   branch export endpoint, unknown fields preserved verbatim
//! - Grouping: packages partitioned by CPU architecture per branch
//! - Diffing: per-architecture name-set differences plus an RPM
//!   version-release comparison for packages shared by both branches
//! - Report: three lists keyed by the branch names, written as
//!   pretty-printed JSON

pub mod api;
pub mod compare;
mod error;
pub mod version;

pub use error::{Error, Result};
