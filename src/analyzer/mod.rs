//! Manifest extraction: turn a package manager's dependency dump into
//! [`RawDependency`] tuples.
//!
//! - [`node`]: `license-checker --json` output.
//! - [`python`]: `pip-licenses --format=json` output.
//! - [`rust`]: `cargo metadata --format-version 1` output.
//! - [`normalized`]: the tool's own normalized dependency list.
//! - [`report`]: a previously generated report, for re-validation.

use anyhow::Result;

use crate::models::RawDependency;

pub mod node;
pub mod normalized;
pub mod python;
pub mod report;
pub mod rust;

pub trait Analyzer {
    fn analyze(&self, input: &str) -> Result<Vec<RawDependency>>;
}
