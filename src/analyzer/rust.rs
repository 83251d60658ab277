use anyhow::Result;
use serde::Deserialize;

use crate::models::{LicenseField, RawDependency};

#[derive(Debug, Deserialize)]
struct CargoMetadata {
    #[serde(default)]
    packages: Vec<CargoPackage>,
}

#[derive(Debug, Deserialize)]
struct CargoPackage {
    name: String,
    version: String,
    license: Option<String>,
    /// Packages without a `source` field are local workspace members.
    source: Option<String>,
}

/// Analyzer for `cargo metadata --format-version 1` output.
pub struct RustAnalyzer;

impl RustAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl super::Analyzer for RustAnalyzer {
    fn analyze(&self, input: &str) -> Result<Vec<RawDependency>> {
        let metadata: CargoMetadata = serde_json::from_str(input)?;

        let mut deps: Vec<RawDependency> = metadata
            .packages
            .into_iter()
            // Skip local workspace members (they have no `source`)
            .filter(|p| p.source.is_some())
            .map(|p| RawDependency::new(p.name, p.version, p.license.map(LicenseField::Expression)))
            .collect();

        deps.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.version.cmp(&b.version)));
        Ok(deps)
    }
}
