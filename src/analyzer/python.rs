use anyhow::Result;
use serde::Deserialize;

use crate::models::{LicenseField, RawDependency};

/// Analyzer for `pip-licenses --format=json` output.
///
/// pip reports `UNKNOWN` when a package declares no license; that is treated
/// the same as a missing license.
pub struct PythonAnalyzer;

impl PythonAnalyzer {
    /// Create a new `PythonAnalyzer`.
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Deserialize)]
struct PipPackage {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Version")]
    version: String,
    #[serde(rename = "License", default)]
    license: Option<String>,
}

impl super::Analyzer for PythonAnalyzer {
    fn analyze(&self, input: &str) -> Result<Vec<RawDependency>> {
        let packages: Vec<PipPackage> = serde_json::from_str(input)?;

        let deps = packages
            .into_iter()
            .map(|p| {
                let license = p
                    .license
                    .filter(|l| l != "UNKNOWN")
                    .map(LicenseField::Expression);
                RawDependency::new(p.name, p.version, license)
            })
            .collect();

        Ok(deps)
    }
}
