use std::collections::BTreeSet;

use anyhow::Result;
use serde::Deserialize;

use crate::license::{LicenseCatalog, LicenseError};
use crate::models::Dependency;

/// Wire form of a previously generated report. The `licenseInfo` index is
/// derived data and is rebuilt on re-assembly, so it is not read back.
#[derive(Debug, Deserialize)]
struct ReportDocument {
    dependencies: Vec<ReportEntry>,
}

#[derive(Debug, Deserialize)]
struct ReportEntry {
    name: String,
    version: String,
    licenses: Vec<String>,
}

/// Reads back a `DependencyInfo` JSON document, resolving every license by
/// canonical name through the catalog.
pub struct ReportAnalyzer<'a> {
    catalog: &'a LicenseCatalog,
}

impl<'a> ReportAnalyzer<'a> {
    pub fn new(catalog: &'a LicenseCatalog) -> Self {
        Self { catalog }
    }

    pub fn analyze(&self, input: &str) -> Result<Vec<Dependency>> {
        let document: ReportDocument = serde_json::from_str(input)?;
        let mut dependencies = Vec::with_capacity(document.dependencies.len());

        for entry in document.dependencies {
            let licenses = entry
                .licenses
                .iter()
                .map(|name| self.catalog.resolve(name))
                .collect::<Result<BTreeSet<_>, LicenseError>>()?;
            dependencies.push(Dependency {
                name: entry.name,
                version: entry.version,
                licenses,
            });
        }

        Ok(dependencies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::license::catalog;

    #[test]
    fn test_parse_report() {
        let catalog = LicenseCatalog::builtin().unwrap();
        let data = r#"{"dependencies":[
            {"name":"library1","version":"1.0.2","licenses":["BSD 2-Clause \"Simplified\" License","GNU General Public License v3.0 only"]},
            {"name":"library2","version":"3.1.2","licenses":["Public domain"]}
        ],"licenseInfo":{}}"#;

        let deps = ReportAnalyzer::new(&catalog).analyze(data).unwrap();
        assert_eq!(deps.len(), 2);
        assert!(deps[0]
            .licenses
            .contains(&catalog.resolve(catalog::GPL_3_ONLY).unwrap()));
        assert_eq!(deps[1].licenses.len(), 1);
    }

    #[test]
    fn test_unknown_license_name_is_rejected() {
        let catalog = LicenseCatalog::builtin().unwrap();
        let data = r#"{"dependencies":[{"name":"a","version":"1","licenses":["MIT Licence"]}],"licenseInfo":{}}"#;
        let err = ReportAnalyzer::new(&catalog).analyze(data).unwrap_err();
        assert!(err.to_string().contains("MIT Licence"));
    }
}
