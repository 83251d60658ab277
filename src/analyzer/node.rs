use std::collections::BTreeMap;

use anyhow::{bail, Result};
use serde::Deserialize;

use crate::models::{LicenseField, RawDependency};

/// Analyzer for `license-checker --json` output: a map from
/// `"<name>@<version>"` to package details. Output is sorted by key.
pub struct NodeAnalyzer;

impl NodeAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Deserialize)]
struct NodePackage {
    #[serde(default)]
    licenses: Option<LicenseField>,
}

impl super::Analyzer for NodeAnalyzer {
    fn analyze(&self, input: &str) -> Result<Vec<RawDependency>> {
        // BTreeMap keeps the keys sorted.
        let packages: BTreeMap<String, NodePackage> = serde_json::from_str(input)?;
        let mut deps = Vec::with_capacity(packages.len());

        for (id, package) in packages {
            let (name, version) = split_identifier(&id)?;
            deps.push(RawDependency::new(name, version, package.licenses));
        }

        Ok(deps)
    }
}

/// Split `"<name>@<version>"` on the last `@`, so scoped packages such as
/// `@babel/core@7.0.0` keep their leading `@`.
fn split_identifier(id: &str) -> Result<(&str, &str)> {
    match id.rsplit_once('@') {
        Some((name, version)) if !name.is_empty() => Ok((name, version)),
        _ => bail!("npm dependency identifier '{id}' is not of the form <name>@<version>"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::Analyzer;

    #[test]
    fn test_parse_license_checker_output() {
        let json = r#"{
  "react@17.0.2": {
    "licenses": "MIT",
    "repository": "https://github.com/facebook/react",
    "path": "/app/node_modules/react",
    "licenseFile": "/app/node_modules/react/LICENSE"
  },
  "@babel/core@7.16.0": {
    "licenses": "(MIT OR Apache-2.0)"
  },
  "doctrine@1.5.0": {
    "licenses": ["BSD-2-Clause", "Apache-2.0"]
  },
  "left-pad@1.3.0": {}
}"#;
        let deps = NodeAnalyzer::new().analyze(json).unwrap();
        assert_eq!(deps.len(), 4);

        assert_eq!(deps[0].name, "@babel/core");
        assert_eq!(deps[0].version, "7.16.0");
        assert_eq!(deps[0].license, Some(LicenseField::from("(MIT OR Apache-2.0)")));

        assert_eq!(deps[1].name, "doctrine");
        assert_eq!(
            deps[1].license.as_ref().map(LicenseField::to_expression),
            Some("BSD-2-Clause AND Apache-2.0".to_string())
        );

        assert_eq!(deps[2].name, "left-pad");
        assert_eq!(deps[2].license, None);

        assert_eq!(deps[3].name, "react");
    }

    #[test]
    fn test_split_identifier() {
        assert_eq!(split_identifier("@types/node@18.0.0").unwrap(), ("@types/node", "18.0.0"));
        assert_eq!(split_identifier("lodash@4.17.21").unwrap(), ("lodash", "4.17.21"));
        assert!(split_identifier("lodash").is_err());
    }

    #[test]
    fn test_invalid_json() {
        assert!(NodeAnalyzer::new().analyze("{ not json").is_err());
    }
}
