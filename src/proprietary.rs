use std::collections::HashSet;
use std::path::Path;

use crate::license::LicenseError;

/// Internally owned packages that are always excluded from reports.
const DEFAULT_PROPRIETARY_SOFTWARE: &[&str] = &[
    "github.com/datawire/telepresence2-proprietary/",
    "github.com/datawire/saas_app/",
    "github.com/datawire/telepresence-pro/",
];

/// Package names excluded from third-party license reporting.
///
/// Matching is exact; there is no prefix or wildcard matching.
#[derive(Debug, Clone)]
pub struct ProprietarySoftware {
    packages: HashSet<String>,
}

impl ProprietarySoftware {
    /// The built-in defaults plus `extra`.
    pub fn new<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let packages = DEFAULT_PROPRIETARY_SOFTWARE
            .iter()
            .map(|p| p.to_string())
            .chain(extra.into_iter().map(Into::into))
            .collect();
        Self { packages }
    }

    pub fn is_proprietary(&self, package: &str) -> bool {
        self.packages.contains(package)
    }

    /// Add the package names listed in a YAML file (a sequence of strings).
    pub fn load_file(&mut self, path: &Path) -> Result<(), LicenseError> {
        let content = std::fs::read_to_string(path).map_err(|source| LicenseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let packages: Vec<String> =
            serde_yaml::from_str(&content).map_err(|source| LicenseError::Yaml {
                path: path.to_path_buf(),
                source,
            })?;
        self.packages.extend(packages);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }
}

impl Default for ProprietarySoftware {
    fn default() -> Self {
        Self::new(std::iter::empty::<String>())
    }
}
