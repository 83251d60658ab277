//! Version-pinned license assignments for packages whose declared license
//! cannot be identified automatically.
//!
//! Built-in keys are `"<package>@<version>"`: a new version of an overridden
//! package does not match its old key, so the package has to be reviewed
//! again. Override files may also use a bare `"<package>"` key, which applies
//! to every version of that package. A version-pinned entry wins over a bare
//! one.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use tracing::debug;

use super::spdx::SpdxTable;
use super::{License, LicenseError};

/// Built-in overrides, as `(key, SPDX identifiers)`.
const BUILTIN_OVERRIDES: &[(&str, &[&str])] = &[
    // npm
    ("cyclist@0.2.2", &["MIT"]),
    ("doctrine@1.5.0", &["BSD-2-Clause", "Apache-2.0"]),
    ("emitter-component@1.1.1", &["MIT"]),
    ("flexboxgrid@6.3.1", &["Apache-2.0"]),
    ("indexof@0.0.1", &["MIT"]),
    ("intro.js@4.1.0", &["AGPL-3.0-or-later"]),
    ("json-schema@0.2.3", &["AFL-2.1"]),
    ("node-forge@0.10.0", &["BSD-3-Clause"]),
    ("node-forge@1.3.1", &["BSD-3-Clause"]),
    ("pako@1.0.10", &["MIT"]),
    ("regenerator-transform@0.10.1", &["BSD-2-Clause"]),
    ("regjsparser@0.1.5", &["BSD-2-Clause"]),
    // Go modules
    ("github.com/josharian/intern@v1.0.1-0.20211109044230-42b52b674af5", &["MIT"]),
    ("github.com/dustin/go-humanize@v1.0.0", &["MIT"]),
    ("github.com/garyburd/redigo/internal@v0.0.0-20150301180006-535138d7bcd7", &["Apache-2.0"]),
    ("github.com/garyburd/redigo/redis@v0.0.0-20150301180006-535138d7bcd7", &["Apache-2.0"]),
    ("sigs.k8s.io/json@v0.0.0-20220713155537-f223a00ba0e2", &["Apache-2.0"]),
    ("sigs.k8s.io/json/internal/golang/encoding/json@v0.0.0-20220713155537-f223a00ba0e2", &["BSD-3-Clause"]),
];

/// Licenses assigned to packages whose declared license can't be parsed.
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    /// Keyed by `"<package>@<version>"`.
    versioned: HashMap<String, BTreeSet<License>>,
    /// Keyed by bare package name.
    packages: HashMap<String, BTreeSet<License>>,
}

/// Which map an override key belongs to.
enum OverrideKey<'a> {
    Versioned,
    Package(&'a str),
}

impl OverrideTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The overrides shipped with this tool.
    pub fn builtin(spdx: &SpdxTable) -> Result<Self, LicenseError> {
        let mut table = Self::empty();
        for (key, ids) in BUILTIN_OVERRIDES {
            let licenses = resolve_ids(spdx, key, ids.iter().copied()).map_err(|e| {
                LicenseError::InternalConsistency(format!("built-in override is invalid: {e}"))
            })?;
            table.versioned.insert(key.to_string(), licenses);
        }
        Ok(table)
    }

    /// Insert or replace the override for `key`, either `"<package>@<version>"`
    /// or a bare package name.
    pub fn insert(&mut self, key: &str, licenses: BTreeSet<License>) -> Result<(), LicenseError> {
        if licenses.is_empty() {
            return Err(LicenseError::EmptyOverride(key.to_string()));
        }
        match parse_key(key)? {
            OverrideKey::Versioned => self.versioned.insert(key.to_string(), licenses),
            OverrideKey::Package(name) => self.packages.insert(name.to_string(), licenses),
        };
        Ok(())
    }

    /// Read a YAML map of `"<package>[@<version>]": [SPDX ids]` and add its
    /// entries, replacing any existing override with the same key.
    pub fn load_file(&mut self, path: &Path, spdx: &SpdxTable) -> Result<(), LicenseError> {
        let content = std::fs::read_to_string(path).map_err(|source| LicenseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: BTreeMap<String, Vec<String>> =
            serde_yaml::from_str(&content).map_err(|source| LicenseError::Yaml {
                path: path.to_path_buf(),
                source,
            })?;

        for (key, ids) in &raw {
            let licenses = resolve_ids(spdx, key, ids.iter().map(String::as_str))?;
            debug!(package = %key, count = licenses.len(), "loaded license override");
            self.insert(key, licenses)?;
        }
        Ok(())
    }

    /// The override for this exact version, else for the package as a whole.
    pub fn get(&self, name: &str, version: &str) -> Option<&BTreeSet<License>> {
        self.versioned
            .get(&format!("{name}@{version}"))
            .or_else(|| self.packages.get(name))
    }

    pub fn len(&self) -> usize {
        self.versioned.len() + self.packages.len()
    }
}

/// `name@version` with both parts non-empty is version-pinned. A key with no
/// `@` after its first character (`left-pad`, `@types/node`) is a bare
/// package name.
fn parse_key(key: &str) -> Result<OverrideKey<'_>, LicenseError> {
    if key.trim().is_empty() {
        return Err(LicenseError::MalformedOverrideKey(key.to_string()));
    }
    match key.rsplit_once('@') {
        Some((name, version)) if !name.is_empty() => {
            if version.is_empty() {
                Err(LicenseError::MalformedOverrideKey(key.to_string()))
            } else {
                Ok(OverrideKey::Versioned)
            }
        }
        _ => Ok(OverrideKey::Package(key)),
    }
}

fn resolve_ids<'a>(
    spdx: &SpdxTable,
    package: &str,
    ids: impl IntoIterator<Item = &'a str>,
) -> Result<BTreeSet<License>, LicenseError> {
    let licenses = ids
        .into_iter()
        .map(|id| {
            spdx.get(id)
                .cloned()
                .ok_or_else(|| LicenseError::UnknownSpdxIdentifier {
                    package: package.to_string(),
                    identifier: id.to_string(),
                })
        })
        .collect::<Result<BTreeSet<_>, _>>()?;
    if licenses.is_empty() {
        return Err(LicenseError::EmptyOverride(package.to_string()));
    }
    Ok(licenses)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::license::{catalog, LicenseCatalog};

    fn spdx() -> SpdxTable {
        SpdxTable::builtin(&LicenseCatalog::builtin().unwrap()).unwrap()
    }

    fn names(set: &BTreeSet<License>) -> Vec<&str> {
        set.iter().map(License::name).collect()
    }

    #[test]
    fn test_builtin_overrides_resolve() {
        let table = OverrideTable::builtin(&spdx()).unwrap();
        assert_eq!(table.len(), BUILTIN_OVERRIDES.len());
        assert_eq!(
            names(table.get("doctrine", "1.5.0").unwrap()),
            vec![catalog::APACHE_2, catalog::BSD_2]
        );
    }

    #[test]
    fn test_builtin_overrides_are_version_exact() {
        let table = OverrideTable::builtin(&spdx()).unwrap();
        assert!(table.get("pako", "1.0.10").is_some());
        assert!(table.get("pako", "1.0.11").is_none());
    }

    #[test]
    fn test_load_file() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "\"github.com/alpha/one@v1.0.0\": [Apache-2.0]").unwrap();
        writeln!(f, "\"github.com/beta/two@v0.3.1\": [MIT, LGPL-3.0-only]").unwrap();

        let spdx = spdx();
        let mut table = OverrideTable::empty();
        table.load_file(f.path(), &spdx).unwrap();

        assert_eq!(names(table.get("github.com/alpha/one", "v1.0.0").unwrap()), vec![catalog::APACHE_2]);
        assert_eq!(
            names(table.get("github.com/beta/two", "v0.3.1").unwrap()),
            vec![catalog::LGPL_3_ONLY, catalog::MIT]
        );
    }

    #[test]
    fn test_load_file_replaces_builtin_entry() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "\"pako@1.0.10\": [ISC]").unwrap();

        let spdx = spdx();
        let mut table = OverrideTable::builtin(&spdx).unwrap();
        table.load_file(f.path(), &spdx).unwrap();
        assert_eq!(names(table.get("pako", "1.0.10").unwrap()), vec!["ISC License"]);
    }

    #[test]
    fn test_load_file_invalid_identifier() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "\"github.com/alpha/one@v1.0.0\": [invalid-spdx-id]").unwrap();

        let err = OverrideTable::empty().load_file(f.path(), &spdx()).unwrap_err();
        assert!(matches!(
            err,
            LicenseError::UnknownSpdxIdentifier { ref identifier, .. } if identifier == "invalid-spdx-id"
        ));
    }

    #[test]
    fn test_load_file_rejects_empty_list() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "\"left-pad@1.3.0\": []").unwrap();

        let err = OverrideTable::empty().load_file(f.path(), &spdx()).unwrap_err();
        assert!(matches!(err, LicenseError::EmptyOverride(ref key) if key == "left-pad@1.3.0"));
    }

    #[test]
    fn test_insert_rejects_empty_set() {
        let err = OverrideTable::empty()
            .insert("left-pad@1.3.0", BTreeSet::new())
            .unwrap_err();
        assert!(matches!(err, LicenseError::EmptyOverride(_)));
    }

    #[test]
    fn test_load_file_package_keys() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "github.com/alpha/one:").unwrap();
        writeln!(f, "- Apache-2.0").unwrap();
        writeln!(f, "github.com/beta/two:").unwrap();
        writeln!(f, "- MIT").unwrap();
        writeln!(f, "- LGPL-3.0-only").unwrap();

        let mut table = OverrideTable::empty();
        table.load_file(f.path(), &spdx()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(names(table.get("github.com/alpha/one", "v1.0.0").unwrap()), vec![catalog::APACHE_2]);
        assert_eq!(
            names(table.get("github.com/beta/two", "v2.7.0").unwrap()),
            vec![catalog::LGPL_3_ONLY, catalog::MIT]
        );
    }

    #[test]
    fn test_versioned_entry_wins_over_package_entry() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "pako: [ISC]").unwrap();

        let spdx = spdx();
        let mut table = OverrideTable::builtin(&spdx).unwrap();
        table.load_file(f.path(), &spdx).unwrap();
        assert_eq!(names(table.get("pako", "1.0.10").unwrap()), vec![catalog::MIT]);
        assert_eq!(names(table.get("pako", "2.1.0").unwrap()), vec!["ISC License"]);
    }

    #[test]
    fn test_key_forms() {
        assert!(matches!(parse_key("@types/node@18.0.0"), Ok(OverrideKey::Versioned)));
        assert!(matches!(parse_key("@types/node"), Ok(OverrideKey::Package("@types/node"))));
        assert!(matches!(parse_key("left-pad"), Ok(OverrideKey::Package("left-pad"))));
        assert!(parse_key("left-pad@").is_err());
        assert!(parse_key("").is_err());
    }
}
