use std::collections::HashMap;

use regex::Regex;

use super::catalog::BUILTIN_LICENSES;
use super::{License, LicenseCatalog, LicenseError};

/// Maps SPDX identifiers (and a handful of well-known non-SPDX aliases) to
/// catalog licenses. Every value is a member of the catalog it was built from.
#[derive(Debug, Clone)]
pub struct SpdxTable {
    entries: HashMap<String, License>,
}

impl SpdxTable {
    /// Build a table from `(identifier, canonical license name)` pairs.
    ///
    /// Fails if a name does not resolve through `catalog`.
    pub fn new<I, K, V>(catalog: &LicenseCatalog, pairs: I) -> Result<Self, LicenseError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut entries = HashMap::new();
        for (id, name) in pairs {
            let license = catalog.resolve(name.as_ref())?;
            entries.insert(id.into(), license);
        }
        Ok(Self { entries })
    }

    /// The identifier table for [`LicenseCatalog::builtin`].
    ///
    /// Any failure here means the built-in rows disagree with the catalog.
    pub fn builtin(catalog: &LicenseCatalog) -> Result<Self, LicenseError> {
        let pairs = BUILTIN_LICENSES
            .iter()
            .flat_map(|row| row.identifiers.iter().map(move |id| (*id, row.name)));
        Self::new(catalog, pairs).map_err(|e| match e {
            LicenseError::UnknownLicenseName(name) => LicenseError::InternalConsistency(format!(
                "SPDX table references '{name}', which the catalog does not define"
            )),
            other => other,
        })
    }

    /// Exact, case-sensitive lookup.
    pub fn get(&self, identifier: &str) -> Option<&License> {
        self.entries.get(identifier)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Splits a flat SPDX expression into candidate identifiers.
///
/// One enclosing pair of parentheses is stripped, then the string is split on
/// the literal separators `" OR "` and `" AND "`. There is no precedence and
/// no nesting; `"(MIT OR Apache-2.0)"` yields `["MIT", "Apache-2.0"]`.
#[derive(Debug, Clone)]
pub struct ExpressionSplitter {
    parens: Regex,
    separator: Regex,
}

impl ExpressionSplitter {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            parens: Regex::new(r"^\(|\)$")?,
            separator: Regex::new(r" OR | AND ")?,
        })
    }

    pub fn split(&self, expression: &str) -> Vec<String> {
        let stripped = self.parens.replace_all(expression, "");
        self.separator
            .split(&stripped)
            .map(str::to_string)
            .collect()
    }
}

/// Join a list-valued license field into a single expression.
pub fn join_license_list(licenses: &[String]) -> String {
    licenses.join(" AND ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::license::catalog;

    fn splitter() -> ExpressionSplitter {
        ExpressionSplitter::new().unwrap()
    }

    #[test]
    fn test_split_parenthesized_or() {
        assert_eq!(splitter().split("(MIT OR Apache-2.0)"), vec!["MIT", "Apache-2.0"]);
    }

    #[test]
    fn test_split_mixed_operators_is_flat() {
        assert_eq!(
            splitter().split("MIT AND BSD-3-Clause OR ISC"),
            vec!["MIT", "BSD-3-Clause", "ISC"]
        );
    }

    #[test]
    fn test_split_is_case_sensitive() {
        assert_eq!(splitter().split("MIT or ISC"), vec!["MIT or ISC"]);
    }

    #[test]
    fn test_split_single_identifier() {
        assert_eq!(splitter().split("MIT"), vec!["MIT"]);
    }

    #[test]
    fn test_join_license_list() {
        let list = vec!["MIT".to_string(), "ISC".to_string()];
        assert_eq!(join_license_list(&list), "MIT AND ISC");
    }

    #[test]
    fn test_builtin_table_values_are_catalog_members() {
        let catalog = LicenseCatalog::builtin().unwrap();
        let table = SpdxTable::builtin(&catalog).unwrap();
        assert!(table.len() > 0);
        for row in catalog::BUILTIN_LICENSES {
            for id in row.identifiers {
                let license = table.get(id).unwrap();
                assert!(catalog.contains(license));
                assert_eq!(license.name(), row.name);
            }
        }
    }

    #[test]
    fn test_lookup_is_exact() {
        let catalog = LicenseCatalog::builtin().unwrap();
        let table = SpdxTable::builtin(&catalog).unwrap();
        assert_eq!(table.get("MIT").unwrap().name(), catalog::MIT);
        assert!(table.get("mit").is_none());
        assert!(table.get(" MIT").is_none());
    }

    #[test]
    fn test_orphan_values_are_rejected() {
        let catalog = LicenseCatalog::builtin().unwrap();
        let err = SpdxTable::new(&catalog, vec![("X-1.0", "Not In Catalog")]).unwrap_err();
        assert!(matches!(err, LicenseError::UnknownLicenseName(_)));
    }
}
