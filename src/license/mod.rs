//! License identities, restriction tiers, and the license catalog.
//!
//! - [`catalog`]: the built-in catalog rows (name, URL, tier, SPDX identifiers).
//! - [`spdx`]: SPDX identifier table and expression splitting.
//! - [`overrides`]: version-pinned manual license assignments.
//! - [`lookup`]: resolves a dependency's declared license to catalog entries.

pub mod catalog;
pub mod lookup;
pub mod overrides;
pub mod spdx;

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;
use std::sync::Arc;

use catalog::{LicenseRow, BUILTIN_LICENSES, BUILTIN_VERSION};

/// How freely a license may be used, from most to least restrictive.
///
/// The derived ordering is the one the evaluator relies on:
/// `Forbidden < AmbassadorServers < Unrestricted`. A license whose tier is
/// lower than the tier a deployment context requires cannot be used there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Restriction {
    /// Never usable.
    Forbidden,
    /// Usable only in software that runs on the organization's own servers.
    AmbassadorServers,
    /// Usable anywhere, including software shipped to customers.
    Unrestricted,
}

impl fmt::Display for Restriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Restriction::Forbidden => write!(f, "forbidden"),
            Restriction::AmbassadorServers => write!(f, "internal servers only"),
            Restriction::Unrestricted => write!(f, "unrestricted"),
        }
    }
}

#[derive(Debug)]
struct LicenseData {
    name: String,
    url: String,
    restriction: Restriction,
}

/// A catalog license.
///
/// Values can only be obtained from a [`LicenseCatalog`], so two licenses
/// compare equal exactly when they are the same catalog entry. Cloning is
/// cheap.
#[derive(Clone)]
pub struct License(Arc<LicenseData>);

impl License {
    /// Canonical, human-readable name, e.g. `"MIT License"`.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Reference text location; empty when the license has none.
    pub fn url(&self) -> &str {
        &self.0.url
    }

    pub fn restriction(&self) -> Restriction {
        self.0.restriction
    }
}

impl fmt::Debug for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "License({:?}, {:?})", self.0.name, self.0.restriction)
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl PartialEq for License {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.name == other.0.name
    }
}

impl Eq for License {}

impl Hash for License {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.name.hash(state);
    }
}

impl PartialOrd for License {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for License {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.name.cmp(&other.0.name)
    }
}

/// Errors raised while building license tables or reading license data
/// supplied from outside the process.
#[derive(Debug, thiserror::Error)]
pub enum LicenseError {
    #[error("license catalog entry has an empty name")]
    EmptyName,

    #[error("license catalog contains '{0}' more than once")]
    DuplicateName(String),

    #[error("license '{0}' is not in the license catalog")]
    UnknownLicenseName(String),

    #[error("package '{package}' has an unknown SPDX identifier '{identifier}'")]
    UnknownSpdxIdentifier { package: String, identifier: String },

    #[error("override key '{0}' must be '<package>' or '<package>@<version>'")]
    MalformedOverrideKey(String),

    #[error("override for '{0}' lists no licenses")]
    EmptyOverride(String),

    #[error("internal consistency fault: {0}")]
    InternalConsistency(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// A fixed, versioned set of licenses indexed by canonical name.
#[derive(Debug, Clone)]
pub struct LicenseCatalog {
    version: String,
    licenses: Vec<License>,
    by_name: HashMap<String, License>,
}

/// Input row for [`LicenseCatalog::new`].
#[derive(Debug, Clone)]
pub struct LicenseEntry {
    pub name: String,
    pub url: String,
    pub restriction: Restriction,
}

impl LicenseCatalog {
    /// Build a catalog, rejecting empty or duplicate names.
    pub fn new(
        version: impl Into<String>,
        entries: impl IntoIterator<Item = LicenseEntry>,
    ) -> Result<Self, LicenseError> {
        let mut licenses = Vec::new();
        let mut by_name = HashMap::new();

        for entry in entries {
            if entry.name.trim().is_empty() {
                return Err(LicenseError::EmptyName);
            }
            if by_name.contains_key(&entry.name) {
                return Err(LicenseError::DuplicateName(entry.name));
            }
            let license = License(Arc::new(LicenseData {
                name: entry.name.clone(),
                url: entry.url,
                restriction: entry.restriction,
            }));
            by_name.insert(entry.name, license.clone());
            licenses.push(license);
        }

        Ok(Self {
            version: version.into(),
            licenses,
            by_name,
        })
    }

    /// The catalog shipped with this tool.
    pub fn builtin() -> Result<Self, LicenseError> {
        Self::new(BUILTIN_VERSION, BUILTIN_LICENSES.iter().map(LicenseRow::entry))
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// All licenses in catalog order.
    pub fn licenses(&self) -> &[License] {
        &self.licenses
    }

    /// Look a license up by its canonical name.
    pub fn resolve(&self, name: &str) -> Result<License, LicenseError> {
        self.by_name
            .get(name)
            .cloned()
            .ok_or_else(|| LicenseError::UnknownLicenseName(name.to_string()))
    }

    /// Whether `license` is this catalog's entry for its name, with the same
    /// URL and tier.
    pub fn contains(&self, license: &License) -> bool {
        self.by_name.get(license.name()).is_some_and(|own| {
            Arc::ptr_eq(&own.0, &license.0)
                || (own.url() == license.url() && own.restriction() == license.restriction())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, restriction: Restriction) -> LicenseEntry {
        LicenseEntry {
            name: name.to_string(),
            url: String::new(),
            restriction,
        }
    }

    #[test]
    fn test_restriction_order() {
        assert!(Restriction::Forbidden < Restriction::AmbassadorServers);
        assert!(Restriction::AmbassadorServers < Restriction::Unrestricted);
    }

    #[test]
    fn test_builtin_catalog_resolves_every_entry() {
        let catalog = LicenseCatalog::builtin().unwrap();
        assert!(!catalog.licenses().is_empty());
        for license in catalog.licenses() {
            assert!(!license.name().is_empty());
            assert_eq!(&catalog.resolve(license.name()).unwrap(), license);
        }
    }

    #[test]
    fn test_resolve_unknown_name() {
        let catalog = LicenseCatalog::builtin().unwrap();
        let err = catalog.resolve("Totally Made Up License").unwrap_err();
        assert!(matches!(err, LicenseError::UnknownLicenseName(_)));
    }

    #[test]
    fn test_rejects_empty_name() {
        let err = LicenseCatalog::new("test", vec![entry(" ", Restriction::Unrestricted)]).unwrap_err();
        assert!(matches!(err, LicenseError::EmptyName));
    }

    #[test]
    fn test_rejects_duplicate_name() {
        let err = LicenseCatalog::new(
            "test",
            vec![
                entry("Example", Restriction::Unrestricted),
                entry("Example", Restriction::Forbidden),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, LicenseError::DuplicateName(name) if name == "Example"));
    }

    #[test]
    fn test_contains_rejects_foreign_license_with_other_tier() {
        let ours = LicenseCatalog::new("a", vec![entry("Example", Restriction::Unrestricted)]).unwrap();
        let theirs = LicenseCatalog::new("b", vec![entry("Example", Restriction::Forbidden)]).unwrap();
        let foreign = theirs.resolve("Example").unwrap();
        assert!(!ours.contains(&foreign));
        assert!(ours.contains(&ours.resolve("Example").unwrap()));
    }

    #[test]
    fn test_public_domain_has_no_url() {
        let catalog = LicenseCatalog::builtin().unwrap();
        assert_eq!(catalog.resolve(catalog::PUBLIC_DOMAIN).unwrap().url(), "");
    }
}
