use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize, Serializer};

use crate::license::spdx::join_license_list;
use crate::license::License;

/// A package's declared license: an expression string, or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LicenseField {
    Expression(String),
    List(Vec<String>),
}

impl LicenseField {
    /// A list is treated as the conjunction of its entries.
    pub fn to_expression(&self) -> String {
        match self {
            LicenseField::Expression(expr) => expr.clone(),
            LicenseField::List(list) => join_license_list(list),
        }
    }
}

impl From<&str> for LicenseField {
    fn from(expr: &str) -> Self {
        LicenseField::Expression(expr.to_string())
    }
}

/// One resolved package as produced by manifest extraction, before license
/// identification.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawDependency {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub license: Option<LicenseField>,
    /// The package this one locally replaces, if any.
    #[serde(default)]
    pub replaces: Option<String>,
}

impl RawDependency {
    pub fn new(name: impl Into<String>, version: impl Into<String>, license: Option<LicenseField>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            license,
            replaces: None,
        }
    }

    /// `name@version`, the form of a version-pinned override key.
    pub fn key(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }

    /// Name as shown in the report, annotated when the package is a local
    /// replacement of another one.
    pub fn display_name(&self) -> String {
        match &self.replaces {
            Some(original) if original != &self.name => {
                format!("{} (modified from {})", self.name, original)
            }
            _ => self.name.clone(),
        }
    }

    /// Version as shown in the report; untagged replacements are `(modified)`.
    pub fn display_version(&self) -> String {
        if self.replaces.is_some() && self.version.is_empty() {
            "(modified)".to_string()
        } else {
            self.version.clone()
        }
    }
}

/// A dependency with identified licenses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    pub name: String,
    pub version: String,
    #[serde(serialize_with = "serialize_license_names")]
    pub licenses: BTreeSet<License>,
}

impl Dependency {
    /// The package name without the ` (modified from ...)` annotation that
    /// replacement packages carry in a report.
    pub fn package_name(&self) -> &str {
        match self.name.split_once(" (modified from ") {
            Some((name, _)) => name,
            None => &self.name,
        }
    }
}

fn serialize_license_names<S: Serializer>(
    licenses: &BTreeSet<License>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(licenses.iter().map(License::name))
}

/// The attribution report: dependencies in input order plus a deduplicated
/// map of license name to reference URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependencyInfo {
    pub dependencies: Vec<Dependency>,
    #[serde(rename = "licenseInfo")]
    pub licenses: BTreeMap<String, String>,
}

impl DependencyInfo {
    pub fn new() -> Self {
        Self::default()
    }
}
