//! Restriction checks for a dependency's licenses against a deployment context.

use std::fmt;

use serde::Deserialize;

use crate::license::{License, Restriction};
use crate::models::Dependency;

/// Where the application being scanned will run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationType {
    /// Runs only on the organization's own servers.
    Internal,
    /// Distributed to and run on customer machines.
    #[default]
    External,
}

impl ApplicationType {
    /// The lowest restriction tier a license needs to be usable here.
    pub fn restriction(self) -> Restriction {
        match self {
            ApplicationType::Internal => Restriction::AmbassadorServers,
            ApplicationType::External => Restriction::Unrestricted,
        }
    }
}

impl fmt::Display for ApplicationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplicationType::Internal => write!(f, "internal"),
            ApplicationType::External => write!(f, "external"),
        }
    }
}

/// Why a license failed its check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationReason {
    /// The license is never usable.
    Forbidden,
    /// The license is not usable in a context requiring this tier.
    NotAllowedIn(Restriction),
}

impl fmt::Display for ViolationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationReason::Forbidden => write!(f, "is forbidden"),
            ViolationReason::NotAllowedIn(Restriction::Unrestricted) => {
                write!(f, "is not allowed on applications that run on customer machines")
            }
            ViolationReason::NotAllowedIn(Restriction::AmbassadorServers) => {
                write!(f, "is not allowed on applications that run on internal servers")
            }
            ViolationReason::NotAllowedIn(Restriction::Forbidden) => {
                write!(f, "cannot be authorized when every license is forbidden")
            }
        }
    }
}

/// One non-compliant license on one dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub dependency: String,
    pub version: String,
    pub license: String,
    pub reason: ViolationReason,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dependency '{}@{}' uses license '{}' which {}.",
            self.dependency, self.version, self.license, self.reason
        )
    }
}

/// Check a single license against the tier the context requires.
pub fn check_license(license: &License, context: Restriction) -> Option<ViolationReason> {
    if license.restriction() == Restriction::Forbidden {
        return Some(ViolationReason::Forbidden);
    }
    // A forbidden context authorizes nothing, so it must not fall through to
    // the ordering comparison below.
    if context == Restriction::Forbidden || license.restriction() < context {
        return Some(ViolationReason::NotAllowedIn(context));
    }
    None
}

/// Every violation on `dependency`, one per offending license, in license
/// name order. An empty result means the dependency is compliant.
pub fn check_dependency(dependency: &Dependency, context: Restriction) -> Vec<Violation> {
    dependency
        .licenses
        .iter()
        .filter_map(|license| {
            check_license(license, context).map(|reason| Violation {
                dependency: dependency.name.clone(),
                version: dependency.version.clone(),
                license: license.name().to_string(),
                reason,
            })
        })
        .collect()
}
