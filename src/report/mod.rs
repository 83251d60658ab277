//! Report assembly and renderers.
//!
//! - [`json`]: the `DependencyInfo` wire format consumed by downstream tooling.
//! - [`markdown`]: dependency table plus linked license list.
//! - [`terminal`]: colored, tabular output with a summary box.

pub mod json;
pub mod markdown;
pub mod terminal;

use crate::error::ScanError;
use crate::license::LicenseCatalog;
use crate::models::{Dependency, DependencyInfo};

/// Rebuild the license-name → URL index from the report's dependencies.
///
/// Every license must be an entry of `catalog`; anything else means the
/// report was built from licenses this tool did not produce.
pub fn update_license_list(info: &mut DependencyInfo, catalog: &LicenseCatalog) -> Result<(), ScanError> {
    info.licenses.clear();
    for dependency in &info.dependencies {
        for license in &dependency.licenses {
            if !catalog.contains(license) {
                return Err(ScanError::InternalConsistency(format!(
                    "license '{}' on '{}@{}' does not resolve through the license catalog",
                    license.name(),
                    dependency.name,
                    dependency.version
                )));
            }
            info.licenses
                .insert(license.name().to_string(), license.url().to_string());
        }
    }
    Ok(())
}

/// Build a report from accepted dependencies, keeping their order and any
/// duplicates. Only the license index is deduplicated.
pub fn assemble(
    dependencies: impl IntoIterator<Item = Dependency>,
    catalog: &LicenseCatalog,
) -> Result<DependencyInfo, ScanError> {
    let mut info = DependencyInfo::new();
    info.dependencies.extend(dependencies);
    update_license_list(&mut info, catalog)?;
    Ok(info)
}
