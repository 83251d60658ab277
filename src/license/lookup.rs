use std::collections::BTreeSet;

use tracing::debug;

use super::overrides::OverrideTable;
use super::spdx::{ExpressionSplitter, SpdxTable};
use super::{License, LicenseCatalog, LicenseError};
use crate::error::ScanError;
use crate::models::RawDependency;

/// Resolves a dependency's declared license to catalog licenses.
#[derive(Debug, Clone)]
pub struct LicenseLookup {
    spdx: SpdxTable,
    overrides: OverrideTable,
    splitter: ExpressionSplitter,
}

impl LicenseLookup {
    pub fn new(spdx: SpdxTable, overrides: OverrideTable) -> Result<Self, LicenseError> {
        let splitter = ExpressionSplitter::new()
            .map_err(|e| LicenseError::InternalConsistency(format!("invalid expression pattern: {e}")))?;
        Ok(Self {
            spdx,
            overrides,
            splitter,
        })
    }

    /// Built-in identifier table and overrides for `catalog`.
    #[cfg(test)]
    pub fn builtin(catalog: &LicenseCatalog) -> Result<Self, LicenseError> {
        let spdx = SpdxTable::builtin(catalog)?;
        let overrides = OverrideTable::builtin(&spdx)?;
        Self::new(spdx, overrides)
    }

    /// Identify the licenses of `dependency`.
    ///
    /// Each candidate of the split expression must be a known identifier. At
    /// the first unknown candidate the override for `name@version`, or failing
    /// that for the bare package name, is consulted; if present it replaces
    /// everything found so far and lookup stops.
    pub fn identify(&self, dependency: &RawDependency) -> Result<BTreeSet<License>, ScanError> {
        let expression = dependency
            .license
            .as_ref()
            .map(|field| field.to_expression())
            .unwrap_or_default();

        if expression.is_empty() {
            return Err(ScanError::MissingLicense {
                name: dependency.name.clone(),
                version: dependency.version.clone(),
            });
        }

        let mut licenses = BTreeSet::new();
        for candidate in self.splitter.split(&expression) {
            if let Some(license) = self.spdx.get(&candidate) {
                licenses.insert(license.clone());
                continue;
            }

            if let Some(overridden) = self.overrides.get(&dependency.name, &dependency.version) {
                debug!(package = %dependency.key(), "using license override");
                return Ok(overridden.clone());
            }

            return Err(ScanError::UnknownIdentifier {
                name: dependency.name.clone(),
                version: dependency.version.clone(),
                identifier: candidate,
            });
        }
        Ok(licenses)
    }
}
