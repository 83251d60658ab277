//! The scan pipeline: proprietary filter → license lookup → restriction
//! checks → report assembly.

use tracing::{debug, info};

use crate::error::{ScanError, ScanErrors};
use crate::evaluator::check_dependency;
use crate::license::lookup::LicenseLookup;
use crate::license::{LicenseCatalog, Restriction};
use crate::models::{Dependency, DependencyInfo, RawDependency};
use crate::proprietary::ProprietarySoftware;
use crate::report;

/// Read-only tables for one run.
#[derive(Debug, Clone)]
pub struct Scanner {
    catalog: LicenseCatalog,
    lookup: LicenseLookup,
    proprietary: ProprietarySoftware,
}

impl Scanner {
    pub fn new(catalog: LicenseCatalog, lookup: LicenseLookup, proprietary: ProprietarySoftware) -> Self {
        Self {
            catalog,
            lookup,
            proprietary,
        }
    }

    pub fn catalog(&self) -> &LicenseCatalog {
        &self.catalog
    }

    /// Identify the licenses of every non-proprietary dependency.
    ///
    /// All lookup failures are collected before returning.
    pub fn identify(&self, raw: &[RawDependency]) -> Result<Vec<Dependency>, ScanErrors> {
        let mut dependencies = Vec::with_capacity(raw.len());
        let mut errors = Vec::new();

        for dep in raw {
            if self.proprietary.is_proprietary(&dep.name) {
                debug!(package = %dep.name, "skipping proprietary package");
                continue;
            }
            match self.lookup.identify(dep) {
                Ok(licenses) => dependencies.push(Dependency {
                    name: dep.display_name(),
                    version: dep.display_version(),
                    licenses,
                }),
                Err(e) => errors.push(e),
            }
        }

        ScanErrors::check(errors)?;
        Ok(dependencies)
    }

    /// Full pipeline over freshly extracted dependencies.
    pub fn scan(&self, raw: &[RawDependency], context: Restriction) -> Result<DependencyInfo, ScanErrors> {
        info!(count = raw.len(), %context, "scanning dependencies");
        let dependencies = self.identify(raw)?;
        self.evaluate(dependencies, context)
    }

    /// Re-check a previously generated report against `context`.
    pub fn revalidate(&self, dependencies: Vec<Dependency>, context: Restriction) -> Result<DependencyInfo, ScanErrors> {
        info!(count = dependencies.len(), %context, "re-validating report");
        let dependencies = dependencies
            .into_iter()
            .filter(|dep| {
                let keep = !self.proprietary.is_proprietary(dep.package_name());
                if !keep {
                    debug!(package = %dep.package_name(), "skipping proprietary package");
                }
                keep
            })
            .collect();
        self.evaluate(dependencies, context)
    }

    fn evaluate(&self, dependencies: Vec<Dependency>, context: Restriction) -> Result<DependencyInfo, ScanErrors> {
        let errors: Vec<ScanError> = dependencies
            .iter()
            .flat_map(|dep| check_dependency(dep, context))
            .map(ScanError::from)
            .collect();
        ScanErrors::check(errors)?;

        let info = report::assemble(dependencies, &self.catalog).map_err(ScanErrors::from)?;
        info!(
            dependencies = info.dependencies.len(),
            licenses = info.licenses.len(),
            "report assembled"
        );
        Ok(info)
    }
}
