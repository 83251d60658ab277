use anyhow::Result;

use crate::models::RawDependency;

/// Analyzer for a normalized dependency list:
/// `[{"name", "version", "license": string | [string] | null, "replaces"?}]`.
/// Input order is preserved.
pub struct NormalizedAnalyzer;

impl NormalizedAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl super::Analyzer for NormalizedAnalyzer {
    fn analyze(&self, input: &str) -> Result<Vec<RawDependency>> {
        Ok(serde_json::from_str(input)?)
    }
}
