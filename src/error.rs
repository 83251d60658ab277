use std::fmt;

use crate::evaluator::Violation;
use crate::wordwrap::wordwrap;

/// A single problem found while scanning dependencies.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    #[error("Dependency '{name}@{version}' is missing a license identifier.")]
    MissingLicense { name: String, version: String },

    #[error("Dependency '{name}@{version}' has an unknown SPDX identifier '{identifier}'.")]
    UnknownIdentifier {
        name: String,
        version: String,
        identifier: String,
    },

    #[error("{0}")]
    Violation(Violation),

    /// Data produced by this tool failed to round-trip through the catalog.
    #[error("internal consistency fault: {0}")]
    InternalConsistency(String),
}

impl ScanError {
    fn is_identification(&self) -> bool {
        matches!(
            self,
            ScanError::MissingLicense { .. } | ScanError::UnknownIdentifier { .. }
        )
    }
}

impl From<Violation> for ScanError {
    fn from(violation: Violation) -> Self {
        ScanError::Violation(violation)
    }
}

/// Every problem found in one run. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanErrors(Vec<ScanError>);

impl ScanErrors {
    /// `Ok` when `errors` is empty, otherwise the whole batch as one error.
    pub fn check(errors: Vec<ScanError>) -> Result<(), ScanErrors> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ScanErrors(errors))
        }
    }

    pub fn errors(&self) -> &[ScanError] {
        &self.0
    }

    pub fn is_internal(&self) -> bool {
        self.0
            .iter()
            .any(|e| matches!(e, ScanError::InternalConsistency(_)))
    }

    fn explanation(&self) -> String {
        let mut text = String::new();
        if self.0.iter().any(ScanError::is_identification) {
            text.push_str(
                "This probably means that you added or upgraded a dependency,
                and the license checker can't confidently identify what the
                license is.  (This is a good thing, because it is reminding you
                to check the license of libraries before using them.)

                If the identifier is a real license, add it to the license
                catalog.  If only this exact version of the package is
                affected, add a version-pinned entry to the unparsable
                packages file instead.\n\n",
            );
        }
        if self.0.iter().any(|e| matches!(e, ScanError::Violation(_))) {
            text.push_str(
                "Some dependencies use licenses that are not permitted for this
                kind of application.  Remove or replace those dependencies, or
                get approval and rerun with the correct application type.\n\n",
            );
        }
        if self.is_internal() {
            text.push_str(
                "An internal consistency fault is a defect in the license
                catalog, not a problem with your dependencies.  Please report
                it.\n\n",
            );
        }
        wordwrap(4, 72, &text)
    }
}

impl fmt::Display for ScanErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} license problem(s) found:", self.0.len())?;
        for error in self.errors() {
            writeln!(f, "  - {error}")?;
        }
        write!(f, "\n{}", self.explanation())
    }
}

impl std::error::Error for ScanErrors {}

impl From<ScanError> for ScanErrors {
    fn from(error: ScanError) -> Self {
        ScanErrors(vec![error])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::ViolationReason;

    #[test]
    fn test_check_empty_is_ok() {
        assert!(ScanErrors::check(Vec::new()).is_ok());
    }

    #[test]
    fn test_display_lists_every_error() {
        let errors = ScanErrors::check(vec![
            ScanError::MissingLicense {
                name: "left-pad".to_string(),
                version: "1.3.0".to_string(),
            },
            ScanError::UnknownIdentifier {
                name: "CacheControl".to_string(),
                version: "0.12.6".to_string(),
                identifier: "UNKNOWN".to_string(),
            },
            Violation {
                dependency: "infomap".to_string(),
                version: "2.0.2".to_string(),
                license: "GNU Affero General Public License v3.0 or later".to_string(),
                reason: ViolationReason::Forbidden,
            }
            .into(),
        ])
        .unwrap_err();

        let text = errors.to_string();
        assert!(text.starts_with("3 license problem(s) found:\n"));
        assert!(text.contains("Dependency 'left-pad@1.3.0' is missing a license identifier."));
        assert!(text.contains("Dependency 'CacheControl@0.12.6' has an unknown SPDX identifier 'UNKNOWN'."));
        assert!(text.contains(
            "Dependency 'infomap@2.0.2' uses license 'GNU Affero General Public License v3.0 or later' which is forbidden."
        ));
        assert!(text.contains("    This probably means"));
        assert!(text.contains("    Some dependencies use licenses"));
        assert!(!errors.is_internal());
    }

    #[test]
    fn test_explanation_lines_fit_width() {
        let errors = ScanErrors::check(vec![ScanError::InternalConsistency("x".to_string())]).unwrap_err();
        assert!(errors.is_internal());
        for line in errors.explanation().lines() {
            assert!(line.chars().count() <= 72, "{line:?}");
        }
    }
}
