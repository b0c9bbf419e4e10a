//! Records filed under an error folder

use tracing::debug;

use super::{Detector, Finding, FindingKind, Outcome, Subject};
use crate::record::{Dataset, COL_PATH};
use crate::session::Threshold;

/// Flags every record whose `Path` contains "error" (any case)
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorPath;

impl Detector for ErrorPath {
    fn name(&self) -> &'static str {
        "error-path"
    }

    fn detect(&self, dataset: &Dataset, _threshold: Threshold) -> Outcome {
        if !dataset.has_path() {
            return Outcome::Unavailable { column: COL_PATH };
        }

        let findings: Vec<Finding> = dataset
            .error_paths()
            .map(|record| Finding {
                kind: FindingKind::ErrorFile,
                subject: Subject::Record { row: record.row },
                detail: record.path.clone().unwrap_or_default(),
            })
            .collect();

        debug!(detector = self.name(), findings = findings.len(), "Detector finished");
        Outcome::Findings(findings)
    }
}
