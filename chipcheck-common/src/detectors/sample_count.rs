//! Groups with too few or too many samples
//!
//! A full group holds at most [`MAX_GROUP_SIZE`] chips; fewer than the
//! threshold usually means chip info was mis-typed into another group.

use tracing::debug;

use super::{Detector, Finding, FindingKind, Outcome, Subject};
use crate::grouping::group_records;
use crate::record::Dataset;
use crate::session::Threshold;

/// Fixed upper bound on group size
pub const MAX_GROUP_SIZE: usize = 8;

/// Flags groups with `count < threshold` or `count > 8`
///
/// Error-folder records are excluded before grouping when the dataset
/// has a `Path` column.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleCount;

impl Detector for SampleCount {
    fn name(&self) -> &'static str {
        "sample-count"
    }

    fn detect(&self, dataset: &Dataset, threshold: Threshold) -> Outcome {
        let findings: Vec<Finding> = group_records(dataset.without_error_paths())
            .iter()
            .filter(|group| group.len() < threshold.get() || group.len() > MAX_GROUP_SIZE)
            .map(|group| Finding {
                kind: FindingKind::LowOrHighSampleCount,
                subject: Subject::group(group),
                detail: format!("{} samples", group.len()),
            })
            .collect();

        debug!(detector = self.name(), findings = findings.len(), "Detector finished");
        Outcome::Findings(findings)
    }
}
