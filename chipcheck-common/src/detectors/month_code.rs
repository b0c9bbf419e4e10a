//! Chip month-code check
//!
//! Character index 3 of a chip code encodes the manufacturing month as a
//! letter `A` (January) through `L` (December).

use tracing::debug;

use super::{Detector, Finding, FindingKind, Outcome, Subject};
use crate::record::Dataset;
use crate::session::Threshold;

pub const VALID_MONTH_CODES: &str = "ABCDEFGHIJKL";

const MONTH_CODE_INDEX: usize = 3;

/// Month-code character of a chip, `None` when the chip is too short to carry one
pub fn month_code(chip: &str) -> Option<char> {
    chip.chars().nth(MONTH_CODE_INDEX)
}

/// Flags records whose month-code character is not `A`-`L`
///
/// Chips of 3 characters or fewer carry no month code; they are skipped
/// here and reported as malformed by the formatter.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonthCode;

impl MonthCode {
    /// Chips too short to carry a month code
    pub fn malformed<'a>(&self, dataset: &'a Dataset) -> Vec<&'a str> {
        dataset
            .records()
            .iter()
            .filter(|r| month_code(&r.chip).is_none())
            .map(|r| r.chip.as_str())
            .collect()
    }
}

impl Detector for MonthCode {
    fn name(&self) -> &'static str {
        "month-code"
    }

    fn detect(&self, dataset: &Dataset, _threshold: Threshold) -> Outcome {
        let findings: Vec<Finding> = dataset
            .records()
            .iter()
            .filter_map(|record| {
                let code = month_code(&record.chip)?;
                (!VALID_MONTH_CODES.contains(code)).then(|| Finding {
                    kind: FindingKind::MonthCodeInvalid,
                    subject: Subject::Record { row: record.row },
                    detail: record.chip.clone(),
                })
            })
            .collect();

        debug!(detector = self.name(), findings = findings.len(), "Detector finished");
        Outcome::Findings(findings)
    }
}
