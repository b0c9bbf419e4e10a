//! Samples filed under another LOT's folder
//!
//! File paths normally embed the LOT code of the chips they hold. A path
//! whose embedded code differs from the record's LOT means the file was
//! saved into the wrong folder.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::{Detector, Finding, FindingKind, Outcome, Subject};
use crate::grouping::group_records;
use crate::record::{Dataset, COL_PATH};
use crate::session::Threshold;

/// LOT-shaped token: `D`, 2 digits, month letter `A`-`L`, 2 digits, any char, 3 digits
pub const FOLDER_CODE_PATTERN: &str = r"D[0-9]{2}[A-L][0-9]{2}.[0-9]{3}";

static FOLDER_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(FOLDER_CODE_PATTERN).expect("FOLDER_CODE_PATTERN is a valid regex"));

/// First LOT-shaped token in a path
pub fn find_folder_code(path: &str) -> Option<&str> {
    FOLDER_CODE.find(path).map(|m| m.as_str())
}

/// Flags a group once when any member's path names a different LOT
///
/// Scanning stops at the first mismatching member. Error-folder records
/// are excluded.
#[derive(Debug, Clone, Copy, Default)]
pub struct FolderMismatch;

impl Detector for FolderMismatch {
    fn name(&self) -> &'static str {
        "folder-mismatch"
    }

    fn detect(&self, dataset: &Dataset, _threshold: Threshold) -> Outcome {
        if !dataset.has_path() {
            return Outcome::Unavailable { column: COL_PATH };
        }

        let mut findings = Vec::new();
        for group in group_records(dataset.without_error_paths()) {
            let mismatch = group.members.iter().find_map(|record| {
                let code = find_folder_code(record.path.as_deref()?)?;
                (code != record.lot).then(|| code.to_string())
            });

            if let Some(code) = mismatch {
                findings.push(Finding {
                    kind: FindingKind::FolderMismatch,
                    subject: Subject::group(&group),
                    detail: format!("found in folder {}", code),
                });
            }
        }

        debug!(detector = self.name(), findings = findings.len(), "Detector finished");
        Outcome::Findings(findings)
    }
}
