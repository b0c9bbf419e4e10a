//! Combined error summary report
//!
//! Runs every detector in a fixed order and concatenates their sections.
//! A detector with no findings or missing optional data still yields its
//! section; nothing here aborts the report.

use tracing::debug;

use super::layout::Lines;
use super::{sections, NO_DATA};
use crate::detectors::{Detector, ErrorPath, FolderMismatch, IdError, MonthCode, NameFrequency};
use crate::record::Dataset;
use crate::session::Threshold;

/// Error path → folder → month code → device names → user names → ID errors
pub fn error_summary_report(dataset: Option<&Dataset>, threshold: Threshold) -> String {
    let Some(dataset) = dataset else {
        return NO_DATA.to_string();
    };

    let mut lines = Lines::new();

    lines.extend(sections::error_files(&ErrorPath.detect(dataset, threshold)));

    lines.push("File details for the issues below are listed in [Samples to Check].");
    lines.blank();

    lines.extend(sections::folder_mismatch(&FolderMismatch.detect(dataset, threshold)));
    lines.extend(sections::month_codes(
        &MonthCode.detect(dataset, threshold),
        &MonthCode.malformed(dataset),
    ));

    lines.push("Samples not covered by the checks above are listed in [Samples to Check].");
    lines.blank();

    let devices = NameFrequency::devices();
    lines.extend(sections::rare_names(devices.field, &devices.detect(dataset, threshold), threshold));
    let users = NameFrequency::users();
    lines.extend(sections::rare_names(users.field, &users.detect(dataset, threshold), threshold));

    lines.extend(sections::id_errors(&IdError.detect(dataset, threshold)));

    debug!(records = dataset.len(), %threshold, "Composed error summary");
    lines.finish()
}
