//! Per-detector sections of the combined summary report
//!
//! Each section ends with a blank line so sections can be concatenated.

use super::layout::Lines;
use super::PATH_UNAVAILABLE;
use crate::detectors::{NameField, Outcome, Subject};
use crate::grouping::GroupKey;
use crate::session::Threshold;

pub(crate) const ERROR_FILE_TITLE: &str = "[Error File Check]";
pub(crate) const NO_ERROR_FILES: &str = "No error files found.";

pub(crate) fn error_files(outcome: &Outcome) -> Lines {
    let mut lines = Lines::new();
    lines.push(ERROR_FILE_TITLE);
    match outcome {
        Outcome::Findings(findings) if findings.is_empty() => lines.push(NO_ERROR_FILES),
        Outcome::Findings(findings) => {
            lines.push(format!("{} file(s) are in an ERROR folder.", findings.len()));
            lines.push("File details are listed in [Error File Check].");
        }
        _ => lines.push(PATH_UNAVAILABLE),
    }
    lines.blank();
    lines
}

fn short_key(key: &GroupKey) -> String {
    format!("{} (date {} device {})", key.lot, key.only_date, key.device)
}

pub(crate) fn folder_mismatch(outcome: &Outcome) -> Lines {
    let mut lines = Lines::new();
    lines.push("[Samples in Wrong Folder]");
    match outcome {
        Outcome::Findings(findings) if findings.is_empty() => {
            lines.push("All samples are in the right folder.");
        }
        Outcome::Findings(findings) => {
            for finding in findings {
                if let Subject::Group { key, .. } = &finding.subject {
                    lines.push(format!("{}  {}", short_key(key), finding.detail));
                }
            }
        }
        _ => lines.push(PATH_UNAVAILABLE),
    }
    lines.blank();
    lines
}

pub(crate) fn month_codes(outcome: &Outcome, malformed: &[&str]) -> Lines {
    let mut lines = Lines::new();
    lines.push("[Chip Month Check]");
    let findings = outcome.findings();
    if findings.is_empty() {
        lines.push("No month code errors found.");
    } else {
        lines.push(format!("{} chip(s) carry an invalid month code.", findings.len()));
        for finding in findings {
            lines.push(finding.detail.clone());
        }
    }
    if !malformed.is_empty() {
        lines.push(format!(
            "{} chip code(s) are too short to carry a month code: {}",
            malformed.len(),
            malformed.join(", ")
        ));
    }
    lines.blank();
    lines
}

pub(crate) fn rare_names(field: NameField, outcome: &Outcome, threshold: Threshold) -> Lines {
    let (title, noun) = match field {
        NameField::User => ("[User Name Check]", "user"),
        NameField::Device => ("[Device Name Check]", "device"),
    };

    let mut lines = Lines::new();
    lines.push(title);
    let findings = outcome.findings();
    if findings.is_empty() {
        lines.push(format!("No {} name errors found.", noun));
    } else {
        lines.push(format!(
            "Suspected mistyped {} names (threshold = {}):",
            noun, threshold
        ));
        for finding in findings {
            if let Subject::Name { value, count, .. } = &finding.subject {
                lines.push(format!("{} ({})", value, count));
            }
        }
    }
    lines.blank();
    lines
}

pub(crate) fn id_errors(outcome: &Outcome) -> Lines {
    let mut lines = Lines::new();
    lines.push("[ID Error Detection]");
    match outcome {
        Outcome::Findings(findings) if !findings.is_empty() => {
            lines.push(format!("{} ID error(s) found.", findings.len()));
            for finding in findings {
                lines.push(finding.detail.clone());
            }
        }
        Outcome::Findings(_) => lines.push("No ID errors found."),
        Outcome::NotImplemented => lines.push("Not able to find errors"),
        Outcome::Unavailable { column } => lines.push(format!("{} data is unavailable.", column)),
    }
    lines.blank();
    lines
}
