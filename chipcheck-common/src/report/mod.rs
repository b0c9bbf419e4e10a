//! Report formatters
//!
//! Each report takes the active dataset (`None` before any load) and the
//! threshold and returns plain text. Output depends only on its inputs,
//! so repeated calls without a new load are byte-identical.

use crate::detectors::{
    name_counts, Detector, ErrorPath, IdError, NameField, Outcome, SampleCount, Subject,
};
use crate::grouping::{group_records, Group};
use crate::record::{Dataset, Record};
use crate::session::Threshold;

mod compose;
mod layout;
mod sections;

pub use compose::error_summary_report;

use layout::{count_line, push_group, push_table_header, Lines};

/// Canonical text for every report before a dataset is loaded
pub const NO_DATA: &str = "No data available.";

pub const PATH_UNAVAILABLE: &str = "Path data is unavailable.";

/// Records referenced by record-scoped findings, in source order
fn finding_records<'a>(dataset: &'a Dataset, outcome: &Outcome) -> Vec<&'a Record> {
    outcome
        .findings()
        .iter()
        .filter_map(|f| match f.subject {
            Subject::Record { row } => dataset.get(row),
            _ => None,
        })
        .collect()
}

/// Groups referenced by group-scoped findings, in finding order
fn finding_groups<'a>(dataset: &'a Dataset, outcome: &Outcome) -> Vec<Group<'a>> {
    outcome
        .findings()
        .iter()
        .filter_map(|f| match &f.subject {
            Subject::Group { key, rows } => Some(Group {
                key: key.clone(),
                members: rows.iter().filter_map(|row| dataset.get(*row)).collect(),
            }),
            _ => None,
        })
        .collect()
}

/// Every group with all of its members and sample counts
pub fn summarize(dataset: Option<&Dataset>) -> String {
    let Some(dataset) = dataset else {
        return NO_DATA.to_string();
    };
    let with_path = dataset.has_path();

    let mut lines = Lines::new();
    lines.push("[DB Summary]");
    push_table_header(&mut lines, with_path);

    if dataset.is_empty() {
        lines.push("No records loaded.");
        lines.blank();
        return lines.finish();
    }

    for group in group_records(dataset.records()) {
        push_group(&mut lines, &group, with_path);
        if with_path {
            let errors = group.members.iter().filter(|r| r.in_error_folder()).count();
            lines.push(format!(
                "Sample number : {} ( {} error files found )",
                group.len(),
                errors
            ));
        } else {
            lines.push(format!("Sample number : {}", group.len()));
        }
        lines.blank();
    }

    lines.finish()
}

/// Records filed under an error folder, grouped by key
pub fn check_error_files(dataset: Option<&Dataset>, threshold: Threshold) -> String {
    let Some(dataset) = dataset else {
        return NO_DATA.to_string();
    };

    let mut lines = Lines::new();
    lines.push(sections::ERROR_FILE_TITLE);

    match ErrorPath.detect(dataset, threshold) {
        Outcome::Findings(findings) if findings.is_empty() => {
            lines.push(sections::NO_ERROR_FILES);
        }
        outcome @ Outcome::Findings(_) => {
            let records = finding_records(dataset, &outcome);
            lines.push(format!("{} file(s) are in an ERROR folder.", records.len()));
            lines.blank();
            push_table_header(&mut lines, true);
            for group in group_records(records) {
                push_group(&mut lines, &group, true);
            }
        }
        _ => lines.push(PATH_UNAVAILABLE),
    }
    lines.blank();

    lines.finish()
}

/// Groups whose size falls outside [threshold, 8]
pub fn samples_to_check(dataset: Option<&Dataset>, threshold: Threshold) -> String {
    let Some(dataset) = dataset else {
        return NO_DATA.to_string();
    };
    let with_path = dataset.has_path();

    let outcome = SampleCount.detect(dataset, threshold);
    let groups = finding_groups(dataset, &outcome);

    let mut lines = Lines::new();
    lines.push("[Chip Info Check]");
    if !groups.is_empty() {
        lines.push(format!(
            "{} group(s) look like mis-entered chip info (threshold = {}).",
            groups.len(),
            threshold
        ));
        lines.blank();
    }
    if !with_path {
        lines.push(format!("{} Error files were not excluded.", PATH_UNAVAILABLE));
    }

    push_table_header(&mut lines, with_path);
    for group in &groups {
        push_group(&mut lines, group, with_path);
        lines.push(format!("Sample : {}", group.len()));
    }
    if groups.is_empty() {
        lines.push("No samples look mis-entered.");
    }
    lines.blank();

    lines.finish()
}

/// Occurrence counts for every user and device name
///
/// Names below the threshold are marked.
pub fn count_user_device(dataset: Option<&Dataset>, threshold: Threshold) -> String {
    let Some(dataset) = dataset else {
        return NO_DATA.to_string();
    };

    let mut lines = Lines::new();
    for (title, field) in [
        ("[User Name Count]", NameField::User),
        ("[Device Name Count]", NameField::Device),
    ] {
        lines.push(title);
        let counts = name_counts(dataset, field);
        if counts.is_empty() {
            lines.push(format!("No {} names recorded.", field.column().to_lowercase()));
        }
        for (name, count) in counts {
            let mut line = count_line(&name, count);
            if count < threshold.get() {
                line.push_str("  <- below threshold");
            }
            lines.push(line);
        }
        lines.blank();
    }

    lines.finish()
}

/// ID error report; no rules exist yet
pub fn detect_id_errors(dataset: Option<&Dataset>, threshold: Threshold) -> String {
    let Some(dataset) = dataset else {
        return NO_DATA.to_string();
    };

    let mut lines = sections::id_errors(&IdError.detect(dataset, threshold));
    // Strip the trailing separator so the standalone report ends on text
    lines.trim_trailing_blank();
    lines.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::Sheet;

    const COLUMNS: &[&str] = &["Chip", "Date", "User", "Device", "Rep", "Path"];

    fn dataset(rows: &[&[&str]]) -> Dataset {
        Dataset::from_sheet(&Sheet::from_text_rows(COLUMNS, rows)).unwrap()
    }

    fn no_path_dataset(rows: &[&[&str]]) -> Dataset {
        Dataset::from_sheet(&Sheet::from_text_rows(&COLUMNS[..5], rows)).unwrap()
    }

    #[test]
    fn test_no_dataset_placeholder() {
        let t = Threshold::default();
        assert_eq!(summarize(None), NO_DATA);
        assert_eq!(check_error_files(None, t), NO_DATA);
        assert_eq!(samples_to_check(None, t), NO_DATA);
        assert_eq!(count_user_device(None, t), NO_DATA);
        assert_eq!(detect_id_errors(None, t), NO_DATA);
        assert_eq!(error_summary_report(None, t), NO_DATA);
    }

    #[test]
    fn test_summarize_groups_and_counts() {
        let data = dataset(&[
            &["D24A05X0012", "20240105_1", "kim", "dev1", "2", "c:/D24A05X001/b"],
            &["D24A05X0011", "20240105_2", "kim", "dev1", "1", "c:/error/a"],
        ]);
        let text = summarize(Some(&data));

        assert!(text.starts_with("[DB Summary]\n"));
        assert!(text.contains("D24A05X001    ( date 20240105   device dev1 )"));
        assert!(text.contains("Sample number : 2 ( 1 error files found )"));
        let pos2 = text.find("|   2   2").unwrap();
        let pos1 = text.find("|   1   1").unwrap();
        assert!(pos2 < pos1, "members keep row order");
    }

    #[test]
    fn test_summarize_without_path() {
        let data = no_path_dataset(&[&["D24A05X0011", "20240105", "kim", "dev1", "1"]]);
        let text = summarize(Some(&data));
        assert!(text.contains("Sample number : 1\n"));
        assert!(!text.contains("FilePath"));
    }

    #[test]
    fn test_check_error_files_lists_groups() {
        let data = dataset(&[
            &["D24A05X0011", "20240105", "kim", "dev1", "1", "C:/ERROR/a"],
            &["D24A05X0012", "20240105", "kim", "dev1", "2", "c:/ok/b"],
            &["D24B05X0011", "20240105", "kim", "dev1", "1", "c:/Error/c"],
        ]);
        let text = check_error_files(Some(&data), Threshold::default());

        assert!(text.contains("2 file(s) are in an ERROR folder."));
        assert!(text.contains("C:/ERROR/a"));
        assert!(text.contains("c:/Error/c"));
        assert!(!text.contains("c:/ok/b"));
        assert!(text.find("D24A05X001 ").unwrap() < text.find("D24B05X001 ").unwrap());
    }

    #[test]
    fn test_check_error_files_clean_and_unavailable() {
        let clean = dataset(&[&["D24A05X0011", "20240105", "kim", "dev1", "1", "c:/ok"]]);
        assert_eq!(
            check_error_files(Some(&clean), Threshold::default()),
            "[Error File Check]\nNo error files found.\n"
        );

        let no_path = no_path_dataset(&[&["D24A05X0011", "20240105", "kim", "dev1", "1"]]);
        assert_eq!(
            check_error_files(Some(&no_path), Threshold::default()),
            "[Error File Check]\nPath data is unavailable.\n"
        );
    }

    #[test]
    fn test_samples_to_check_flags_small_group() {
        let data = dataset(&[
            &["D24A05X0011", "20240105", "kim", "dev1", "1", "c:/D24A05X001"],
            &["D24A05X0012", "20240105", "kim", "dev1", "1", "c:/D24A05X001"],
            &["D24A05X0013", "20240105", "kim", "dev1", "1", "c:/D24A05X001"],
            &["D24B05X0011", "20240105", "kim", "dev1", "1", "c:/D24B05X001"],
        ]);
        let text = samples_to_check(Some(&data), Threshold::default());

        assert!(text.contains("1 group(s) look like mis-entered chip info (threshold = 3)."));
        assert!(text.contains("D24B05X001    ( date 20240105   device dev1 )"));
        assert!(!text.contains("D24A05X001    ("));
        assert!(text.contains("Sample : 1"));
    }

    #[test]
    fn test_samples_to_check_without_path_states_it() {
        let data = no_path_dataset(&[&["D24A05X0011", "20240105", "kim", "dev1", "1"]]);
        let text = samples_to_check(Some(&data), Threshold::default());
        assert!(text.contains("Path data is unavailable. Error files were not excluded."));
        assert!(text.contains("Sample : 1"));
    }

    #[test]
    fn test_samples_to_check_clean() {
        let data = dataset(&[
            &["D24A05X0011", "20240105", "kim", "dev1", "1", "c:/a"],
            &["D24A05X0012", "20240105", "kim", "dev1", "1", "c:/a"],
            &["D24A05X0013", "20240105", "kim", "dev1", "1", "c:/a"],
        ]);
        let text = samples_to_check(Some(&data), Threshold::default());
        assert!(text.ends_with("No samples look mis-entered.\n"));
    }

    #[test]
    fn test_count_user_device_marks_rare_names() {
        let data = dataset(&[
            &["D24A05X0011", "20240105", "kim", "dev1", "1", "c:/a"],
            &["D24A05X0012", "20240105", "kim", "dev1", "1", "c:/a"],
            &["D24A05X0013", "20240105", "kim", "dev2", "1", "c:/a"],
        ]);
        let text = count_user_device(Some(&data), Threshold::default());

        assert!(text.contains(&count_line("kim", 3)));
        assert!(!text.contains(&format!("{}  <- below threshold", count_line("kim", 3))));
        assert!(text.contains(&format!("{}  <- below threshold", count_line("dev1", 2))));
        assert!(text.find("[User Name Count]").unwrap() < text.find("[Device Name Count]").unwrap());
    }

    #[test]
    fn test_count_user_device_skips_blank_names() {
        let data = dataset(&[
            &["D24A05X0011", "20240105", "kim", "dev1", "1", "c:/a"],
            &["D24A05X0012", "20240105", "", "dev1", "1", "c:/a"],
        ]);
        let text = count_user_device(Some(&data), Threshold::default());

        let users: Vec<&str> = text
            .lines()
            .skip_while(|l| *l != "[User Name Count]")
            .skip(1)
            .take_while(|l| !l.is_empty())
            .collect();
        assert_eq!(users, vec![format!("{}  <- below threshold", count_line("kim", 1))]);
    }

    #[test]
    fn test_detect_id_errors_stub() {
        let data = dataset(&[]);
        assert_eq!(
            detect_id_errors(Some(&data), Threshold::default()),
            "[ID Error Detection]\nNot able to find errors"
        );
    }

    #[test]
    fn test_empty_dataset_reports() {
        let data = dataset(&[]);
        let t = Threshold::default();

        assert!(summarize(Some(&data)).contains("No records loaded."));
        assert!(check_error_files(Some(&data), t).contains("No error files found."));
        assert!(samples_to_check(Some(&data), t).contains("No samples look mis-entered."));
        let counts = count_user_device(Some(&data), t);
        assert!(counts.contains("No user names recorded."));
        assert!(counts.contains("No device names recorded."));
    }
}
