//! Fixed text layout shared by all reports
//!
//! Column padding is constant; long values push later columns right
//! instead of widening the table.

use crate::grouping::Group;
use crate::record::Record;

const CHIP_COLUMN_PAD: usize = 8;
const REP_COLUMN_PAD: usize = 7;
const PATH_COLUMN_PAD: usize = 17;
const MEMBER_INDENT: usize = 10;

pub(crate) const NAME_WIDTH: usize = 20;
pub(crate) const COUNT_WIDTH: usize = 6;

/// Line accumulator joined with `\n`
#[derive(Debug, Default)]
pub(crate) struct Lines(Vec<String>);

impl Lines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.0.push(line.into());
    }

    pub fn blank(&mut self) {
        self.0.push(String::new());
    }

    pub fn extend(&mut self, other: Lines) {
        self.0.extend(other.0);
    }

    pub fn trim_trailing_blank(&mut self) {
        while self.0.last().is_some_and(|l| l.is_empty()) {
            self.0.pop();
        }
    }

    pub fn finish(self) -> String {
        self.0.join("\n")
    }
}

/// Table header plus its dash rule
pub(crate) fn push_table_header(lines: &mut Lines, with_path: bool) {
    let mut header = format!(
        "Chip{}|{}Rep",
        " ".repeat(CHIP_COLUMN_PAD),
        " ".repeat(REP_COLUMN_PAD)
    );
    if with_path {
        header.push_str(&" ".repeat(PATH_COLUMN_PAD));
        header.push_str("FilePath");
    }
    let rule = "-".repeat(header.len());
    lines.push(header);
    lines.push(rule);
}

pub(crate) fn member_line(record: &Record, with_path: bool) -> String {
    let mut line = format!(
        "{}  |   {}   {}",
        " ".repeat(MEMBER_INDENT),
        record.position,
        record.rep
    );
    if with_path {
        line.push_str("  ");
        line.push_str(record.path.as_deref().unwrap_or("-"));
    }
    line
}

/// Group header followed by one line per member
pub(crate) fn push_group(lines: &mut Lines, group: &Group<'_>, with_path: bool) {
    lines.push(group.key.to_string());
    for record in &group.members {
        lines.push(member_line(record, with_path));
    }
}

/// `name   count` row with fixed column widths
pub(crate) fn count_line(name: &str, count: usize) -> String {
    format!("{:<name_w$}   {:>count_w$}", name, count, name_w = NAME_WIDTH, count_w = COUNT_WIDTH)
}
