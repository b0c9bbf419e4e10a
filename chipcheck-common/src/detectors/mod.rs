//! Anomaly detectors
//!
//! Every detector is a pure read over a [`Dataset`] and the current
//! [`Threshold`]. Detectors that need grouping recompute it on the view
//! they analyze; nothing is cached between runs.

use serde::Serialize;

use crate::grouping::{Group, GroupKey};
use crate::record::Dataset;
use crate::session::Threshold;

mod error_path;
mod folder_mismatch;
mod id_error;
mod month_code;
mod name_frequency;
mod sample_count;

pub use error_path::ErrorPath;
pub use folder_mismatch::{find_folder_code, FolderMismatch, FOLDER_CODE_PATTERN};
pub use id_error::IdError;
pub use month_code::{month_code, MonthCode, VALID_MONTH_CODES};
pub use name_frequency::{name_counts, NameField, NameFrequency};
pub use sample_count::{SampleCount, MAX_GROUP_SIZE};

/// Category of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FindingKind {
    ErrorFile,
    LowOrHighSampleCount,
    FolderMismatch,
    MonthCodeInvalid,
    LowFrequencyName,
}

/// Entity a finding points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Subject {
    /// A whole group, with its member source rows
    Group { key: GroupKey, rows: Vec<usize> },
    /// One record by source row
    Record { row: usize },
    /// A user or device name and how often it occurs
    Name { field: NameField, value: String, count: usize },
}

impl Subject {
    pub(crate) fn group(group: &Group<'_>) -> Self {
        Subject::Group {
            key: group.key.clone(),
            rows: group.rows(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub kind: FindingKind,
    pub subject: Subject,
    pub detail: String,
}

/// Result of one detector run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Detector ran; may be empty
    Findings(Vec<Finding>),
    /// An optional column the detector depends on is missing
    Unavailable { column: &'static str },
    /// Detector has no rules yet
    NotImplemented,
}

impl Outcome {
    /// Findings when the detector ran, empty otherwise
    pub fn findings(&self) -> &[Finding] {
        match self {
            Outcome::Findings(findings) => findings,
            _ => &[],
        }
    }

    pub fn is_clean(&self) -> bool {
        self.findings().is_empty()
    }
}

/// Common detector interface
pub trait Detector {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    fn detect(&self, dataset: &Dataset, threshold: Threshold) -> Outcome;
}
