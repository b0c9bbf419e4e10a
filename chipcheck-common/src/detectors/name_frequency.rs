//! Rare user and device names
//!
//! Genuine operators and devices show up many times in a sheet. A name
//! seen fewer times than the threshold is most likely a typo.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

use super::{Detector, Finding, FindingKind, Outcome, Subject};
use crate::record::{Dataset, Record, COL_DEVICE, COL_USER};
use crate::session::Threshold;

/// Name column checked for frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NameField {
    User,
    Device,
}

impl NameField {
    pub fn column(&self) -> &'static str {
        match self {
            NameField::User => COL_USER,
            NameField::Device => COL_DEVICE,
        }
    }

    fn value<'a>(&self, record: &'a Record) -> &'a str {
        match self {
            NameField::User => &record.user,
            NameField::Device => &record.device,
        }
    }
}

impl fmt::Display for NameField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Occurrence count per distinct name
///
/// Blank cells are not names and are skipped. Sorted by count
/// descending; ties keep first-appearance order.
pub fn name_counts(dataset: &Dataset, field: NameField) -> Vec<(String, usize)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for record in dataset.records() {
        let name = field.value(record);
        if name.trim().is_empty() {
            continue;
        }
        match index.get(name) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(name, counts.len());
                counts.push((name.to_string(), 1));
            }
        }
    }

    // sort_by is stable, so equal counts stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Flags each `field` value occurring fewer than `threshold` times
#[derive(Debug, Clone, Copy)]
pub struct NameFrequency {
    pub field: NameField,
}

impl NameFrequency {
    pub fn users() -> Self {
        Self { field: NameField::User }
    }

    pub fn devices() -> Self {
        Self { field: NameField::Device }
    }
}

impl Detector for NameFrequency {
    fn name(&self) -> &'static str {
        match self.field {
            NameField::User => "low-frequency-user",
            NameField::Device => "low-frequency-device",
        }
    }

    fn detect(&self, dataset: &Dataset, threshold: Threshold) -> Outcome {
        let findings: Vec<Finding> = name_counts(dataset, self.field)
            .into_iter()
            .filter(|(_, count)| *count < threshold.get())
            .map(|(value, count)| Finding {
                kind: FindingKind::LowFrequencyName,
                detail: format!("{} '{}' appears {} time(s)", self.field, value, count),
                subject: Subject::Name {
                    field: self.field,
                    value,
                    count,
                },
            })
            .collect();

        debug!(detector = self.name(), findings = findings.len(), "Detector finished");
        Outcome::Findings(findings)
    }
}
