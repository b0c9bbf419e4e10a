//! Dataset session
//!
//! Holds the active dataset as an immutable `Arc` snapshot. Loading
//! normalizes the new sheet first and only then swaps the reference under
//! the write lock, so a failed load leaves the previous state untouched
//! and a running report keeps the snapshot it started with.
//!
//! # Usage
//!
//! ```rust
//! use chipcheck_common::{Session, Sheet, Threshold};
//!
//! let session = Session::new(Threshold::default());
//! assert_eq!(session.summarize(), "No data available.");
//!
//! let sheet = Sheet::from_text_rows(&["Chip", "Date"], &[&["D24A05X0011", "20240105"]]);
//! session.load_dataset(&sheet).unwrap();
//! assert!(session.status().loaded);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{info, warn};

use crate::record::Dataset;
use crate::report;
use crate::sheet::Sheet;
use crate::{Error, Result};

/// Minimum group size and name frequency
///
/// Valid range: [1, usize::MAX]
/// Default: 3
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct Threshold(usize);

impl Threshold {
    pub const DEFAULT: usize = 3;

    pub fn new(value: usize) -> Result<Self> {
        if value == 0 {
            return Err(Error::InvalidInput("threshold must be at least 1".to_string()));
        }
        Ok(Self(value))
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<usize> for Threshold {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Threshold> for usize {
    fn from(threshold: Threshold) -> Self {
        threshold.0
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Point-in-time view of the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionStatus {
    pub loaded: bool,
    pub records: usize,
    pub has_path: bool,
    pub threshold: Threshold,
}

/// Owner of the active dataset and threshold
///
/// `NoDataset` until the first successful load, `Ready` afterwards.
#[derive(Debug, Default)]
pub struct Session {
    dataset: RwLock<Option<Arc<Dataset>>>,
    threshold: RwLock<Threshold>,
}

impl Session {
    pub fn new(threshold: Threshold) -> Self {
        Self {
            dataset: RwLock::new(None),
            threshold: RwLock::new(threshold),
        }
    }

    /// Normalize `sheet` and make it the active dataset
    ///
    /// On error the previously active dataset (if any) stays active.
    pub fn load_dataset(&self, sheet: &Sheet) -> Result<Arc<Dataset>> {
        let dataset = match Dataset::from_sheet(sheet) {
            Ok(dataset) => Arc::new(dataset),
            Err(e) => {
                warn!("Rejected sheet: {}", e);
                return Err(e.into());
            }
        };

        *self.dataset.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&dataset));
        info!(records = dataset.len(), has_path = dataset.has_path(), "Dataset loaded");
        Ok(dataset)
    }

    /// Active dataset, `None` before the first load
    pub fn snapshot(&self) -> Option<Arc<Dataset>> {
        self.dataset.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn threshold(&self) -> Threshold {
        *self.threshold.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_threshold(&self, threshold: Threshold) {
        *self.threshold.write().unwrap_or_else(PoisonError::into_inner) = threshold;
        info!(%threshold, "Threshold updated");
    }

    pub fn status(&self) -> SessionStatus {
        let snapshot = self.snapshot();
        SessionStatus {
            loaded: snapshot.is_some(),
            records: snapshot.as_ref().map(|d| d.len()).unwrap_or(0),
            has_path: snapshot.as_ref().map(|d| d.has_path()).unwrap_or(false),
            threshold: self.threshold(),
        }
    }

    /// Every group with all members
    pub fn summarize(&self) -> String {
        report::summarize(self.snapshot().as_deref())
    }

    /// Records filed under error folders
    pub fn check_error_files(&self) -> String {
        report::check_error_files(self.snapshot().as_deref(), self.threshold())
    }

    /// Groups with suspicious sample counts
    pub fn samples_to_check(&self) -> String {
        report::samples_to_check(self.snapshot().as_deref(), self.threshold())
    }

    /// Per-name counts for users and devices
    pub fn count_user_device(&self) -> String {
        report::count_user_device(self.snapshot().as_deref(), self.threshold())
    }

    /// Placeholder ID error report
    pub fn detect_id_errors(&self) -> String {
        report::detect_id_errors(self.snapshot().as_deref(), self.threshold())
    }

    /// Combined summary across all detectors
    pub fn error_summary_report(&self) -> String {
        report::error_summary_report(self.snapshot().as_deref(), self.threshold())
    }
}
