//! ID error detection placeholder
//!
//! No rules exist for this check yet. It stays a detector so every
//! report goes through the same interface.

use super::{Detector, Outcome};
use crate::record::Dataset;
use crate::session::Threshold;

#[derive(Debug, Clone, Copy, Default)]
pub struct IdError;

impl Detector for IdError {
    fn name(&self) -> &'static str {
        "id-error"
    }

    fn detect(&self, _dataset: &Dataset, _threshold: Threshold) -> Outcome {
        Outcome::NotImplemented
    }
}
