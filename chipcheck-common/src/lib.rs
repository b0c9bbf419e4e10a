//! # chipcheck common library
//!
//! Record derivation and anomaly detection engine for chip test sheets:
//! - Sheet row contract and record normalization
//! - Deterministic grouping by (LOT, date, device)
//! - Anomaly detectors (error path, sample count, folder, month code, name frequency)
//! - Text report formatters and the combined summary report
//! - Session handle owning the active dataset snapshot
//! - Configuration loading

pub mod config;
pub mod detectors;
pub mod error;
pub mod grouping;
pub mod record;
pub mod report;
pub mod session;
pub mod sheet;

pub use error::{Error, Result, SchemaError};
pub use grouping::{group_records, Group, GroupKey};
pub use record::{Dataset, Record};
pub use session::{Session, SessionStatus, Threshold};
pub use sheet::Sheet;
