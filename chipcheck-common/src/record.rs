//! Record normalization
//!
//! Turns sheet rows into [`Record`]s with the derived `LOT`, `position`
//! and `onlyDate` fields. Derivation happens once at load; the resulting
//! [`Dataset`] is immutable.

use serde::Serialize;
use tracing::debug;

use crate::error::SchemaError;
use crate::sheet::Sheet;

pub const COL_CHIP: &str = "Chip";
pub const COL_DATE: &str = "Date";
pub const COL_USER: &str = "User";
pub const COL_DEVICE: &str = "Device";
pub const COL_REP: &str = "Rep";
pub const COL_PATH: &str = "Path";

/// Number of leading `Date` characters used as the date code
pub const DATE_CODE_LEN: usize = 8;

/// Minimum chip length for LOT/position derivation
pub const MIN_CHIP_LEN: usize = 2;

/// One inspected unit with its derived fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// 0-based row index in the source sheet
    pub row: usize,
    pub chip: String,
    pub date: String,
    pub user: String,
    pub device: String,
    pub rep: String,
    pub path: Option<String>,

    /// Chip code without its position character
    pub lot: String,
    /// Last character of the chip code
    pub position: char,
    /// First 8 characters of `date`
    pub only_date: String,
}

/// Chip code minus its last character
///
/// Returns `None` for chips shorter than [`MIN_CHIP_LEN`].
pub fn derive_lot(chip: &str) -> Option<&str> {
    if chip.chars().count() < MIN_CHIP_LEN {
        return None;
    }
    let (idx, _) = chip.char_indices().last()?;
    Some(&chip[..idx])
}

/// Last character of the chip code
pub fn derive_position(chip: &str) -> Option<char> {
    if chip.chars().count() < MIN_CHIP_LEN {
        return None;
    }
    chip.chars().last()
}

/// Date code: first 8 characters, or the whole value when shorter
pub fn derive_only_date(date: &str) -> &str {
    match date.char_indices().nth(DATE_CODE_LEN) {
        Some((idx, _)) => &date[..idx],
        None => date,
    }
}

impl Record {
    /// Build a record from raw fields, deriving LOT/position/onlyDate
    pub fn new(
        row: usize,
        chip: String,
        date: String,
        user: String,
        device: String,
        rep: String,
        path: Option<String>,
    ) -> Result<Self, SchemaError> {
        let (lot, position) = match (derive_lot(&chip), derive_position(&chip)) {
            (Some(lot), Some(position)) => (lot.to_string(), position),
            _ => return Err(SchemaError::ChipTooShort { row, chip }),
        };
        let only_date = derive_only_date(&date).to_string();

        Ok(Self {
            row,
            chip,
            date,
            user,
            device,
            rep,
            path,
            lot,
            position,
            only_date,
        })
    }

    /// Whether the file path points into an error folder (case-insensitive)
    pub fn in_error_folder(&self) -> bool {
        self.path
            .as_deref()
            .map(|p| p.to_lowercase().contains("error"))
            .unwrap_or(false)
    }
}

/// Ordered, immutable set of records from one load
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dataset {
    records: Vec<Record>,
    has_path: bool,
}

impl Dataset {
    /// Normalize a sheet into a dataset
    ///
    /// Fails when `Chip` or `Date` is not declared, a row lacks either
    /// value, or a chip code is too short to derive LOT and position.
    pub fn from_sheet(sheet: &Sheet) -> Result<Self, SchemaError> {
        for column in [COL_CHIP, COL_DATE] {
            if !sheet.has_column(column) {
                return Err(SchemaError::MissingColumn(column.to_string()));
            }
        }
        let has_path = sheet.has_column(COL_PATH);

        let required = |row: usize, column: &str| {
            sheet.cell_text(row, column).ok_or_else(|| SchemaError::MissingValue {
                row,
                column: column.to_string(),
            })
        };

        let mut records = Vec::with_capacity(sheet.len());
        for row in 0..sheet.len() {
            let record = Record::new(
                row,
                required(row, COL_CHIP)?,
                required(row, COL_DATE)?,
                sheet.cell_text(row, COL_USER).unwrap_or_default(),
                sheet.cell_text(row, COL_DEVICE).unwrap_or_default(),
                sheet.cell_text(row, COL_REP).unwrap_or_default(),
                if has_path { sheet.cell_text(row, COL_PATH) } else { None },
            )?;
            records.push(record);
        }

        debug!(records = records.len(), has_path, "Normalized sheet");
        Ok(Self { records, has_path })
    }

    /// Build directly from already-normalized records
    pub fn from_records(records: Vec<Record>, has_path: bool) -> Self {
        Self { records, has_path }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Whether the source sheet carried a `Path` column
    pub fn has_path(&self) -> bool {
        self.has_path
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records whose path points into an error folder
    pub fn error_paths(&self) -> impl Iterator<Item = &Record> {
        self.records.iter().filter(|r| r.in_error_folder())
    }

    /// Records outside error folders (all records when there is no `Path` column)
    pub fn without_error_paths(&self) -> impl Iterator<Item = &Record> {
        self.records.iter().filter(|r| !r.in_error_folder())
    }

    /// Record at a source row index
    pub fn get(&self, row: usize) -> Option<&Record> {
        self.records
            .get(row)
            .filter(|r| r.row == row)
            .or_else(|| self.records.iter().find(|r| r.row == row))
    }
}
