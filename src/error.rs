use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, DataError>;

/// Everything that can go wrong while loading, encoding, or sampling data.
///
/// None of these are retryable: malformed input stays malformed.
#[derive(Debug, Error)]
pub enum DataError {
    /// Bad construction or batch-size input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A field that is missing, outside the declared layout, or not parseable.
    #[error("{}invalid field `{field}` (column {column}): {reason}", row_prefix(.row))]
    InvalidField {
        field: &'static str,
        column: usize,
        reason: String,
        row: Option<usize>,
    },

    /// A parseable field whose value is outside its domain.
    #[error("{}invalid category for `{field}` (column {column}): {value:?}", row_prefix(.row))]
    InvalidCategory {
        field: &'static str,
        column: usize,
        value: String,
        row: Option<usize>,
    },

    /// The feature and label sources of a testing repository cannot be joined.
    #[error("misaligned sources: {0}")]
    MisalignedSources(String),

    /// A batch request exceeds what is left in the repository.
    #[error("insufficient data: requested {requested} samples but only {available} remain")]
    InsufficientData { requested: usize, available: usize },

    /// The source path could not be opened.
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The CSV reader failed (I/O error or malformed quoting).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

fn row_prefix(row: &Option<usize>) -> String {
    match row {
        Some(r) => format!("row {r}: "),
        None => String::new(),
    }
}

impl DataError {
    pub(crate) fn invalid_field(field: &'static str, column: usize, reason: impl Into<String>) -> Self {
        DataError::InvalidField {
            field,
            column,
            reason: reason.into(),
            row: None,
        }
    }

    pub(crate) fn invalid_category(field: &'static str, column: usize, value: &str) -> Self {
        DataError::InvalidCategory {
            field,
            column,
            value: value.to_string(),
            row: None,
        }
    }

    /// Attach the 1-based data row number to a field-level error.
    /// Other variants are returned unchanged.
    pub fn at_row(self, row_no: usize) -> Self {
        match self {
            DataError::InvalidField { field, column, reason, .. } => DataError::InvalidField {
                field,
                column,
                reason,
                row: Some(row_no),
            },
            DataError::InvalidCategory { field, column, value, .. } => DataError::InvalidCategory {
                field,
                column,
                value,
                row: Some(row_no),
            },
            other => other,
        }
    }
}
