use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while building the [`RecordStore`](crate::data::model::RecordStore).
///
/// Row numbers are file line numbers: the header is line 1, so the first
/// data row is reported as row 2.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: unparseable date '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { row: usize, value: String },

    #[error("row {row}, column '{column}': invalid value '{value}'")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("source contains no records")]
    Empty,
}
