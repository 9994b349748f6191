use std::path::PathBuf;

use thiserror::Error;

use crate::model::SourceKind;

/// Failure to produce the four typed tables. Always fatal for the session.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("{kind} source not found at {}", path.display())]
    MissingSource { kind: SourceKind, path: PathBuf },

    #[error("{kind} source at {} could not be read: {source}", path.display())]
    Io {
        kind: SourceKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{kind} CSV error: {source}")]
    Csv {
        kind: SourceKind,
        #[source]
        source: csv::Error,
    },

    #[error("{kind} source is missing required column '{column}'")]
    MissingColumn {
        kind: SourceKind,
        column: &'static str,
    },

    #[error("{kind} line {line} column '{column}' invalid: {message}")]
    InvalidRow {
        kind: SourceKind,
        line: u64,
        column: &'static str,
        message: String,
    },
}
