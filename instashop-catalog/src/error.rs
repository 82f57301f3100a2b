use thiserror::Error;

use crate::session::SessionState;
use crate::types::RecordField;

/// Errors raised by catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No file in the selection had an image MIME type. Callers show an
    /// empty state rather than failing.
    #[error("No image files in selection")]
    EmptySelection,

    /// Export was asked for an item that has no ledger record. Fields must
    /// be generated from the same item list before exporting.
    #[error("No catalog record for item '{0}' (generate fields before exporting)")]
    MissingRecord(String),

    /// An edit targeted a key that is not in the ledger.
    #[error("Unknown item: {0}")]
    UnknownRecord(String),

    #[error("Field '{0}' is read-only")]
    ReadOnlyField(RecordField),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Cannot {action} while the session is {from}")]
    InvalidTransition {
        from: SessionState,
        action: &'static str,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
