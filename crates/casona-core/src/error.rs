// ── Core error types ──
//
// User-facing errors from casona-core. Consumers never see raw
// transport failures -- the `From<StoreError>` impl wraps them, and
// row-shape problems are reported against the table and field that
// produced them.

use thiserror::Error;

use casona_store::StoreError;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The persistence gateway failed.
    #[error("Remote store error: {0}")]
    Store(#[from] StoreError),

    /// A remote row could not be mapped into its domain shape.
    #[error("Malformed {table} row '{id}': invalid {field}")]
    InvalidRow {
        table: &'static str,
        id: String,
        field: &'static str,
    },
}

impl CoreError {
    pub(crate) fn invalid_row(table: &'static str, id: &str, field: &'static str) -> Self {
        Self::InvalidRow {
            table,
            id: id.to_owned(),
            field,
        }
    }
}
