//! Transaction rollback with propagate / swallow / panic flavors
//!
//! One core fallible [`rollback`] plus thin named wrappers; callers pick the
//! flavor based on whether a rollback failure is recoverable where they
//! stand.

use tracing::error;

use crate::error::{Error, Result};
use crate::traits::Connection;

/// Revert the current open transaction on a connection.
///
/// `None` is a successful no-op. A rollback failure is logged and
/// propagated.
///
/// # Errors
///
/// [`Error::Rollback`] when the connection's rollback call fails.
pub fn rollback<C: Connection + ?Sized>(connection: Option<&mut C>) -> Result<()> {
    let Some(connection) = connection else {
        return Ok(());
    };

    connection.rollback().map_err(|source| {
        error!(
            target: "dbres::txn",
            conn_id = connection.id(),
            error = %source,
            "Transaction rollback failed"
        );
        Error::Rollback { source }
    })
}

/// [`rollback`] that swallows any failure.
///
/// For cleanup paths already handling another error, where a secondary
/// rollback failure has nowhere useful to go.
pub fn rollback_quiet<C: Connection + ?Sized>(connection: Option<&mut C>) {
    let _ = rollback(connection);
}

/// [`rollback`] that panics on failure.
///
/// # Panics
///
/// Panics when the rollback call fails. Opt-in only.
pub fn rollback_or_panic<C: Connection + ?Sized>(connection: Option<&mut C>) {
    if let Err(e) = rollback(connection) {
        panic!("transaction rollback failed: {e}");
    }
}
