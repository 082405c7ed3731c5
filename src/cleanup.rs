//! Defensive release of cursors, statements and connections
//!
//! Every helper here follows the same policy: each release step is attempted
//! independently of earlier failures, warning-clear failures are logged and
//! swallowed, and close failures are logged and propagated. The combined
//! [`cleanup_all`] chain goes one step further and surfaces only the
//! connection-close failure, since losing a connection is the one outcome a
//! caller cannot shrug off.
//!
//! All helpers accept `Option<&mut R>`; `None` is a successful no-op, which
//! lets call sites pass whatever subset of resources they actually hold.

use tracing::{debug, error};

use crate::error::{Error, Resource, Result};
use crate::traits::{Connection, Cursor, Statement};

/// Release a result cursor.
///
/// Pending warnings are cleared best-effort first; a failure there is logged
/// and swallowed. A close failure is logged and propagated.
///
/// # Errors
///
/// [`Error::Cleanup`] with [`Resource::Cursor`] when the close call fails.
pub fn cleanup_cursor<C: Cursor + ?Sized>(cursor: Option<&mut C>) -> Result<()> {
    let Some(cursor) = cursor else {
        return Ok(());
    };

    if let Err(e) = cursor.clear_warnings() {
        error!(target: "dbres::cleanup", error = %e, "Cursor warning clear failed");
    }

    cursor.close().map_err(|source| {
        error!(target: "dbres::cleanup", error = %source, "Cursor close failed");
        Error::Cleanup {
            resource: Resource::Cursor,
            source,
        }
    })
}

/// Release a statement.
///
/// Same shape as [`cleanup_cursor`]: warning clear is best-effort, close
/// failure propagates.
///
/// # Errors
///
/// [`Error::Cleanup`] with [`Resource::Statement`] when the close call fails.
pub fn cleanup_statement<S: Statement + ?Sized>(statement: Option<&mut S>) -> Result<()> {
    let Some(statement) = statement else {
        return Ok(());
    };

    if let Err(e) = statement.clear_warnings() {
        error!(target: "dbres::cleanup", error = %e, "Statement warning clear failed");
    }

    statement.close().map_err(|source| {
        error!(target: "dbres::cleanup", error = %source, "Statement close failed");
        Error::Cleanup {
            resource: Resource::Statement,
            source,
        }
    })
}

/// Discard any pending batched operations on a statement.
///
/// Purely best-effort: a failure is logged and swallowed, never surfaced.
/// The fallible signature is kept for symmetry with the other cleanup steps.
///
/// # Errors
///
/// Never fails in the current behavior.
pub fn cleanup_batch<S: Statement + ?Sized>(statement: Option<&mut S>) -> Result<()> {
    if let Some(statement) = statement {
        if let Err(e) = statement.clear_batch() {
            error!(target: "dbres::cleanup", error = %e, "Statement batch clear failed");
        }
    }
    Ok(())
}

/// Release a connection.
///
/// Already-closed connections are left alone. Otherwise warnings are cleared
/// best-effort and the connection is closed; both the closed-state probe and
/// the close call propagate their failures.
///
/// # Errors
///
/// [`Error::Cleanup`] with [`Resource::Connection`] when the closed-state
/// probe or the close call fails.
pub fn cleanup_connection<N: Connection + ?Sized>(connection: Option<&mut N>) -> Result<()> {
    let Some(connection) = connection else {
        return Ok(());
    };

    let closed = connection.is_closed().map_err(|source| {
        error!(target: "dbres::cleanup", error = %source, "Connection state probe failed");
        Error::Cleanup {
            resource: Resource::Connection,
            source,
        }
    })?;
    if closed {
        return Ok(());
    }

    if let Err(e) = connection.clear_warnings() {
        error!(target: "dbres::cleanup", error = %e, "Connection warning clear failed");
    }

    connection.close().map_err(|source| {
        error!(target: "dbres::cleanup", error = %source, "Connection close failed");
        Error::Cleanup {
            resource: Resource::Connection,
            source,
        }
    })?;

    debug!(target: "dbres::cleanup", conn_id = connection.id(), "Connection closed");
    Ok(())
}

/// Release a cursor, a statement and a connection, in that order.
///
/// Every step always runs. Cursor and statement failures are logged and
/// swallowed; only a connection-cleanup failure reaches the caller, since
/// that is the one release a caller cannot afford to lose silently.
///
/// # Errors
///
/// [`Error::Cleanup`] with [`Resource::Connection`] when the connection step
/// fails, regardless of how the earlier steps fared.
pub fn cleanup_all<C, S, N>(
    cursor: Option<&mut C>,
    statement: Option<&mut S>,
    connection: Option<&mut N>,
) -> Result<()>
where
    C: Cursor + ?Sized,
    S: Statement + ?Sized,
    N: Connection + ?Sized,
{
    if let Err(e) = cleanup_cursor(cursor) {
        error!(target: "dbres::cleanup", error = %e, "Cursor cleanup failed during combined release");
    }

    if let Err(e) = cleanup_statement(statement) {
        error!(target: "dbres::cleanup", error = %e, "Statement cleanup failed during combined release");
    }

    cleanup_connection(connection)
}

/// Release a cursor and its statement, without a connection.
///
/// Both steps always run and both failures are logged and swallowed; with no
/// connection in the chain there is no propagating step, so the call always
/// succeeds.
///
/// # Errors
///
/// Never fails in the current behavior.
pub fn cleanup_cursor_and_statement<C, S>(
    cursor: Option<&mut C>,
    statement: Option<&mut S>,
) -> Result<()>
where
    C: Cursor + ?Sized,
    S: Statement + ?Sized,
{
    cleanup_all(cursor, statement, None::<&mut dyn Connection>)
}

/// Clear a statement's pending batch, then release the statement.
///
/// The batch clear is best-effort (see [`cleanup_batch`]); the statement
/// close propagates.
///
/// # Errors
///
/// [`Error::Cleanup`] with [`Resource::Statement`] when the close call fails.
pub fn cleanup_statement_and_batch<S: Statement + ?Sized>(statement: Option<&mut S>) -> Result<()> {
    if let Some(statement) = statement {
        cleanup_batch(Some(&mut *statement))?;
        cleanup_statement(Some(statement))
    } else {
        Ok(())
    }
}

/// [`cleanup_statement_and_batch`] that swallows any failure.
pub fn cleanup_statement_and_batch_quiet<S: Statement + ?Sized>(statement: Option<&mut S>) {
    let _ = cleanup_statement_and_batch(statement);
}

/// [`cleanup_statement_and_batch`] that panics on failure.
///
/// # Panics
///
/// Panics when the statement close fails. Opt-in only; use when a cleanup
/// failure means the caller's state is unrecoverable.
pub fn cleanup_statement_and_batch_or_panic<S: Statement + ?Sized>(statement: Option<&mut S>) {
    if let Err(e) = cleanup_statement_and_batch(statement) {
        panic!("statement cleanup failed: {e}");
    }
}
