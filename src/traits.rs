//! Collaborator traits for directory lookup and driver-level resources
//!
//! This crate sequences calls against external database objects; it never
//! implements them. These traits are the seams: a driver adapter implements
//! [`Connection`], [`Statement`] and [`Cursor`], and a naming/registry
//! integration implements [`Directory`] and [`ConnectionProvider`].
//!
//! All fallible methods report failures as [`BoxError`]; the helpers in this
//! crate wrap them into the crate [`Error`](crate::Error) taxonomy.

use std::sync::Arc;

use crate::error::BoxError;

/// Name-to-provider resolution service.
///
/// Typically backed by a naming directory, a service registry, or a plain
/// in-process map built at startup. The registry consults it once per name
/// and memoizes the result.
pub trait Directory: Send + Sync {
    /// Resolve a provider handle by logical name.
    ///
    /// Returns `None` when no provider is registered under `name`.
    fn lookup(&self, name: &str) -> Option<Arc<dyn ConnectionProvider>>;
}

/// Opaque handle capable of producing new connections to one database target.
///
/// Pooling, if any, lives behind this trait; the crate only asks for
/// connections and never returns them to a pool itself.
pub trait ConnectionProvider: Send + Sync {
    /// Open a new connection.
    ///
    /// # Errors
    ///
    /// Returns the underlying driver/pool error when no connection can be
    /// produced.
    fn open_connection(&self) -> std::result::Result<Box<dyn Connection>, BoxError>;
}

/// An open database connection owned by the caller.
///
/// Must be routed through [`cleanup_connection`](crate::cleanup::cleanup_connection)
/// (or [`cleanup_all`](crate::cleanup::cleanup_all)) exactly once.
pub trait Connection {
    /// Revert all changes made within the current open transaction.
    fn rollback(&mut self) -> std::result::Result<(), BoxError>;

    /// Discard any accumulated driver warnings.
    fn clear_warnings(&mut self) -> std::result::Result<(), BoxError>;

    /// Close the connection, releasing it to the underlying provider.
    fn close(&mut self) -> std::result::Result<(), BoxError>;

    /// Whether the connection has already been closed.
    fn is_closed(&self) -> std::result::Result<bool, BoxError>;

    /// Stable identifier for diagnostics; only ever logged.
    fn id(&self) -> u64;
}

/// A prepared or ad-hoc statement scoped to a connection.
pub trait Statement {
    /// Discard any accumulated driver warnings.
    fn clear_warnings(&mut self) -> std::result::Result<(), BoxError>;

    /// Discard any pending batched operations.
    fn clear_batch(&mut self) -> std::result::Result<(), BoxError>;

    /// Close the statement.
    fn close(&mut self) -> std::result::Result<(), BoxError>;
}

/// An open result stream from an executed query.
pub trait Cursor {
    /// Discard any accumulated driver warnings.
    fn clear_warnings(&mut self) -> std::result::Result<(), BoxError>;

    /// Close the cursor.
    fn close(&mut self) -> std::result::Result<(), BoxError>;
}

impl<T: Connection + ?Sized> Connection for Box<T> {
    fn rollback(&mut self) -> std::result::Result<(), BoxError> {
        (**self).rollback()
    }

    fn clear_warnings(&mut self) -> std::result::Result<(), BoxError> {
        (**self).clear_warnings()
    }

    fn close(&mut self) -> std::result::Result<(), BoxError> {
        (**self).close()
    }

    fn is_closed(&self) -> std::result::Result<bool, BoxError> {
        (**self).is_closed()
    }

    fn id(&self) -> u64 {
        (**self).id()
    }
}

impl<T: Statement + ?Sized> Statement for Box<T> {
    fn clear_warnings(&mut self) -> std::result::Result<(), BoxError> {
        (**self).clear_warnings()
    }

    fn clear_batch(&mut self) -> std::result::Result<(), BoxError> {
        (**self).clear_batch()
    }

    fn close(&mut self) -> std::result::Result<(), BoxError> {
        (**self).close()
    }
}

impl<T: Cursor + ?Sized> Cursor for Box<T> {
    fn clear_warnings(&mut self) -> std::result::Result<(), BoxError> {
        (**self).clear_warnings()
    }

    fn close(&mut self) -> std::result::Result<(), BoxError> {
        (**self).close()
    }
}
