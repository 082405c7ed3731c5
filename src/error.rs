//! Error types for database resource management
//!
//! This module defines all error types used throughout the crate.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use std::fmt;
use thiserror::Error;

/// Result type alias for dbres operations
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error reported by an external collaborator (driver, directory).
///
/// The crate never interprets these; they are carried as the `source` of the
/// wrapping [`Error`] variant so callers can downcast if they need to.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The kind of resource a cleanup step was releasing when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// An open result cursor
    Cursor,
    /// A prepared or ad-hoc statement
    Statement,
    /// A database connection
    Connection,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Cursor => f.write_str("cursor"),
            Resource::Statement => f.write_str("statement"),
            Resource::Connection => f.write_str("connection"),
        }
    }
}

/// Error types for database resource management
#[derive(Debug, Error)]
pub enum Error {
    /// The directory has no provider registered under the requested name
    #[error("no connection provider found with name '{name}'")]
    ProviderNotFound {
        /// Logical provider name that failed to resolve
        name: String,
    },

    /// A resolved provider failed to produce a connection
    #[error("provider '{name}' failed to open a connection: {source}")]
    Connection {
        /// Logical provider name
        name: String,
        /// Underlying driver error
        source: BoxError,
    },

    /// A resource-release step failed
    #[error("failed to release {resource}: {source}")]
    Cleanup {
        /// Which resource the failing step was releasing
        resource: Resource,
        /// Underlying driver error
        source: BoxError,
    },

    /// A transaction rollback failed
    #[error("transaction rollback failed: {source}")]
    Rollback {
        /// Underlying driver error
        source: BoxError,
    },
}

impl Error {
    /// True if this error came from a connection-release failure.
    ///
    /// [`cleanup_all`](crate::cleanup::cleanup_all) only ever surfaces this
    /// kind of cleanup failure, so callers rarely need the check; it exists
    /// for code routing cleanup errors from the single-resource helpers.
    pub fn is_connection_cleanup(&self) -> bool {
        matches!(
            self,
            Error::Cleanup {
                resource: Resource::Connection,
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn boxed(msg: &str) -> BoxError {
        Box::new(io::Error::new(io::ErrorKind::Other, msg.to_string()))
    }

    #[test]
    fn test_error_display_provider_not_found() {
        let err = Error::ProviderNotFound {
            name: "orders-db".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("no connection provider found"));
        assert!(msg.contains("orders-db"));
    }

    #[test]
    fn test_error_display_connection() {
        let err = Error::Connection {
            name: "orders-db".to_string(),
            source: boxed("pool exhausted"),
        };
        let msg = err.to_string();
        assert!(msg.contains("failed to open a connection"));
        assert!(msg.contains("pool exhausted"));
    }

    #[test]
    fn test_error_display_cleanup() {
        let err = Error::Cleanup {
            resource: Resource::Cursor,
            source: boxed("cursor already invalid"),
        };
        let msg = err.to_string();
        assert!(msg.contains("failed to release cursor"));
        assert!(msg.contains("cursor already invalid"));
    }

    #[test]
    fn test_error_display_rollback() {
        let err = Error::Rollback {
            source: boxed("connection lost"),
        };
        let msg = err.to_string();
        assert!(msg.contains("transaction rollback failed"));
        assert!(msg.contains("connection lost"));
    }

    #[test]
    fn test_resource_display() {
        assert_eq!(Resource::Cursor.to_string(), "cursor");
        assert_eq!(Resource::Statement.to_string(), "statement");
        assert_eq!(Resource::Connection.to_string(), "connection");
    }

    #[test]
    fn test_is_connection_cleanup() {
        let conn = Error::Cleanup {
            resource: Resource::Connection,
            source: boxed("close failed"),
        };
        let stmt = Error::Cleanup {
            resource: Resource::Statement,
            source: boxed("close failed"),
        };
        assert!(conn.is_connection_cleanup());
        assert!(!stmt.is_connection_cleanup());
        assert!(!Error::ProviderNotFound {
            name: "x".to_string()
        }
        .is_connection_cleanup());
    }

    #[test]
    fn test_error_source_is_preserved() {
        use std::error::Error as _;
        let err = Error::Rollback {
            source: boxed("connection lost"),
        };
        let source = err.source().expect("rollback error carries a source");
        assert!(source.to_string().contains("connection lost"));
    }
}
