//! Helper library for relational-database resource management
//!
//! `dbres` wraps the routine plumbing around driver-level database objects:
//! - [`ProviderRegistry`]: acquire connections by logical name, with
//!   directory lookups memoized for the registry's lifetime
//! - [`cleanup`]: defensively release cursors, statements and connections,
//!   attempting every step and surfacing only the connection-close failure
//! - [`rollback`]: transaction rollback in propagate / swallow / panic
//!   flavors
//! - [`fragment`]: trivial SQL fragment builders (`IN` placeholder lists,
//!   ordered concatenation)
//!
//! There is no pooling, no query execution and no SQL parsing here; the
//! crate only sequences calls against the collaborator traits in [`traits`].
//!
//! Failures are reported through the [`Error`] taxonomy and logged through
//! `tracing` under the `dbres::registry`, `dbres::cleanup` and `dbres::txn`
//! targets.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cleanup;
pub mod error;
pub mod fragment;
pub mod registry;
pub mod rollback;
pub mod traits;

pub use cleanup::{
    cleanup_all, cleanup_batch, cleanup_connection, cleanup_cursor, cleanup_cursor_and_statement,
    cleanup_statement, cleanup_statement_and_batch, cleanup_statement_and_batch_or_panic,
    cleanup_statement_and_batch_quiet,
};
pub use error::{BoxError, Error, Resource, Result};
pub use fragment::{concat_sql, in_clause};
pub use registry::ProviderRegistry;
pub use rollback::{rollback, rollback_or_panic, rollback_quiet};
pub use traits::{Connection, ConnectionProvider, Cursor, Directory, Statement};
