//! Provider registry: named lookup with process-lifetime memoization
//!
//! Resolving a provider handle through the directory can be expensive (it may
//! hit the network), so the registry resolves each name at most once and
//! keeps the handle for its own lifetime. There is no eviction and no
//! refresh; a handle that goes bad stays cached, exactly as the directory
//! contract expects.
//!
//! The cache is a `DashMap`, so lookups for different names never block each
//! other. Two racing first-time lookups for the same name may both consult
//! the directory, but the entry API guarantees only one handle is stored;
//! handles are interchangeable, so the loser's handle is simply dropped.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, error, trace};

use crate::error::{Error, Result};
use crate::traits::{Connection, ConnectionProvider, Directory};

/// Memoizing front-end over a [`Directory`].
///
/// Construct one at startup and share it by reference; the registry is the
/// only shared mutable state in this crate and is safe for concurrent use.
pub struct ProviderRegistry {
    directory: Arc<dyn Directory>,
    providers: DashMap<String, Arc<dyn ConnectionProvider>>,
}

impl ProviderRegistry {
    /// Create a registry backed by the given directory.
    pub fn new(directory: Arc<dyn Directory>) -> Self {
        Self {
            directory,
            providers: DashMap::new(),
        }
    }

    /// Open a new connection from the provider registered under `name`.
    ///
    /// The provider handle is resolved through the directory on first use and
    /// memoized for every later call.
    ///
    /// # Errors
    ///
    /// [`Error::ProviderNotFound`] when the directory has no entry for
    /// `name`; [`Error::Connection`] when the provider cannot produce a
    /// connection.
    pub fn get_connection(&self, name: &str) -> Result<Box<dyn Connection>> {
        trace!(target: "dbres::registry", name, "Resolving connection provider");

        let provider = self.provider(name)?;

        let conn = provider.open_connection().map_err(|source| {
            error!(
                target: "dbres::registry",
                name,
                error = %source,
                "Provider failed to open a connection"
            );
            Error::Connection {
                name: name.to_string(),
                source,
            }
        })?;

        trace!(
            target: "dbres::registry",
            name,
            conn_id = conn.id(),
            "Connection established"
        );
        Ok(conn)
    }

    /// Number of provider handles currently memoized.
    pub fn cached_providers(&self) -> usize {
        self.providers.len()
    }

    fn provider(&self, name: &str) -> Result<Arc<dyn ConnectionProvider>> {
        if let Some(cached) = self.providers.get(name) {
            return Ok(Arc::clone(cached.value()));
        }

        let resolved = self.directory.lookup(name).ok_or_else(|| {
            error!(target: "dbres::registry", name, "No provider found in directory");
            Error::ProviderNotFound {
                name: name.to_string(),
            }
        })?;
        debug!(target: "dbres::registry", name, "Provider resolved and cached");

        // A racing lookup may have inserted first; keep whichever handle won.
        let entry = self
            .providers
            .entry(name.to_string())
            .or_insert(resolved);
        Ok(Arc::clone(entry.value()))
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("cached_providers", &self.providers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoxError;
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubConnection;

    impl Connection for StubConnection {
        fn rollback(&mut self) -> std::result::Result<(), BoxError> {
            Ok(())
        }
        fn clear_warnings(&mut self) -> std::result::Result<(), BoxError> {
            Ok(())
        }
        fn close(&mut self) -> std::result::Result<(), BoxError> {
            Ok(())
        }
        fn is_closed(&self) -> std::result::Result<bool, BoxError> {
            Ok(false)
        }
        fn id(&self) -> u64 {
            7
        }
    }

    struct StubProvider {
        fail: bool,
    }

    impl ConnectionProvider for StubProvider {
        fn open_connection(&self) -> std::result::Result<Box<dyn Connection>, BoxError> {
            if self.fail {
                Err(Box::new(io::Error::new(
                    io::ErrorKind::ConnectionRefused,
                    "pool exhausted",
                )))
            } else {
                Ok(Box::new(StubConnection))
            }
        }
    }

    struct StubDirectory {
        known: String,
        fail_open: bool,
        lookups: AtomicUsize,
    }

    impl StubDirectory {
        fn new(known: &str, fail_open: bool) -> Self {
            Self {
                known: known.to_string(),
                fail_open,
                lookups: AtomicUsize::new(0),
            }
        }
    }

    impl Directory for StubDirectory {
        fn lookup(&self, name: &str) -> Option<Arc<dyn ConnectionProvider>> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            (name == self.known).then(|| {
                Arc::new(StubProvider {
                    fail: self.fail_open,
                }) as Arc<dyn ConnectionProvider>
            })
        }
    }

    #[test]
    fn test_get_connection_resolves_and_opens() {
        let registry = ProviderRegistry::new(Arc::new(StubDirectory::new("orders-db", false)));
        let conn = registry.get_connection("orders-db").unwrap();
        assert_eq!(conn.id(), 7);
        assert_eq!(registry.cached_providers(), 1);
    }

    #[test]
    fn test_missing_name_is_not_found() {
        let registry = ProviderRegistry::new(Arc::new(StubDirectory::new("orders-db", false)));
        let err = registry.get_connection("missing-name").map(|_| ()).unwrap_err();
        assert!(matches!(err, Error::ProviderNotFound { name } if name == "missing-name"));
        assert_eq!(registry.cached_providers(), 0);
    }

    #[test]
    fn test_open_failure_is_connection_error() {
        let registry = ProviderRegistry::new(Arc::new(StubDirectory::new("orders-db", true)));
        let err = registry.get_connection("orders-db").map(|_| ()).unwrap_err();
        assert!(matches!(err, Error::Connection { ref name, .. } if name == "orders-db"));
        // The handle itself resolved fine and stays cached.
        assert_eq!(registry.cached_providers(), 1);
    }

    #[test]
    fn test_second_lookup_hits_cache() {
        let directory = Arc::new(StubDirectory::new("orders-db", false));
        let registry = ProviderRegistry::new(directory.clone());

        registry.get_connection("orders-db").unwrap();
        registry.get_connection("orders-db").unwrap();

        assert_eq!(directory.lookups.load(Ordering::SeqCst), 1);
        assert_eq!(registry.cached_providers(), 1);
    }
}
