//! Application state shared by all request handlers.
//!
//! Holds the repository trait object and the immutable startup
//! configuration. Nothing in here is mutated after startup.

use std::sync::Arc;

use wines_core::storage::WineRepository;

use crate::config::Config;

/// Shared application state.
///
/// Cloned for each request handler; clones share the repository and config.
#[derive(Clone)]
pub struct AppState {
    /// Wine repository (selected storage backend).
    pub wine_repo: Arc<dyn WineRepository>,
    /// Read-only configuration resolved at startup.
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates a new AppState with the given repository and configuration.
    pub fn new(wine_repo: Arc<dyn WineRepository>, config: Config) -> Self {
        Self {
            wine_repo,
            config: Arc::new(config),
        }
    }
}

#[cfg(feature = "inmemory")]
impl Default for AppState {
    /// In-memory state with default configuration.
    fn default() -> Self {
        Self::new(
            Arc::new(crate::storage::InMemoryRepository::new()),
            Config::default(),
        )
    }
}
