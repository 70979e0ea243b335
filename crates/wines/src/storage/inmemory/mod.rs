//! In-memory storage backend.
//!
//! Stores wines in a HashMap wrapped in `Arc<RwLock<_>>`. Nothing is
//! persisted; data is lost when the process exits.

mod repository;

pub use repository::InMemoryRepository;
