//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use wines_core::storage::{DeleteAck, Result, StorageError, WineRepository};
use wines_core::wine::{UpdateExpression, Wine, WineId};

/// In-memory storage backend.
///
/// Concurrent updates to the same key are last-writer-wins, as with the
/// DynamoDB backend.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    wines: Arc<RwLock<HashMap<WineId, Wine>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WineRepository for InMemoryRepository {
    async fn scan_wines(&self, limit: usize) -> Result<Vec<Wine>> {
        let wines = self.wines.read().await;
        Ok(wines.values().take(limit).cloned().collect())
    }

    async fn get_wine(&self, id: &WineId) -> Result<Option<Wine>> {
        let wines = self.wines.read().await;
        Ok(wines.get(id).cloned())
    }

    async fn put_wine(&self, wine: &Wine) -> Result<Wine> {
        let mut wines = self.wines.write().await;
        wines.insert(wine.id.clone(), wine.clone());
        Ok(wine.clone())
    }

    async fn update_wine(&self, id: &WineId, update: &UpdateExpression) -> Result<Wine> {
        if update.is_empty() {
            return Err(StorageError::InvalidData(
                "Update expression has no assignments".to_string(),
            ));
        }

        let mut wines = self.wines.write().await;
        let wine = wines.get_mut(id).ok_or_else(|| StorageError::NotFound {
            entity_type: "Wine",
            id: id.to_string(),
        })?;

        update.apply_to(wine);
        Ok(wine.clone())
    }

    async fn delete_wine(&self, id: &WineId) -> Result<DeleteAck> {
        let mut wines = self.wines.write().await;
        Ok(wines
            .remove(id)
            .map(DeleteAck::removed)
            .unwrap_or_default())
    }
}
