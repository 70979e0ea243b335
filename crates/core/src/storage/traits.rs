use async_trait::async_trait;

use crate::wine::{UpdateExpression, Wine, WineId};

use super::{DeleteAck, Result};

/// Keyed record store for wines.
///
/// Each operation is a single storage call. Failures are returned as-is: no
/// retries, no backoff.
#[async_trait]
pub trait WineRepository: Send + Sync {
    /// Returns up to `limit` records from a full-table scan.
    async fn scan_wines(&self, limit: usize) -> Result<Vec<Wine>>;

    /// Gets a wine by its key.
    async fn get_wine(&self, id: &WineId) -> Result<Option<Wine>>;

    /// Stores a wine, replacing any record with the same key.
    async fn put_wine(&self, wine: &Wine) -> Result<Wine>;

    /// Applies a non-empty update expression to an existing wine and returns
    /// the record as stored afterwards. Fails when the wine does not exist.
    async fn update_wine(&self, id: &WineId, update: &UpdateExpression) -> Result<Wine>;

    /// Deletes a wine. Deleting a missing key succeeds with an empty ack.
    async fn delete_wine(&self, id: &WineId) -> Result<DeleteAck>;
}
