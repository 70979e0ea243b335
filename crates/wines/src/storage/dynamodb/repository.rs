//! DynamoDB repository implementation.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::types::ReturnValue;
use aws_sdk_dynamodb::Client;

use wines_core::storage::{DeleteAck, Result, StorageError, WineRepository};
use wines_core::wine::{UpdateExpression, Wine, WineId};

use super::conversions::{
    item_to_wine, key_attribute, scanned_items_to_wines, update_attribute_names,
    update_attribute_values, wine_to_item, PARTITION_KEY,
};
use super::error::{
    map_delete_item_error, map_get_item_error, map_put_item_error, map_scan_error,
    map_update_item_error,
};
use crate::config::Config;

/// DynamoDB-based repository implementation.
pub struct DynamoDbRepository {
    client: Client,
    table_name: String,
}

impl DynamoDbRepository {
    /// Creates a new repository with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Creates a repository from the startup configuration.
    ///
    /// Uses the AWS SDK default credential chain, with the configured region
    /// and endpoint taking precedence when set.
    pub async fn from_config(config: &Config) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(endpoint_url) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }

        let sdk_config = loader.load().await;
        Self::new(Client::new(&sdk_config), config.table_name.clone())
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl WineRepository for DynamoDbRepository {
    async fn scan_wines(&self, limit: usize) -> Result<Vec<Wine>> {
        let result = self
            .client
            .scan()
            .table_name(&self.table_name)
            .limit(i32::try_from(limit).unwrap_or(i32::MAX))
            .send()
            .await
            .map_err(map_scan_error)?;

        let items = result.items.unwrap_or_default();
        Ok(scanned_items_to_wines(&items, limit))
    }

    async fn get_wine(&self, id: &WineId) -> Result<Option<Wine>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(PARTITION_KEY, key_attribute(id))
            .send()
            .await
            .map_err(map_get_item_error)?;

        match result.item {
            Some(item) => Ok(Some(item_to_wine(&item)?)),
            None => Ok(None),
        }
    }

    async fn put_wine(&self, wine: &Wine) -> Result<Wine> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(wine_to_item(wine)))
            .send()
            .await
            .map_err(map_put_item_error)?;

        Ok(wine.clone())
    }

    async fn update_wine(&self, id: &WineId, update: &UpdateExpression) -> Result<Wine> {
        let set_clause = update.to_set_clause().ok_or_else(|| {
            StorageError::InvalidData("Update expression has no assignments".to_string())
        })?;

        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(PARTITION_KEY, key_attribute(id))
            .update_expression(set_clause)
            .condition_expression(format!("attribute_exists(#{PARTITION_KEY})"))
            .set_expression_attribute_names(Some(update_attribute_names(update)))
            .set_expression_attribute_values(Some(update_attribute_values(update)))
            .return_values(ReturnValue::AllNew)
            .send()
            .await
            .map_err(|e| map_update_item_error(e, id.to_string()))?;

        let attributes = result.attributes.ok_or_else(|| {
            StorageError::InvalidData(format!("UpdateItem returned no attributes for {}", id))
        })?;

        item_to_wine(&attributes)
    }

    async fn delete_wine(&self, id: &WineId) -> Result<DeleteAck> {
        let result = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key(PARTITION_KEY, key_attribute(id))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(map_delete_item_error)?;

        match result.attributes {
            Some(item) if !item.is_empty() => Ok(DeleteAck::removed(item_to_wine(&item)?)),
            _ => Ok(DeleteAck::default()),
        }
    }
}
