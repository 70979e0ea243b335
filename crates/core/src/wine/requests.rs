//! Request payloads for the wine routes.
//!
//! A create body keeps every attribute the caller sends, except the
//! server-owned ones (`id`, `complete`, timestamps, `userId`), which are
//! dropped so callers cannot override them. An update body accepts only the
//! mutable attributes and rejects anything else.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::identity::Identity;

use super::{Wine, WineId, SERVER_OWNED_ATTRIBUTES};

/// Body of `POST /wines`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateWineRequest {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CreateWineRequest {
    /// Merges the caller's fields into a fresh record stamped with the
    /// server-assigned id, identity and timestamps.
    pub fn into_wine(self, id: WineId, identity: &Identity, now: DateTime<Utc>) -> Wine {
        let mut extra = self.extra;
        extra.retain(|key, _| !SERVER_OWNED_ATTRIBUTES.contains(&key.as_str()));

        Wine {
            kind: self.kind,
            name: self.name,
            price: self.price,
            featured: self.featured,
            image: self.image,
            extra,
            ..Wine::new(id, identity.as_str(), now)
        }
    }
}

/// Body of `PUT /wines`. Every field except `id` is optional; absent fields
/// are left untouched in storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateWineRequest {
    pub id: WineId,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Value>,
}

impl UpdateWineRequest {
    /// Creates an update that touches nothing but addresses `id`.
    pub fn new(id: WineId) -> Self {
        Self {
            id,
            kind: None,
            name: None,
            price: None,
            featured: None,
            image: None,
        }
    }

    /// Sets the new price (useful for testing).
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(Value::from(price));
        self
    }

    /// Sets the new name (useful for testing).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(Value::String(name.into()));
        self
    }
}
