use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Attributes stamped by the server; callers never set them.
pub const SERVER_OWNED_ATTRIBUTES: &[&str] =
    &["id", "complete", "createdAt", "updatedAt", "userId"];

/// Attributes the record models by name. Anything else lands in [`Wine::extra`].
pub const NAMED_ATTRIBUTES: &[&str] = &[
    "id",
    "type",
    "name",
    "price",
    "featured",
    "image",
    "complete",
    "createdAt",
    "updatedAt",
    "userId",
];

/// Primary key of a wine record.
///
/// Serialized untagged so that numeric ids travel as JSON numbers and text
/// ids as JSON strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WineId {
    Number(i64),
    Text(String),
}

impl fmt::Display for WineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WineId::Number(n) => write!(f, "{n}"),
            WineId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for WineId {
    fn from(n: i64) -> Self {
        WineId::Number(n)
    }
}

impl From<&str> for WineId {
    fn from(s: &str) -> Self {
        WineId::Text(s.to_string())
    }
}

/// A stored wine record.
///
/// `name`, `price`, `featured` and `image` hold whatever JSON the caller sent.
/// Attributes outside the named set are kept verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wine {
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
    /// Always `false` on creation; no route transitions it.
    pub complete: bool,
    #[serde(with = "crate::serde::iso8601")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::serde::iso8601")]
    pub updated_at: DateTime<Utc>,
    pub user_id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Wine {
    /// Creates a bare record with only the server-assigned envelope set.
    pub fn new(id: WineId, user_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            kind: None,
            name: None,
            price: None,
            featured: None,
            image: None,
            complete: false,
            created_at: now,
            updated_at: now,
            user_id: user_id.into(),
            extra: Map::new(),
        }
    }

    /// Sets the wine name (useful for testing).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(Value::String(name.into()));
        self
    }

    /// Sets the wine price (useful for testing).
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(Value::from(price));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn sample_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
    }

    #[test]
    fn test_wine_id_display() {
        assert_eq!(WineId::Number(7).to_string(), "7");
        assert_eq!(WineId::from("abc-123").to_string(), "abc-123");
    }

    #[test]
    fn test_wine_id_deserializes_number_or_string() {
        let n: WineId = serde_json::from_value(json!(42)).unwrap();
        let s: WineId = serde_json::from_value(json!("42")).unwrap();

        assert_eq!(n, WineId::Number(42));
        assert_eq!(s, WineId::Text("42".to_string()));
    }

    #[test]
    fn test_new_wine_defaults() {
        let wine = Wine::new(WineId::Number(1), "user-1", sample_time());

        assert!(!wine.complete);
        assert_eq!(wine.created_at, wine.updated_at);
        assert_eq!(wine.user_id, "user-1");
        assert!(wine.name.is_none());
    }

    #[test]
    fn test_wine_serializes_camel_case_and_skips_absent_fields() {
        let wine = Wine::new(WineId::Number(1), "UNAUTH", sample_time()).with_name("Malbec");
        let value = serde_json::to_value(&wine).unwrap();

        assert_eq!(value["id"], 1);
        assert_eq!(value["name"], "Malbec");
        assert_eq!(value["complete"], false);
        assert_eq!(value["userId"], "UNAUTH");
        assert_eq!(value["createdAt"], "2024-01-15T10:30:00.000000Z");
        assert!(value.get("type").is_none());
        assert!(value.get("price").is_none());
    }

    #[test]
    fn test_wine_type_field_maps_to_kind() {
        let value = json!({
            "id": "w-1",
            "type": "red",
            "complete": false,
            "createdAt": "2024-01-15T10:30:00Z",
            "updatedAt": "2024-01-15T10:30:00Z",
            "userId": "user-1"
        });

        let wine: Wine = serde_json::from_value(value).unwrap();

        assert_eq!(wine.kind.as_deref(), Some("red"));
        assert_eq!(wine.id, WineId::from("w-1"));
        assert!(wine.extra.is_empty());
    }

    #[test]
    fn test_wine_keeps_unmodelled_attributes() {
        let value = json!({
            "id": 3,
            "name": "Tokaji",
            "price": "12.99",
            "vintage": 2015,
            "regions": ["Tokaj"],
            "complete": false,
            "createdAt": "2024-01-15T10:30:00Z",
            "updatedAt": "2024-01-15T10:30:00Z",
            "userId": "user-1"
        });

        let wine: Wine = serde_json::from_value(value).unwrap();

        assert_eq!(wine.price, Some(json!("12.99")));
        assert_eq!(wine.extra.get("vintage"), Some(&json!(2015)));
        assert_eq!(wine.extra.len(), 2);

        let out = serde_json::to_value(&wine).unwrap();
        assert_eq!(out["vintage"], 2015);
        assert_eq!(out["regions"], json!(["Tokaj"]));
        assert_eq!(out["price"], "12.99");
    }
}
