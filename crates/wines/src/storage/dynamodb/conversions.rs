//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and
//! domain types. These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, Utc};
use serde_json::{Map, Number, Value};
use wines_core::serde::{format_timestamp, parse_timestamp};
use wines_core::storage::StorageError;
use wines_core::wine::{FieldAssignment, UpdateExpression, Wine, WineId, NAMED_ATTRIBUTES};

pub const PARTITION_KEY: &str = "id";

pub type Item = HashMap<String, AttributeValue>;

/// Convert a key to its DynamoDB attribute.
pub fn key_attribute(id: &WineId) -> AttributeValue {
    match id {
        WineId::Number(n) => AttributeValue::N(n.to_string()),
        WineId::Text(s) => AttributeValue::S(s.clone()),
    }
}

/// Convert a caller-supplied JSON value to a DynamoDB attribute.
pub fn json_to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(values) => AttributeValue::L(values.iter().map(json_to_attribute).collect()),
        Value::Object(map) => AttributeValue::M(
            map.iter()
                .map(|(k, v)| (k.clone(), json_to_attribute(v)))
                .collect(),
        ),
    }
}

/// Convert a DynamoDB attribute back to JSON.
///
/// Binary attributes have no JSON form and are reported as invalid.
pub fn attribute_to_json(key: &str, attribute: &AttributeValue) -> Result<Value, StorageError> {
    let value = match attribute {
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::N(n) => number_to_json(key, n)?,
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::L(values) => Value::Array(
            values
                .iter()
                .map(|v| attribute_to_json(key, v))
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::M(map) => Value::Object(
            map.iter()
                .map(|(k, v)| attribute_to_json(k, v).map(|v| (k.clone(), v)))
                .collect::<Result<Map<_, _>, _>>()?,
        ),
        AttributeValue::Ss(values) => {
            Value::Array(values.iter().cloned().map(Value::String).collect())
        }
        AttributeValue::Ns(values) => Value::Array(
            values
                .iter()
                .map(|n| number_to_json(key, n))
                .collect::<Result<_, _>>()?,
        ),
        _ => {
            return Err(StorageError::InvalidData(format!(
                "Unsupported attribute type for field: {}",
                key
            )))
        }
    };

    Ok(value)
}

/// Convert a Wine to DynamoDB item.
pub fn wine_to_item(wine: &Wine) -> Item {
    let mut item: Item = wine
        .extra
        .iter()
        .map(|(k, v)| (k.clone(), json_to_attribute(v)))
        .collect();

    item.insert(PARTITION_KEY.to_string(), key_attribute(&wine.id));

    if let Some(kind) = &wine.kind {
        item.insert("type".to_string(), AttributeValue::S(kind.clone()));
    }
    for (key, value) in [
        ("name", &wine.name),
        ("price", &wine.price),
        ("featured", &wine.featured),
        ("image", &wine.image),
    ] {
        if let Some(value) = value {
            item.insert(key.to_string(), json_to_attribute(value));
        }
    }

    item.insert("complete".to_string(), AttributeValue::Bool(wine.complete));
    item.insert(
        "createdAt".to_string(),
        AttributeValue::S(format_timestamp(&wine.created_at)),
    );
    item.insert(
        "updatedAt".to_string(),
        AttributeValue::S(format_timestamp(&wine.updated_at)),
    );
    item.insert("userId".to_string(), AttributeValue::S(wine.user_id.clone()));

    item
}

/// Convert a DynamoDB item to Wine.
pub fn item_to_wine(item: &Item) -> Result<Wine, StorageError> {
    let extra = item
        .iter()
        .filter(|(k, _)| !NAMED_ATTRIBUTES.contains(&k.as_str()))
        .map(|(k, v)| attribute_to_json(k, v).map(|v| (k.clone(), v)))
        .collect::<Result<Map<_, _>, _>>()?;

    Ok(Wine {
        id: get_key(item)?,
        kind: get_optional_string(item, "type"),
        name: get_optional_value(item, "name")?,
        price: get_optional_value(item, "price")?,
        featured: get_optional_value(item, "featured")?,
        image: get_optional_value(item, "image")?,
        complete: get_optional_bool(item, "complete").unwrap_or(false),
        created_at: get_datetime(item, "createdAt")?,
        updated_at: get_datetime(item, "updatedAt")?,
        user_id: get_string(item, "userId")?,
        extra,
    })
}

/// Convert scanned items, skipping any that do not form a valid record.
pub fn scanned_items_to_wines(items: &[Item], limit: usize) -> Vec<Wine> {
    items
        .iter()
        .take(limit)
        .filter_map(|item| match item_to_wine(item) {
            Ok(wine) => Some(wine),
            Err(e) => {
                tracing::warn!(
                    id = ?item.get(PARTITION_KEY),
                    error = %e,
                    "Skipping unreadable item in scan"
                );
                None
            }
        })
        .collect()
}

/// Value bound to an assignment's `:attr` placeholder.
pub fn assignment_value(assignment: &FieldAssignment) -> AttributeValue {
    match assignment {
        FieldAssignment::Kind(v) => AttributeValue::S(v.clone()),
        FieldAssignment::Price(v)
        | FieldAssignment::Featured(v)
        | FieldAssignment::Image(v)
        | FieldAssignment::Name(v) => json_to_attribute(v),
    }
}

/// Expression attribute names for an update, including the `#id` alias used
/// by the existence condition.
pub fn update_attribute_names(update: &UpdateExpression) -> HashMap<String, String> {
    let mut names: HashMap<String, String> = update
        .attribute_names()
        .into_iter()
        .map(|attr| (format!("#{attr}"), attr.to_string()))
        .collect();
    names.insert(format!("#{PARTITION_KEY}"), PARTITION_KEY.to_string());
    names
}

/// Expression attribute values for an update.
pub fn update_attribute_values(update: &UpdateExpression) -> HashMap<String, AttributeValue> {
    let mut values: HashMap<String, AttributeValue> = update
        .assignments()
        .iter()
        .map(|a| (format!(":{}", a.attribute()), assignment_value(a)))
        .collect();

    if let Some(updated_at) = update.updated_at() {
        values.insert(
            ":updatedAt".to_string(),
            AttributeValue::S(format_timestamp(&updated_at)),
        );
    }

    values
}

// ============================================================================
// Helpers
// ============================================================================

fn get_key(item: &Item) -> Result<WineId, StorageError> {
    match item.get(PARTITION_KEY) {
        Some(AttributeValue::N(n)) => n
            .parse()
            .map(WineId::Number)
            .map_err(|e| StorageError::InvalidData(format!("Invalid numeric id {}: {}", n, e))),
        Some(AttributeValue::S(s)) => Ok(WineId::Text(s.clone())),
        _ => Err(StorageError::InvalidData(format!(
            "Missing or invalid field: {}",
            PARTITION_KEY
        ))),
    }
}

fn get_string(item: &Item, key: &str) -> Result<String, StorageError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| StorageError::InvalidData(format!("Missing or invalid field: {}", key)))
}

fn get_optional_string(item: &Item, key: &str) -> Option<String> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
}

fn get_optional_bool(item: &Item, key: &str) -> Option<bool> {
    item.get(key).and_then(|v| v.as_bool().ok()).copied()
}

fn get_optional_value(item: &Item, key: &str) -> Result<Option<Value>, StorageError> {
    item.get(key).map(|v| attribute_to_json(key, v)).transpose()
}

/// Integers stay integers; anything else becomes a float.
fn number_to_json(key: &str, n: &str) -> Result<Value, StorageError> {
    if let Ok(i) = n.parse::<i64>() {
        return Ok(Value::from(i));
    }
    if let Ok(u) = n.parse::<u64>() {
        return Ok(Value::from(u));
    }
    n.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| StorageError::InvalidData(format!("Invalid number {}: {}", key, n)))
}

fn get_datetime(item: &Item, key: &str) -> Result<DateTime<Utc>, StorageError> {
    let s = get_string(item, key)?;
    parse_timestamp(&s)
        .map_err(|e| StorageError::InvalidData(format!("Invalid datetime {}: {}", key, e)))
}
