//! DynamoDB storage backend implementation.
//!
//! One flat table keyed by `id`. The key's attribute type (`N` or `S`) follows
//! the configured key type.

mod conversions;
mod error;
mod repository;

pub use repository::DynamoDbRepository;
