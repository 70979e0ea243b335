//! Functional core for the wines service.
//!
//! Everything in this crate is pure: record and request types, key coercion,
//! identity resolution, update-expression construction and the response
//! envelope. The only I/O seam is the [`storage::WineRepository`] trait, which
//! the service crate implements for each storage backend.

pub mod envelope;
pub mod identity;
pub mod serde;
pub mod storage;
pub mod wine;
