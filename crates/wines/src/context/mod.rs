//! Request-scoped context extracted from request metadata.

mod extractor;
mod types;

pub use types::RequestContext;
