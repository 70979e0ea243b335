pub mod error;
pub mod wines;

pub use error::ApiError;
