mod error;
mod traits;
mod types;

pub use error::{Result, StorageError};
pub use traits::WineRepository;
pub use types::DeleteAck;
