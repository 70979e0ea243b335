mod key;
mod requests;
mod types;
mod update;

pub use key::{coerce_key, generate_id, CoercedKey, KeyType};
pub use requests::{CreateWineRequest, UpdateWineRequest};
pub use types::{Wine, WineId, NAMED_ATTRIBUTES, SERVER_OWNED_ATTRIBUTES};
pub use update::{FieldAssignment, UpdateExpression};

/// Maximum number of records returned by a single list request.
pub const SCAN_LIMIT: usize = 100;
