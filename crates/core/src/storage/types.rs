use serde::Serialize;

use crate::wine::Wine;

/// Acknowledgment of a delete.
///
/// Carries the removed record when one existed; serializes to `{}` otherwise.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DeleteAck {
    #[serde(rename = "Attributes", skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Wine>,
}

impl DeleteAck {
    pub fn removed(wine: Wine) -> Self {
        Self {
            attributes: Some(wine),
        }
    }
}
