//! Uniform response envelope.
//!
//! Success: `{statusCode, url, body}` where `body` is the JSON-serialized
//! payload, omitted when the payload is absent. Failure:
//! `{statusCode, error, url}`.

use serde::{Deserialize, Serialize};

pub const STATUS_OK: u16 = 200;
pub const STATUS_INTERNAL_ERROR: u16 = 500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub status_code: u16,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl Envelope {
    /// Wraps `payload` in a success envelope.
    pub fn ok<T: Serialize + ?Sized>(
        url: impl Into<String>,
        payload: Option<&T>,
    ) -> Result<Self, serde_json::Error> {
        let body = payload.map(serde_json::to_string).transpose()?;
        Ok(Self {
            status_code: STATUS_OK,
            url: url.into(),
            body,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub status_code: u16,
    pub error: String,
    pub url: String,
}

impl ErrorEnvelope {
    pub fn internal(error: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            status_code: STATUS_INTERNAL_ERROR,
            error: error.into(),
            url: url.into(),
        }
    }
}
