use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use wines_core::{envelope::ErrorEnvelope, storage::StorageError};

/// What made a handler fail.
#[derive(Debug)]
enum Cause {
    Storage(StorageError),
    Body(JsonRejection),
}

/// Handler failure bound to the request URL.
///
/// Renders as HTTP 500 with the `{statusCode, error, url}` envelope,
/// regardless of the underlying fault's category.
#[derive(Debug)]
pub struct ApiError {
    url: String,
    cause: Cause,
}

impl ApiError {
    pub fn new(url: impl Into<String>, source: StorageError) -> Self {
        Self {
            url: url.into(),
            cause: Cause::Storage(source),
        }
    }

    /// A request body that could not be read as the route's payload.
    pub fn rejected_body(url: impl Into<String>, rejection: JsonRejection) -> Self {
        Self {
            url: url.into(),
            cause: Cause::Body(rejection),
        }
    }

    fn message(&self) -> String {
        match &self.cause {
            Cause::Storage(e) => e.to_string(),
            Cause::Body(rejection) => rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.message();

        match &self.cause {
            Cause::Storage(_) => {
                tracing::error!(url = %self.url, error = %message, "Storage request failed")
            }
            Cause::Body(_) => {
                tracing::warn!(url = %self.url, error = %message, "Rejected request body")
            }
        }

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorEnvelope::internal(message, self.url)),
        )
            .into_response()
    }
}
