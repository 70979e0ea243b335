//! Wine CRUD handlers.
//!
//! Every handler performs at most one storage call and answers with the
//! uniform envelope. Storage failures and unreadable bodies become
//! [`ApiError`] at the call site.

use axum::{
    extract::{rejection::JsonRejection, OriginalUri, Path, State},
    http::Uri,
    Json,
};
use chrono::Utc;
use serde::Serialize;

use wines_core::envelope::Envelope;
use wines_core::storage::{DeleteAck, StorageError};
use wines_core::wine::{
    coerce_key, generate_id, CoercedKey, CreateWineRequest, UpdateExpression, UpdateWineRequest,
    Wine, SCAN_LIMIT,
};

use crate::{context::RequestContext, handlers::ApiError, state::AppState};

type HandlerResult = Result<Json<Envelope>, ApiError>;

/// Path and query of the request as received, before any nesting.
fn request_url(uri: &Uri) -> String {
    uri.path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string())
}

fn respond<T: Serialize + ?Sized>(url: String, payload: Option<&T>) -> HandlerResult {
    match Envelope::ok(url.as_str(), payload) {
        Ok(envelope) => Ok(Json(envelope)),
        Err(e) => Err(ApiError::new(url, StorageError::Serialization(e.to_string()))),
    }
}

/// List wines (GET /wines).
pub async fn list_wines(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> HandlerResult {
    let url = request_url(&uri);

    let wines = state
        .wine_repo
        .scan_wines(SCAN_LIMIT)
        .await
        .map_err(|e| ApiError::new(&url, e))?;

    tracing::debug!(count = wines.len(), "Scanned wines");

    respond(url, Some(&wines))
}

/// Get a single wine by id (GET /wines/{id}).
///
/// A missing wine is a success with no body.
pub async fn get_wine(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
) -> HandlerResult {
    let url = request_url(&uri);

    let CoercedKey::Id(id) = coerce_key(&id, state.config.key_type) else {
        tracing::debug!(raw_id = %id, "Path id is not a number, nothing to fetch");
        return respond::<Wine>(url, None);
    };

    let wine = state
        .wine_repo
        .get_wine(&id)
        .await
        .map_err(|e| ApiError::new(&url, e))?;

    respond(url, wine.as_ref())
}

/// Create a new wine (POST /wines).
pub async fn create_wine(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    ctx: RequestContext,
    body: Result<Json<CreateWineRequest>, JsonRejection>,
) -> HandlerResult {
    let url = request_url(&uri);
    let Json(payload) = body.map_err(|e| ApiError::rejected_body(&url, e))?;

    let id = generate_id(state.config.key_type);
    let wine = payload.into_wine(id, &ctx.identity, Utc::now());

    let stored = state
        .wine_repo
        .put_wine(&wine)
        .await
        .map_err(|e| ApiError::new(&url, e))?;

    tracing::info!(
        wine_id = %stored.id,
        user_id = %stored.user_id,
        request_id = %ctx.request_id,
        "Created new wine"
    );

    respond(url, Some(&stored))
}

/// Update a wine (PUT /wines). The id travels in the body.
///
/// Only supplied fields are written. A body without any mutable field skips
/// the update and returns the wine as currently stored.
pub async fn update_wine(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    ctx: RequestContext,
    body: Result<Json<UpdateWineRequest>, JsonRejection>,
) -> HandlerResult {
    let url = request_url(&uri);
    let Json(payload) = body.map_err(|e| ApiError::rejected_body(&url, e))?;

    let CoercedKey::Id(id) = CoercedKey::from_id(payload.id.clone(), state.config.key_type)
    else {
        return Err(ApiError::new(
            url,
            StorageError::NotFound {
                entity_type: "Wine",
                id: payload.id.to_string(),
            },
        ));
    };

    let update = UpdateExpression::from_request(&payload, Utc::now());

    if update.is_empty() {
        tracing::debug!(wine_id = %id, "Update carries no fields, returning stored wine");
        let wine = state
            .wine_repo
            .get_wine(&id)
            .await
            .map_err(|e| ApiError::new(&url, e))?;
        return respond(url, wine.as_ref());
    }

    let updated = state
        .wine_repo
        .update_wine(&id, &update)
        .await
        .map_err(|e| ApiError::new(&url, e))?;

    tracing::info!(
        wine_id = %id,
        fields = ?update.attribute_names(),
        request_id = %ctx.request_id,
        "Updated wine"
    );

    respond(url, Some(&updated))
}

/// Delete a wine by id (DELETE /wines/{id}).
///
/// Deleting a missing wine succeeds with an empty acknowledgment.
pub async fn delete_wine(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
) -> HandlerResult {
    let url = request_url(&uri);

    let CoercedKey::Id(id) = coerce_key(&id, state.config.key_type) else {
        return respond(url, Some(&DeleteAck::default()));
    };

    let ack = state
        .wine_repo
        .delete_wine(&id)
        .await
        .map_err(|e| ApiError::new(&url, e))?;

    tracing::info!(wine_id = %id, existed = ack.attributes.is_some(), "Deleted wine");

    respond(url, Some(&ack))
}
