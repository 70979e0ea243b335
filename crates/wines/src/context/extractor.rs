//! Axum extractor for RequestContext.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use serde_json::{json, Value};
use uuid::Uuid;
use wines_core::identity::{resolve_identity, Identity};

use super::types::{RequestContext, RequestId};

/// Header carrying the URL-encoded API Gateway event when the service runs
/// behind a serverless HTTP adapter.
const GATEWAY_EVENT_HEADER: &str = "x-apigateway-event";

fn extract_request_id(headers: &HeaderMap) -> RequestId {
    headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .map(RequestId::from_uuid)
        .unwrap_or_else(RequestId::new)
}

fn extract_identity(headers: &HeaderMap) -> Identity {
    headers
        .get(GATEWAY_EVENT_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|raw| urlencoding::decode(raw).ok())
        .and_then(|decoded| serde_json::from_str::<Value>(&decoded).ok())
        .map(|event| resolve_identity(&json!({ "apiGateway": { "event": event } })))
        .unwrap_or(Identity::Anonymous)
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(RequestContext {
            identity: extract_identity(&parts.headers),
            request_id: extract_request_id(&parts.headers),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_event(event: &Value) -> HeaderMap {
        let encoded = urlencoding::encode(&event.to_string()).into_owned();
        let mut headers = HeaderMap::new();
        headers.insert(GATEWAY_EVENT_HEADER, encoded.parse().unwrap());
        headers
    }

    #[test]
    fn test_extract_request_id_from_header() {
        let mut headers = HeaderMap::new();
        let id = "550e8400-e29b-41d4-a716-446655440000";
        headers.insert("x-request-id", id.parse().unwrap());

        let request_id = extract_request_id(&headers);
        assert_eq!(request_id.to_string(), id);
    }

    #[test]
    fn test_extract_request_id_generates_when_invalid() {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", "not-a-uuid".parse().unwrap());

        let request_id = extract_request_id(&headers);

        Uuid::parse_str(&request_id.to_string()).expect("Should be valid UUID");
    }

    #[test]
    fn test_extract_identity_from_gateway_event() {
        let event = json!({
            "requestContext": {
                "identity": {
                    "cognitoAuthenticationProvider": concat!(
                        "cognito-idp.us-east-1.amazonaws.com/us-east-1_abc,",
                        "cognito-idp.us-east-1.amazonaws.com/us-east-1_abc:CognitoSignIn:user-42"
                    )
                }
            }
        });

        let identity = extract_identity(&headers_with_event(&event));

        assert_eq!(identity, Identity::Identified("user-42".to_string()));
    }

    #[test]
    fn test_extract_identity_without_header_is_anonymous() {
        assert_eq!(extract_identity(&HeaderMap::new()), Identity::Anonymous);
    }

    #[test]
    fn test_extract_identity_with_garbage_header_is_anonymous() {
        let mut headers = HeaderMap::new();
        headers.insert(GATEWAY_EVENT_HEADER, "%7Bnot-json".parse().unwrap());

        assert_eq!(extract_identity(&headers), Identity::Anonymous);
    }

    #[test]
    fn test_extract_identity_without_provider_is_anonymous() {
        let event = json!({ "requestContext": { "identity": {} } });

        assert_eq!(
            extract_identity(&headers_with_event(&event)),
            Identity::Anonymous
        );
    }
}
