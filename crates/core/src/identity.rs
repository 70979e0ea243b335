//! Best-effort caller identity.
//!
//! The identity is advisory: it stamps new records and is never used to
//! authorize a request. Resolution is total; every malformed or missing input
//! collapses to [`Identity::Anonymous`].

use serde_json::Value;

/// Value stored for callers without a resolvable identity.
pub const UNAUTH: &str = "UNAUTH";

/// Separator between the user pool descriptor and the subject id in a Cognito
/// authentication provider string.
pub const COGNITO_SIGN_IN_MARKER: &str = ":CognitoSignIn:";

/// JSON pointer to the provider string inside request metadata.
const PROVIDER_POINTER: &str =
    "/apiGateway/event/requestContext/identity/cognitoAuthenticationProvider";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Identified(String),
    Anonymous,
}

impl Identity {
    pub fn as_str(&self) -> &str {
        match self {
            Identity::Identified(subject) => subject,
            Identity::Anonymous => UNAUTH,
        }
    }
}

/// Resolves the caller from request metadata shaped as
/// `{apiGateway: {event: {requestContext: {identity: {cognitoAuthenticationProvider}}}}}`.
pub fn resolve_identity(metadata: &Value) -> Identity {
    identity_from_provider(metadata.pointer(PROVIDER_POINTER).and_then(Value::as_str))
}

/// Extracts the subject after the last sign-in marker of a provider string.
///
/// A provider without the marker is taken whole.
pub fn identity_from_provider(provider: Option<&str>) -> Identity {
    let subject = provider
        .filter(|p| !p.is_empty())
        .and_then(|p| p.rsplit(COGNITO_SIGN_IN_MARKER).next())
        .filter(|s| !s.is_empty());

    match subject {
        Some(subject) => Identity::Identified(subject.to_string()),
        None => Identity::Anonymous,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn metadata(provider: Value) -> Value {
        json!({
            "apiGateway": {
                "event": {
                    "requestContext": {
                        "identity": { "cognitoAuthenticationProvider": provider }
                    }
                }
            }
        })
    }

    #[test]
    fn test_resolves_cognito_subject() {
        let identity = resolve_identity(&metadata(json!("x:y:CognitoSignIn:user-42")));
        assert_eq!(identity, Identity::Identified("user-42".to_string()));
        assert_eq!(identity.as_str(), "user-42");
    }

    #[test]
    fn test_takes_text_after_last_marker() {
        let identity = identity_from_provider(Some(
            "pool:CognitoSignIn:first,pool:CognitoSignIn:second",
        ));
        assert_eq!(identity, Identity::Identified("second".to_string()));
    }

    #[test]
    fn test_provider_without_marker_is_taken_whole() {
        let identity = identity_from_provider(Some("plain-subject"));
        assert_eq!(identity, Identity::Identified("plain-subject".to_string()));
    }

    #[test]
    fn test_missing_nesting_is_anonymous() {
        assert_eq!(resolve_identity(&json!({})), Identity::Anonymous);
        assert_eq!(
            resolve_identity(&json!({ "apiGateway": { "event": {} } })),
            Identity::Anonymous
        );
        assert_eq!(resolve_identity(&Value::Null), Identity::Anonymous);
    }

    #[test]
    fn test_wrong_shape_is_anonymous() {
        assert_eq!(
            resolve_identity(&json!({ "apiGateway": "not-an-object" })),
            Identity::Anonymous
        );
        assert_eq!(resolve_identity(&metadata(json!(42))), Identity::Anonymous);
        assert_eq!(resolve_identity(&metadata(Value::Null)), Identity::Anonymous);
    }

    #[test]
    fn test_empty_provider_or_subject_is_anonymous() {
        assert_eq!(identity_from_provider(Some("")), Identity::Anonymous);
        assert_eq!(
            identity_from_provider(Some("pool:CognitoSignIn:")),
            Identity::Anonymous
        );
        assert_eq!(Identity::Anonymous.as_str(), UNAUTH);
    }
}
