pub mod auth;
pub use self::auth::auth;

use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Form fields of the authentication request. Fields absent from the body
/// decode to empty strings; an empty pair can never match a stored record.
#[derive(Debug, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Authentication outcome returned to the caller. Every code path produces
/// one of these; callers distinguish outcomes by `success` and `message`,
/// never by HTTP status.
#[derive(Debug, Serialize, Deserialize)]
pub struct Verdict {
    pub username: String,
    pub customerno: String,
    pub message: String,
    pub success: bool,
    pub error: Option<String>,
}

impl Verdict {
    #[must_use]
    pub fn granted(username: String, customerno: String, message: &str) -> Self {
        Self {
            username,
            customerno,
            message: message.to_string(),
            success: true,
            error: None,
        }
    }

    #[must_use]
    pub fn denied(message: &str, error: Option<String>) -> Self {
        Self {
            username: String::new(),
            customerno: String::new(),
            message: message.to_string(),
            success: false,
            error,
        }
    }
}

impl IntoResponse for Verdict {
    fn into_response(self) -> Response {
        // callers expect text/plain carrying a JSON body
        let body = serde_json::to_string(&self).unwrap_or_else(|_| {
            r#"{"username":"","customerno":"","message":"Error encoding response","success":false,"error":null}"#
                .to_string()
        });

        ([(header::CONTENT_TYPE, "text/plain")], body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_verdict_granted_shape() {
        let verdict = Verdict::granted(
            "alice".to_string(),
            "CS100-042".to_string(),
            "Authentication Successful",
        );
        let json: Value = serde_json::from_str(&serde_json::to_string(&verdict).unwrap()).unwrap();

        assert_eq!(json["username"], "alice");
        assert_eq!(json["customerno"], "CS100-042");
        assert_eq!(json["message"], "Authentication Successful");
        assert_eq!(json["success"], true);
        assert!(json["error"].is_null());
    }

    #[test]
    fn test_verdict_denied_shape() {
        let verdict = Verdict::denied("Bad password", None);
        let json: Value = serde_json::from_str(&serde_json::to_string(&verdict).unwrap()).unwrap();

        assert_eq!(json["username"], "");
        assert_eq!(json["customerno"], "");
        assert_eq!(json["message"], "Bad password");
        assert_eq!(json["success"], false);
        assert!(json["error"].is_null());
    }

    #[test]
    fn test_verdict_denied_with_cause() {
        let verdict = Verdict::denied(
            "Vault secret path not found",
            Some("connection refused".to_string()),
        );
        let json: Value = serde_json::from_str(&serde_json::to_string(&verdict).unwrap()).unwrap();

        assert_eq!(json["error"], "connection refused");
    }

    #[test]
    fn test_credentials_default_to_empty() {
        let creds: Credentials = serde_json::from_str("{}").unwrap();
        assert_eq!(creds.username, "");
        assert_eq!(creds.password, "");
    }
}
