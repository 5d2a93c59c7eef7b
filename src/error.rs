// HTTP API error types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use serde_json::json;

use crate::database::StoreError;

/// One field-level validation failure, reported in a 400 body.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub msg: String,
}

/// HTTP API error with client-facing status codes and messages.
///
/// Ownership violations intentionally map to 401 rather than 403 to match
/// the published API contract.
#[derive(Debug)]
pub enum ApiError {
    /// 401 - no token presented
    Unauthenticated,
    /// 401 - token presented but rejected
    InvalidCredential,
    /// 401 - caller authenticated but not the entity owner
    Forbidden,
    /// 400 - login with a bad email/password pair
    BadCredentials,
    /// 400 - missing multipart file field on upload
    MissingFile,
    /// 404 - entity name, e.g. "Post"
    NotFound(&'static str),
    /// 400 - field-level validation failures
    Validation(Vec<FieldError>),
    /// 500 - store or unexpected failure, detail already logged
    Internal,
}

impl ApiError {
    pub fn validation(field: &'static str, msg: impl Into<String>) -> Self {
        ApiError::Validation(vec![FieldError { field, msg: msg.into() }])
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::InvalidCredential => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::UNAUTHORIZED,
            ApiError::BadCredentials => StatusCode::BAD_REQUEST,
            ApiError::MissingFile => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Unauthenticated => write!(f, "no token"),
            ApiError::InvalidCredential => write!(f, "token not valid"),
            ApiError::Forbidden => write!(f, "user not authorized"),
            ApiError::BadCredentials => write!(f, "invalid credentials"),
            ApiError::MissingFile => write!(f, "no file provided"),
            ApiError::NotFound(what) => write!(f, "{} not found", what),
            ApiError::Validation(errors) => write!(f, "validation failed ({} errors)", errors.len()),
            ApiError::Internal => write!(f, "server error"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound("Resource"),
            StoreError::Duplicate(field) => {
                ApiError::validation(field, format!("{} already in use", field))
            }
            StoreError::Sqlx(e) => {
                // Never leak driver errors to the client
                tracing::error!("store error: {}", e);
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        match self {
            ApiError::Unauthenticated => {
                (status, Json(json!({ "msg": "No token, authorization denied" }))).into_response()
            }
            ApiError::InvalidCredential => {
                (status, Json(json!({ "msg": "Token is not valid" }))).into_response()
            }
            ApiError::Forbidden => {
                (status, Json(json!({ "msg": "User not authorized" }))).into_response()
            }
            ApiError::BadCredentials => {
                (status, Json(json!({ "msg": "Invalid credentials" }))).into_response()
            }
            ApiError::MissingFile => {
                (status, Json(json!({ "error": "No file provided" }))).into_response()
            }
            ApiError::NotFound(what) => {
                (status, Json(json!({ "msg": format!("{} not found", what) }))).into_response()
            }
            ApiError::Validation(errors) => {
                (status, Json(json!({ "errors": errors }))).into_response()
            }
            ApiError::Internal => (status, "Server error").into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ownership_violations_use_401() {
        assert_eq!(ApiError::Forbidden.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn status_codes_match_contract() {
        assert_eq!(ApiError::Unauthenticated.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::InvalidCredential.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::NotFound("Post").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::validation("text", "Text is required").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::MissingFile.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Internal.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn duplicate_maps_to_field_error() {
        let err: ApiError = StoreError::Duplicate("email").into();
        match err {
            ApiError::Validation(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "email");
            }
            other => panic!("expected Validation, got {:?}", other),
        }
    }
}
