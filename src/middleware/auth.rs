use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::{verify_token, Claims};
use crate::context::AppContext;
use crate::error::ApiError;

pub const AUTH_HEADER: &str = "x-auth-token";

/// Caller identity resolved from the token, injected into request extensions
/// for every protected handler.
#[derive(Clone, Copy, Debug)]
pub struct AuthUser {
    pub id: Uuid,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self { id: claims.sub }
    }
}

/// Token-verification gate for all `/api` routes. Rejects before the handler
/// runs; on success the handler sees an `AuthUser` extension.
pub async fn require_auth(
    State(ctx): State<AppContext>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(request.headers()).ok_or(ApiError::Unauthenticated)?;

    let claims = verify_token(&token, &ctx.config.jwt_secret)
        .map_err(|_| ApiError::InvalidCredential)?;

    request.extensions_mut().insert(AuthUser::from(claims));
    Ok(next.run(request).await)
}

fn extract_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTH_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
