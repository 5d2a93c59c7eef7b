use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::auth::{issue_token, password};
use crate::context::AppContext;
use crate::database::models::PublicUser;
use crate::database::users::NewUser;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub avatar: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

/// POST /auth/register - create an account and issue a token
pub async fn register(
    State(ctx): State<AppContext>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let mut errors = Vec::new();
    if body.username.trim().is_empty() {
        errors.push(crate::error::FieldError {
            field: "username",
            msg: "Username is required".into(),
        });
    }
    if body.email.trim().is_empty() {
        errors.push(crate::error::FieldError { field: "email", msg: "Email is required".into() });
    }
    if body.password.is_empty() {
        errors.push(crate::error::FieldError {
            field: "password",
            msg: "Password is required".into(),
        });
    }
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let password_hash = password::hash_password(&body.password).map_err(|e| {
        tracing::error!("password hashing failed: {}", e);
        ApiError::Internal
    })?;

    // Duplicate username/email surfaces as a field-level 400
    let user = ctx
        .db
        .users()
        .insert(NewUser {
            username: body.username,
            email: body.email,
            password_hash,
            avatar: body.avatar,
        })
        .await?;

    let token =
        issue_token(user.id, &ctx.config.jwt_secret, ctx.config.jwt_expiry_hours).map_err(|e| {
            tracing::error!("token issuance failed: {}", e);
            ApiError::Internal
        })?;

    Ok(Json(AuthResponse { token, user: user.into() }))
}

/// POST /auth/login - verify credentials and issue a token
///
/// A wrong email and a wrong password both answer "Invalid credentials";
/// the route is not an account-existence oracle.
pub async fn login(
    State(ctx): State<AppContext>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let user = ctx
        .db
        .users()
        .find_by_email(&body.email)
        .await?
        .ok_or(ApiError::BadCredentials)?;

    let matches = password::verify_password(&body.password, &user.password_hash).map_err(|e| {
        tracing::error!("password verification failed: {}", e);
        ApiError::Internal
    })?;
    if !matches {
        return Err(ApiError::BadCredentials);
    }

    let token =
        issue_token(user.id, &ctx.config.jwt_secret, ctx.config.jwt_expiry_hours).map_err(|e| {
            tracing::error!("token issuance failed: {}", e);
            ApiError::Internal
        })?;

    Ok(Json(AuthResponse { token, user: user.into() }))
}
