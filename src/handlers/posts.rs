use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{ensure_owner, parse_id, require_text};
use crate::context::AppContext;
use crate::database::models::Post;
use crate::database::posts::NewPost;
use crate::error::ApiError;
use crate::middleware::AuthUser;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub text: String,
    /// Optional display name, denormalized onto the post at creation.
    pub username: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub text: String,
}

/// GET /api/posts - all posts, newest first
pub async fn list(State(ctx): State<AppContext>) -> Result<Json<Vec<Post>>, ApiError> {
    let posts = ctx.db.posts().list_all().await?;
    Ok(Json(posts))
}

/// GET /api/posts/:post_id
pub async fn get(
    State(ctx): State<AppContext>,
    Path(post_id): Path<String>,
) -> Result<Json<Post>, ApiError> {
    let id = parse_id(&post_id, "Post")?;
    let post = ctx.db.posts().find_by_id(id).await?.ok_or(ApiError::NotFound("Post"))?;
    Ok(Json(post))
}

/// POST /api/posts/create
pub async fn create(
    State(ctx): State<AppContext>,
    Extension(caller): Extension<AuthUser>,
    Json(body): Json<CreatePostRequest>,
) -> Result<Json<Post>, ApiError> {
    require_text(&body.text)?;

    let post = ctx
        .db
        .posts()
        .insert(NewPost {
            owner_id: caller.id,
            username: body.username,
            text: body.text,
            image: body.image,
        })
        .await?;

    Ok(Json(post))
}

/// PUT /api/posts/:post_id - owner-only text update
pub async fn update(
    State(ctx): State<AppContext>,
    Extension(caller): Extension<AuthUser>,
    Path(post_id): Path<String>,
    Json(body): Json<UpdatePostRequest>,
) -> Result<Json<Post>, ApiError> {
    require_text(&body.text)?;

    let id = parse_id(&post_id, "Post")?;
    let post = ctx.db.posts().find_by_id(id).await?.ok_or(ApiError::NotFound("Post"))?;
    ensure_owner(post.owner_id, &caller)?;

    let updated = ctx.db.posts().update_text(id, &body.text).await?;
    Ok(Json(updated))
}

/// DELETE /api/posts/:post_id - owner-only
///
/// Comments on the post are left in place; see the schema notes.
pub async fn remove(
    State(ctx): State<AppContext>,
    Extension(caller): Extension<AuthUser>,
    Path(post_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&post_id, "Post")?;
    let post = ctx.db.posts().find_by_id(id).await?.ok_or(ApiError::NotFound("Post"))?;
    ensure_owner(post.owner_id, &caller)?;

    ctx.db.posts().delete(id).await?;
    Ok(Json(json!({ "msg": "Post deleted" })))
}
