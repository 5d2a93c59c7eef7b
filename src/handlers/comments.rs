use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{ensure_owner, parse_id, require_text};
use crate::context::AppContext;
use crate::database::comments::NewComment;
use crate::database::models::{Comment, CommentWithAuthor};
use crate::error::ApiError;
use crate::middleware::AuthUser;

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub text: String,
}

/// POST /api/comments/:post_id (also mounted at POST /api/posts/:post_id)
///
/// Any authenticated caller may comment; the post just has to exist.
pub async fn create(
    State(ctx): State<AppContext>,
    Extension(caller): Extension<AuthUser>,
    Path(post_id): Path<String>,
    Json(body): Json<CommentRequest>,
) -> Result<Json<Comment>, ApiError> {
    require_text(&body.text)?;

    let post_id = parse_id(&post_id, "Post")?;
    let post = ctx.db.posts().find_by_id(post_id).await?.ok_or(ApiError::NotFound("Post"))?;

    let comment = ctx
        .db
        .comments()
        .insert(NewComment { post_id: post.id, owner_id: caller.id, text: body.text })
        .await?;

    Ok(Json(comment))
}

/// GET /api/comments/:post_id/comments (also at /api/posts/:post_id/comments)
pub async fn list(
    State(ctx): State<AppContext>,
    Path(post_id): Path<String>,
) -> Result<Json<Vec<CommentWithAuthor>>, ApiError> {
    let post_id = parse_id(&post_id, "Post")?;
    ctx.db.posts().find_by_id(post_id).await?.ok_or(ApiError::NotFound("Post"))?;

    let comments = ctx.db.comments().list_for_post(post_id).await?;
    Ok(Json(comments))
}

/// PUT /api/comments/:post_id/:comment_id - owner-only text update
pub async fn update(
    State(ctx): State<AppContext>,
    Extension(caller): Extension<AuthUser>,
    Path((post_id, comment_id)): Path<(String, String)>,
    Json(body): Json<CommentRequest>,
) -> Result<Json<Comment>, ApiError> {
    require_text(&body.text)?;

    // Post existence is checked first, then the comment itself
    let post_id = parse_id(&post_id, "Post")?;
    ctx.db.posts().find_by_id(post_id).await?.ok_or(ApiError::NotFound("Post"))?;

    let comment_id = parse_id(&comment_id, "Comment")?;
    let comment =
        ctx.db.comments().find_by_id(comment_id).await?.ok_or(ApiError::NotFound("Comment"))?;
    ensure_owner(comment.owner_id, &caller)?;

    let updated = ctx.db.comments().update_text(comment_id, &body.text).await?;
    Ok(Json(updated))
}

/// DELETE /api/comments/:post_id/:comment_id - owner-only
pub async fn remove(
    State(ctx): State<AppContext>,
    Extension(caller): Extension<AuthUser>,
    Path((_post_id, comment_id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let comment_id = parse_id(&comment_id, "Comment")?;
    let comment =
        ctx.db.comments().find_by_id(comment_id).await?.ok_or(ApiError::NotFound("Comment"))?;
    ensure_owner(comment.owner_id, &caller)?;

    ctx.db.comments().delete(comment_id).await?;
    Ok(Json(json!({ "msg": "Comment removed" })))
}
