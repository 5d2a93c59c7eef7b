use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

pub mod auth;
pub mod config;
pub mod context;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;

pub use context::AppContext;

/// Build the full application router.
///
/// Everything under `/api` except `/api/upload` sits behind the token gate.
/// `/uploads` serves the upload directory read-only.
pub fn app(ctx: AppContext) -> Router {
    use handlers::{auth as auth_handlers, comments, posts, upload};

    let api = Router::new()
        .route("/posts", get(posts::list))
        .route("/posts/create", post(posts::create))
        .route(
            "/posts/:post_id",
            get(posts::get)
                .put(posts::update)
                .delete(posts::remove)
                // The original API also accepts comment creation here
                .post(comments::create),
        )
        .route("/posts/:post_id/comments", get(comments::list))
        .route("/comments/:post_id", post(comments::create))
        .route("/comments/:post_id/comments", get(comments::list))
        .route(
            "/comments/:post_id/:comment_id",
            put(comments::update).delete(comments::remove),
        )
        .layer(axum::middleware::from_fn_with_state(ctx.clone(), middleware::require_auth))
        // Registered after the gate layer: upload is public
        .route("/upload", post(upload::create));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/auth/register", post(auth_handlers::register))
        .route("/auth/login", post(auth_handlers::login))
        .nest("/api", api)
        .nest_service("/uploads", ServeDir::new(&ctx.config.upload_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

async fn root() -> Json<Value> {
    Json(json!({
        "name": "Breeze API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "auth": "/auth/register, /auth/login (public)",
            "posts": "/api/posts[/:id] (protected)",
            "comments": "/api/comments/:postId[/:commentId] (protected)",
            "upload": "/api/upload (public, multipart)",
            "static": "/uploads (public, read-only)"
        }
    }))
}

async fn health(State(ctx): State<AppContext>) -> impl IntoResponse {
    match ctx.db.ping().await {
        Ok(()) => {
            (StatusCode::OK, Json(json!({ "status": "ok", "timestamp": chrono::Utc::now() })))
        }
        Err(e) => {
            tracing::error!("health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "timestamp": chrono::Utc::now() })),
            )
        }
    }
}
