//! Wipe the store and load a small fixture: two users, two posts, two
//! comments. Intended for manual testing against a development database.

use anyhow::Context;

use breeze_api::auth::password;
use breeze_api::config::AppConfig;
use breeze_api::database::comments::NewComment;
use breeze_api::database::posts::NewPost;
use breeze_api::database::users::NewUser;
use breeze_api::database::Db;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let db = Db::connect(&config.database_url).await.context("database connection failed")?;
    db.ensure_schema().await?;

    // Clear existing data; comments first, then posts, then users
    db.comments().delete_all().await?;
    db.posts().delete_all().await?;
    db.users().delete_all().await?;

    let hash = password::hash_password("password123").context("hashing failed")?;

    let alice = db
        .users()
        .insert(NewUser {
            username: "Alice".into(),
            email: "alice@example.com".into(),
            password_hash: hash.clone(),
            avatar: None,
        })
        .await?;
    let bob = db
        .users()
        .insert(NewUser {
            username: "Bob".into(),
            email: "bob@example.com".into(),
            password_hash: hash,
            avatar: None,
        })
        .await?;

    let alice_post = db
        .posts()
        .insert(NewPost {
            owner_id: alice.id,
            username: Some(alice.username.clone()),
            text: "Alice's first post".into(),
            image: None,
        })
        .await?;
    db.posts()
        .insert(NewPost {
            owner_id: bob.id,
            username: Some(bob.username.clone()),
            text: "Bob's first post".into(),
            image: None,
        })
        .await?;

    db.comments()
        .insert(NewComment {
            post_id: alice_post.id,
            owner_id: alice.id,
            text: "Alice's comment on her own post".into(),
        })
        .await?;
    db.comments()
        .insert(NewComment {
            post_id: alice_post.id,
            owner_id: bob.id,
            text: "Bob's comment on Alice's post".into(),
        })
        .await?;

    tracing::info!("seed data loaded");
    Ok(())
}
