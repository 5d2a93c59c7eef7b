mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let Some(server) = common::ensure_server().await? else { return Ok(()) };
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/health", server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn register_then_login_round_trip() -> Result<()> {
    let Some(server) = common::ensure_server().await? else { return Ok(()) };
    let client = reqwest::Client::new();

    let (token, user) = common::register_user(&server.base_url, "roundtrip").await?;
    assert!(!token.is_empty());
    assert!(user["id"].is_string());
    // The password hash must never appear in a response
    assert!(user.get("password_hash").is_none());

    let res = client
        .post(format!("{}/auth/login", server.base_url))
        .json(&json!({ "email": user["email"], "password": "password123" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["user"]["id"], user["id"]);

    Ok(())
}

#[tokio::test]
async fn login_with_wrong_password_is_rejected() -> Result<()> {
    let Some(server) = common::ensure_server().await? else { return Ok(()) };
    let client = reqwest::Client::new();

    let (_, user) = common::register_user(&server.base_url, "wrongpw").await?;

    let res = client
        .post(format!("{}/auth/login", server.base_url))
        .json(&json!({ "email": user["email"], "password": "not-the-password" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["msg"], "Invalid credentials");

    Ok(())
}

#[tokio::test]
async fn register_with_missing_fields_is_400() -> Result<()> {
    let Some(server) = common::ensure_server().await? else { return Ok(()) };
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/auth/register", server.base_url))
        .json(&json!({ "username": "someone", "email": "", "password": "" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<Value>().await?;
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"password"));

    Ok(())
}

#[tokio::test]
async fn duplicate_email_is_a_field_error() -> Result<()> {
    let Some(server) = common::ensure_server().await? else { return Ok(()) };
    let client = reqwest::Client::new();

    let (_, user) = common::register_user(&server.base_url, "dupe").await?;

    let res = client
        .post(format!("{}/auth/register", server.base_url))
        .json(&json!({
            "username": format!("other-{}", user["username"].as_str().unwrap()),
            "email": user["email"],
            "password": "password123"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<Value>().await?;
    assert_eq!(body["errors"][0]["field"], "email");

    Ok(())
}

#[tokio::test]
async fn protected_routes_reject_missing_and_bad_tokens() -> Result<()> {
    let Some(server) = common::ensure_server().await? else { return Ok(()) };
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/api/posts", server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = res.json::<Value>().await?;
    assert_eq!(body["msg"], "No token, authorization denied");

    let res = client
        .get(format!("{}/api/posts", server.base_url))
        .header("x-auth-token", "bogus")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = res.json::<Value>().await?;
    assert_eq!(body["msg"], "Token is not valid");

    Ok(())
}
