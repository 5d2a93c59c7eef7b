#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

static SERVER: OnceLock<Option<TestServer>> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub upload_dir: std::path::PathBuf,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);
        let upload_dir = std::env::temp_dir().join(format!("breeze-uploads-{}", port));

        // Spawn the already-built binary to keep start fast during tests
        let mut cmd = Command::new("target/debug/breeze-api");
        cmd.env("PORT", port.to_string())
            .env("UPLOAD_DIR", &upload_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if std::env::var("JWT_SECRET").is_err() {
            cmd.env("JWT_SECRET", "integration-test-secret");
        }

        let child = cmd.spawn().context("failed to spawn server binary")?;
        Ok(Self { port, base_url, upload_dir, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

/// Spawn (once) and return the shared test server. Returns `None` when
/// DATABASE_URL is not set, so suites skip cleanly without Postgres.
pub async fn ensure_server() -> Result<Option<&'static TestServer>> {
    let server = SERVER.get_or_init(|| {
        if std::env::var("DATABASE_URL").is_err() {
            eprintln!("DATABASE_URL not set; skipping integration tests");
            return None;
        }
        Some(TestServer::spawn().expect("failed to spawn server binary"))
    });

    match server {
        Some(server) => {
            server.wait_ready(Duration::from_secs(10)).await?;
            Ok(Some(server))
        }
        None => Ok(None),
    }
}

/// Register a fresh user with a unique name; returns (token, user).
pub async fn register_user(base_url: &str, name_hint: &str) -> Result<(String, Value)> {
    let client = reqwest::Client::new();
    let suffix = uuid_suffix();
    let res = client
        .post(format!("{}/auth/register", base_url))
        .json(&json!({
            "username": format!("{}-{}", name_hint, suffix),
            "email": format!("{}-{}@example.com", name_hint, suffix),
            "password": "password123"
        }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "register failed: {}", res.status());

    let body: Value = res.json().await?;
    let token = body["token"].as_str().context("missing token")?.to_string();
    Ok((token, body["user"].clone()))
}

pub async fn create_post(base_url: &str, token: &str, text: &str) -> Result<Value> {
    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/api/posts/create", base_url))
        .header("x-auth-token", token)
        .json(&json!({ "text": text }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "create post failed: {}", res.status());
    Ok(res.json().await?)
}

fn uuid_suffix() -> String {
    // Enough uniqueness for test fixtures without pulling uuid into dev-deps
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{:x}", nanos)
}
