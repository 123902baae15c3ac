use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub base_url: String,
    #[allow(dead_code)]
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Spawn the already-built binary to keep start fast during tests
        let mut cmd = Command::new("target/debug/dockside-api");
        cmd.env("PORT", port.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // DATABASE_URL is inherited; fill in the remaining required config
        // with test defaults unless the environment already provides them.
        if std::env::var("JWT_SECRET").is_err() {
            cmd.env("JWT_SECRET", "dockside-test-secret");
        }
        if std::env::var("AWS_S3_BUCKET_NAME").is_err() {
            cmd.env("AWS_S3_BUCKET_NAME", "dockside-test");
        }

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            match client.get(&self.base_url).send().await {
                Ok(resp) => {
                    if resp.status() == StatusCode::OK
                        || resp.status() == StatusCode::SERVICE_UNAVAILABLE
                    {
                        return Ok(());
                    }
                }
                Err(_) => {}
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }
}

/// Spawn (once) and return the shared test server, or `None` when no
/// database is configured - callers skip in that case.
pub async fn ensure_server() -> Result<Option<&'static TestServer>> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(None);
    };
    apply_schema(&database_url).await?;

    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(Some(server))
}

async fn apply_schema(database_url: &str) -> Result<()> {
    use sqlx::Executor;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(1)
        .connect(database_url)
        .await
        .context("failed to connect for schema setup")?;
    pool.execute(include_str!("../../schema.sql")).await?;
    pool.close().await;
    Ok(())
}

/// Email that cannot collide across test runs sharing a database.
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.com", prefix, uuid::Uuid::new_v4())
}

/// Run the signup flow and return the parsed body (panics on non-201).
pub async fn signup_user(
    client: &reqwest::Client,
    base_url: &str,
    email: &str,
    name: &str,
    password: &str,
) -> Result<serde_json::Value> {
    let res = client
        .post(format!("{}/auth/signup", base_url))
        .json(&serde_json::json!({
            "email": email,
            "name": name,
            "password": password,
        }))
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == StatusCode::CREATED,
        "signup failed with {}",
        res.status()
    );
    Ok(res.json().await?)
}

/// Sign in and return the bearer token.
pub async fn signin_token(
    client: &reqwest::Client,
    base_url: &str,
    email: &str,
    password: &str,
) -> Result<String> {
    let res = client
        .post(format!("{}/auth/signin", base_url))
        .json(&serde_json::json!({ "email": email, "password": password }))
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == StatusCode::OK,
        "signin failed with {}",
        res.status()
    );
    let body: serde_json::Value = res.json().await?;
    body["token"]
        .as_str()
        .map(|t| t.to_string())
        .context("signin response carried no token")
}
