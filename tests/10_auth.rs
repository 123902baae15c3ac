mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let Some(server) = common::ensure_server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();

    let res = client.get(&server.base_url).send().await?;
    assert!(
        res.status() == StatusCode::OK || res.status() == StatusCode::SERVICE_UNAVAILABLE,
        "unexpected status: {}",
        res.status()
    );

    let _body = res.json::<serde_json::Value>().await?;
    Ok(())
}

#[tokio::test]
async fn signup_provisions_admin_user_without_leaking_password() -> Result<()> {
    let Some(server) = common::ensure_server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let email = common::unique_email("signup");

    let body = common::signup_user(&client, &server.base_url, &email, "Alice", "longenough1").await?;

    assert_eq!(body["status"], serde_json::json!(true));
    let user = &body["response"];
    assert_eq!(user["email"], serde_json::json!(email));
    assert_eq!(user["password"], serde_json::json!(""));
    assert_eq!(user["role"], serde_json::json!("admin"));
    assert_eq!(user["status"], serde_json::json!("active"));

    let permissions: Vec<String> = serde_json::from_value(user["permissions"].clone())?;
    for expected in ["create", "read", "update", "delete"] {
        assert!(
            permissions.iter().any(|p| p == expected),
            "missing permission {}",
            expected
        );
    }
    Ok(())
}

#[tokio::test]
async fn duplicate_signup_conflicts() -> Result<()> {
    let Some(server) = common::ensure_server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let email = common::unique_email("dup");

    common::signup_user(&client, &server.base_url, &email, "Alice", "longenough1").await?;

    let res = client
        .post(format!("{}/auth/signup", server.base_url))
        .json(&serde_json::json!({
            "email": email,
            "name": "Alice Again",
            "password": "longenough1",
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    Ok(())
}

#[tokio::test]
async fn signup_rejects_short_password() -> Result<()> {
    let Some(server) = common::ensure_server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/auth/signup", server.base_url))
        .json(&serde_json::json!({
            "email": common::unique_email("shortpw"),
            "name": "Bob",
            "password": "short",
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn signin_issues_token_for_valid_credentials() -> Result<()> {
    let Some(server) = common::ensure_server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let email = common::unique_email("signin");

    common::signup_user(&client, &server.base_url, &email, "Carol", "longenough1").await?;

    let res = client
        .post(format!("{}/auth/signin", server.base_url))
        .json(&serde_json::json!({ "email": email, "password": "longenough1" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["status"], serde_json::json!(true));
    assert_eq!(body["response"]["password"], serde_json::json!(""));
    assert!(body["token"].as_str().map(|t| !t.is_empty()).unwrap_or(false));
    Ok(())
}

#[tokio::test]
async fn signin_with_wrong_password_returns_400_and_no_token() -> Result<()> {
    let Some(server) = common::ensure_server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let email = common::unique_email("wrongpw");

    common::signup_user(&client, &server.base_url, &email, "Dave", "longenough1").await?;

    let res = client
        .post(format!("{}/auth/signin", server.base_url))
        .json(&serde_json::json!({ "email": email, "password": "not-the-password" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = res.json().await?;
    assert!(body.get("token").is_none());
    Ok(())
}

#[tokio::test]
async fn signin_with_unknown_email_returns_404() -> Result<()> {
    let Some(server) = common::ensure_server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/auth/signin", server.base_url))
        .json(&serde_json::json!({
            "email": common::unique_email("nobody"),
            "password": "longenough1",
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}
