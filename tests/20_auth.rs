mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn me_requires_token() -> Result<()> {
    let server = common::ensure_server().await?;
    let res = reqwest::get(server.url("/api/auth/me")).await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        res.headers().get("www-authenticate").and_then(|v| v.to_str().ok()),
        Some("Bearer")
    );

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], true);
    assert_eq!(body["code"], "UNAUTHORIZED");
    Ok(())
}

#[tokio::test]
async fn me_returns_username_for_valid_token() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(server.url("/api/auth/me"))
        .header("authorization", common::admin_bearer("site-owner"))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body, json!({ "username": "site-owner" }));
    Ok(())
}

#[tokio::test]
async fn login_without_database_is_unavailable() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/api/auth/login"))
        .json(&json!({ "username": "admin", "password": "secret" }))
        .send()
        .await?;

    // With a live database and no such admin this would be 401
    assert!(
        res.status() == StatusCode::SERVICE_UNAVAILABLE || res.status() == StatusCode::UNAUTHORIZED,
        "unexpected status: {}",
        res.status()
    );
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], true);
    Ok(())
}

#[tokio::test]
async fn login_rejects_missing_fields() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/api/auth/login"))
        .json(&json!({ "username": "admin" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    Ok(())
}
