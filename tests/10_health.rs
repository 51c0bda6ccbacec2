mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(server.url("/health")).send().await?;

    // OK with a database, SERVICE_UNAVAILABLE without one
    assert!(
        res.status() == StatusCode::OK || res.status() == StatusCode::SERVICE_UNAVAILABLE,
        "unexpected status: {}",
        res.status()
    );

    let body = res.json::<serde_json::Value>().await?;
    assert!(body.get("status").is_some(), "missing status: {}", body);
    Ok(())
}

#[tokio::test]
async fn root_describes_service() -> Result<()> {
    let server = common::ensure_server().await?;
    let res = reqwest::get(server.url("/")).await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "Portfolio API");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    Ok(())
}

#[tokio::test]
async fn unknown_route_is_not_found() -> Result<()> {
    let server = common::ensure_server().await?;
    let res = reqwest::get(server.url("/api/nothing-here")).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}
