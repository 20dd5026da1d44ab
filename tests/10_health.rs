mod common;

use anyhow::Result;
use axum::http::StatusCode;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let app = common::TestApp::new();

    let res = app.get("/health", None).await?;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["success"], true);
    assert_eq!(res.body["data"]["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn root_lists_endpoints() -> Result<()> {
    let app = common::TestApp::new();

    let res = app.get("/", None).await?;

    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body["data"]["endpoints"]["subscription"].is_string(), "{}", res.body);
    Ok(())
}

#[tokio::test]
async fn unknown_route_is_not_found() -> Result<()> {
    let app = common::TestApp::new();

    let res = app.get("/api/nope", None).await?;

    assert_eq!(res.status, StatusCode::NOT_FOUND);
    Ok(())
}
