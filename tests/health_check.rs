mod common;

use common::spawn_app;

#[tokio::test]
async fn health_check_works() {
    let app = spawn_app().await;

    let response = app.get("/health-check").await;

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(Some(0), response.content_length());
}

#[tokio::test]
async fn health_check_does_not_touch_dns() {
    let app = spawn_app().await;

    app.get("/health-check").await;

    assert_eq!(app.resolver.lookup_count(), 0);
}
