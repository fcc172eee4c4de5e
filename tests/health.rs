mod utils;

use utils::prelude::*;

#[tokio::test]
async fn liveness_pings_the_database() {
    let app = App::new().await;

    let res = app.get("/livez").send().await;

    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn readiness() {
    let app = App::new().await;

    let res = app.get("/readyz").send().await;

    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = App::new().await;

    let res = app.get("/readyz").send().await;
    assert!(res.header("x-request-id").is_some());

    let res = app
        .get("/readyz")
        .header("x-request-id", "my-request")
        .send()
        .await;
    assert_eq!(res.header("x-request-id"), Some("my-request"));
}

#[tokio::test]
async fn unknown_route() {
    let app = App::new().await;

    let res = app.get("/api/umpires").send().await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
