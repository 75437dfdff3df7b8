use super::*;
use crate::config::IdentityOptions;
use crate::state::test_helpers::memory_app_state;
use axum::body::Body;
use axum::http::Request;
use tower::ServiceExt;

fn router() -> Router {
    let (state, _store) = memory_app_state(IdentityOptions::default());
    app(state, Path::new("client/public"))
}

#[tokio::test]
async fn healthz_is_ok() {
    let resp = router()
        .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn me_without_cookie_is_unauthorized() {
    let resp = router()
        .oneshot(Request::get("/api/account/me").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_post_reads_return_url_from_query() {
    let resp = router()
        .oneshot(
            Request::post("/account/logout?returnUrl=/login")
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()["location"], "/login");
}

#[tokio::test]
async fn register_rejects_duplicate_over_http() {
    let app = router();
    let body = r#"{"email":"a@b.com","password":"secret1","confirmPassword":"secret1"}"#;
    let post = || {
        Request::post("/api/account/register")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    };

    let first = app.clone().oneshot(post()).await.unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);
    let second = app.oneshot(post()).await.unwrap();
    assert_eq!(second.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn unknown_path_serves_client_shell() {
    let resp = router()
        .oneshot(Request::get("/register").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

async fn json_body(resp: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: &'static str) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn default_options_register_confirm_then_login() {
    let app = router();
    let login_body = r#"{"email":"a@b.com","password":"secret1"}"#;

    let resp = app
        .clone()
        .oneshot(post_json(
            "/api/account/register",
            r#"{"email":"a@b.com","password":"secret1","confirmPassword":"secret1"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let confirmation_url = json_body(resp).await["confirmationUrl"].as_str().unwrap().to_owned();

    let resp = app.clone().oneshot(post_json("/api/account/login", login_body)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let resp = app
        .clone()
        .oneshot(Request::get(confirmation_url.as_str()).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app.oneshot(post_json("/api/account/login", login_body)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("set-cookie"));
}

#[tokio::test]
async fn logout_accepts_percent_encoded_return_url() {
    let resp = router()
        .oneshot(Request::post("/account/logout?returnUrl=%2Fhome").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()["location"], "/home");
}
