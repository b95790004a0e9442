use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use casm_server::server::{create_router, AppState};
use casm_server::{Config, InMemoryUsageStore, JsonFileUsageStore, UsageStore};

const COOKIE: &str = "ecasm_uid=visitor-1";

fn app_with_limit(limit: u64) -> Router {
    let config = Config {
        free_compile_limit: limit,
        ..Config::default()
    };
    create_router(AppState::new(config, Arc::new(InMemoryUsageStore::new())))
}

fn post_json(uri: &str, body: Value, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn landing_sets_cookie_only_for_new_visitors() {
    let app = app_with_limit(5);

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("new visitor should get a cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("ecasm_uid="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::COOKIE, COOKIE)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn compile_requires_session() {
    let app = app_with_limit(5);
    let (status, body) = send(&app, post_json("/compile", json!({ "code": "X Q0" }), None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "ok": false, "errors": ["Session not initialized. Please refresh the page."] })
    );
}

#[tokio::test]
async fn compile_returns_listing() {
    let app = app_with_limit(5);
    let code = "X Q0\n\nCX Q0 Q1\nMEASURE Q1 -> C0\n";
    let (_, body) = send(&app, post_json("/compile", json!({ "code": code }), Some(COOKIE))).await;

    assert_eq!(
        body,
        json!({
            "ok": true,
            "compiled_output": "01 │ X Q0\n02 │ CX Q0 Q1\n03 │ MEASURE Q1 -> C0",
        })
    );
}

#[tokio::test]
async fn compile_returns_errors() {
    let app = app_with_limit(5);
    let code = "X R0\nFOO Q0\nMEASURE Q1 C0";
    let (_, body) = send(&app, post_json("/compile", json!({ "code": code }), Some(COOKIE))).await;

    assert_eq!(
        body,
        json!({
            "ok": false,
            "errors": [
                "Invalid register 'R0'",
                "Unknown opcode 'FOO'",
                "Invalid MEASURE syntax (expected: MEASURE Q1 -> C0)",
            ],
        })
    );
}

#[tokio::test]
async fn compile_stops_at_free_limit() {
    let app = app_with_limit(2);
    let request = || post_json("/compile", json!({ "code": "H Q0" }), Some(COOKIE));

    for _ in 0..2 {
        let (_, body) = send(&app, request()).await;
        assert_eq!(body["ok"], json!(true));
    }

    let (_, body) = send(&app, request()).await;
    assert_eq!(
        body,
        json!({
            "ok": false,
            "errors": ["Free compile limit reached (2 compiles). Please register to continue."],
            "limit_reached": true,
        })
    );

    // Another visitor is unaffected.
    let (_, body) = send(
        &app,
        post_json("/compile", json!({ "code": "H Q0" }), Some("ecasm_uid=visitor-2")),
    )
    .await;
    assert_eq!(body["ok"], json!(true));
}

#[tokio::test]
async fn failed_compiles_still_count() {
    let usage = Arc::new(InMemoryUsageStore::new());
    let app = create_router(AppState::new(Config::default(), usage.clone()));

    send(&app, post_json("/compile", json!({ "code": "nope" }), Some(COOKIE))).await;
    send(&app, post_json("/compile", json!({}), Some(COOKIE))).await;

    assert_eq!(usage.count("visitor-1").unwrap(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_compiles_cannot_exceed_limit() {
    let usage = Arc::new(InMemoryUsageStore::new());
    let config = Config {
        free_compile_limit: 3,
        ..Config::default()
    };
    let app = create_router(AppState::new(config, usage.clone()));

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let app = app.clone();
            tokio::spawn(async move {
                let request = post_json("/compile", json!({ "code": "H Q0" }), Some(COOKIE));
                send(&app, request).await.1
            })
        })
        .collect();

    let mut compiled = 0;
    let mut limited = 0;
    for handle in handles {
        let body = handle.await.unwrap();
        if body["ok"] == json!(true) {
            compiled += 1;
        } else {
            assert_eq!(body["limit_reached"], json!(true));
            limited += 1;
        }
    }

    assert_eq!((compiled, limited), (3, 7));
    assert_eq!(usage.count("visitor-1").unwrap(), 3);
}

#[tokio::test]
async fn compile_persists_to_json_ledger() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        usage_file: dir.path().join("usage.json"),
        ..Config::default()
    };
    let app = create_router(AppState::with_json_ledger(config.clone()).unwrap());

    send(&app, post_json("/compile", json!({ "code": "X Q0" }), Some(COOKIE))).await;

    let ledger = JsonFileUsageStore::open(&config.usage_file).unwrap();
    assert_eq!(ledger.count("visitor-1").unwrap(), 1);
}

#[tokio::test]
async fn normalize_is_ungated() {
    let app = app_with_limit(0);
    let code = "MOV R1, 5\nADD R3, R1, R2\nIF R3 > 12 GOTO 10\nLABEL 10\nGARBAGE LINE";
    let (_, body) = send(&app, post_json("/normalize", json!({ "code": code }), None)).await;

    assert_eq!(
        body,
        json!({
            "normalized": "SET R1 ⇐ 5\nR3 ⇐ R1 + R2\nIF R3 > 12 THEN → 10\n[10]:\nUNKNOWN INSTRUCTION: GARBAGE LINE",
        })
    );
}

#[tokio::test]
async fn emit_traces_lines() {
    let app = app_with_limit(0);
    let (_, body) = send(&app, post_json("/emit", json!({ "code": "X Q0\n\nH Q1" }), None)).await;

    assert_eq!(
        body,
        json!({
            "emission": "[01] Executing → X Q0\n[02] Executing → H Q1\n✔ Emission complete.",
        })
    );
}

#[tokio::test]
async fn register_license_acknowledges_keys() {
    let app = app_with_limit(5);

    let (_, body) = send(
        &app,
        post_json("/register_license", json!({ "license_key": "  " }), None),
    )
    .await;
    assert_eq!(body, json!({ "ok": false, "message": "License key required." }));

    let (_, body) = send(&app, post_json("/register_license", json!({}), None)).await;
    assert_eq!(body, json!({ "ok": false, "message": "License key required." }));

    let (_, body) = send(
        &app,
        post_json("/register_license", json!({ "license_key": "ABC-123" }), None),
    )
    .await;
    assert_eq!(body, json!({ "ok": true, "message": "License accepted." }));
}

#[tokio::test]
async fn health_reports_ok() {
    let app = app_with_limit(5);
    let (status, body) = send(
        &app,
        Request::builder().uri("/health").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}
