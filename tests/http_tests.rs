//! HTTP surface tests: health, redirect, stats, dashboard and JSON API

use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use serde_json::Value;
use tempfile::TempDir;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use linkdash::api::services::{AppStartTime, configure_routes};
use linkdash::api::views::Views;
use linkdash::config::DatabaseConfig;
use linkdash::errors::{LinkdashError, Result};
use linkdash::services::{CreateLinkRequest, LinkService};
use linkdash::storage::backend::SeaOrmStorage;
use linkdash::storage::{LinkStore, ShortLink};

// =============================================================================
// Test Setup
// =============================================================================

struct TestEnv {
    service: Arc<LinkService>,
    views: web::Data<Views>,
    _dir: TempDir,
}

async fn init_test_env() -> TestEnv {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("http_test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let storage = Arc::new(
        SeaOrmStorage::new(&db_url, "sqlite", &DatabaseConfig::default())
            .await
            .expect("Failed to create storage"),
    );

    TestEnv {
        service: Arc::new(LinkService::new(storage)),
        views: web::Data::new(Views::load().expect("Failed to load templates")),
        _dir: temp_dir,
    }
}

/// Every call fails the way an unreachable database does
struct FailingStore;

const STORE_FAILURE: &str = "disk on fire";

#[async_trait]
impl LinkStore for FailingStore {
    fn backend_name(&self) -> &str {
        "failing"
    }

    async fn exists(&self, _code: &str) -> Result<bool> {
        Err(LinkdashError::store(STORE_FAILURE))
    }

    async fn insert(&self, _link: &ShortLink) -> Result<()> {
        Err(LinkdashError::store(STORE_FAILURE))
    }

    async fn get(&self, _code: &str) -> Result<Option<ShortLink>> {
        Err(LinkdashError::store(STORE_FAILURE))
    }

    async fn list(&self) -> Result<Vec<ShortLink>> {
        Err(LinkdashError::store(STORE_FAILURE))
    }

    async fn delete(&self, _code: &str) -> Result<bool> {
        Err(LinkdashError::store(STORE_FAILURE))
    }

    async fn record_click(&self, _code: &str, _at: DateTime<Utc>) -> Result<Option<String>> {
        Err(LinkdashError::store(STORE_FAILURE))
    }
}

fn failing_env() -> TestEnv {
    TestEnv {
        service: Arc::new(LinkService::new(Arc::new(FailingStore))),
        views: web::Data::new(Views::load().expect("Failed to load templates")),
        _dir: TempDir::new().expect("Failed to create temp dir"),
    }
}

macro_rules! test_app {
    ($env:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($env.service.clone()))
                .app_data($env.views.clone())
                .app_data(web::Data::new(AppStartTime::now()))
                .configure(configure_routes),
        )
        .await
    };
}

async fn create(env: &TestEnv, url: &str, code: Option<&str>) -> String {
    env.service
        .create_link(CreateLinkRequest::new(url, code.map(str::to_string)))
        .await
        .expect("create failed")
        .link
        .code
}

fn location<B>(resp: &actix_web::dev::ServiceResponse<B>) -> Option<String> {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

// =============================================================================
// /healthz
// =============================================================================

#[actix_rt::test]
async fn test_healthz_payload() {
    let env = init_test_env().await;
    let app = test_app!(env);

    let resp = test::call_service(&app, TestRequest::get().uri("/healthz").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["ok"], Value::Bool(true));
    assert_eq!(body["version"], "1.0");
    assert!(body["uptime"].is_u64());
}

// =============================================================================
// /{code}
// =============================================================================

#[actix_rt::test]
async fn test_redirect_found_and_counts_click() {
    let env = init_test_env().await;
    let code = create(&env, "https://example.com/target?x=1", None).await;
    let app = test_app!(env);

    let resp = test::call_service(
        &app,
        TestRequest::get().uri(&format!("/{}", code)).to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        location(&resp).as_deref(),
        Some("https://example.com/target?x=1")
    );

    let link = env.service.get_link(&code).await.unwrap();
    assert_eq!(link.total_clicks, 1);
    assert!(link.last_clicked.is_some());
}

#[actix_rt::test]
async fn test_redirect_head() {
    let env = init_test_env().await;
    let code = create(&env, "https://example.com/head", Some("Head1234")).await;
    let app = test_app!(env);

    let resp = test::call_service(
        &app,
        TestRequest::default()
            .method(actix_web::http::Method::HEAD)
            .uri(&format!("/{}", code))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp).as_deref(), Some("https://example.com/head"));
}

#[actix_rt::test]
async fn test_redirect_unknown_code_is_404() {
    let env = init_test_env().await;
    let app = test_app!(env);

    let resp = test::call_service(&app, TestRequest::get().uri("/zzzzzz").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(location(&resp).is_none());

    let body = test::read_body(resp).await;
    assert!(String::from_utf8_lossy(&body).contains("404"));
}

#[actix_rt::test]
async fn test_malformed_paths_are_404() {
    let env = init_test_env().await;
    let app = test_app!(env);

    for path in [
        "/ab",
        "/abcdefghi",
        "/abc-123",
        "/a/b/c",
        "/code/ab",
        "/code/abc123/extra",
        "/favicon.ico",
    ] {
        let resp = test::call_service(&app, TestRequest::get().uri(path).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{path}");
    }
}

#[actix_rt::test]
async fn test_wrong_method_on_code_is_404() {
    let env = init_test_env().await;
    let code = create(&env, "https://example.com", None).await;
    let app = test_app!(env);

    let resp = test::call_service(
        &app,
        TestRequest::post().uri(&format!("/{}", code)).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // 不计入点击
    assert_eq!(env.service.get_link(&code).await.unwrap().total_clicks, 0);
}

#[actix_rt::test]
async fn test_redirect_store_failure_is_500_with_error_text() {
    let env = failing_env();
    let app = test_app!(env);

    let resp = test::call_service(&app, TestRequest::get().uri("/abcdef").to_request()).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(location(&resp).is_none());

    let body = String::from_utf8_lossy(&test::read_body(resp).await).to_string();
    assert!(body.contains("500"));
    assert!(body.contains(STORE_FAILURE));
}

#[actix_rt::test]
async fn test_padded_url_redirects_to_trimmed_target() {
    let env = init_test_env().await;
    let app = test_app!(env);

    let resp = test::call_service(
        &app,
        TestRequest::post()
            .uri("/")
            .set_form([("url", "  https://example.com/padded  "), ("code", "Padded1")])
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = test::call_service(&app, TestRequest::get().uri("/Padded1").to_request()).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp).as_deref(), Some("https://example.com/padded"));
}

// =============================================================================
// /code/{code}
// =============================================================================

#[actix_rt::test]
async fn test_stats_page() {
    let env = init_test_env().await;
    let code = create(&env, "https://example.com/stats", None).await;
    env.service.track_click(&code).await.unwrap();
    let app = test_app!(env);

    let resp = test::call_service(
        &app,
        TestRequest::get().uri(&format!("/code/{}", code)).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    // HTML 自动转义会把 `/` 写成 `&#x2f;`
    let body = String::from_utf8_lossy(&test::read_body(resp).await).to_string();
    assert!(body.contains("https:&#x2f;&#x2f;example.com&#x2f;stats"));
    assert!(body.contains(&code));
    assert!(body.contains("<td>1</td>"));

    // 查看统计不计入点击
    assert_eq!(env.service.get_link(&code).await.unwrap().total_clicks, 1);
}

#[actix_rt::test]
async fn test_stats_store_failure_is_500() {
    let env = failing_env();
    let app = test_app!(env);

    let resp = test::call_service(&app, TestRequest::get().uri("/code/abcdef").to_request()).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = String::from_utf8_lossy(&test::read_body(resp).await).to_string();
    assert!(body.contains(STORE_FAILURE));
}

#[actix_rt::test]
async fn test_stats_unknown_code_is_404() {
    let env = init_test_env().await;
    let app = test_app!(env);

    let resp = test::call_service(&app, TestRequest::get().uri("/code/zzzzzz").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Dashboard
// =============================================================================

#[actix_rt::test]
async fn test_dashboard_lists_links() {
    let env = init_test_env().await;
    create(&env, "https://example.com/one", Some("first1")).await;
    create(&env, "https://example.com/two", Some("second")).await;
    let app = test_app!(env);

    let resp = test::call_service(&app, TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = String::from_utf8_lossy(&test::read_body(resp).await).to_string();
    assert!(body.contains("first1"));
    assert!(body.contains("example.com&#x2f;two"));
    assert!(body.contains("/code/second/delete"));
}

/// Index of each code in the rendered body, in table order
fn table_order<'a>(body: &str, codes: &[&'a str]) -> Vec<&'a str> {
    let mut found: Vec<(usize, &str)> = codes
        .iter()
        .filter_map(|c| body.find(&format!("<td>{}</td>", c)).map(|i| (i, *c)))
        .collect();
    found.sort();
    found.into_iter().map(|(_, c)| c).collect()
}

macro_rules! dashboard_body {
    ($app:expr, $uri:expr) => {{
        let resp = test::call_service(&$app, TestRequest::get().uri($uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK, "{}", $uri);
        String::from_utf8_lossy(&test::read_body(resp).await).to_string()
    }};
}

#[actix_rt::test]
async fn test_dashboard_search_and_sort() {
    let env = init_test_env().await;
    create(&env, "https://docs.rs/serde", Some("Serde01")).await;
    create(&env, "https://example.com/a", Some("alpha1")).await;
    create(&env, "https://example.com/b", Some("bravo1")).await;
    for _ in 0..3 {
        env.service.track_click("bravo1").await.unwrap();
    }
    env.service.track_click("Serde01").await.unwrap();
    let app = test_app!(env);
    let all = ["Serde01", "alpha1", "bravo1"];

    // 默认按点击数降序
    let body = dashboard_body!(app, "/");
    assert_eq!(table_order(&body, &all), vec!["bravo1", "Serde01", "alpha1"]);
    assert!(body.contains("sort=total_clicks&amp;order=asc"));

    let body = dashboard_body!(app, "/?sort=code&order=asc");
    assert_eq!(table_order(&body, &all), vec!["Serde01", "alpha1", "bravo1"]);
    assert!(body.contains("sort=code&amp;order=desc"));

    let body = dashboard_body!(app, "/?sort=code&order=desc");
    assert_eq!(table_order(&body, &all), vec!["bravo1", "alpha1", "Serde01"]);

    let body = dashboard_body!(app, "/?q=EXAMPLE.COM");
    assert_eq!(table_order(&body, &all), vec!["bravo1", "alpha1"]);

    let body = dashboard_body!(app, "/?q=serde");
    assert_eq!(table_order(&body, &all), vec!["Serde01"]);

    let body = dashboard_body!(app, "/?q=nomatch");
    assert!(table_order(&body, &all).is_empty());
    assert!(body.contains("No links match"));

    // 未知参数回退到默认排序
    let body = dashboard_body!(app, "/?sort=bogus&order=sideways");
    assert_eq!(table_order(&body, &all), vec!["bravo1", "Serde01", "alpha1"]);
}

#[actix_rt::test]
async fn test_dashboard_delete_asks_for_confirmation() {
    let env = init_test_env().await;
    create(&env, "https://example.com", Some("keepme1")).await;
    let app = test_app!(env);

    let body = dashboard_body!(app, "/");
    assert!(body.contains("onsubmit=\"return confirm("));
    assert!(body.contains("Delete link keepme1?"));
}

#[actix_rt::test]
async fn test_dashboard_store_failure_is_500_with_error_text() {
    let env = failing_env();
    let app = test_app!(env);

    let resp = test::call_service(&app, TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = String::from_utf8_lossy(&test::read_body(resp).await).to_string();
    assert!(body.contains(STORE_FAILURE));
}

#[actix_rt::test]
async fn test_dashboard_create_form() {
    let env = init_test_env().await;
    let app = test_app!(env);

    let resp = test::call_service(
        &app,
        TestRequest::post()
            .uri("/")
            .set_form([("url", "https://example.com/form"), ("code", "Form123")])
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = String::from_utf8_lossy(&test::read_body(resp).await).to_string();
    assert!(body.contains("Created"));
    assert!(body.contains("Form123"));

    assert_eq!(
        env.service.get_link("Form123").await.unwrap().url,
        "https://example.com/form"
    );
}

#[actix_rt::test]
async fn test_dashboard_create_with_empty_code_generates() {
    let env = init_test_env().await;
    let app = test_app!(env);

    let resp = test::call_service(
        &app,
        TestRequest::post()
            .uri("/")
            .set_form([("url", "https://example.com/gen"), ("code", "")])
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(env.service.list_links().await.unwrap().len(), 1);
}

#[actix_rt::test]
async fn test_dashboard_create_errors() {
    let env = init_test_env().await;
    create(&env, "https://example.com", Some("taken1")).await;
    let app = test_app!(env);

    let cases = [
        ("not-a-url", "", StatusCode::BAD_REQUEST, "Please enter a valid URL"),
        ("ftp://x.com", "", StatusCode::BAD_REQUEST, "URL must start with"),
        (
            "https://example.com",
            "ab",
            StatusCode::BAD_REQUEST,
            "alphanumeric characters",
        ),
        (
            "https://example.com",
            "taken1",
            StatusCode::CONFLICT,
            "already exists",
        ),
    ];

    for (url, code, status, needle) in cases {
        let resp = test::call_service(
            &app,
            TestRequest::post()
                .uri("/")
                .set_form([("url", url), ("code", code)])
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), status, "{url} {code}");
        let body = String::from_utf8_lossy(&test::read_body(resp).await).to_string();
        assert!(body.contains(needle), "{needle} missing");
    }

    assert_eq!(env.service.list_links().await.unwrap().len(), 1);
}

#[actix_rt::test]
async fn test_dashboard_delete() {
    let env = init_test_env().await;
    let code = create(&env, "https://example.com", None).await;
    let app = test_app!(env);

    let resp = test::call_service(
        &app,
        TestRequest::post()
            .uri(&format!("/code/{}/delete", code))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp).as_deref(), Some("/"));

    let resp = test::call_service(
        &app,
        TestRequest::post()
            .uri(&format!("/code/{}/delete", code))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = test::call_service(
        &app,
        TestRequest::get().uri(&format!("/{}", code)).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// JSON API
// =============================================================================

#[actix_rt::test]
async fn test_api_create_get_delete() {
    let env = init_test_env().await;
    let app = test_app!(env);

    let resp = test::call_service(
        &app,
        TestRequest::post()
            .uri("/api/links")
            .set_json(serde_json::json!({ "url": "https://example.com/api" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 0);
    let code = body["data"]["code"].as_str().unwrap().to_string();
    assert_eq!(code.len(), 6);
    assert_eq!(body["data"]["total_clicks"], 0);
    assert!(
        body["data"]["short_url"]
            .as_str()
            .unwrap()
            .ends_with(&format!("/{}", code))
    );

    let resp = test::call_service(
        &app,
        TestRequest::get()
            .uri(&format!("/api/links/{}", code))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["url"], "https://example.com/api");

    let resp = test::call_service(
        &app,
        TestRequest::delete()
            .uri(&format!("/api/links/{}", code))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(
        &app,
        TestRequest::get()
            .uri(&format!("/api/links/{}", code))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 3000);
}

#[actix_rt::test]
async fn test_api_list_newest_first() {
    let env = init_test_env().await;
    create(&env, "https://example.com/a", Some("aaaaaa")).await;
    tokio::time::sleep(std::time::Duration::from_millis(15)).await;
    create(&env, "https://example.com/b", Some("bbbbbb")).await;
    let app = test_app!(env);

    let resp = test::call_service(&app, TestRequest::get().uri("/api/links").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let codes: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["bbbbbb", "aaaaaa"]);
}

#[actix_rt::test]
async fn test_api_error_codes() {
    let env = init_test_env().await;
    create(&env, "https://example.com", Some("taken1")).await;
    let app = test_app!(env);

    let cases = [
        (
            serde_json::json!({ "url": "ftp://x.com" }),
            StatusCode::BAD_REQUEST,
            3002,
        ),
        (
            serde_json::json!({ "url": "https://example.com", "code": "ab" }),
            StatusCode::BAD_REQUEST,
            3003,
        ),
        (
            serde_json::json!({ "url": "https://example.com", "code": "taken1" }),
            StatusCode::CONFLICT,
            3001,
        ),
    ];

    for (payload, status, code) in cases {
        let resp = test::call_service(
            &app,
            TestRequest::post()
                .uri("/api/links")
                .set_json(&payload)
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), status, "{payload}");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], code);
        assert!(body.get("data").is_none());
    }
}

#[actix_rt::test]
async fn test_api_rejects_url_with_control_characters() {
    let env = init_test_env().await;
    let app = test_app!(env);

    for url in ["https://exa\nmple.com/", "https://example.com/\r\nX-Injected: 1"] {
        let resp = test::call_service(
            &app,
            TestRequest::post()
                .uri("/api/links")
                .set_json(serde_json::json!({ "url": url }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{url:?}");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 3002);
    }

    assert!(env.service.list_links().await.unwrap().is_empty());
}

#[actix_rt::test]
async fn test_api_store_failure_error_code() {
    let env = failing_env();
    let app = test_app!(env);

    let resp = test::call_service(&app, TestRequest::get().uri("/api/links").to_request()).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 3005);

    let resp = test::call_service(
        &app,
        TestRequest::post()
            .uri("/api/links")
            .set_json(serde_json::json!({ "url": "https://example.com" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 3005);
    assert!(body.get("data").is_none());
}

#[actix_rt::test]
async fn test_api_malformed_json() {
    let env = init_test_env().await;
    let app = test_app!(env);

    let resp = test::call_service(
        &app,
        TestRequest::post()
            .uri("/api/links")
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload("{not json")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1000);
}
