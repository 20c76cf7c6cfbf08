//! API Integration Tests
//!
//! Tests the HTTP API endpoints against the in-memory storage backend.
//!
//! The outbound integrations are replaced through DI: a fake notifier that "sends" whenever
//! credentials are configured, and fake text generators with fixed behavior.

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{Duration, Utc};
use content_studio::infrastructure::entities::Content;
use content_studio::infrastructure::traits::{
    ChannelCredentials, CompletionRequest, GenerationError, Notifier, NotifyError, TextGenerator,
};
use content_studio::{api, core, infrastructure};
use di::{Injectable, ServiceCollection, inject, injectable};
use di_axum::RouterServiceProviderExtensions;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

const FAKE_MESSAGE_ID: &str = "4242";
const GENERATED_TEXT: &str = "## Rust in production\n\nRust gives you speed and safety.";

struct FakeNotifier;

#[injectable(Notifier)]
impl FakeNotifier {
    #[inject]
    fn create() -> FakeNotifier {
        FakeNotifier
    }
}

#[async_trait]
impl Notifier for FakeNotifier {
    async fn notify(
        &self,
        credentials: &ChannelCredentials,
        _content: &Content,
    ) -> Result<String, NotifyError> {
        if !credentials.is_complete() {
            return Err(NotifyError::NotConfigured);
        }
        Ok(FAKE_MESSAGE_ID.to_owned())
    }
}

struct UnconfiguredGenerator;

#[injectable(TextGenerator)]
impl UnconfiguredGenerator {
    #[inject]
    fn create() -> UnconfiguredGenerator {
        UnconfiguredGenerator
    }
}

#[async_trait]
impl TextGenerator for UnconfiguredGenerator {
    fn is_configured(&self) -> bool {
        false
    }

    async fn complete(&self, _request: CompletionRequest) -> Result<String, GenerationError> {
        Err(GenerationError::NotConfigured)
    }
}

struct CannedGenerator;

#[injectable(TextGenerator)]
impl CannedGenerator {
    #[inject]
    fn create() -> CannedGenerator {
        CannedGenerator
    }
}

#[async_trait]
impl TextGenerator for CannedGenerator {
    fn is_configured(&self) -> bool {
        true
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, GenerationError> {
        assert_eq!(request.model, "gpt-4o-mini");
        assert!(request.user_prompt.contains("Rust"));
        Ok(GENERATED_TEXT.to_owned())
    }
}

struct FailingGenerator;

#[injectable(TextGenerator)]
impl FailingGenerator {
    #[inject]
    fn create() -> FailingGenerator {
        FailingGenerator
    }
}

#[async_trait]
impl TextGenerator for FailingGenerator {
    fn is_configured(&self) -> bool {
        true
    }

    async fn complete(&self, _request: CompletionRequest) -> Result<String, GenerationError> {
        Err(GenerationError::HttpStatus {
            status: 429,
            body: "rate limited".to_owned(),
        })
    }
}

#[derive(Clone, Copy)]
enum Ai {
    Unconfigured,
    Canned,
    Failing,
}

/// Create test app - every call gets fresh in-memory stores
fn create_test_app(ai: Ai) -> Router {
    let mut services = ServiceCollection::new();
    infrastructure::register(&mut services, infrastructure::StorageBackend::Memory);
    core::register(&mut services);
    services.add(FakeNotifier::singleton());
    match ai {
        Ai::Unconfigured => services.add(UnconfiguredGenerator::singleton()),
        Ai::Canned => services.add(CannedGenerator::singleton()),
        Ai::Failing => services.add(FailingGenerator::singleton()),
    };
    let provider = services.build_provider().unwrap();

    Router::new()
        .nest("/api", api::router())
        .with_provider(provider)
}

/// Sends one request and returns the status and the JSON body (`Null` if the body is not JSON).
async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);

    (status, json)
}

async fn create_content(app: &Router, body: Value) -> Value {
    let (status, json) = send(app, "POST", "/api/content", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    json
}

#[tokio::test]
async fn test_create_content_applies_defaults() {
    let app = create_test_app(Ai::Unconfigured);

    let json = create_content(&app, json!({"title": "A", "body": "B"})).await;

    assert_eq!(json["status"], "draft");
    assert_eq!(json["publishToWebsite"], true);
    assert_eq!(json["publishToTelegram"], false);
    assert!(json["publishedAt"].is_null());
    assert!(json["telegramMessageId"].is_null());
    assert!(Uuid::parse_str(json["id"].as_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_create_content_validation_lists_fields() {
    let app = create_test_app(Ai::Unconfigured);

    let (status, json) = send(
        &app,
        "POST",
        "/api/content",
        Some(json!({"title": "  ", "status": "scheduled"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["fields"]["title"].is_string());
    assert!(json["fields"]["body"].is_string());
    assert!(json["fields"]["scheduledFor"].is_string());
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = create_test_app(Ai::Unconfigured);

    let request = Request::builder()
        .method("POST")
        .uri("/api/content")
        .header("content-type", "application/json")
        .body(Body::from("{\"title\": "))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_content_crud() {
    let app = create_test_app(Ai::Unconfigured);

    let first = create_content(&app, json!({"title": "First", "body": "One"})).await;
    let second = create_content(
        &app,
        json!({"title": "Second", "body": "Two", "category": "News"}),
    )
    .await;
    let id = second["id"].as_str().unwrap().to_owned();

    // newest first
    let (status, json) = send(&app, "GET", "/api/content", None).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Second", "First"]);

    let (status, json) = send(
        &app,
        "PATCH",
        &format!("/api/content/{id}"),
        Some(json!({"body": "Two, edited", "category": null})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["title"], "Second");
    assert_eq!(json["body"], "Two, edited");
    assert!(json["category"].is_null());
    assert_eq!(json["createdAt"], second["createdAt"]);

    let (status, json) = send(&app, "GET", &format!("/api/content/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["body"], "Two, edited");

    let (status, json) = send(&app, "DELETE", &format!("/api/content/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);

    let (status, json) = send(&app, "DELETE", &format!("/api/content/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");

    let (status, _) = send(&app, "GET", &format!("/api/content/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, json) = send(&app, "GET", "/api/content", None).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["id"], first["id"]);
}

#[tokio::test]
async fn test_content_status_filter_and_public_list() {
    let app = create_test_app(Ai::Unconfigured);

    create_content(&app, json!({"title": "Draft", "body": "B"})).await;
    create_content(
        &app,
        json!({"title": "Live", "body": "B", "status": "published"}),
    )
    .await;
    create_content(
        &app,
        json!({"title": "Hidden", "body": "B", "status": "published", "publishToWebsite": false}),
    )
    .await;

    let (status, json) = send(&app, "GET", "/api/content?status=published", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 2);
    assert!(json[0]["publishedAt"].is_string());

    let (status, json) = send(&app, "GET", "/api/content/published", None).await;
    assert_eq!(status, StatusCode::OK);
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Live");

    let (status, json) = send(&app, "GET", "/api/content?status=archived", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_malformed_ids_are_json_bad_requests() {
    let app = create_test_app(Ai::Unconfigured);

    for (method, uri) in [
        ("GET", "/api/content/not-a-uuid"),
        ("DELETE", "/api/content/not-a-uuid"),
        ("POST", "/api/content/not-a-uuid/publish"),
        ("GET", "/api/portfolio/123"),
        ("DELETE", "/api/portfolio/123"),
    ] {
        let (status, json) = send(&app, method, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{method} {uri}");
        assert_eq!(json["code"], "BAD_REQUEST", "{method} {uri}");
        assert!(json["error"].is_string(), "{method} {uri}");
    }
}

#[tokio::test]
async fn test_patch_keeps_published_at_in_step() {
    let app = create_test_app(Ai::Unconfigured);
    let created = create_content(&app, json!({"title": "A", "body": "B"})).await;
    let uri = format!("/api/content/{}", created["id"].as_str().unwrap());

    let (_, json) = send(&app, "PATCH", &uri, Some(json!({"status": "published"}))).await;
    assert!(json["publishedAt"].is_string());

    let (_, json) = send(&app, "PATCH", &uri, Some(json!({"status": "draft"}))).await;
    assert!(json["publishedAt"].is_null());

    let (status, json) = send(&app, "PATCH", &uri, Some(json!({"status": "scheduled"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["fields"]["scheduledFor"].is_string());
}

#[tokio::test]
async fn test_publish_without_relay() {
    let app = create_test_app(Ai::Unconfigured);
    let created = create_content(&app, json!({"title": "A", "body": "B"})).await;

    let (status, json) = send(
        &app,
        "POST",
        &format!("/api/content/{}/publish", created["id"].as_str().unwrap()),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "published");
    assert!(json["publishedAt"].is_string());
    assert_eq!(json["notification"]["status"], "not_requested");
}

#[tokio::test]
async fn test_publish_relay_failure_does_not_fail_publish() {
    let app = create_test_app(Ai::Unconfigured);
    let created = create_content(
        &app,
        json!({"title": "A", "body": "B", "publishToTelegram": true}),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let (status, json) = send(&app, "POST", &format!("/api/content/{id}/publish"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "published");
    assert_eq!(json["notification"]["status"], "failed");
    assert!(
        json["notification"]["reason"]
            .as_str()
            .unwrap()
            .contains("not configured")
    );

    let (_, json) = send(&app, "GET", &format!("/api/content/{id}"), None).await;
    assert_eq!(json["status"], "published");
    assert!(json["telegramMessageId"].is_null());
}

#[tokio::test]
async fn test_publish_relays_with_configured_channel() {
    let app = create_test_app(Ai::Unconfigured);
    for (key, value) in [
        ("telegram_bot_token", "123:abc"),
        ("telegram_channel_id", "@studio"),
    ] {
        let (status, _) = send(
            &app,
            "PUT",
            &format!("/api/settings/{key}"),
            Some(json!({ "value": value })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let created = create_content(
        &app,
        json!({"title": "A", "body": "B", "publishToTelegram": true}),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let (status, json) = send(&app, "POST", &format!("/api/content/{id}/publish"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["notification"]["status"], "notified");
    assert_eq!(json["notification"]["messageId"], FAKE_MESSAGE_ID);
    assert_eq!(json["telegramMessageId"], FAKE_MESSAGE_ID);

    let (_, json) = send(&app, "GET", &format!("/api/content/{id}"), None).await;
    assert_eq!(json["telegramMessageId"], FAKE_MESSAGE_ID);
}

#[tokio::test]
async fn test_publish_missing_content_is_not_found() {
    let app = create_test_app(Ai::Unconfigured);
    create_content(&app, json!({"title": "A", "body": "B"})).await;
    let (_, before) = send(&app, "GET", "/api/stats", None).await;

    let (status, json) = send(
        &app,
        "POST",
        &format!("/api/content/{}/publish", Uuid::new_v4()),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    let (_, after) = send(&app, "GET", "/api/stats", None).await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_scheduler_check_publishes_due_content() {
    let app = create_test_app(Ai::Unconfigured);
    let scheduled_for = (Utc::now() - Duration::minutes(1)).to_rfc3339();
    let due = create_content(
        &app,
        json!({"title": "A", "body": "B", "status": "scheduled", "scheduledFor": scheduled_for}),
    )
    .await;
    let later = (Utc::now() + Duration::hours(1)).to_rfc3339();
    let future = create_content(
        &app,
        json!({"title": "Later", "body": "B", "status": "scheduled", "scheduledFor": later}),
    )
    .await;

    let (status, stats) = send(&app, "GET", "/api/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["totalContent"], 2);
    assert_eq!(stats["scheduledContent"], 2);
    assert_eq!(stats["publishedContent"], 0);
    assert_eq!(stats["draftContent"], 0);

    let (status, report) = send(&app, "POST", "/api/scheduler/check", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["published"], 1);
    assert_eq!(report["notified"], 0);
    assert_eq!(report["notificationFailures"], 0);
    assert_eq!(report["failed"], 0);

    let (_, json) = send(
        &app,
        "GET",
        &format!("/api/content/{}", due["id"].as_str().unwrap()),
        None,
    )
    .await;
    assert_eq!(json["status"], "published");
    assert!(json["publishedAt"].is_string());

    let (_, json) = send(
        &app,
        "GET",
        &format!("/api/content/{}", future["id"].as_str().unwrap()),
        None,
    )
    .await;
    assert_eq!(json["status"], "scheduled");

    let (_, stats) = send(&app, "GET", "/api/stats", None).await;
    assert_eq!(stats["publishedContent"], 1);
    assert_eq!(stats["scheduledContent"], 1);

    // a second pass finds nothing left to do
    let (_, report) = send(&app, "POST", "/api/scheduler/check", None).await;
    assert_eq!(report["published"], 0);
}

#[tokio::test]
async fn test_portfolio_crud() {
    let app = create_test_app(Ai::Unconfigured);

    let (status, draft) = send(
        &app,
        "POST",
        "/api/portfolio",
        Some(json!({"title": "Intranet", "order": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(draft["status"], "draft");
    assert_eq!(draft["order"], 2);
    assert_eq!(draft["technologies"], json!([]));

    let (status, shop) = send(
        &app,
        "POST",
        "/api/portfolio",
        Some(json!({
            "title": "Shop",
            "description": "An online shop",
            "projectUrl": "https://shop.example.com",
            "technologies": ["Rust", "Axum"],
            "status": "published",
            "featured": true,
            "order": 1
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(shop["technologies"], json!(["Rust", "Axum"]));
    assert_eq!(shop["featured"], true);

    let (_, json) = send(&app, "GET", "/api/portfolio", None).await;
    let titles: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Shop", "Intranet"]);

    let (_, json) = send(&app, "GET", "/api/portfolio/published", None).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["title"], "Shop");

    let draft_uri = format!("/api/portfolio/{}", draft["id"].as_str().unwrap());
    let (status, json) = send(
        &app,
        "PATCH",
        &draft_uri,
        Some(json!({"status": "published", "githubUrl": "https://github.com/example/intranet"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "published");
    assert_eq!(json["githubUrl"], "https://github.com/example/intranet");

    let (status, json) = send(
        &app,
        "PATCH",
        &draft_uri,
        Some(json!({"imageUrl": "not a url"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["fields"]["imageUrl"].is_string());

    let (status, _) = send(&app, "DELETE", &draft_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "GET", &draft_uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_settings_endpoints() {
    let app = create_test_app(Ai::Unconfigured);

    let (status, json) = send(&app, "GET", "/api/settings", None).await;
    assert_eq!(status, StatusCode::OK);
    let keys: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["key"].as_str().unwrap())
        .collect();
    assert_eq!(
        keys,
        vec![
            "default_category",
            "openai_model",
            "telegram_bot_token",
            "telegram_channel_id"
        ]
    );

    let (status, json) = send(&app, "GET", "/api/settings/openai_model", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["value"], "gpt-4o-mini");

    let (status, json) = send(
        &app,
        "PATCH",
        "/api/settings/site_title",
        Some(json!({"value": "Studio"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["key"], "site_title");
    assert_eq!(json["value"], "Studio");
    assert!(json["updatedAt"].is_string());

    let (status, json) = send(&app, "PUT", "/api/settings/site_title", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["fields"]["value"].is_string());

    let (status, _) = send(&app, "DELETE", "/api/settings/site_title", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, json) = send(&app, "GET", "/api/settings/site_title", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_generate_without_api_key_is_unavailable() {
    let app = create_test_app(Ai::Unconfigured);

    // the configuration check comes before input validation
    let (status, json) = send(&app, "POST", "/api/ai/generate", Some(json!({}))).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["code"], "SERVICE_UNAVAILABLE");
}

#[tokio::test]
async fn test_generate_requires_topic() {
    let app = create_test_app(Ai::Canned);

    let (status, json) = send(
        &app,
        "POST",
        "/api/ai/generate",
        Some(json!({"topic": "   "})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["fields"]["topic"], "Topic is required");
}

#[tokio::test]
async fn test_generate_returns_draft() {
    let app = create_test_app(Ai::Canned);

    let (status, json) = send(
        &app,
        "POST",
        "/api/ai/generate",
        Some(json!({"topic": "Rust", "language": "en", "template": "blog"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["title"], "Rust in production");
    assert_eq!(json["body"], GENERATED_TEXT);
    assert_eq!(json["category"], "Technology");

    let (_, json) = send(
        &app,
        "POST",
        "/api/ai/generate",
        Some(json!({"topic": "Rust", "category": "Engineering"})),
    )
    .await;
    assert_eq!(json["category"], "Engineering");

    // nothing was saved
    let (_, json) = send(&app, "GET", "/api/content", None).await;
    assert!(json.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_generate_upstream_failure() {
    let app = create_test_app(Ai::Failing);

    let (status, json) = send(
        &app,
        "POST",
        "/api/ai/generate",
        Some(json!({"topic": "Rust"})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "UPSTREAM_ERROR");
    assert_eq!(json["error"], "Failed to generate content with AI");
}

#[tokio::test]
async fn test_users_register_login_and_lookup() {
    let app = create_test_app(Ai::Unconfigured);
    let credentials = json!({"username": "editor", "password": "correct horse"});

    let (status, user) = send(&app, "POST", "/api/users", Some(credentials.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user["username"], "editor");
    assert!(user.get("passwordHash").is_none());
    let id = user["id"].as_str().unwrap().to_owned();

    let (status, json) = send(&app, "POST", "/api/users", Some(credentials.clone())).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");

    let (status, json) = send(&app, "POST", "/api/login", Some(credentials)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], id);

    let (status, json) = send(
        &app,
        "POST",
        "/api/login",
        Some(json!({"username": "editor", "password": "wrong password"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");

    let request = Request::builder()
        .uri("/api/user")
        .header("X-Operator-ID", &id)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (status, json) = send(&app, "GET", "/api/user", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");

    let request = Request::builder()
        .uri("/api/user")
        .header("X-Operator-ID", "not-a-uuid")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_logout_acknowledges() {
    let app = create_test_app(Ai::Unconfigured);

    let (status, json) = send(&app, "POST", "/api/logout", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
}

#[tokio::test]
async fn test_register_validates_credentials() {
    let app = create_test_app(Ai::Unconfigured);

    let (status, json) = send(
        &app,
        "POST",
        "/api/users",
        Some(json!({"username": "", "password": "short"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["fields"]["username"].is_string());
    assert!(json["fields"]["password"].is_string());
}
