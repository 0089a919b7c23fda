use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use tower::ServiceExt;

use vocab_importer::llm::{OpenAiGenerator, TextGenerator, initialize_client};
use vocab_importer::server::{AppState, router};

const FOOD_DOCUMENT: &str = r#"{"vocabulary":[{"kanji":"食べる","romaji":"taberu","english":"eat","parts":[{"kanji":"食","romaji":"ta"},{"kanji":"べる","romaji":"beru"}]}]}"#;

enum Reply {
    Text(String),
    NetworkError,
}

struct FakeGenerator {
    reply: Reply,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl FakeGenerator {
    fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    fn model(&self) -> &str {
        "fake-model"
    }

    async fn generate(&self, _system_prompt: &str, user_prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(user_prompt.to_string());
        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::NetworkError => Err(anyhow!("error sending request: connection refused")),
        }
    }
}

async fn post_json(generator: Arc<dyn TextGenerator>, body: &str) -> (StatusCode, Value) {
    let app = router(AppState::new(generator));
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/generate-vocabulary")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn food_theme_returns_the_exact_document() {
    let generator = FakeGenerator::new(Reply::Text(format!(
        "Here you go:\n```json\n{FOOD_DOCUMENT}\n```"
    )));

    let (status, body) = post_json(generator.clone(), r#"{"category":"food"}"#).await;

    assert_eq!(status, StatusCode::OK);
    let expected: Value = serde_json::from_str(FOOD_DOCUMENT).unwrap();
    assert_eq!(body, expected);
    assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn theme_field_is_accepted() {
    let generator = FakeGenerator::new(Reply::Text(format!("```{FOOD_DOCUMENT}```")));

    let (status, _) = post_json(generator, r#"{"theme":"food"}"#).await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn category_wins_when_both_fields_are_sent() {
    let generator = FakeGenerator::new(Reply::Text(format!("```{FOOD_DOCUMENT}```")));

    let (status, _) = post_json(
        generator.clone(),
        r#"{"category":"food","theme":"weather"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let prompts = generator.prompts.lock().unwrap();
    assert!(prompts[0].contains("\"food\""));
    assert!(!prompts[0].contains("\"weather\""));
}

#[tokio::test]
async fn missing_theme_is_a_client_error_without_upstream_call() {
    for body in [r#"{}"#, r#"{"category":""}"#, r#"{"category":"   "}"#, "not json"] {
        let generator = FakeGenerator::new(Reply::Text(format!("```{FOOD_DOCUMENT}```")));

        let (status, response) = post_json(generator.clone(), body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(response, json!({ "error": "Category is required" }));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }
}

#[tokio::test]
async fn network_failure_is_a_server_error_with_message() {
    let generator = FakeGenerator::new(Reply::NetworkError);

    let (status, body) = post_json(generator, r#"{"category":"food"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().unwrap();
    assert!(!message.is_empty());
    assert!(message.contains("connection refused"));
}

/// Serves a fixed `/responses` body and returns the base URL.
async fn stub_provider(body: Value) -> String {
    let app = Router::new().route(
        "/responses",
        post(move || {
            let body = body.clone();
            async move { Json(body) }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn provider_without_text_output_is_a_server_error() {
    let api_base = stub_provider(json!({
        "id": "resp_test",
        "object": "response",
        "created_at": 0,
        "model": "stub-model",
        "status": "completed",
        "output": [],
    }))
    .await;
    let generator = OpenAiGenerator::new(initialize_client("gsk_test", &api_base), "stub-model");

    let (status, body) = post_json(Arc::new(generator), r#"{"category":"food"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("No text output returned from stub-model"));
}

#[tokio::test]
async fn malformed_reply_is_a_generic_server_error() {
    let replies = [
        "I could not think of any words.".to_string(),
        "```json\n{\"vocabulary\": [],}\n```".to_string(),
        "```json\n{\"words\": []}\n```".to_string(),
    ];

    for reply in replies {
        let generator = FakeGenerator::new(Reply::Text(reply.clone()));

        let (status, body) = post_json(generator, r#"{"category":"food"}"#).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "reply: {reply}");
        assert_eq!(body, json!({ "error": "Failed to parse generated vocabulary" }));
    }
}

#[tokio::test]
async fn index_and_health_are_served() {
    let app = router(AppState::new(FakeGenerator::new(Reply::NetworkError)));

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let page = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(page.contains("/api/generate-vocabulary"));
    assert!(page.contains("Copy to Clipboard"));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let health: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(health, json!({ "status": "ok", "model": "fake-model" }));
}
