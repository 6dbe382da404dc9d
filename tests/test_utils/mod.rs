//! Test utilities for integration tests
use std::sync::Arc;

use axum::{Router, body::Body};
use serde_json::json;

use quickchat::api::AppState;
use quickchat::api::app;
use quickchat::core::AppConfig;

pub const TEST_PERSONA: &str = "You are a test persona.";

/// Config pointing the relay at `openai_api_hostname` (usually a
/// `mockito` server) and serving the web UI from this repo.
pub fn test_config(openai_api_hostname: &str, openai_api_key: Option<&str>) -> AppConfig {
    AppConfig {
        openai_api_key: openai_api_key.map(String::from),
        openai_api_hostname: openai_api_hostname.to_string(),
        openai_model: String::from("gpt-3.5-turbo"),
        temperature: 0.6,
        system_message: String::from(TEST_PERSONA),
        web_ui_path: format!("{}/web-ui/src", env!("CARGO_MANIFEST_DIR")),
    }
}

/// Creates a test application router
pub fn test_app(openai_api_hostname: &str, openai_api_key: Option<&str>) -> Router {
    let app_state = AppState::new(test_config(openai_api_hostname, openai_api_key));
    app(Arc::new(app_state))
}

/// A chat completion body whose first choice is an assistant message
pub fn completion_body(content: &str) -> String {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1694268190,
        "model": "gpt-3.5-turbo",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
    .to_string()
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}
