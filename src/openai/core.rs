use http::{StatusCode, header};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "system")]
    System,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "user")]
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::Assistant => "assistant",
            Role::User => "user",
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Self {
        Message {
            role,
            content: content.to_string(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct CompletionRequest {
    pub model: String,
    pub temperature: f64,
    pub messages: Vec<Message>,
}

#[derive(Deserialize, Debug)]
struct CompletionChoice {
    message: Message,
}

// Only the fields we read are modeled. Everything else in the
// response (id, usage, finish_reason, ...) is ignored.
#[derive(Deserialize, Debug)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Error)]
pub enum CompletionError {
    /// The API answered with a non-success status. The body is kept
    /// as-is so it can be handed back to callers untouched.
    #[error("Completion API responded with {status}: {body}")]
    Upstream {
        status: StatusCode,
        content_type: Option<String>,
        body: String,
    },
    #[error("Completion request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Completion response contained no choices")]
    MissingChoice,
}

/// Request the next message for `request.messages` from an OpenAI
/// compatible chat completions API.
pub async fn completion(
    request: &CompletionRequest,
    api_hostname: &str,
    api_key: &str,
) -> Result<Message, CompletionError> {
    let url = format!("{}/v1/chat/completions", api_hostname.trim_end_matches("/"));
    let response = reqwest::Client::new()
        .post(url)
        .bearer_auth(api_key)
        .header("Content-Type", "application/json")
        .json(request)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body = response.text().await?;
        return Err(CompletionError::Upstream {
            status,
            content_type,
            body,
        });
    }

    let completion: CompletionResponse = response.json().await?;
    completion
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message)
        .ok_or(CompletionError::MissingChoice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn request(messages: Vec<Message>) -> CompletionRequest {
        CompletionRequest {
            model: String::from("gpt-3.5-turbo"),
            temperature: 0.6,
            messages,
        }
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::System).unwrap(), r#""system""#);
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            r#""assistant""#
        );
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), r#""user""#);
    }

    #[test]
    fn test_role_rejects_unknown() {
        assert!(serde_json::from_str::<Role>(r#""tool""#).is_err());
    }

    #[test]
    fn test_message_new() {
        let msg = Message::new(Role::User, "Hello world");
        assert_eq!(
            serde_json::to_string(&msg).unwrap(),
            r#"{"role":"user","content":"Hello world"}"#
        );
    }

    #[test]
    fn test_completion_request_serialization() {
        let req = request(vec![Message::new(Role::User, "Hi")]);
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "model": "gpt-3.5-turbo",
                "temperature": 0.6,
                "messages": [{"role": "user", "content": "Hi"}]
            })
        );
    }

    #[tokio::test]
    async fn test_completion_returns_first_choice() {
        let mut server = mockito::Server::new_async().await;

        let response_body = r#"{
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "created": 1694268190,
            "model": "gpt-3.5-turbo",
            "choices": [
                {
                    "index": 0,
                    "message": {"role": "assistant", "content": "Hello!"},
                    "finish_reason": "stop"
                },
                {
                    "index": 1,
                    "message": {"role": "assistant", "content": "Howdy!"},
                    "finish_reason": "stop"
                }
            ]
        }"#;

        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .match_body(Matcher::Json(json!({
                "model": "gpt-3.5-turbo",
                "temperature": 0.6,
                "messages": [{"role": "user", "content": "Hi"}]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(response_body)
            .create_async()
            .await;

        let req = request(vec![Message::new(Role::User, "Hi")]);
        let result = completion(&req, &server.url(), "test-key").await;

        mock.assert_async().await;
        assert_eq!(result.unwrap(), Message::new(Role::Assistant, "Hello!"));
    }

    #[tokio::test]
    async fn test_completion_trims_trailing_slash() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"ok"}}]}"#)
            .create_async()
            .await;

        let req = request(vec![Message::new(Role::User, "Hi")]);
        let hostname = format!("{}/", server.url());
        let result = completion(&req, &hostname, "test-key").await;

        mock.assert_async().await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_completion_upstream_error_keeps_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(503)
            .with_header("content-type", "application/json")
            .with_body(r#"{"code":"rate_limited"}"#)
            .create_async()
            .await;

        let req = request(vec![Message::new(Role::User, "Hi")]);
        let err = completion(&req, &server.url(), "test-key")
            .await
            .unwrap_err();

        match err {
            CompletionError::Upstream {
                status,
                content_type,
                body,
            } => {
                assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
                assert_eq!(content_type.as_deref(), Some("application/json"));
                assert_eq!(body, r#"{"code":"rate_limited"}"#);
            }
            other => panic!("Expected upstream error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_completion_without_choices() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let req = request(vec![Message::new(Role::User, "Hi")]);
        let err = completion(&req, &server.url(), "test-key")
            .await
            .unwrap_err();
        assert!(matches!(err, CompletionError::MissingChoice));
    }

    #[tokio::test]
    async fn test_completion_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let req = request(vec![Message::new(Role::User, "Hi")]);
        let err = completion(&req, &server.url(), "test-key")
            .await
            .unwrap_err();
        assert!(matches!(err, CompletionError::Request(_)));
    }
}
