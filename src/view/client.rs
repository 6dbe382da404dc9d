use async_trait::async_trait;
use http::StatusCode;
use thiserror::Error;

use crate::api::public::chat::{ChatRequest, ChatResponse};
use crate::openai::Message;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The relay answered with its own `{ "error": { "message" } }` body
    #[error("Relay responded with {status}: {message}")]
    Relay { status: StatusCode, message: String },
    #[error("Relay request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Unexpected relay response ({status}): {body}")]
    Decode { status: StatusCode, body: String },
}

/// Sends the visible transcript to a relay and returns the reply.
#[async_trait]
pub trait RelayClient: Send + Sync {
    async fn send(&self, messages: &[Message]) -> Result<Message, ClientError>;
}

/// Talks to the relay endpoint of a running `quickchat serve`.
pub struct HttpRelayClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpRelayClient {
    pub fn new(server_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/api/chat", server_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl RelayClient for HttpRelayClient {
    async fn send(&self, messages: &[Message]) -> Result<Message, ClientError> {
        let payload = ChatRequest {
            messages: messages.to_vec(),
        };
        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        match serde_json::from_str::<ChatResponse>(&body) {
            Ok(ChatResponse::Success { new_message }) if status.is_success() => Ok(new_message),
            Ok(ChatResponse::Failure { error }) => Err(ClientError::Relay {
                status,
                message: error.message,
            }),
            _ => Err(ClientError::Decode { status, body }),
        }
    }
}
