use http::StatusCode;
use thiserror::Error;

use crate::core::AppConfig;
use crate::openai::{CompletionError, CompletionRequest, Message, Role, completion};

pub const MISSING_API_KEY_MESSAGE: &str =
    "OpenAI API key not configured, please follow instructions in README.md";
pub const EMPTY_MESSAGES_MESSAGE: &str = "Please enter a message";
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred during your request.";

/// Why a relay attempt produced no message.
#[derive(Debug, Error)]
pub enum RelayFailure {
    #[error("OpenAI API key not configured, please follow instructions in README.md")]
    MissingApiKey,
    #[error("Please enter a message")]
    EmptyMessages,
    /// The completion API rejected the request. Status and body are
    /// passed back to the caller as they were received.
    #[error("Upstream responded with {status}")]
    Upstream {
        status: StatusCode,
        content_type: Option<String>,
        body: String,
    },
    #[error("An error occurred during your request.")]
    Unknown,
}

impl RelayFailure {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayFailure::MissingApiKey => StatusCode::INTERNAL_SERVER_ERROR,
            RelayFailure::EmptyMessages => StatusCode::BAD_REQUEST,
            RelayFailure::Upstream { status, .. } => *status,
            RelayFailure::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug)]
pub enum RelayResult {
    Success(Message),
    Failure(RelayFailure),
}

/// The system message prepended to every transcript sent upstream.
pub fn persona(config: &AppConfig) -> Message {
    Message::new(Role::System, &config.system_message)
}

/// Outbound request for `messages`: the persona followed by the
/// transcript in order.
pub fn completion_request(config: &AppConfig, messages: Vec<Message>) -> CompletionRequest {
    let mut outbound = Vec::with_capacity(messages.len() + 1);
    outbound.push(persona(config));
    outbound.extend(messages);

    CompletionRequest {
        model: config.openai_model.clone(),
        temperature: config.temperature,
        messages: outbound,
    }
}

/// Forward a transcript to the completion API and return the newly
/// generated message. Never fails past this boundary: every outcome
/// is a `RelayResult`.
pub async fn relay(config: &AppConfig, messages: Vec<Message>) -> RelayResult {
    let Some(api_key) = config.openai_api_key.as_deref() else {
        tracing::error!("Refusing chat request, OPENAI_API_KEY is not set");
        return RelayResult::Failure(RelayFailure::MissingApiKey);
    };

    if messages.is_empty() {
        return RelayResult::Failure(RelayFailure::EmptyMessages);
    }

    let request = completion_request(config, messages);
    tracing::debug!(
        "Requesting completion from {} with {} messages",
        config.openai_model,
        request.messages.len()
    );

    match completion(&request, &config.openai_api_hostname, api_key).await {
        Ok(message) => RelayResult::Success(message),
        Err(CompletionError::Upstream {
            status,
            content_type,
            body,
        }) => {
            tracing::error!("{} {}", status, body);
            RelayResult::Failure(RelayFailure::Upstream {
                status,
                content_type,
                body,
            })
        }
        Err(e) => {
            tracing::error!("Error with OpenAI API request: {}", e);
            RelayResult::Failure(RelayFailure::Unknown)
        }
    }
}
