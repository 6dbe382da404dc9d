//! Public types for the chat API
use serde::{Deserialize, Serialize};

use crate::openai::Message;

#[derive(Serialize, Deserialize, Debug)]
pub struct ChatRequest {
    // A missing field is treated like an empty transcript
    #[serde(default)]
    pub messages: Vec<Message>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ErrorMessage {
    pub message: String,
}

/// Body of every response the relay produces itself. Upstream
/// failures are passed through untouched and may not match this
/// shape.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum ChatResponse {
    Success {
        #[serde(rename = "newMessage")]
        new_message: Message,
    },
    Failure {
        error: ErrorMessage,
    },
}

impl ChatResponse {
    pub fn success(new_message: Message) -> Self {
        Self::Success { new_message }
    }

    pub fn failure(message: &str) -> Self {
        Self::Failure {
            error: ErrorMessage {
                message: message.into(),
            },
        }
    }
}
