//! Client side of the chat: the transcript a user sees and the
//! connection to the relay.

mod chat_view;
mod client;
pub use chat_view::{ChatView, LOADING_PLACEHOLDER, SubmitOutcome};
pub use client::{ClientError, HttpRelayClient, RelayClient};
