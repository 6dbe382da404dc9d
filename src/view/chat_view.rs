use crate::openai::{Message, Role};

use super::client::{ClientError, RelayClient};

/// Shown after the transcript while a reply is pending
pub const LOADING_PLACEHOLDER: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing was sent: the input was empty or a request is in flight
    Rejected,
    Replied,
    Failed,
}

/// In-memory state of a single chat page. Dropped with the page, never
/// persisted.
#[derive(Debug, Default)]
pub struct ChatView {
    chat_input: String,
    is_loading: bool,
    messages: Vec<Message>,
    scroll_requested: bool,
}

impl ChatView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chat_input(&self) -> &str {
        &self.chat_input
    }

    pub fn set_chat_input(&mut self, input: &str) {
        self.chat_input = input.to_string();
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// The visible transcript, oldest first
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Whether the submit control is enabled
    pub fn can_submit(&self) -> bool {
        !self.chat_input.is_empty() && !self.is_loading
    }

    /// First half of a submission. Takes the input, appends it to the
    /// transcript as a user message before anything is sent and returns
    /// the transcript to relay. Returns `None` when there is nothing
    /// to send or a previous submission hasn't finished.
    pub fn begin_submit(&mut self) -> Option<Vec<Message>> {
        if !self.can_submit() {
            return None;
        }

        let input = std::mem::take(&mut self.chat_input);
        self.is_loading = true;
        self.messages.push(Message::new(Role::User, &input));

        Some(self.messages.clone())
    }

    /// Second half of a submission. A reply is appended; a failure
    /// only gets logged and the user's message stays unanswered.
    pub fn finish_submit(&mut self, result: Result<Message, ClientError>) -> SubmitOutcome {
        self.is_loading = false;

        match result {
            Ok(message) => {
                self.messages.push(message);
                self.scroll_requested = true;
                SubmitOutcome::Replied
            }
            Err(e) => {
                tracing::error!("Chat request failed: {}", e);
                SubmitOutcome::Failed
            }
        }
    }

    /// Submit the current input through `client`.
    pub async fn submit<C>(&mut self, client: &C) -> SubmitOutcome
    where
        C: RelayClient + ?Sized,
    {
        let Some(transcript) = self.begin_submit() else {
            return SubmitOutcome::Rejected;
        };
        let result = client.send(&transcript).await;
        self.finish_submit(result)
    }

    /// Returns true once after each reply so the display can scroll
    /// to the newest message.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_requested)
    }

    /// Lines of the transcript as "role: content" followed by the
    /// loading placeholder if a reply is pending.
    pub fn render(&self) -> impl Iterator<Item = String> + '_ {
        self.messages
            .iter()
            .map(|m| format!("{}: {}", m.role.as_str(), m.content))
            .chain(self.is_loading.then(|| LOADING_PLACEHOLDER.to_string()))
    }
}
