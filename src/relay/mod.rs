//! Relays a chat transcript to the completion API on behalf of the
//! browser or terminal client.

mod handler;
pub use handler::{
    EMPTY_MESSAGES_MESSAGE, GENERIC_ERROR_MESSAGE, MISSING_API_KEY_MESSAGE, RelayFailure,
    RelayResult, completion_request, persona, relay,
};
