mod core;
pub use self::core::{CompletionError, CompletionRequest, Message, Role, completion};
