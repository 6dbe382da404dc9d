use crate::core::AppConfig;

/// Read-only state shared by every request. Conversations live with
/// the client so there is nothing mutable to guard here.
pub struct AppState {
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }
}
