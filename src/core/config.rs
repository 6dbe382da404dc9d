use std::env;

/// Sampling temperature sent with every completion request
pub const TEMPERATURE: f64 = 0.6;

pub const DEFAULT_SYSTEM_MESSAGE: &str = "You are an optimistic male software engineer in your early 30s. You immigrated to the US at a young age from Eastern Europe. You like deep house music, Brazilian Jiu-Jitsu, Board sports, and Alan Watts. You are eager to chat.";

#[derive(Clone, Debug)]
pub struct AppConfig {
    // Absent when `OPENAI_API_KEY` is not set. The server still starts
    // and reports the problem on every chat request.
    pub openai_api_key: Option<String>,
    pub openai_api_hostname: String,
    pub openai_model: String,
    pub temperature: f64,
    pub system_message: String,
    pub web_ui_path: String,
}

impl AppConfig {
    /// Build the config from any key/value source. `Default` uses the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let openai_api_key = lookup("OPENAI_API_KEY").filter(|key| !key.trim().is_empty());
        let openai_api_hostname = lookup("QUICKCHAT_OPENAI_API_HOST")
            .unwrap_or_else(|| "https://api.openai.com".to_string());
        let openai_model =
            lookup("QUICKCHAT_OPENAI_MODEL").unwrap_or_else(|| "gpt-3.5-turbo".to_string());
        let system_message = lookup("QUICKCHAT_SYSTEM_MESSAGE")
            .unwrap_or_else(|| DEFAULT_SYSTEM_MESSAGE.to_string());
        let web_ui_path =
            lookup("QUICKCHAT_WEB_UI_PATH").unwrap_or_else(|| "./web-ui/src".to_string());

        Self {
            openai_api_key,
            openai_api_hostname,
            openai_model,
            temperature: TEMPERATURE,
            system_message,
            web_ui_path,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }
}
