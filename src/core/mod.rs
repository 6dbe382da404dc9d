mod config;
pub use config::{AppConfig, DEFAULT_SYSTEM_MESSAGE, TEMPERATURE};
