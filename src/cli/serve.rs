use anyhow::Result;

use crate::api;
use crate::core::AppConfig;

pub async fn run(host: String, port: String) -> Result<()> {
    // Configuration is read once for the lifetime of the server
    let config = AppConfig::default();
    api::serve(host, port, config).await
}
