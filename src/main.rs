use anyhow::Result;
use quickchat::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
