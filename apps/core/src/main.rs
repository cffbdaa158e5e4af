// Remind Core Entry Point
// Journal-analysis pipeline: moderation, emotion scoring, coaching.

mod brain;
mod config;
mod error;
mod gateway;
mod models;

#[cfg(test)]
mod tests;

use std::io::Read;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use brain::JournalAnalyzer;
use config::AiConfig;
use gateway::OpenAiGateway;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AiConfig::from_env();
    info!(
        model = %config.model,
        configured = config.is_configured(),
        "remind-core starting"
    );

    let gateway = OpenAiGateway::new(&config);
    let analyzer = JournalAnalyzer::new(Arc::new(gateway));

    // Journal text from argv, or stdin when no arguments are given.
    let args: Vec<String> = std::env::args().skip(1).collect();
    let content = if args.is_empty() {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read journal content from stdin")?;
        buffer.trim().to_string()
    } else {
        args.join(" ")
    };

    let result = analyzer.analyze(&content).await;
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
