use reasoning_agent::{api::start_server, Agent, AgentConfig, HttpChatClient};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Loads .env as well
    let config = AgentConfig::from_env()?;

    let api_port: u16 = std::env::var("PORT")
        .or_else(|_| std::env::var("API_PORT"))
        .unwrap_or_else(|_| "8080".to_string())
        .parse()?;

    info!("Reasoning Agent - API Server");
    info!(port = api_port, api_base = %config.api_base, model = %config.model, "Configuration loaded");

    let transport = HttpChatClient::new(&config)?;
    let agent = Arc::new(Agent::new(Box::new(transport), config));

    info!("Agent initialized, starting API server");

    start_server(agent, api_port).await?;

    Ok(())
}
