use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use weather_agent_service::agent::Agent;
use weather_agent_service::api;
use weather_agent_service::config::load_config;
use weather_agent_service::logging::{LogFormat, init_logging};
use weather_agent_service::ollama::OllamaClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(LogFormat::Compact);

    info!(
        "Starting weather agent service v{}",
        env!("CARGO_PKG_VERSION")
    );

    let config = load_config()?;
    info!(
        host = %config.server.host,
        port = config.server.port,
        model = %config.agent.model,
        "Configuration loaded"
    );

    let ollama = OllamaClient::new(config.ollama.clone())?;
    match ollama.health_check().await {
        Ok(true) => info!(url = %ollama.base_url(), "Chat backend reachable"),
        _ => warn!(url = %ollama.base_url(), "Chat backend not reachable yet"),
    }

    // Built once; every request shares it
    let agent = Arc::new(Agent::new(ollama, config.agent.clone()));

    let app = api::router(agent, &config);

    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
