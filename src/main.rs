use std::env;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use itinerary_planner::api::create_router;
use itinerary_planner::llm::{LlmAdvisor, LlmConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = LlmConfig::from_env();
    if config.api_key.is_none() {
        info!("no LLM API key configured; all requests will use the nearest-neighbor fallback");
    }
    let advisor = LlmAdvisor::new(config)?;

    let port = env::var("PORT")
        .ok()
        .and_then(|raw| raw.parse::<u16>().ok())
        .unwrap_or(8080);
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    info!(port, "itinerary planner listening");

    axum::serve(listener, create_router(advisor)).await?;
    Ok(())
}
