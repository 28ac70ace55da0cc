use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use mandi_advisor::api::{router, ApiState, HealthState, LatencyStats};
use mandi_advisor::config::Config;
use mandi_advisor::data::ReferenceData;
use mandi_advisor::error::Result;
use mandi_advisor::model::PriceModel;
use mandi_advisor::sms::SessionStore;

#[tokio::main]
async fn main() {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .init();

    if let Err(e) = run(cfg).await {
        error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

async fn run(cfg: Config) -> Result<()> {
    // Everything the handlers read is loaded up front; a broken table or
    // artifact fails the boot instead of the first request.
    let reference = Arc::new(ReferenceData::load(&cfg)?);
    let model = Arc::new(PriceModel::load(&cfg.model_path)?);

    let state = ApiState {
        reference,
        model,
        health: Arc::new(HealthState::new()),
        latency: Arc::new(LatencyStats::new()),
        sessions: SessionStore::new(),
    };

    let app = router(state);
    let bind_addr = format!("0.0.0.0:{}", cfg.api_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("HTTP API listening on {bind_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
