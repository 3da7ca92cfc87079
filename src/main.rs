//! HTTP server for the income tax engine.
//!
//! Environment:
//! - `TAX_CONFIG_DIR`: regime configuration directory (default `./config/nta2025`)
//! - `BIND_ADDR`: listen address (default `0.0.0.0:3000`)
//! - `LOG_STORE_PATH`: monthly log file (default `./data/monthly_log.json`)
//! - `RUST_LOG`: tracing filter (default `info`)

use std::env;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use income_tax_engine::api::{AppState, create_router};
use income_tax_engine::config::ConfigLoader;
use income_tax_engine::storage::JsonFileStore;

const DEFAULT_CONFIG_DIR: &str = "./config/nta2025";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_LOG_STORE_PATH: &str = "./data/monthly_log.json";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config_dir = env::var("TAX_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let store_path =
        env::var("LOG_STORE_PATH").unwrap_or_else(|_| DEFAULT_LOG_STORE_PATH.to_string());

    let loader = ConfigLoader::load(&config_dir)?;
    info!(
        regime = %loader.regime().code,
        version = %loader.regime().version,
        config_dir = %config_dir,
        "Loaded tax configuration"
    );

    let store = JsonFileStore::new(&store_path);
    let state = AppState::new(loader.into_config(), Arc::new(store));
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(addr = %bind_addr, store = %store_path, "Income tax server listening");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
