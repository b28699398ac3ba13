//! HTTP server for the Take-Home Pay Engine.
//!
//! Environment:
//! - `TAKE_HOME_ADDR`: listen address, default `0.0.0.0:3000`
//! - `TAKE_HOME_TABLES`: table directory to load instead of the built-in tables
//! - `RUST_LOG`: log filter, e.g. `info` or `take_home_engine=debug`

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use take_home_engine::api::{AppState, create_router};
use take_home_engine::config::ConfigLoader;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";

fn load_state() -> Result<AppState> {
    match std::env::var("TAKE_HOME_TABLES") {
        Ok(dir) => {
            let loader = ConfigLoader::load(&dir)
                .with_context(|| format!("loading tables from {}", dir))?;
            info!(dir = %dir, revision = %loader.metadata().revision, "Loaded tables");
            Ok(AppState::new(loader.into_tables()))
        }
        Err(_) => Ok(AppState::with_builtin_tables()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let state = load_state()?;
    let addr = std::env::var("TAKE_HOME_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;

    info!(
        addr = %addr,
        revision = %state.tables().metadata().revision,
        "Take-home engine listening"
    );
    axum::serve(listener, create_router(state)).await?;
    Ok(())
}
