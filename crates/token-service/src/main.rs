//! `token-service` — binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise structured JSON logging.
//! 3. Build the [`TokenHelper`] from the pre-shared key.
//! 4. Build the Axum router and start the HTTP server.

mod config;
mod server;
mod telemetry;

use anyhow::Result;
use token::TokenHelper;
use tracing::info;

use crate::config::Config;
use crate::server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e:#}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init_telemetry(&cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        listen_port = cfg.listen_port,
        "token-service starting"
    );

    // -----------------------------------------------------------------------
    // 3. Token helper
    // -----------------------------------------------------------------------
    let cipher = cfg.cipher()?;
    info!(key_bits = cipher.key_bits(), "token cipher ready");
    let helper = TokenHelper::new(cipher);

    // -----------------------------------------------------------------------
    // 4. HTTP server
    // -----------------------------------------------------------------------
    let state = AppState::new(helper, &cfg.token_header_name)?;
    let router = server::router::build(state);

    let addr: std::net::SocketAddr = ([0, 0, 0, 0], cfg.listen_port).into();
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
