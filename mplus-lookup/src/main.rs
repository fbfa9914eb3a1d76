//! mplus-lookup - Mythic+ character lookup service
//!
//! Serves:
//! - `/` lookup form
//! - `/character/{region}/{realm}/{name}` character page
//! - `/api/character/{region}/{realm}/{name}` enriched JSON
//! - `/health`

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use mplus_common::config::{locate_toml_config, resolve_config};
use mplus_lookup::cli::Cli;
use mplus_lookup::services::{CharacterAssembler, UpstreamClient};
use mplus_lookup::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting mplus-lookup v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let toml_config = locate_toml_config(cli.config.as_deref())?;
    let config = resolve_config(&cli.overrides(), toml_config.as_ref())?;

    info!(
        api_base_url = %config.api_base_url,
        current_season = %config.current_season,
        default_season = %config.default_season,
        access_key = config.access_key().is_some(),
        detail_timeout_secs = ?config.detail_timeout_secs,
        "Configuration resolved"
    );

    let client = UpstreamClient::new(&config).context("Failed to create upstream client")?;
    let assembler = CharacterAssembler::new(Arc::new(client), &config);
    let app = build_router(AppState::new(assembler, &config));

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address))?;
    info!("Listening on http://{}", config.bind_address);
    info!("Health check: http://{}/health", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
