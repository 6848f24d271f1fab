//! # rentgate-api server entry point
//!
//! Parses command-line arguments, seeds the application state from
//! `RENTGATE_*` environment variables, and serves the Axum router.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use rentgate_api::auth::StaticTokenResolver;
use rentgate_api::state::{AppConfig, AppState};
use rentgate_core::{PlanCatalog, SystemClock};
use rentgate_entitlement::InMemoryEntitlementStore;

/// Rentgate API server
///
/// License verification, checkout, and payment settlement for the
/// property-rental dashboard.
#[derive(Parser, Debug)]
#[command(name = "rentgate-api", version, about, long_about = None)]
struct Cli {
    /// Address to bind.
    #[arg(long, default_value = "0.0.0.0")]
    bind: IpAddr,

    /// Port to listen on. Overrides RENTGATE_PORT.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = config_from_env(cli.port)?;
    let port = config.port;

    let state = AppState::with_parts(
        Arc::new(InMemoryEntitlementStore::new()),
        Arc::new(token_table_from_env()?),
        PlanCatalog::builtin(),
        Arc::new(SystemClock),
        config,
    );
    let app = rentgate_api::app(state);

    let addr = SocketAddr::from((cli.bind, port));
    tracing::info!("rentgate-api listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

/// Build the server configuration from `RENTGATE_*` environment variables.
fn config_from_env(port_override: Option<u16>) -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let port = match port_override {
        Some(p) => p,
        None => match std::env::var("RENTGATE_PORT") {
            Ok(s) => s
                .parse()
                .with_context(|| format!("invalid RENTGATE_PORT: {s}"))?,
            Err(_) => defaults.port,
        },
    };

    Ok(AppConfig {
        port,
        provider_checkout_base: std::env::var("RENTGATE_PROVIDER_CHECKOUT_BASE")
            .unwrap_or(defaults.provider_checkout_base),
        webhook_secret: std::env::var("RENTGATE_WEBHOOK_SECRET").ok(),
    })
}

/// Parse `RENTGATE_AUTH_TOKENS` into a token table.
///
/// Format: comma-separated `token=account-uuid` pairs, e.g.
/// `tok_abc=6d9f…,tok_def=a1b2…`. Absent or empty means no account can
/// authenticate, which is a valid (if useless) configuration for smoke
/// deployments.
fn token_table_from_env() -> anyhow::Result<StaticTokenResolver> {
    let raw = match std::env::var("RENTGATE_AUTH_TOKENS") {
        Ok(v) => v,
        Err(_) => return Ok(StaticTokenResolver::new()),
    };

    let mut resolver = StaticTokenResolver::new();
    for pair in raw.split(',').filter(|p| !p.trim().is_empty()) {
        let (token, account) = pair
            .split_once('=')
            .with_context(|| format!("RENTGATE_AUTH_TOKENS entry missing '=': {pair}"))?;
        let account_uuid: Uuid = account
            .trim()
            .parse()
            .with_context(|| format!("invalid account UUID in RENTGATE_AUTH_TOKENS: {account}"))?;
        resolver = resolver.with_token(token.trim(), rentgate_core::AccountId(account_uuid));
    }
    Ok(resolver)
}
