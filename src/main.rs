//! lfm-feeds - RSS feeds of Last.fm listening data
//!
//! Every feed request is forwarded to the Last.fm API and the JSON reply is
//! rendered as RSS.

mod api;
mod config;
mod core;
mod error;
mod lastfm;
mod models;
mod render;
mod utils;

use actix_web::{middleware, web, App, HttpServer};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::api::AppState;
use crate::config::Settings;
use crate::lastfm::LastFmClient;
use crate::render::FeedRenderer;

/// lfm-feeds - Last.fm to RSS
#[derive(Parser, Debug)]
#[command(name = "lfm-feeds")]
#[command(version)]
#[command(about = "RSS feeds of your Last.fm recent, loved and top tracks")]
struct Args {
    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 5000)]
    port: u16,

    /// Enable debug mode
    #[arg(long)]
    debug: bool,

    /// Settings file, overridden by LFM_* environment variables
    #[arg(long)]
    config: Option<PathBuf>,
}

#[actix_web::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    info!("lfm-feeds v{} starting...", env!("CARGO_PKG_VERSION"));

    let settings = Settings::load(args.config.as_deref())?;
    if settings.has_placeholder_key() {
        tracing::warn!("No Last.fm API key configured. Set LFM_API_KEY.");
    }
    info!("Upstream API: {}", settings.api_base_url);
    info!("Public base URL: {}", settings.base_url);

    let client = LastFmClient::new(&settings).context("Failed to build upstream client")?;
    let state = web::Data::new(AppState::new(
        settings,
        Arc::new(client),
        Arc::new(FeedRenderer),
    ));

    let addr = format!("{}:{}", args.host, args.port);
    info!("Server listening on http://{}", addr);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            .configure(api::configure)
    })
    .bind(addr)?
    .run()
    .await?;

    Ok(())
}
