//! HTTP routes

pub mod home;
pub mod reports;

use actix_web::web;
use std::sync::Arc;

use crate::config::Settings;
use crate::lastfm::UpstreamClient;
use crate::render::Renderer;

/// Shared, read-only state handed to every route
pub struct AppState {
    pub settings: Settings,
    pub client: Arc<dyn UpstreamClient>,
    pub renderer: Arc<dyn Renderer>,
}

impl AppState {
    pub fn new(
        settings: Settings,
        client: Arc<dyn UpstreamClient>,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        Self {
            settings,
            client,
            renderer,
        }
    }
}

/// Configure all routes. The favicon must come before `/{user}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(home::configure)
        .configure(reports::configure);
}
