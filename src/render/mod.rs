//! Markup rendering
//!
//! Routes hand a template name and a JSON context to a [`Renderer`]. The
//! built-in [`FeedRenderer`] knows the landing page and one RSS 2.0 template
//! per report.

mod feeds;
pub mod filters;

use serde_json::Value;

use crate::error::RenderError;

pub const TEMPLATE_HOME: &str = "home";
pub const TEMPLATE_RECENT: &str = "recent";
pub const TEMPLATE_LOVED: &str = "loved";
pub const TEMPLATE_TOP_TRACKS: &str = "toptracks";
pub const TEMPLATE_TOP_ARTISTS: &str = "topartists";
pub const TEMPLATE_WEEKLY_TRACKS: &str = "weeklytracks";

/// Turns a named template plus context into markup
pub trait Renderer: Send + Sync {
    fn render(&self, template: &str, context: &Value) -> Result<String, RenderError>;
}

/// Hand-written templates for the landing page and the feeds
#[derive(Debug, Default, Clone, Copy)]
pub struct FeedRenderer;

impl Renderer for FeedRenderer {
    fn render(&self, template: &str, context: &Value) -> Result<String, RenderError> {
        match template {
            TEMPLATE_HOME => feeds::home(context),
            TEMPLATE_RECENT => feeds::recent(context),
            TEMPLATE_LOVED => feeds::loved(context),
            TEMPLATE_TOP_TRACKS => feeds::top_tracks(context),
            TEMPLATE_TOP_ARTISTS => feeds::top_artists(context),
            TEMPLATE_WEEKLY_TRACKS => feeds::weekly_tracks(context),
            other => Err(RenderError::UnknownTemplate(other.to_string())),
        }
    }
}
