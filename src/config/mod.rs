//! Configuration module
//!
//! Holds the settings struct and the headers shared by every feed response.

mod settings;

pub use settings::Settings;

/// Content type of rendered feeds
pub const FEED_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Cache hint attached to rendered feeds
pub const FEED_CACHE_CONTROL: &str = "max-age=600";

/// User shown on the landing page before anyone submits the form
pub const EXAMPLE_USER: &str = "thexiffy";
