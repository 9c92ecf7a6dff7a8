//! Last.fm upstream access
//!
//! The client only moves bytes; [`Lookup`] decides whether a reply holds the
//! field a report asked for.

pub mod client;
pub mod lookup;

pub use client::{LastFmClient, UpstreamClient, UpstreamResponse};
pub use lookup::Lookup;

pub const METHOD_RECENT_TRACKS: &str = "user.getrecenttracks";
pub const METHOD_LOVED_TRACKS: &str = "user.getlovedtracks";
pub const METHOD_TOP_TRACKS: &str = "user.gettoptracks";
pub const METHOD_TOP_ARTISTS: &str = "user.gettopartists";
pub const METHOD_WEEKLY_TRACK_CHART: &str = "user.getweeklytrackchart";
pub const METHOD_WEEKLY_CHART_LIST: &str = "user.getweeklychartlist";
