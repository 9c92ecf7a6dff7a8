//! Data models

pub mod lastfm;

pub use lastfm::{ChartWindow, Image, WeekRange};
