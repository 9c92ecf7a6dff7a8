//! Last.fm related models

use serde::{Deserialize, Deserializer, Serialize};

/// One weekly aggregation window from `user.getweeklychartlist`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartWindow {
    #[serde(deserialize_with = "timestamp")]
    pub from: i64,
    #[serde(deserialize_with = "timestamp")]
    pub to: i64,
}

impl ChartWindow {
    pub fn new(from: i64, to: i64) -> Self {
        Self { from, to }
    }
}

/// Span covering the most recent N chart windows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekRange {
    pub from: i64,
    pub to: i64,
    /// How many windows were requested
    pub weeks: u32,
}

impl WeekRange {
    /// Query parameters for `user.getweeklytrackchart`
    pub fn params(&self) -> [(&'static str, String); 2] {
        [("from", self.from.to_string()), ("to", self.to.to_string())]
    }
}

/// Album/track/artist artwork descriptor
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Image {
    #[serde(default)]
    pub size: String,
    #[serde(rename = "#text", alias = "text", default)]
    pub url: String,
}

// upstream sends unix timestamps as strings, accept numbers as well
fn timestamp<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Int(value) => Ok(value),
        Raw::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}
