//! Turning "last N weeks" into absolute chart boundaries

use serde::Deserialize;

use crate::error::AppError;
use crate::lastfm::{self, Lookup, UpstreamClient};
use crate::models::{ChartWindow, WeekRange};

#[derive(Debug, Deserialize)]
struct ChartList {
    chart: Windows,
}

/// A one-week list arrives as a bare object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Windows {
    Many(Vec<ChartWindow>),
    One(ChartWindow),
}

impl Windows {
    fn into_vec(self) -> Vec<ChartWindow> {
        match self {
            Windows::Many(windows) => windows,
            Windows::One(window) => vec![window],
        }
    }
}

/// Span of the last `weeks` windows of a chronological list.
///
/// Asking for more weeks than exist clamps to the whole list, and `weeks` on
/// the result is the clamped count. Returns `None` only for an empty list.
pub fn trailing_range(windows: &[ChartWindow], weeks: u32) -> Option<WeekRange> {
    let take = (weeks as usize).min(windows.len());
    let recent = &windows[windows.len() - take..];

    let first = recent.first()?;
    let last = recent.last()?;

    Some(WeekRange {
        from: first.from,
        to: last.to,
        weeks: take as u32,
    })
}

/// Resolve the chart boundaries for `user`'s last `weeks` weeks.
///
/// No week count means no window and no upstream call.
pub async fn resolve(
    client: &dyn UpstreamClient,
    user: &str,
    weeks: Option<u32>,
) -> Result<Option<WeekRange>, AppError> {
    let Some(weeks) = weeks else {
        return Ok(None);
    };

    let resp = client
        .call(lastfm::METHOD_WEEKLY_CHART_LIST, user, &[])
        .await?;

    let data = match Lookup::from_response(resp, "weeklychartlist") {
        Lookup::Found(data) => data,
        Lookup::ParseFailure { .. } => {
            return Err(AppError::WindowLookup(
                "chart list is not valid json".to_string(),
            ))
        }
        Lookup::UnexpectedShape { message, .. } => return Err(AppError::WindowLookup(message)),
    };

    let list: ChartList = serde_json::from_value(data)
        .map_err(|e| AppError::WindowLookup(format!("malformed chart list: {}", e)))?;

    let range = trailing_range(&list.chart.into_vec(), weeks)
        .ok_or_else(|| AppError::WindowLookup(format!("{} has no chart weeks", user)))?;

    tracing::debug!(
        "{} weeks for {} resolved to {}..{}",
        weeks,
        user,
        range.from,
        range.to
    );

    Ok(Some(range))
}
