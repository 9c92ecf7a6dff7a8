//! Feed routes: one per report

use actix_web::http::header;
use actix_web::{get, web, HttpResponse};
use serde::Deserialize;

use super::AppState;
use crate::config::{FEED_CACHE_CONTROL, FEED_CONTENT_TYPE};
use crate::core::reports::{self, Report, ReportOutcome};
use crate::core::Period;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    pub period: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WeeksQuery {
    pub weeks: Option<String>,
}

impl WeeksQuery {
    /// Positive week count, anything else counts as no window
    pub fn count(&self) -> Option<u32> {
        self.weeks
            .as_deref()
            .and_then(|w| w.trim().parse::<u32>().ok())
            .filter(|&w| w > 0)
    }
}

async fn respond(state: &AppState, user: &str, report: Report) -> Result<HttpResponse, AppError> {
    let outcome = reports::build(
        state.client.as_ref(),
        state.renderer.as_ref(),
        &state.settings.base_url,
        user,
        report,
    )
    .await;

    match outcome {
        Ok(ReportOutcome::Rendered(markup)) => Ok(HttpResponse::Ok()
            .insert_header((header::CONTENT_TYPE, FEED_CONTENT_TYPE))
            .insert_header((header::CACHE_CONTROL, FEED_CACHE_CONTROL))
            .body(markup)),
        Ok(ReportOutcome::PassThrough { body, content_type }) => {
            let mut resp = HttpResponse::Ok();
            if let Some(content_type) = content_type {
                resp.insert_header((header::CONTENT_TYPE, content_type));
            }
            Ok(resp.body(body))
        }
        Err(e) => {
            tracing::warn!("{} for {} failed: {}", report.method(), user, e);
            Err(e)
        }
    }
}

/// GET /{user}
#[get("/{user}")]
pub async fn recent_tracks(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    respond(&state, &path, Report::Recent).await
}

/// GET /{user}/loved
#[get("/{user}/loved")]
pub async fn loved_tracks(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    respond(&state, &path, Report::Loved).await
}

/// GET /{user}/toptracks?period=
#[get("/{user}/toptracks")]
pub async fn top_tracks(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PeriodQuery>,
) -> Result<HttpResponse, AppError> {
    let period = Period::resolve(query.period.as_deref());
    respond(&state, &path, Report::TopTracks(period)).await
}

/// GET /{user}/topartists?period=
#[get("/{user}/topartists")]
pub async fn top_artists(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PeriodQuery>,
) -> Result<HttpResponse, AppError> {
    let period = Period::resolve(query.period.as_deref());
    respond(&state, &path, Report::TopArtists(period)).await
}

/// GET /{user}/weeklytracks?weeks=
#[get("/{user}/weeklytracks")]
pub async fn weekly_tracks(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<WeeksQuery>,
) -> Result<HttpResponse, AppError> {
    let weeks = query.count();
    respond(&state, &path, Report::WeeklyTracks { weeks }).await
}

/// Configure feed routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(recent_tracks)
        .service(loved_tracks)
        .service(top_tracks)
        .service(top_artists)
        .service(weekly_tracks);
}
