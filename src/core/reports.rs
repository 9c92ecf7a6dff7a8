//! Report assembly
//!
//! Each report is one upstream method plus the top-level field its reply must
//! carry. [`build`] runs the call, sorts the reply into pass-through, not-found
//! or a rendered feed, and never touches HTTP types.

use bytes::Bytes;
use serde_json::{json, Value};

use super::periods::Period;
use super::weeks;
use crate::error::AppError;
use crate::lastfm::{self, Lookup, UpstreamClient};
use crate::models::WeekRange;
use crate::render::{self, Renderer};
use crate::utils::dates::{now_rfc822, timestamp_rfc822};

/// The five feeds a user can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    Recent,
    Loved,
    TopTracks(Period),
    TopArtists(Period),
    WeeklyTracks { weeks: Option<u32> },
}

/// Result of a report
#[derive(Debug)]
pub enum ReportOutcome {
    /// Rendered feed markup
    Rendered(String),
    /// Upstream body that was not JSON, returned as-is
    PassThrough {
        body: Bytes,
        content_type: Option<String>,
    },
}

impl Report {
    pub fn method(&self) -> &'static str {
        match self {
            Report::Recent => lastfm::METHOD_RECENT_TRACKS,
            Report::Loved => lastfm::METHOD_LOVED_TRACKS,
            Report::TopTracks(_) => lastfm::METHOD_TOP_TRACKS,
            Report::TopArtists(_) => lastfm::METHOD_TOP_ARTISTS,
            Report::WeeklyTracks { .. } => lastfm::METHOD_WEEKLY_TRACK_CHART,
        }
    }

    /// Top-level field a successful reply carries
    pub fn field(&self) -> &'static str {
        match self {
            Report::Recent => "recenttracks",
            Report::Loved => "lovedtracks",
            Report::TopTracks(_) => "toptracks",
            Report::TopArtists(_) => "topartists",
            Report::WeeklyTracks { .. } => "weeklytrackchart",
        }
    }

    pub fn template(&self) -> &'static str {
        match self {
            Report::Recent => render::TEMPLATE_RECENT,
            Report::Loved => render::TEMPLATE_LOVED,
            Report::TopTracks(_) => render::TEMPLATE_TOP_TRACKS,
            Report::TopArtists(_) => render::TEMPLATE_TOP_ARTISTS,
            Report::WeeklyTracks { .. } => render::TEMPLATE_WEEKLY_TRACKS,
        }
    }

    fn context(&self, user: &str, data: Value, range: Option<&WeekRange>) -> Value {
        match self {
            Report::Recent => json!({
                "user": user,
                "tracks": data,
                "type": "recent",
                "title": format!("{}'s recent tracks", user),
            }),
            Report::Loved => json!({
                "user": user,
                "tracks": data,
                "type": "loved",
                "title": format!("{}'s loved tracks", user),
            }),
            Report::TopTracks(period) => json!({
                "user": user,
                "tracks": data,
                "period": period.as_str(),
                "type": format!("toptracks?period={}", period),
                "title": format!("{}'s top tracks [{}]", user, period),
            }),
            Report::TopArtists(period) => json!({
                "user": user,
                "artists": data,
                "period": period.as_str(),
                "type": format!("topartists?period={}", period),
                "title": format!("{}'s top artists [{}]", user, period),
            }),
            Report::WeeklyTracks { .. } => {
                let chart_end = match &data["@attr"]["to"] {
                    Value::String(s) => s.parse::<i64>().ok(),
                    Value::Number(n) => n.as_i64(),
                    _ => None,
                };
                let date = match chart_end {
                    Some(ts) => timestamp_rfc822(ts),
                    None => now_rfc822(),
                };

                let mut title = format!("{}'s weekly tracks", user);
                let mut kind = "weeklytracks".to_string();
                if let Some(range) = range {
                    title.push_str(&format!(" [{} weeks]", range.weeks));
                    kind.push_str(&format!("?weeks={}", range.weeks));
                }

                json!({
                    "user": user,
                    "tracks": data,
                    "type": kind,
                    "date": date,
                    "weeks": range.map(|r| r.weeks),
                    "title": title,
                })
            }
        }
    }
}

/// Fetch and render `report` for `user`
pub async fn build(
    client: &dyn UpstreamClient,
    renderer: &dyn Renderer,
    base_url: &str,
    user: &str,
    report: Report,
) -> Result<ReportOutcome, AppError> {
    let mut extra: Vec<(&str, String)> = Vec::new();
    let mut range = None;

    match report {
        Report::TopTracks(period) | Report::TopArtists(period) => {
            extra.push(("period", period.as_str().to_string()));
        }
        Report::WeeklyTracks { weeks: count } => {
            range = weeks::resolve(client, user, count).await?;
            if let Some(r) = &range {
                extra.extend(r.params());
            }
        }
        Report::Recent | Report::Loved => {}
    }

    let resp = client.call(report.method(), user, &extra).await?;

    let data = match Lookup::from_response(resp, report.field()) {
        Lookup::Found(data) => data,
        Lookup::ParseFailure { body, content_type } => {
            return Ok(ReportOutcome::PassThrough { body, content_type })
        }
        Lookup::UnexpectedShape { message, .. } => return Err(AppError::NotFound(message)),
    };

    let mut context = report.context(user, data, range.as_ref());
    context["base_url"] = Value::from(base_url);

    let markup = renderer.render(report.template(), &context)?;
    Ok(ReportOutcome::Rendered(markup))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::FakeUpstream;
    use crate::error::RenderError;
    use parking_lot::Mutex;

    /// Keeps the last context instead of rendering it
    #[derive(Default)]
    struct CapturingRenderer {
        seen: Mutex<Option<(String, Value)>>,
    }

    impl Renderer for CapturingRenderer {
        fn render(&self, template: &str, context: &Value) -> Result<String, RenderError> {
            *self.seen.lock() = Some((template.to_string(), context.clone()));
            Ok(format!("rendered {}", template))
        }
    }

    impl CapturingRenderer {
        fn seen(&self) -> (String, Value) {
            self.seen.lock().clone().expect("nothing rendered")
        }
    }

    const CHART_LIST: &str = r##"{"weeklychartlist":{"chart":[
        {"#text":"","from":"100","to":"200"},
        {"#text":"","from":"200","to":"300"},
        {"#text":"","from":"300","to":"400"}
    ]}}"##;

    const WEEKLY_CHART: &str = r#"{"weeklytrackchart":{"track":[],
        "@attr":{"user":"rj","from":"200","to":"1704110400"}}}"#;

    #[actix_web::test]
    async fn test_top_tracks_context() {
        let upstream = FakeUpstream::new().reply(
            lastfm::METHOD_TOP_TRACKS,
            200,
            r#"{"toptracks":{"track":[]}}"#,
        );
        let renderer = CapturingRenderer::default();

        let outcome = build(
            &upstream,
            &renderer,
            "/",
            "rj",
            Report::TopTracks(Period::ThreeMonths),
        )
        .await
        .unwrap();
        assert!(matches!(outcome, ReportOutcome::Rendered(ref s) if s == "rendered toptracks"));

        let calls = upstream.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, "user.gettoptracks");
        assert_eq!(calls[0].user, "rj");
        assert_eq!(calls[0].param("period"), Some("3month"));

        let (template, context) = renderer.seen();
        assert_eq!(template, "toptracks");
        assert_eq!(context["type"], "toptracks?period=3month");
        assert!(context["title"].as_str().unwrap().contains("[3month]"));
        assert_eq!(context["base_url"], "/");
    }

    #[actix_web::test]
    async fn test_top_artists_uses_artists_key() {
        let upstream = FakeUpstream::new().reply(
            lastfm::METHOD_TOP_ARTISTS,
            200,
            r#"{"topartists":{"artist":[{"name":"Cher"}]}}"#,
        );
        let renderer = CapturingRenderer::default();

        build(
            &upstream,
            &renderer,
            "/",
            "rj",
            Report::TopArtists(Period::Overall),
        )
        .await
        .unwrap();

        let (_, context) = renderer.seen();
        assert_eq!(context["artists"]["artist"][0]["name"], "Cher");
        assert_eq!(context["type"], "topartists?period=overall");
    }

    #[actix_web::test]
    async fn test_recent_has_no_extra_params() {
        let upstream = FakeUpstream::new().reply(
            lastfm::METHOD_RECENT_TRACKS,
            200,
            r#"{"recenttracks":{"track":[]}}"#,
        );
        let renderer = CapturingRenderer::default();

        build(&upstream, &renderer, "/", "rj", Report::Recent)
            .await
            .unwrap();

        let calls = upstream.calls();
        assert!(calls[0].extra.is_empty());
        let (_, context) = renderer.seen();
        assert_eq!(context["type"], "recent");
    }

    #[actix_web::test]
    async fn test_parse_failure_passes_through() {
        let upstream =
            FakeUpstream::new().reply(lastfm::METHOD_LOVED_TRACKS, 500, "Service Unavailable");
        let renderer = CapturingRenderer::default();

        let outcome = build(&upstream, &renderer, "/", "rj", Report::Loved)
            .await
            .unwrap();
        match outcome {
            ReportOutcome::PassThrough { body, .. } => {
                assert_eq!(&body[..], b"Service Unavailable")
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(renderer.seen.lock().is_none());
    }

    #[actix_web::test]
    async fn test_unexpected_shape_is_not_found() {
        let upstream = FakeUpstream::new().reply(
            lastfm::METHOD_TOP_ARTISTS,
            200,
            r#"{"error":6,"message":"User not found"}"#,
        );
        let renderer = CapturingRenderer::default();

        let err = build(
            &upstream,
            &renderer,
            "/",
            "ghost",
            Report::TopArtists(Period::OneMonth),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "User not found"));
    }

    #[actix_web::test]
    async fn test_weekly_without_weeks() {
        let upstream =
            FakeUpstream::new().reply(lastfm::METHOD_WEEKLY_TRACK_CHART, 200, WEEKLY_CHART);
        let renderer = CapturingRenderer::default();

        build(
            &upstream,
            &renderer,
            "/",
            "rj",
            Report::WeeklyTracks { weeks: None },
        )
        .await
        .unwrap();

        let calls = upstream.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].param("from"), None);
        assert_eq!(calls[0].param("to"), None);

        let (_, context) = renderer.seen();
        assert_eq!(context["title"], "rj's weekly tracks");
        assert_eq!(context["type"], "weeklytracks");
        assert!(context["weeks"].is_null());
        assert!(context["date"].as_str().unwrap().contains("2024"));
    }

    #[actix_web::test]
    async fn test_weekly_with_weeks() {
        let upstream = FakeUpstream::new()
            .reply(lastfm::METHOD_WEEKLY_CHART_LIST, 200, CHART_LIST)
            .reply(lastfm::METHOD_WEEKLY_TRACK_CHART, 200, WEEKLY_CHART);
        let renderer = CapturingRenderer::default();

        build(
            &upstream,
            &renderer,
            "/",
            "rj",
            Report::WeeklyTracks { weeks: Some(2) },
        )
        .await
        .unwrap();

        let calls = upstream.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].method, "user.getweeklychartlist");
        assert_eq!(calls[1].method, "user.getweeklytrackchart");
        assert_eq!(calls[1].param("from"), Some("200"));
        assert_eq!(calls[1].param("to"), Some("400"));

        let (_, context) = renderer.seen();
        assert_eq!(context["title"], "rj's weekly tracks [2 weeks]");
        assert_eq!(context["type"], "weeklytracks?weeks=2");
        assert_eq!(context["weeks"], 2);
    }

    #[actix_web::test]
    async fn test_weekly_window_failure_is_hard_error() {
        let upstream = FakeUpstream::new()
            .reply(lastfm::METHOD_WEEKLY_CHART_LIST, 200, "not json")
            .reply(lastfm::METHOD_WEEKLY_TRACK_CHART, 200, WEEKLY_CHART);
        let renderer = CapturingRenderer::default();

        let err = build(
            &upstream,
            &renderer,
            "/",
            "rj",
            Report::WeeklyTracks { weeks: Some(2) },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::WindowLookup(_)));
        assert_eq!(upstream.calls().len(), 1);
    }
}
