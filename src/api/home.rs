//! Landing page and favicon

use actix_files::NamedFile;
use actix_web::http::header::{self, HeaderValue};
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use super::AppState;
use crate::config::EXAMPLE_USER;
use crate::error::AppError;
use crate::render::TEMPLATE_HOME;

const FAVICON_MIME: &str = "image/vnd.microsoft.icon";

#[derive(Debug, Deserialize)]
pub struct HomeForm {
    pub user: String,
}

fn render_home(state: &AppState, user: &str, title: &str) -> Result<HttpResponse, AppError> {
    let context = json!({
        "user": user,
        "title": title,
        "base_url": state.settings.base_url,
    });
    let html = state.renderer.render(TEMPLATE_HOME, &context)?;

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "text/html; charset=utf-8"))
        .body(html))
}

/// GET / - example links
#[get("/")]
pub async fn home(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    render_home(&state, EXAMPLE_USER, "Example URLs")
}

/// POST / - links for the submitted user
#[post("/")]
pub async fn home_for_user(
    state: web::Data<AppState>,
    form: web::Form<HomeForm>,
) -> Result<HttpResponse, AppError> {
    let user = form.user.trim();
    if user.is_empty() {
        return render_home(&state, EXAMPLE_USER, "Example URLs");
    }
    render_home(&state, user, "Your URLs")
}

/// GET /favicon.ico
#[get("/favicon.ico")]
pub async fn favicon(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let path = state.settings.static_dir.join("favicon.ico");

    match NamedFile::open_async(&path).await {
        Ok(file) => {
            let mut resp = file.into_response(&req);
            resp.headers_mut()
                .insert(header::CONTENT_TYPE, HeaderValue::from_static(FAVICON_MIME));
            resp
        }
        Err(e) => {
            tracing::debug!("favicon not served from {:?}: {}", path, e);
            HttpResponse::NotFound().finish()
        }
    }
}

/// Configure landing routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(favicon).service(home).service(home_for_user);
}
