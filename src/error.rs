//! Error types shared by the upstream client, the renderer and the routes

use actix_web::http::{header, StatusCode};
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Transport-level failure talking to the upstream API
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid upstream url: {0}")]
    Url(String),
}

/// Failure turning a report context into markup
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unknown template: {0}")]
    UnknownTemplate(String),

    #[error("template {template} is missing field {field}")]
    MissingField {
        template: &'static str,
        field: &'static str,
    },

    #[error(transparent)]
    Format(#[from] std::fmt::Error),
}

/// Errors a report route can end in
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("could not resolve chart weeks: {0}")]
    WindowLookup(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream(_) | AppError::WindowLookup(_) => StatusCode::BAD_GATEWAY,
            AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header((header::CONTENT_TYPE, "text/plain; charset=utf-8"))
            .body(self.to_string())
    }
}
