use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::error::LandError;
use crate::io;
use crate::models::{LandMapping, ParseIssue};

use super::state::AppState;

// ---------------------------------------------------------------------------
// Error wrapper
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    details: String,
}

#[derive(Debug)]
pub(crate) struct WebError(LandError);

impl From<LandError> for WebError {
    fn from(e: LandError) -> Self {
        WebError(e)
    }
}

impl std::fmt::Display for WebError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl actix_web::ResponseError for WebError {
    fn error_response(&self) -> HttpResponse {
        let (status, error_type) = match &self.0 {
            LandError::MalformedRow { .. }
            | LandError::ParseError(_)
            | LandError::Csv(_)
            | LandError::InvalidView(_) => {
                (actix_web::http::StatusCode::BAD_REQUEST, "Bad Request")
            }
            LandError::NotFound(_) => (actix_web::http::StatusCode::NOT_FOUND, "Not Found"),
            _ => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
            ),
        };
        HttpResponse::build(status).json(ErrorBody {
            error: error_type.to_string(),
            details: self.0.to_string(),
        })
    }
}

fn not_found(what: String) -> WebError {
    WebError(LandError::NotFound(what))
}

// ---------------------------------------------------------------------------
// Routes
// ---------------------------------------------------------------------------

/// Largest CSV body accepted by `/api/parse`.
const MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

pub(crate) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PayloadConfig::new(MAX_UPLOAD_BYTES))
        .route("/api/mapping", web::get().to(mapping))
        .route("/api/issues", web::get().to(issues))
        .route("/api/views", web::get().to(views))
        .route("/api/views/{label}", web::get().to(view_documents))
        .route("/api/views/{label}/{year}", web::get().to(view_document))
        .route("/api/parse", web::post().to(parse));
}

pub async fn mapping(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(&state.mapping)
}

pub async fn issues(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(&state.issues)
}

pub async fn views(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(&state.views)
}

pub async fn view_documents(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, WebError> {
    let label = path.into_inner();
    let view = state
        .view(&label)
        .ok_or_else(|| not_found(format!("View '{label}' not found")))?;
    let extracted = state.extract(view);
    Ok(HttpResponse::Ok().json(extracted.documents))
}

pub async fn view_document(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, WebError> {
    let (label, year) = path.into_inner();
    let view = state
        .view(&label)
        .ok_or_else(|| not_found(format!("View '{label}' not found")))?;
    let document = state
        .extract_year(view, &year)
        .ok_or_else(|| not_found(format!("No {label} data for year {year}")))?;
    Ok(HttpResponse::Ok().json(document))
}

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub mapping: LandMapping,
    pub issues: Vec<ParseIssue>,
    pub rows_read: usize,
}

/// Parse a raw CSV request body with the server's strictness setting.
pub async fn parse(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, WebError> {
    let parsed = io::parse_table_from_bytes(&body, state.strict)?;
    Ok(HttpResponse::Ok().json(ParseResponse {
        mapping: parsed.mapping,
        issues: parsed.issues,
        rows_read: parsed.rows_read,
    }))
}
