use axum::http::header::{ACCEPT, HOST};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};

use crate::models::AppState;
use crate::templates::BaseTemplate;

#[derive(Default)]
pub struct TemplateGlobals {
    pub shop: String,
    pub api_key: String,
}

pub fn build_template_globals(state: &AppState) -> TemplateGlobals {
    TemplateGlobals {
        shop: state.shop.clone(),
        api_key: state.api_key.clone(),
    }
}

pub fn render_template<T: askama::Template + BaseTemplate>(status: StatusCode, t: T) -> Response {
    match t.render() {
        Ok(body) => (status, Html(body)).into_response(),
        Err(e) => {
            tracing::error!(%e, shop = t.shop(), "Template render error");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

/// Programmatic callers ask for JSON; browsers get the page back.
pub fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_ascii_lowercase().contains("application/json"))
        .unwrap_or(false)
}

pub fn request_host(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|h| !h.is_empty())
}
