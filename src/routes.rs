use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::HeaderValue;
use axum::{routing::get, Router};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::handlers::pricing::PRICING_PATH;
use crate::models::AppState;

// Embed the default stylesheet in the binary
pub const DEFAULT_STYLESHEET: &str = include_str!("../static/styles.css");

pub fn build_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route(
            PRICING_PATH,
            get(handlers::pricing::pricing_get).post(handlers::pricing::pricing_post),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            handlers::middleware::session_middleware,
        ));

    // Always serve styles.css - use custom if provided, otherwise use embedded default
    let stylesheet_content = state.custom_css.clone().unwrap_or_else(|| DEFAULT_STYLESHEET.to_string());

    let stylesheet = Router::new()
        .route("/static/styles.css", get(move || {
            let css = stylesheet_content.clone();
            async move { ([(CONTENT_TYPE, "text/css")], css) }
        }))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=3600"),
        ));

    Router::new()
        .route("/", get(handlers::system::root_get))
        .route("/healthz", get(handlers::system::healthz))
        .merge(stylesheet)
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
