use axum::{
    extract::RawQuery,
    response::{IntoResponse, Redirect},
};

use super::pricing::PRICING_PATH;

/// Entry point of the embedded app; keeps the platform's query (session token, shop, host).
pub async fn root_get(RawQuery(query): RawQuery) -> impl IntoResponse {
    match query.filter(|q| !q.is_empty()) {
        Some(q) => Redirect::to(&format!("{}?{}", PRICING_PATH, q)),
        None => Redirect::to(PRICING_PATH),
    }
}

pub async fn healthz() -> &'static str {
    "ok"
}
