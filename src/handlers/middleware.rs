use axum::{
    extract::{Form, FromRequest, Query, Request, State},
    http::{header::AUTHORIZATION, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;

use crate::error::AppError;
use crate::models::AppState;
use crate::services::{verify_session_token, SessionError};
use crate::templates::SessionBounceTemplate;
use crate::utils::{bearer_token, with_query_param};

use super::helpers::{build_template_globals, render_template, wants_json, TemplateGlobals};

/// Query parameter the platform uses to hand the session token to embedded pages
pub const ID_TOKEN_PARAM: &str = "id_token";

pub async fn session_middleware(
    State(state): State<AppState>,
    Query(q): Query<HashMap<String, String>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token)
        .map(str::to_string)
        .or_else(|| q.get(ID_TOKEN_PARAM).cloned())
        .unwrap_or_default();

    match verify_session_token(&token, &state.api_key, &state.api_secret, &state.shop) {
        Ok(session) => {
            tracing::debug!(shop = %session.shop, user = ?session.user_id, "Authenticated session");
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        Err(SessionError::Expired) if is_document_request(&request) => {
            tracing::info!(path = %request.uri().path(), "Session token expired; bouncing for a fresh one");
            session_bounce(&state, q, request).await
        }
        Err(e) => AppError::from(e).into_response(),
    }
}

/// Browser navigations and form posts; API callers get the plain 401.
fn is_document_request(request: &Request) -> bool {
    (request.method() == Method::GET || request.method() == Method::POST) && !wants_json(request.headers())
}

async fn session_bounce(state: &AppState, query: HashMap<String, String>, request: Request) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let mut kept_query: Vec<(String, String)> = query
        .into_iter()
        .filter(|(k, _)| k != ID_TOKEN_PARAM)
        .collect();
    kept_query.sort();

    let (action, fields) = if method == Method::POST {
        let fields = match Form::<Vec<(String, String)>>::from_request(request, state).await {
            Ok(Form(fields)) => fields,
            Err(e) => {
                tracing::warn!(%e, "Could not read form body while refreshing session");
                vec![]
            }
        };
        let action = kept_query
            .iter()
            .fold(path, |acc, (k, v)| with_query_param(&acc, k, v));
        (action, fields)
    } else {
        // A GET form replaces the action's query with its fields
        (path, kept_query)
    };

    let TemplateGlobals { shop, api_key } = build_template_globals(state);
    render_template(
        StatusCode::OK,
        SessionBounceTemplate {
            shop,
            api_key,
            method: method.as_str().to_lowercase(),
            action,
            fields: fields
                .into_iter()
                .filter(|(k, _)| k != ID_TOKEN_PARAM)
                .collect(),
        },
    )
}
