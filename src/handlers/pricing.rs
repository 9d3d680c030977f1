use axum::{
    extract::{Extension, State},
    http::{header::LOCATION, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;
use crate::models::{plan_cards, AdminSession, AppState, PlanName, SubscriptionOutcome, UserError, GENERIC_FAILURE};
use crate::services::{load_current_plan, request_subscription};
use crate::templates::PricingTemplate;
use crate::utils::{return_url, with_query_param};

use super::helpers::{build_template_globals, render_template, request_host, wants_json, TemplateGlobals};
use super::middleware::ID_TOKEN_PARAM;

pub const PRICING_PATH: &str = "/app/pricing";

#[derive(Debug, Deserialize)]
pub struct PlanSelectionForm {
    pub plan: String,
    #[serde(default)]
    pub price: String,
}

pub async fn pricing_get(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
) -> Result<Response, AppError> {
    let current_plan = load_current_plan(&state.admin).await?;
    Ok(render_pricing(&state, &session, current_plan, vec![], None, StatusCode::OK))
}

pub async fn pricing_post(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    headers: HeaderMap,
    Form(form): Form<PlanSelectionForm>,
) -> Result<Response, AppError> {
    let plan: PlanName = form.plan.parse()?;
    let price = if form.price.trim().is_empty() {
        plan.plan().price
    } else {
        form.price.as_str()
    };
    let return_to = return_url(request_host(&headers), &state.public_base_url);

    let outcome = request_subscription(&state.admin, plan, price, &return_to).await?;
    let (user_errors, error) = match outcome {
        SubscriptionOutcome::Confirm { confirmation_url, subscription_id } => {
            match HeaderValue::from_str(&confirmation_url) {
                Ok(location) => return Ok((StatusCode::SEE_OTHER, [(LOCATION, location)]).into_response()),
                Err(e) => {
                    tracing::error!(%e, %confirmation_url, ?subscription_id, "Confirmation URL is not a valid Location");
                    (vec![], Some(GENERIC_FAILURE.to_string()))
                }
            }
        }
        SubscriptionOutcome::UserErrors(errors) => (errors, None),
        SubscriptionOutcome::Failed(message) => (vec![], Some(message)),
    };

    if wants_json(&headers) {
        let body = match error {
            Some(message) => json!({ "error": message }),
            None => json!({ "errors": user_errors }),
        };
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response());
    }

    let current_plan = load_current_plan(&state.admin).await?;
    Ok(render_pricing(
        &state,
        &session,
        current_plan,
        user_errors,
        error,
        StatusCode::UNPROCESSABLE_ENTITY,
    ))
}

fn render_pricing(
    state: &AppState,
    session: &AdminSession,
    current_plan: String,
    user_errors: Vec<UserError>,
    error: Option<String>,
    status: StatusCode,
) -> Response {
    let TemplateGlobals { shop, api_key } = build_template_globals(state);
    render_template(
        status,
        PricingTemplate {
            shop,
            api_key,
            cards: plan_cards(&current_plan),
            current_plan,
            form_action: with_query_param(PRICING_PATH, ID_TOKEN_PARAM, &session.id_token),
            user_errors,
            error,
        },
    )
}
