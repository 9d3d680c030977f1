use crate::api::{
    create_app_subscription, load_active_subscriptions, AdminClient, ApiError,
    AppSubscriptionCreatePayload, SubscriptionRequest,
};
use crate::models::{ActiveSubscription, PlanName, SubscriptionOutcome, DEFAULT_PLAN, GENERIC_FAILURE};

/// Charges are always created in test mode.
pub const SUBSCRIPTION_TEST_MODE: bool = true;

/// Name of the first active subscription, or the free tier when there is none.
pub fn current_plan_from(subscriptions: &[ActiveSubscription]) -> String {
    subscriptions
        .first()
        .map(|s| s.name.clone())
        .unwrap_or_else(|| DEFAULT_PLAN.as_str().to_string())
}

pub async fn load_current_plan(client: &AdminClient) -> Result<String, ApiError> {
    let subscriptions = load_active_subscriptions(client).await?;
    let plan = current_plan_from(&subscriptions);
    tracing::debug!(plan = %plan, active = subscriptions.len(), "Resolved current plan");
    Ok(plan)
}

/// User errors win over a confirmation URL; a payload with neither is a generic failure.
pub fn interpret_create_payload(payload: AppSubscriptionCreatePayload) -> SubscriptionOutcome {
    if !payload.user_errors.is_empty() {
        tracing::error!(errors = ?payload.user_errors, "Subscription errors");
        return SubscriptionOutcome::UserErrors(payload.user_errors);
    }
    match payload.confirmation_url.filter(|u| !u.trim().is_empty()) {
        Some(confirmation_url) => SubscriptionOutcome::Confirm {
            confirmation_url,
            subscription_id: payload.app_subscription.map(|s| s.id),
        },
        None => {
            tracing::error!("No confirmation URL returned");
            SubscriptionOutcome::Failed(GENERIC_FAILURE.to_string())
        }
    }
}

pub async fn request_subscription(
    client: &AdminClient,
    plan: PlanName,
    price: &str,
    return_url: &str,
) -> Result<SubscriptionOutcome, ApiError> {
    let request = SubscriptionRequest {
        name: plan.as_str().to_string(),
        price: price.trim().to_string(),
        return_url: return_url.to_string(),
        test: SUBSCRIPTION_TEST_MODE,
    };
    tracing::info!(plan = %plan, price = %request.price, return_url, "Creating app subscription");
    let payload = create_app_subscription(client, &request).await?;
    let outcome = interpret_create_payload(payload);
    if let SubscriptionOutcome::Confirm { subscription_id, .. } = &outcome {
        tracing::info!(plan = %plan, ?subscription_id, "Subscription awaiting merchant confirmation");
    }
    Ok(outcome)
}
