use serde::Deserialize;
use serde_json::{json, Value};

use crate::models::{ActiveSubscription, UserError};
use super::client::AdminClient;
use super::error::ApiError;

pub const ACTIVE_SUBSCRIPTIONS_QUERY: &str = r#"#graphql
query ActiveSubscriptions {
    app {
        installation {
            activeSubscriptions {
                name
                test
            }
        }
    }
}"#;

pub const APP_SUBSCRIPTION_CREATE_MUTATION: &str = r#"#graphql
mutation AppSubscriptionCreate($name: String!, $lineItems: [AppSubscriptionLineItemInput!]!, $returnUrl: URL!, $test: Boolean) {
    appSubscriptionCreate(name: $name, returnUrl: $returnUrl, lineItems: $lineItems, test: $test) {
        userErrors {
            field
            message
        }
        appSubscription {
            id
        }
        confirmationUrl
    }
}"#;

pub const CURRENCY_CODE: &str = "USD";
pub const BILLING_INTERVAL: &str = "EVERY_30_DAYS";

#[derive(Deserialize)]
struct ActiveSubscriptionsData {
    app: AppNode,
}

#[derive(Deserialize)]
struct AppNode {
    installation: InstallationNode,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InstallationNode {
    #[serde(default)]
    active_subscriptions: Vec<ActiveSubscription>,
}

/// Load the subscriptions the platform considers in effect for this installation.
pub async fn load_active_subscriptions(client: &AdminClient) -> Result<Vec<ActiveSubscription>, ApiError> {
    let data: ActiveSubscriptionsData = client
        .graphql("ActiveSubscriptions", ACTIVE_SUBSCRIPTIONS_QUERY, None)
        .await?;
    Ok(data.app.installation.active_subscriptions)
}

/// Input of one `appSubscriptionCreate` call. Every line item is a monthly USD recurring charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionRequest {
    pub name: String,
    /// Decimal amount, sent verbatim
    pub price: String,
    pub return_url: String,
    pub test: bool,
}

impl SubscriptionRequest {
    pub fn variables(&self) -> Value {
        json!({
            "name": self.name,
            "returnUrl": self.return_url,
            "lineItems": [
                {
                    "plan": {
                        "appRecurringPricingDetails": {
                            "price": { "amount": self.price, "currencyCode": CURRENCY_CODE },
                            "interval": BILLING_INTERVAL,
                        }
                    }
                }
            ],
            "test": self.test,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppSubscriptionRef {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSubscriptionCreatePayload {
    #[serde(default)]
    pub user_errors: Vec<UserError>,
    #[serde(default)]
    pub app_subscription: Option<AppSubscriptionRef>,
    #[serde(default)]
    pub confirmation_url: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSubscriptionCreateData {
    app_subscription_create: Option<AppSubscriptionCreatePayload>,
}

pub async fn create_app_subscription(
    client: &AdminClient,
    request: &SubscriptionRequest,
) -> Result<AppSubscriptionCreatePayload, ApiError> {
    let data: AppSubscriptionCreateData = client
        .graphql(
            "AppSubscriptionCreate",
            APP_SUBSCRIPTION_CREATE_MUTATION,
            Some(request.variables()),
        )
        .await?;
    data.app_subscription_create
        .ok_or_else(|| ApiError::Decode("appSubscriptionCreate returned null".into()))
}
