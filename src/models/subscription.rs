use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveSubscription {
    pub name: String,
    #[serde(default)]
    pub test: bool,
}

/// Field-level validation error returned by `appSubscriptionCreate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserError {
    #[serde(default)]
    pub field: Option<Vec<String>>,
    pub message: String,
}

impl UserError {
    /// `lineItems.0.plan` style path for display; empty when the error is not tied to a field.
    pub fn field_path(&self) -> String {
        self.field.as_ref().map(|f| f.join(".")).unwrap_or_default()
    }
}

/// What the merchant should see after asking for a subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionOutcome {
    UserErrors(Vec<UserError>),
    Failed(String),
    Confirm {
        confirmation_url: String,
        subscription_id: Option<String>,
    },
}

pub const GENERIC_FAILURE: &str = "Failed to create subscription";
