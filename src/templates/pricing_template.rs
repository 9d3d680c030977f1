use askama::Template;
use crate::models::{PlanCard, UserError};

#[derive(Template)]
#[template(path = "pricing.html")]
pub struct PricingTemplate {
    pub shop: String,
    pub api_key: String,

    pub current_plan: String,
    pub cards: Vec<PlanCard>,
    pub form_action: String,
    pub user_errors: Vec<UserError>,
    pub error: Option<String>,
}

crate::impl_base_template!(PricingTemplate);

impl PricingTemplate {
    pub fn has_errors(&self) -> bool {
        !self.user_errors.is_empty() || self.error.is_some()
    }
}
