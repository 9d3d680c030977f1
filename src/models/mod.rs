pub mod app_state;
pub mod plan;
pub mod plan_card;
pub mod session;
pub mod subscription;

pub use app_state::AppState;
pub use plan::{Plan, PlanName, UnknownPlan, CATALOG, DEFAULT_PLAN};
pub use plan_card::{plan_cards, PlanCard};
pub use session::{AdminSession, SessionClaims};
pub use subscription::{ActiveSubscription, SubscriptionOutcome, UserError, GENERIC_FAILURE};
