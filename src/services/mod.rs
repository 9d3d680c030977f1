pub mod billing_service;
pub mod session_service;

pub use billing_service::{
    current_plan_from, interpret_create_payload, load_current_plan, request_subscription,
    SUBSCRIPTION_TEST_MODE,
};
pub use session_service::{verify_session_token, SessionError};
