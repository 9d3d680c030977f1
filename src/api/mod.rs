// Admin GraphQL API modules
pub mod client;
pub mod error;
pub mod subscriptions;

// Re-export commonly used items
pub use client::{set_silent, AdminClient};
pub use error::ApiError;
pub use subscriptions::{
    create_app_subscription, load_active_subscriptions, AppSubscriptionCreatePayload,
    SubscriptionRequest,
};
