// Base template trait for inheritance
pub mod base_template;
pub use base_template::BaseTemplate;

pub mod pricing_template;
pub mod session_bounce_template;
pub use pricing_template::PricingTemplate;
pub use session_bounce_template::SessionBounceTemplate;
