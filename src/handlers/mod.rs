pub mod helpers;
pub mod middleware;
pub mod pricing;
pub mod system;
