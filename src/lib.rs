pub mod api;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod templates;
pub mod utils;

pub use error::AppError;
pub use models::AppState;
pub use routes::build_router;

use api::AdminClient;

/// Shared HTTP client with the crate user agent
pub fn build_http_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(format!("PlanPicker/{}", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Assemble application state from the current environment (call `config::load_env_file` first).
pub fn build_state_from_env() -> Result<AppState, reqwest::Error> {
    let client = build_http_client()?;
    Ok(AppState {
        shop: config::get_shop(),
        api_key: config::get_api_key(),
        api_secret: config::get_api_secret(),
        public_base_url: config::get_public_base_url(),
        admin: AdminClient::new(client, config::get_admin_graphql_url(), config::get_access_token()),
        custom_css: None,
    })
}
