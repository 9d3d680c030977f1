use crate::api::AdminClient;

#[derive(Clone)]
pub struct AppState {
    pub shop: String,
    pub api_key: String,
    pub api_secret: String,
    pub public_base_url: String,
    pub admin: AdminClient,
    pub custom_css: Option<String>,
}
