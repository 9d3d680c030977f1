use std::env;
use std::path::Path;

// Default configuration constants
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_SHOP: &str = "";
pub const DEFAULT_ACCESS_TOKEN: &str = "";
pub const DEFAULT_API_KEY: &str = "";
pub const DEFAULT_API_SECRET: &str = "";
pub const DEFAULT_API_VERSION: &str = "2025-01";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "";

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

/// Shop domain the app is installed on, e.g. `demo.myshopify.com`.
pub fn get_shop() -> String {
    sanitize_shop(&env::var("SHOPIFY_SHOP").unwrap_or_else(|_| DEFAULT_SHOP.to_string()))
}

pub fn get_access_token() -> String {
    env::var("SHOPIFY_ACCESS_TOKEN").unwrap_or_else(|_| DEFAULT_ACCESS_TOKEN.to_string())
}

pub fn get_api_key() -> String {
    env::var("SHOPIFY_API_KEY").unwrap_or_else(|_| DEFAULT_API_KEY.to_string())
}

pub fn get_api_secret() -> String {
    env::var("SHOPIFY_API_SECRET").unwrap_or_else(|_| DEFAULT_API_SECRET.to_string())
}

pub fn get_api_version() -> String {
    let raw = env::var("SHOPIFY_API_VERSION").unwrap_or_default();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        DEFAULT_API_VERSION.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Admin GraphQL endpoint. `SHOPIFY_ADMIN_GRAPHQL_URL` wins over the derived URL.
pub fn get_admin_graphql_url() -> String {
    match env::var("SHOPIFY_ADMIN_GRAPHQL_URL") {
        Ok(url) if !url.trim().is_empty() => url.trim().to_string(),
        _ => admin_graphql_url(&get_shop(), &get_api_version()),
    }
}

pub fn get_public_base_url() -> String {
    sanitize_base_url(&env::var("PUBLIC_BASE_URL").unwrap_or_else(|_| DEFAULT_PUBLIC_BASE_URL.to_string()))
}

pub fn admin_graphql_url(shop: &str, api_version: &str) -> String {
    format!("https://{}/admin/api/{}/graphql.json", shop, api_version)
}

pub fn sanitize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        format!("http://localhost:{}", DEFAULT_PORT)
    } else {
        trimmed.to_string()
    }
}

/// Strips scheme and path so `https://demo.myshopify.com/` compares equal to `demo.myshopify.com`.
pub fn sanitize_shop(raw: &str) -> String {
    crate::utils::hostname_from_url(raw).to_lowercase()
}
