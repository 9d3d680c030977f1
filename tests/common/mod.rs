#![allow(dead_code)]

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use plan_picker::api::AdminClient;
use plan_picker::models::SessionClaims;
use plan_picker::AppState;
use std::time::{SystemTime, UNIX_EPOCH};

pub const SHOP: &str = "demo.myshopify.com";
pub const API_KEY: &str = "test-api-key";
pub const API_SECRET: &str = "test-api-secret";
pub const ACCESS_TOKEN: &str = "shpat_test";
pub const GRAPHQL_PATH: &str = "/admin/api/2025-01/graphql.json";

pub fn now() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs()
}

pub fn admin_client(server: &mockito::ServerGuard) -> AdminClient {
    AdminClient::new(
        plan_picker::build_http_client().unwrap(),
        format!("{}{}", server.url(), GRAPHQL_PATH),
        ACCESS_TOKEN,
    )
}

pub fn test_state(server: &mockito::ServerGuard) -> AppState {
    AppState {
        shop: SHOP.to_string(),
        api_key: API_KEY.to_string(),
        api_secret: API_SECRET.to_string(),
        public_base_url: "http://localhost:8080".to_string(),
        admin: admin_client(server),
        custom_css: None,
    }
}

pub fn session_token_for(shop: &str) -> String {
    signed_token(shop, now() - 5, now() + 300)
}

/// Issued three minutes ago and past `exp` by more than the default leeway
pub fn expired_session_token() -> String {
    signed_token(SHOP, now() - 180, now() - 120)
}

fn signed_token(shop: &str, issued_at: u64, exp: u64) -> String {
    let claims = SessionClaims {
        iss: format!("https://{}/admin", shop),
        dest: format!("https://{}", shop),
        aud: API_KEY.to_string(),
        sub: Some("1001".to_string()),
        exp,
        nbf: Some(issued_at),
        iat: Some(issued_at),
        jti: Some("test-jti".to_string()),
        sid: Some("test-sid".to_string()),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(API_SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn session_token() -> String {
    session_token_for(SHOP)
}

pub fn active_subscriptions_body(names: &[&str]) -> String {
    let subs: Vec<_> = names
        .iter()
        .map(|n| serde_json::json!({ "name": n, "test": true }))
        .collect();
    serde_json::json!({
        "data": { "app": { "installation": { "activeSubscriptions": subs } } }
    })
    .to_string()
}

pub fn create_body(user_errors: serde_json::Value, confirmation_url: Option<&str>) -> String {
    let subscription = confirmation_url.map(|_| serde_json::json!({ "id": "gid://shopify/AppSubscription/7" }));
    serde_json::json!({
        "data": {
            "appSubscriptionCreate": {
                "userErrors": user_errors,
                "appSubscription": subscription,
                "confirmationUrl": confirmation_url,
            }
        }
    })
    .to_string()
}

pub async fn mock_active_subscriptions(server: &mut mockito::ServerGuard, names: &[&str]) -> mockito::Mock {
    server
        .mock("POST", GRAPHQL_PATH)
        .match_header("x-shopify-access-token", ACCESS_TOKEN)
        .match_body(mockito::Matcher::Regex("ActiveSubscriptions".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(active_subscriptions_body(names))
        .create_async()
        .await
}
