use serde::{Deserialize, Serialize};

/// Claims carried by the embedded-app session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub iss: String,
    pub dest: String,
    pub aud: String,
    pub sub: Option<String>,
    pub exp: u64,
    #[serde(default)]
    pub nbf: Option<u64>,
    #[serde(default)]
    pub iat: Option<u64>,
    #[serde(default)]
    pub jti: Option<String>,
    #[serde(default)]
    pub sid: Option<String>,
}

/// Authenticated merchant session, stored in request extensions by the auth middleware.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub shop: String,
    pub user_id: Option<String>,
    /// Raw token, echoed back in the form action so the POST authenticates the same way.
    pub id_token: String,
}
