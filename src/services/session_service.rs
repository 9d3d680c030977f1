use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use thiserror::Error;

use crate::config::sanitize_shop;
use crate::models::{AdminSession, SessionClaims};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Missing session token")]
    Missing,

    #[error("App credentials are not configured")]
    NotConfigured,

    /// Signed correctly but past `exp`; the page can fetch a fresh one and retry
    #[error("Session token expired")]
    Expired,

    #[error("Invalid session token: {0}")]
    Invalid(String),

    #[error("Session token issued for {actual}, expected {expected}")]
    ShopMismatch { expected: String, actual: String },
}

/// Verify an embedded-app session token and turn it into an admin session.
///
/// The token must be HS256-signed with the app secret, addressed to the app key,
/// unexpired, and issued by the shop this server is bound to.
pub fn verify_session_token(
    token: &str,
    api_key: &str,
    api_secret: &str,
    expected_shop: &str,
) -> Result<AdminSession, SessionError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(SessionError::Missing);
    }
    if api_key.is_empty() || api_secret.is_empty() || expected_shop.is_empty() {
        return Err(SessionError::NotConfigured);
    }

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[api_key]);
    validation.validate_nbf = true;

    let data = decode::<SessionClaims>(token, &DecodingKey::from_secret(api_secret.as_bytes()), &validation)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => SessionError::Expired,
            _ => SessionError::Invalid(e.to_string()),
        })?;
    let claims = data.claims;

    let shop = sanitize_shop(&claims.dest);
    if sanitize_shop(&claims.iss) != shop {
        return Err(SessionError::Invalid("issuer does not match destination".into()));
    }
    if !shop.eq_ignore_ascii_case(expected_shop) {
        return Err(SessionError::ShopMismatch {
            expected: expected_shop.to_string(),
            actual: shop,
        });
    }

    Ok(AdminSession {
        shop,
        user_id: claims.sub,
        id_token: token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    const KEY: &str = "app-key";
    const SECRET: &str = "app-secret";
    const SHOP: &str = "demo.myshopify.com";

    fn now() -> u64 {
        SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs()
    }

    fn token_for(shop: &str, aud: &str, secret: &str, exp: u64) -> String {
        let claims = SessionClaims {
            iss: format!("https://{}/admin", shop),
            dest: format!("https://{}", shop),
            aud: aud.into(),
            sub: Some("42".into()),
            exp,
            nbf: Some(now() - 10),
            iat: Some(now() - 10),
            jti: Some("jti-1".into()),
            sid: Some("sid-1".into()),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    #[test]
    fn accepts_valid_token() {
        let token = token_for(SHOP, KEY, SECRET, now() + 60);
        let session = verify_session_token(&token, KEY, SECRET, SHOP).unwrap();
        assert_eq!(session.shop, SHOP);
        assert_eq!(session.user_id.as_deref(), Some("42"));
        assert_eq!(session.id_token, token);
    }

    #[test]
    fn rejects_wrong_secret_and_audience() {
        let forged = token_for(SHOP, KEY, "other-secret", now() + 60);
        assert!(matches!(verify_session_token(&forged, KEY, SECRET, SHOP), Err(SessionError::Invalid(_))));

        let other_app = token_for(SHOP, "other-key", SECRET, now() + 60);
        assert!(matches!(verify_session_token(&other_app, KEY, SECRET, SHOP), Err(SessionError::Invalid(_))));
    }

    #[test]
    fn rejects_expired_token() {
        let token = token_for(SHOP, KEY, SECRET, now() - 3600);
        assert_eq!(verify_session_token(&token, KEY, SECRET, SHOP).unwrap_err(), SessionError::Expired);
    }

    #[test]
    fn rejects_other_shop() {
        let token = token_for("other.myshopify.com", KEY, SECRET, now() + 60);
        assert_eq!(
            verify_session_token(&token, KEY, SECRET, SHOP).unwrap_err(),
            SessionError::ShopMismatch {
                expected: SHOP.into(),
                actual: "other.myshopify.com".into(),
            }
        );
    }

    #[test]
    fn empty_inputs() {
        assert_eq!(verify_session_token(" ", KEY, SECRET, SHOP).unwrap_err(), SessionError::Missing);
        assert_eq!(verify_session_token("abc", KEY, "", SHOP).unwrap_err(), SessionError::NotConfigured);
    }
}
