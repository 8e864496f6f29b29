//! Session token issuing, verification, and cookie handling.
//!
//! Sessions are stateless: a signed HS256 token carrying the user's email
//! claim, held in a `token` cookie. Tokens are valid for a fixed hour from
//! issuance; nothing is stored server-side, so logout just clears the cookie.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use compparts_core::Email;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "token";

/// Token validity in seconds (1 hour from issuance).
pub const TOKEN_TTL_SECONDS: i64 = 60 * 60;

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's email address.
    pub sub: String,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Expiration (unix timestamp).
    pub exp: i64,
}

/// Signing and verification keys derived from the session secret.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SessionKeys {
    /// Derive keys from the configured session secret.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
        }
    }

    /// Issue a signed token for `email`, valid for one hour.
    ///
    /// # Errors
    ///
    /// Returns `jsonwebtoken::errors::Error` if encoding fails.
    pub fn issue(&self, email: &Email) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: email.as_str().to_owned(),
            iat: now,
            exp: now + TOKEN_TTL_SECONDS,
        };

        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding)
    }

    /// Verify a token's signature and expiry and return its claims.
    ///
    /// # Errors
    ///
    /// Returns `jsonwebtoken::errors::Error` on a bad signature or an
    /// expired token.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let data =
            jsonwebtoken::decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(data.claims)
    }
}

/// Build the `Set-Cookie` value carrying a freshly issued session token.
///
/// `SameSite=None; Secure` because browser clients run on a different
/// origin than the API.
#[must_use]
pub fn session_cookie(token: &str) -> String {
    format!(
        "{SESSION_COOKIE_NAME}={token}; Path=/; Max-Age={TOKEN_TTL_SECONDS}; HttpOnly; Secure; SameSite=None"
    )
}

/// Build the `Set-Cookie` value that clears the session cookie.
#[must_use]
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE_NAME}=; Path=/; Max-Age=0; HttpOnly; Secure; SameSite=None")
}

/// Extract a cookie value by name from a `Cookie` request header.
#[must_use]
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then_some(value)
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_keys() -> SessionKeys {
        SessionKeys::new(&SecretString::from("k9#mQ2$vX7!pL4@wN8&rT3*bF6^jH1%d"))
    }

    #[test]
    fn test_issue_verify_roundtrip() {
        let keys = test_keys();
        let email = Email::parse("buyer@example.com").unwrap();

        let token = keys.issue(&email).unwrap();
        let claims = keys.verify(&token).unwrap();

        assert_eq!(claims.sub, "buyer@example.com");
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECONDS);
    }

    #[test]
    fn test_verify_rejects_wrong_key() {
        let email = Email::parse("buyer@example.com").unwrap();
        let token = test_keys().issue(&email).unwrap();

        let other = SessionKeys::new(&SecretString::from("z5@xC8#nV2$kM9!qW4&tR7*gB3^jL6%s"));
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn test_verify_rejects_expired() {
        let keys = test_keys();
        let stale = Claims {
            sub: "buyer@example.com".to_owned(),
            iat: Utc::now().timestamp() - 2 * TOKEN_TTL_SECONDS,
            exp: Utc::now().timestamp() - TOKEN_TTL_SECONDS,
        };
        let token =
            jsonwebtoken::encode(&Header::default(), &stale, &keys.encoding).unwrap();

        assert!(keys.verify(&token).is_err());
    }

    #[test]
    fn test_verify_rejects_garbage() {
        assert!(test_keys().verify("not-a-token").is_err());
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("abc123");
        assert!(cookie.starts_with("token=abc123;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=None"));
        assert!(cookie.contains("Max-Age=3600"));
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        let cookie = clear_session_cookie();
        assert!(cookie.starts_with("token=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn test_cookie_value_parsing() {
        let header = "theme=dark; token=abc.def.ghi; locale=en";
        assert_eq!(cookie_value(header, "token"), Some("abc.def.ghi"));
        assert_eq!(cookie_value(header, "theme"), Some("dark"));
        assert_eq!(cookie_value(header, "missing"), None);
    }

    #[test]
    fn test_cookie_value_single_pair() {
        assert_eq!(cookie_value("token=xyz", "token"), Some("xyz"));
    }
}
