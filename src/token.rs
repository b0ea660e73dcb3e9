//! Session Token Issuance
//!
//! [`AuthCore`](crate::AuthCore) signs session credentials through the
//! [`TokenIssuer`] trait. The shipped implementation, [`JwtIssuer`], produces
//! HS256 JSON Web Tokens carrying the account id as `sub`.
//!
//! # Usage
//!
//! ```ignore
//! use wicket::{JwtIssuer, TokenIssuer};
//!
//! let issuer = JwtIssuer::new(std::env::var("JWT_SECRET")?)?;
//! let token = issuer.sign(&claims, Duration::from_secs(3600))?;
//! let decoded = issuer.validate(&token)?;
//! ```

use std::fmt;
use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// HS256 secrets shorter than this are brute-forceable offline
pub const MIN_SECRET_LEN: usize = 32;

/// Failure to sign or validate a session credential.
#[derive(Debug)]
pub enum TokenError {
    /// Signing secret is too short to be safe
    WeakSecret,
    /// The signing operation itself failed
    Signing(String),
    /// Presented token has expired
    Expired,
    /// Presented token is malformed or carries a bad signature
    Invalid,
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WeakSecret => {
                write!(f, "signing secret must be at least {} bytes", MIN_SECRET_LEN)
            }
            Self::Signing(detail) => write!(f, "token signing failed: {}", detail),
            Self::Expired => write!(f, "token expired"),
            Self::Invalid => write!(f, "invalid token"),
        }
    }
}

impl std::error::Error for TokenError {}

/// Identity fields a caller asks to have signed into a session credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    /// Subject: the account id
    pub sub: String,
    /// Login name, echoed into the token for display purposes
    pub username: String,
}

/// Signing seam for session credentials.
pub trait TokenIssuer: Send + Sync {
    /// Sign `claims` into a credential valid for `expiry` from now.
    fn sign(&self, claims: &SessionClaims, expiry: Duration) -> Result<String, TokenError>;
}

/// Full claim set carried inside an issued JWT.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    /// Subject (account id)
    pub sub: String,
    /// Login name
    pub username: String,
    /// Expiration timestamp (seconds since epoch)
    pub exp: i64,
    /// Issued-at timestamp
    pub iat: i64,
    /// Token id, unique per issuance
    pub jti: String,
}

/// HS256 JWT issuer.
pub struct JwtIssuer {
    secret: String,
}

impl JwtIssuer {
    /// Create an issuer, rejecting secrets shorter than [`MIN_SECRET_LEN`].
    pub fn new(secret: impl Into<String>) -> Result<Self, TokenError> {
        let secret = secret.into();
        if secret.len() < MIN_SECRET_LEN {
            return Err(TokenError::WeakSecret);
        }
        Ok(Self { secret })
    }

    /// Validate and decode a previously issued token.
    pub fn validate(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::default();
        validation.leeway = 0; // No clock skew tolerance

        decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid,
        })
    }
}

impl fmt::Debug for JwtIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print the secret
        f.debug_struct("JwtIssuer").finish_non_exhaustive()
    }
}

impl TokenIssuer for JwtIssuer {
    fn sign(&self, claims: &SessionClaims, expiry: Duration) -> Result<String, TokenError> {
        let now = Utc::now();
        let exp = now + expiry;

        let full = TokenClaims {
            sub: claims.sub.clone(),
            username: claims.username.clone(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::default(),
            &full,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| TokenError::Signing(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-secret-test-secret-test-secret!";

    fn claims() -> SessionClaims {
        SessionClaims {
            sub: "5e3c7bd1-0000-4000-8000-000000000001".into(),
            username: "alice".into(),
        }
    }

    #[test]
    fn test_sign_and_validate_roundtrip() {
        let issuer = JwtIssuer::new(TEST_SECRET).unwrap();
        let token = issuer.sign(&claims(), Duration::from_secs(3600)).unwrap();

        let decoded = issuer.validate(&token).unwrap();
        assert_eq!(decoded.sub, claims().sub);
        assert_eq!(decoded.username, "alice");
        assert!(decoded.exp > decoded.iat);
    }

    #[test]
    fn test_expired_token_rejected() {
        let issuer = JwtIssuer::new(TEST_SECRET).unwrap();

        let now = Utc::now().timestamp();
        let stale = TokenClaims {
            sub: claims().sub,
            username: "alice".into(),
            exp: now - 3600,
            iat: now - 7200,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::default(),
            &stale,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(issuer.validate(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = JwtIssuer::new(TEST_SECRET).unwrap();
        let other = JwtIssuer::new("another-secret-another-secret-anoth!").unwrap();

        let token = issuer.sign(&claims(), Duration::from_secs(3600)).unwrap();
        assert!(matches!(other.validate(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let issuer = JwtIssuer::new(TEST_SECRET).unwrap();
        assert!(matches!(
            issuer.validate("not.a.jwt"),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn test_weak_secret_rejected() {
        assert!(matches!(
            JwtIssuer::new("short"),
            Err(TokenError::WeakSecret)
        ));
    }

    #[test]
    fn test_tokens_carry_unique_ids() {
        let issuer = JwtIssuer::new(TEST_SECRET).unwrap();
        let a = issuer.sign(&claims(), Duration::from_secs(3600)).unwrap();
        let b = issuer.sign(&claims(), Duration::from_secs(3600)).unwrap();

        let a = issuer.validate(&a).unwrap();
        let b = issuer.validate(&b).unwrap();
        assert_ne!(a.jti, b.jti);
    }
}
