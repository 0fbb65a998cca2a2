//! Bearer token issuing and verification.
//!
//! Tokens are HS256-signed JWTs carrying a [`Claims`] payload with a fixed
//! lifetime. Nothing about issued tokens is stored server-side: a token stays
//! valid until it expires or the signing secret changes, and changing the
//! secret invalidates every outstanding token at once.

use std::fmt;

use chrono::Utc;
use internhub_core::roles::Role;
use internhub_core::types::DbId;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::{env_or, required_env, ConfigError};

/// Default token lifetime in hours.
pub const DEFAULT_EXPIRY_HOURS: i64 = 24;

/// Claims embedded in every token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    pub email: String,
    pub role: Role,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp). Always after `iat`.
    pub exp: i64,
}

/// Signing secret and token lifetime.
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_hours: i64,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiry_hours", &self.expiry_hours)
            .finish()
    }
}

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var            | Required | Default |
    /// |--------------------|----------|---------|
    /// | `JWT_SECRET`       | **yes**  | --      |
    /// | `JWT_EXPIRY_HOURS` | no       | `24`    |
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = required_env("JWT_SECRET")?;
        let expiry_hours: i64 = env_or("JWT_EXPIRY_HOURS", DEFAULT_EXPIRY_HOURS)?;
        if expiry_hours <= 0 {
            return Err(ConfigError::Invalid {
                name: "JWT_EXPIRY_HOURS",
                value: expiry_hours.to_string(),
            });
        }
        Ok(Self {
            secret,
            expiry_hours,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token is malformed")]
    Malformed,

    #[error("token signing failed: {0}")]
    Signing(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            // A header naming another algorithm is a forgery attempt, not a
            // parse problem.
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                TokenError::InvalidSignature
            }
            _ => TokenError::Malformed,
        }
    }
}

/// Issues and verifies tokens with one process-wide secret.
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    lifetime_secs: i64,
}

impl TokenIssuer {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // No clock-skew allowance: a token is dead the second after `exp`.
        validation.leeway = 0;
        // jsonwebtoken only recognises a string `sub`; ours is numeric, so
        // `sub` and `iat` presence is enforced by deserializing into `Claims`.
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            lifetime_secs: config.expiry_hours * 3600,
        }
    }

    /// Sign a fresh token for the given identity, issued now.
    pub fn issue(&self, user_id: DbId, email: &str, role: Role) -> Result<String, TokenError> {
        self.issue_at(user_id, email, role, Utc::now().timestamp())
    }

    /// Sign a token as if issued at `issued_at` (Unix seconds).
    pub fn issue_at(
        &self,
        user_id: DbId,
        email: &str,
        role: Role,
        issued_at: i64,
    ) -> Result<String, TokenError> {
        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            role,
            iat: issued_at,
            exp: issued_at + self.lifetime_secs,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Check signature and expiry, returning the embedded [`Claims`].
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding, &self.validation)?.claims;
        if claims.exp <= claims.iat {
            return Err(TokenError::Malformed);
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn test_config(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            expiry_hours: DEFAULT_EXPIRY_HOURS,
        }
    }

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(&test_config("test-secret-that-is-long-enough-for-hmac"))
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let issuer = issuer();
        let token = issuer.issue(42, "ann@x.com", Role::Admin).unwrap();

        let claims = issuer.verify(&token).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "ann@x.com");
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_expired_token_fails_even_with_valid_signature() {
        let issuer = issuer();
        let issued_at = Utc::now().timestamp() - 25 * 3600;
        let token = issuer.issue_at(1, "old@x.com", Role::Intern, issued_at).unwrap();

        assert_matches!(issuer.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_different_secret_fails() {
        let token = issuer().issue(1, "a@x.com", Role::Intern).unwrap();
        let rotated = TokenIssuer::new(&test_config("a-completely-different-secret"));

        assert_matches!(rotated.verify(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let issuer = issuer();
        assert_matches!(issuer.verify("not.a.jwt"), Err(TokenError::Malformed));
        assert_matches!(issuer.verify(""), Err(TokenError::Malformed));
    }

    #[test]
    fn test_any_single_bit_flip_is_rejected() {
        let issuer = issuer();
        let token = issuer.issue(7, "bits@x.com", Role::Employee).unwrap();
        assert_eq!(issuer.verify(&token).unwrap().sub, 7);
        let bytes = token.as_bytes();

        for index in 0..bytes.len() {
            // Bit 7 would leave ASCII and produce invalid UTF-8.
            for bit in 0..7 {
                let mut tampered = bytes.to_vec();
                tampered[index] ^= 1 << bit;
                let tampered = String::from_utf8(tampered).unwrap();
                assert!(
                    issuer.verify(&tampered).is_err(),
                    "flipping bit {bit} of byte {index} must invalidate the token"
                );
            }
        }
    }

    #[test]
    fn test_token_without_numeric_sub_or_iat_is_malformed() {
        let issuer = issuer();
        let exp = Utc::now().timestamp() + 3600;
        let key = EncodingKey::from_secret(b"test-secret-that-is-long-enough-for-hmac");
        let header = Header::new(Algorithm::HS256);

        let no_iat =
            serde_json::json!({ "sub": 1, "email": "a@x.com", "role": "admin", "exp": exp });
        let token = encode(&header, &no_iat, &key).unwrap();
        assert_matches!(issuer.verify(&token), Err(TokenError::Malformed));

        let text_sub = serde_json::json!({
            "sub": "1", "email": "a@x.com", "role": "admin", "iat": exp - 3600, "exp": exp
        });
        let token = encode(&header, &text_sub, &key).unwrap();
        assert_matches!(issuer.verify(&token), Err(TokenError::Malformed));
    }

    #[test]
    fn test_alg_none_is_rejected() {
        let issuer = issuer();
        let token = issuer.issue(1, "a@x.com", Role::Admin).unwrap();
        let payload = token.split('.').nth(1).unwrap();
        // {"alg":"none","typ":"JWT"}
        let forged = format!("eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.{payload}.");

        assert!(issuer.verify(&forged).is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", test_config("super-secret"));
        assert!(!rendered.contains("super-secret"));
    }
}
