//! JWT issuance and validation for authenticated identities.
//!
//! Tokens are compact HS256-signed assertions carrying the user's id and
//! username, bound to the configured issuer/audience and expiring 15 minutes
//! after issuance. Signing settings are validated once at construction, so a
//! misconfigured key or issuer stops the process before any request is served.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::JwtSettings;
use crate::database::models::User;
use crate::errors::{ServiceError, ServiceResult};

/// Fixed token lifetime, 15 minutes.
pub const TOKEN_TTL_SECONDS: i64 = 15 * 60;

/// Lower bound for the symmetric signing key: 256 bits.
const MIN_KEY_BYTES: usize = 32;

/// Claims embedded in every issued token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User id, stringified.
    pub sub: String,
    /// Username.
    pub name: String,
    /// Issuing service.
    pub iss: String,
    /// Intended audience, same string as the issuer.
    pub aud: String,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: usize,
}

impl Claims {
    pub fn user_id(&self) -> &str {
        &self.sub
    }
}

/// Issues and validates signed identity tokens.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
}

impl TokenIssuer {
    /// Creates a token issuer from validated settings.
    ///
    /// Fails with [`ServiceError::Configuration`] if the key is shorter than
    /// 32 bytes or the issuer is empty/whitespace. Callers must treat this
    /// as fatal at startup.
    pub fn new(settings: &JwtSettings) -> Result<Self, ServiceError> {
        if settings.key.len() < MIN_KEY_BYTES {
            return Err(ServiceError::configuration(
                "JWT key must be at least 256 bits (32 bytes)",
            ));
        }

        if settings.issuer.trim().is_empty() {
            return Err(ServiceError::configuration("JWT issuer must be provided"));
        }

        let encoding_key = EncodingKey::from_secret(settings.key.as_bytes());
        let decoding_key = DecodingKey::from_secret(settings.key.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&settings.issuer]);
        validation.set_audience(&[&settings.issuer]);
        validation.validate_exp = true;

        Ok(TokenIssuer {
            encoding_key,
            decoding_key,
            validation,
            issuer: settings.issuer.clone(),
        })
    }

    /// Issues a signed token for an authenticated user.
    ///
    /// The service keeps no record of issued tokens; the returned string is
    /// owned entirely by the caller.
    pub fn issue(&self, user: &User) -> ServiceResult<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(TOKEN_TTL_SECONDS);

        let claims = Claims {
            sub: user.id.to_string(),
            name: user.username.clone(),
            iss: self.issuer.clone(),
            aud: self.issuer.clone(),
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "token signing failed");
            ServiceError::internal_error("Token generation failed")
        })
    }

    /// Validates a token's signature, expiry, issuer and audience, returning
    /// its claims.
    pub fn validate_token(&self, token: &str) -> ServiceResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|_| ServiceError::AuthenticationFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> JwtSettings {
        JwtSettings {
            key: "0123456789abcdef0123456789abcdef".to_string(),
            issuer: "app".to_string(),
        }
    }

    fn alice() -> User {
        User {
            id: 1,
            username: "alice".to_string(),
            password_hash: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_short_key_rejected_at_construction() {
        let result = TokenIssuer::new(&JwtSettings {
            key: "too-short".to_string(),
            issuer: "app".to_string(),
        });
        assert!(matches!(
            result,
            Err(ServiceError::Configuration { .. })
        ));
    }

    #[test]
    fn test_blank_issuer_rejected_at_construction() {
        let result = TokenIssuer::new(&JwtSettings {
            key: "0123456789abcdef0123456789abcdef".to_string(),
            issuer: "   ".to_string(),
        });
        assert!(matches!(
            result,
            Err(ServiceError::Configuration { .. })
        ));
    }

    #[test]
    fn test_issued_token_has_three_segments() {
        let issuer = TokenIssuer::new(&settings()).unwrap();
        let token = issuer.issue(&alice()).unwrap();
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_issued_claims() {
        let issuer = TokenIssuer::new(&settings()).unwrap();
        let token = issuer.issue(&alice()).unwrap();

        let claims = issuer.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "1");
        assert_eq!(claims.name, "alice");
        assert_eq!(claims.iss, "app");
        assert_eq!(claims.aud, "app");
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECONDS as usize);
    }

    #[test]
    fn test_token_signed_with_other_key_rejected() {
        let issuer = TokenIssuer::new(&settings()).unwrap();
        let other = TokenIssuer::new(&JwtSettings {
            key: "ffffffffffffffffffffffffffffffff".to_string(),
            issuer: "app".to_string(),
        })
        .unwrap();

        let token = other.issue(&alice()).unwrap();
        assert!(matches!(
            issuer.validate_token(&token),
            Err(ServiceError::AuthenticationFailed)
        ));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let issuer = TokenIssuer::new(&settings()).unwrap();
        assert!(issuer.validate_token("not.a.token").is_err());
    }
}
