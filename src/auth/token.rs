use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SecurityConfig;

/// Identity attributes carried inside a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub name: String,
    pub email: String,
    pub role: String,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

/// Uniform rejection for every way a token can fail verification.
///
/// Expired, tampered, wrong-issuer and wrong-audience tokens are all
/// reported identically; the distinction only exists in debug logs.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid token")]
pub struct TokenError;

pub struct IssuedToken {
    pub token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Stateless HS256 token codec.
///
/// Holds the process-wide signing key and validation rules; constructed
/// once at startup from [`SecurityConfig`] and shared read-only. Expiry is
/// checked strictly (zero leeway) - there is no clock-skew grace window.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
    ttl: Duration,
}

impl TokenCodec {
    pub fn new(security: &SecurityConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&security.jwt_issuer]);
        validation.set_audience(&[&security.jwt_audience]);
        // Strict expiry check; tokens are valid for iat..exp exactly.
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(security.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(security.jwt_secret.as_bytes()),
            validation,
            issuer: security.jwt_issuer.clone(),
            audience: security.jwt_audience.clone(),
            ttl: Duration::hours(security.token_ttl_hours),
        }
    }

    /// Mint a token for a verified identity. Expiry is issuance time plus
    /// the configured window.
    pub fn issue(&self, name: &str, email: &str, role: &str) -> Result<IssuedToken, TokenError> {
        let issued_at = Utc::now();
        let expires_at = issued_at + self.ttl;

        let claims = Claims {
            name: name.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        Ok(IssuedToken {
            token: self.sign(&claims)?,
            issued_at,
            expires_at,
        })
    }

    /// Verify signature, issuer, audience and expiry, returning the claims.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                // The sub-cause stays server-side; clients see one error.
                tracing::debug!("token rejected: {}", e);
                TokenError
            })
    }

    /// Human-readable validity window, e.g. "2h".
    pub fn ttl_label(&self) -> String {
        format!("{}h", self.ttl.num_hours())
    }

    pub(crate) fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::default(), claims, &self.encoding_key).map_err(|e| {
            tracing::error!("token signing failed: {}", e);
            TokenError
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn security() -> SecurityConfig {
        SecurityConfig {
            jwt_secret: "unit-test-secret".to_string(),
            jwt_issuer: "fleettrack".to_string(),
            jwt_audience: "fleettrack-clients".to_string(),
            token_ttl_hours: 2,
        }
    }

    fn claims_at(codec: &TokenCodec, issued_at: i64, expires_at: i64) -> Claims {
        Claims {
            name: "Ana Souza".to_string(),
            email: "ana@example.com".to_string(),
            role: "Admin".to_string(),
            iss: codec.issuer.clone(),
            aud: codec.audience.clone(),
            iat: issued_at,
            exp: expires_at,
        }
    }

    #[test]
    fn round_trips_claims_while_unexpired() {
        let codec = TokenCodec::new(&security());
        let issued = codec.issue("Ana Souza", "ana@example.com", "Admin").unwrap();

        let claims = codec.decode(&issued.token).unwrap();
        assert_eq!(claims.name, "Ana Souza");
        assert_eq!(claims.email, "ana@example.com");
        assert_eq!(claims.role, "Admin");
    }

    #[test]
    fn expiry_is_issuance_plus_window() {
        let codec = TokenCodec::new(&security());
        let issued = codec.issue("Ana Souza", "ana@example.com", "Admin").unwrap();

        assert_eq!(issued.expires_at - issued.issued_at, Duration::hours(2));
        let claims = codec.decode(&issued.token).unwrap();
        assert_eq!(claims.exp - claims.iat, 2 * 3600);
    }

    #[test]
    fn rejects_expired_token() {
        let codec = TokenCodec::new(&security());
        let now = Utc::now().timestamp();
        let expired = claims_at(&codec, now - 7200, now - 60);
        let token = codec.sign(&expired).unwrap();

        assert_eq!(codec.decode(&token), Err(TokenError));
    }

    #[test]
    fn rejects_token_signed_with_other_key() {
        let codec = TokenCodec::new(&security());
        let other = TokenCodec::new(&SecurityConfig {
            jwt_secret: "a-different-secret".to_string(),
            ..security()
        });

        let issued = other.issue("Ana Souza", "ana@example.com", "Admin").unwrap();
        assert_eq!(codec.decode(&issued.token), Err(TokenError));
    }

    #[test]
    fn rejects_wrong_audience_and_issuer() {
        let codec = TokenCodec::new(&security());
        let now = Utc::now().timestamp();

        let mut foreign_aud = claims_at(&codec, now, now + 3600);
        foreign_aud.aud = "someone-else".to_string();
        let token = codec.sign(&foreign_aud).unwrap();
        assert_eq!(codec.decode(&token), Err(TokenError));

        let mut foreign_iss = claims_at(&codec, now, now + 3600);
        foreign_iss.iss = "someone-else".to_string();
        let token = codec.sign(&foreign_iss).unwrap();
        assert_eq!(codec.decode(&token), Err(TokenError));
    }

    #[test]
    fn rejects_garbage() {
        let codec = TokenCodec::new(&security());
        assert_eq!(codec.decode("not-a-token"), Err(TokenError));
        assert_eq!(codec.decode(""), Err(TokenError));
    }
}
