use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::auth::password::{self, PasswordError};
use crate::auth::token::TokenCodec;
use crate::store::StoreError;

/// A principal as the credential verifier sees it: read-only, provisioned
/// elsewhere. The login key is the stored email.
#[derive(Debug, Clone)]
pub struct Identity {
    pub name: String,
    pub email: String,
    pub role: String,
    pub secret_hash: String,
}

/// Identity lookup boundary. Backed by the employees table in production;
/// tests substitute an in-memory map.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn find_by_login_key(&self, login_key: &str) -> Result<Option<Identity>, StoreError>;
}

#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown login key and wrong secret collapse into this one error.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("token issuance failed")]
    TokenIssuance,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Successful login payload.
#[derive(Debug)]
pub struct Login {
    pub token: String,
    pub role: String,
    pub expires_in: String,
}

/// Validates login credentials and mints bearer tokens.
///
/// Stateless apart from the injected collaborators; safe to share across
/// requests.
pub struct CredentialVerifier {
    identities: Arc<dyn IdentityStore>,
    codec: Arc<TokenCodec>,
    decoy_hash: String,
}

impl CredentialVerifier {
    pub fn new(
        identities: Arc<dyn IdentityStore>,
        codec: Arc<TokenCodec>,
    ) -> Result<Self, PasswordError> {
        // Verified against whenever the login key does not resolve, so the
        // unknown-key path costs the same as a real verification.
        let decoy_hash = password::hash("fleettrack-decoy-credential")?;

        Ok(Self {
            identities,
            codec,
            decoy_hash,
        })
    }

    /// Exact-match lookup by login key, then hash verification. The secret
    /// is never logged and never echoed back.
    pub async fn authenticate(&self, login_key: &str, secret: &str) -> Result<Login, AuthError> {
        let identity = match self.identities.find_by_login_key(login_key).await? {
            Some(identity) => identity,
            None => {
                let _ = password::verify(secret, &self.decoy_hash);
                return Err(AuthError::InvalidCredentials);
            }
        };

        if !password::verify(secret, &identity.secret_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        let issued = self
            .codec
            .issue(&identity.name, &identity.email, &identity.role)
            .map_err(|_| AuthError::TokenIssuance)?;

        Ok(Login {
            token: issued.token,
            role: identity.role,
            expires_in: self.codec.ttl_label(),
        })
    }
}
