use std::sync::Arc;

use crate::auth::token::TokenCodec;
use crate::auth::verifier::CredentialVerifier;
use crate::config::AppConfig;
use crate::middleware::policy::RoutePolicy;
use crate::store::Db;

/// Application state assembled once at startup: immutable configuration
/// plus the stateless components every request shares.
pub struct AppState {
    pub config: AppConfig,
    pub codec: Arc<TokenCodec>,
    pub verifier: CredentialVerifier,
    pub policy: RoutePolicy,
    pub db: Db,
}

pub type SharedState = Arc<AppState>;
