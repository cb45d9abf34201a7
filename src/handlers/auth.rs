use axum::{extract::State, http::Method, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::middleware::policy::{RoutePolicy, RouteSensitivity};
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub login_key: String,
    pub secret: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub role: String,
    pub expires_in: String,
}

pub fn router() -> Router<SharedState> {
    Router::new().route("/api/v1/auth/login", post(login))
}

pub fn policy(policy: RoutePolicy) -> RoutePolicy {
    // Token acquisition is the one public write
    policy.route(Method::POST, "/api/v1/auth/login", RouteSensitivity::Public)
}

/// POST /api/v1/auth/login - exchange credentials for a bearer token.
///
/// Wrong secret and unknown login key produce the same response; see
/// [`crate::auth::verifier::CredentialVerifier`].
async fn login(
    State(state): State<SharedState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let login = state
        .verifier
        .authenticate(&body.login_key, &body.secret)
        .await?;

    Ok(Json(LoginResponse {
        token: login.token,
        role: login.role,
        expires_in: login.expires_in,
    }))
}
