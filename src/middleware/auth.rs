use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::token::Claims;
use crate::error::ApiError;
use crate::middleware::policy::RouteSensitivity;
use crate::state::AppState;

/// Authenticated caller context, injected into request extensions by the
/// access gate once a token verifies.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            name: claims.name,
            email: claims.email,
            role: claims.role,
        }
    }
}

/// Per-request access gate.
///
/// Looks up the route's declared sensitivity and either passes the request
/// through (public), or requires a verifiable bearer token (protected).
/// The two rejection causes - missing and invalid - are logged separately
/// but produce the same response body.
pub async fn access_gate(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let sensitivity = state
        .policy
        .sensitivity_for(request.method(), request.uri().path());
    let token = bearer_token(request.headers());

    match sensitivity {
        RouteSensitivity::Public => {
            // A valid token still surfaces claims to public handlers, but
            // absence (or garbage) is not an error here.
            if let Some(token) = token {
                if let Ok(claims) = state.codec.decode(&token) {
                    request.extensions_mut().insert(CurrentUser::from(claims));
                }
            }
            Ok(next.run(request).await)
        }
        RouteSensitivity::Protected => {
            let token = token.ok_or_else(|| {
                tracing::debug!(path = %request.uri().path(), "rejected: missing bearer token");
                ApiError::Unauthorized
            })?;

            let claims = state
                .codec
                .decode(&token)
                .map_err(|_| ApiError::Unauthorized)?;

            let user = CurrentUser::from(claims);
            tracing::debug!(user = %user.name, role = %user.role, "request authenticated");
            request.extensions_mut().insert(user);
            Ok(next.run(request).await)
        }
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi".to_string()));
    }

    #[test]
    fn rejects_missing_header_and_other_schemes() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
        assert_eq!(bearer_token(&headers_with("Basic dXNlcjpwdw==")), None);
        assert_eq!(bearer_token(&headers_with("abc.def.ghi")), None);
    }

    #[test]
    fn rejects_empty_bearer_value() {
        assert_eq!(bearer_token(&headers_with("Bearer ")), None);
        assert_eq!(bearer_token(&headers_with("Bearer    ")), None);
    }
}
