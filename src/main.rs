use std::sync::Arc;

use axum::{extract::State, http::Method, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod auth;
mod config;
mod error;
mod handlers;
mod hateoas;
mod listing;
mod middleware;
mod state;
mod store;

use crate::auth::token::TokenCodec;
use crate::auth::verifier::CredentialVerifier;
use crate::config::AppConfig;
use crate::middleware::policy::{RoutePolicy, RouteSensitivity};
use crate::state::{AppState, SharedState};
use crate::store::entities::employee::PgIdentityStore;
use crate::store::Db;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Signing configuration is load-bearing; refuse to start without it.
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("startup aborted: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("starting fleettrack-api in {:?} mode", config.environment);

    let db = Db::new(config.database.max_connections);
    let codec = Arc::new(TokenCodec::new(&config.security));

    let identities = Arc::new(PgIdentityStore::new(db.clone()));
    let verifier = match CredentialVerifier::new(identities, codec.clone()) {
        Ok(verifier) => verifier,
        Err(e) => {
            tracing::error!("startup aborted: {}", e);
            std::process::exit(1);
        }
    };

    let port = config.server.port;
    let state: SharedState = Arc::new(AppState {
        policy: route_policy(),
        codec,
        verifier,
        db,
        config,
    });

    let app = app(state);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("fleettrack-api listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app(state: SharedState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(handlers::auth::router())
        .merge(handlers::motorcycles::router())
        .merge(handlers::employees::router())
        .merge(handlers::yards::router())
        .merge(handlers::cameras::router())
        .merge(handlers::aruco_tags::router())
        .merge(handlers::locations::router())
        .merge(handlers::status_records::router())
        // The gate sees every request before route dispatch; undeclared
        // paths therefore reject without a token instead of reporting 404.
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::access_gate,
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Every route this server exposes, classified. The access gate treats
/// anything missing from this table as protected.
fn route_policy() -> RoutePolicy {
    let policy = RoutePolicy::new()
        .route(Method::GET, "/", RouteSensitivity::Public)
        .route(Method::GET, "/health", RouteSensitivity::Public);

    let policy = handlers::auth::policy(policy);
    let policy = handlers::motorcycles::policy(policy);
    let policy = handlers::employees::policy(policy);
    let policy = handlers::yards::policy(policy);
    let policy = handlers::cameras::policy(policy);
    let policy = handlers::aruco_tags::policy(policy);
    let policy = handlers::locations::policy(policy);
    handlers::status_records::policy(policy)
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "FleetTrack API",
        "version": version,
        "description": "Fleet tracking backend - motorcycles, yards, cameras and tag telemetry",
        "endpoints": {
            "home": "/ (public)",
            "health": "/health (public)",
            "auth": "/api/v1/auth/login (public - token acquisition)",
            "motorcycles": "/api/v1/motorcycles[/:id] (public read, protected write)",
            "employees": "/api/v1/employees[/:id] (public read, protected write)",
            "yards": "/api/v1/yards[/:id] (public read, protected write)",
            "cameras": "/api/v1/cameras[/:id] (public read, protected write)",
            "aruco_tags": "/api/v1/aruco-tags[/:id] (public read, protected write)",
            "locations": "/api/v1/locations[/:id] (public read, protected write)",
            "status_records": "/api/v1/status-records[/:id] (public read, protected write)",
        }
    }))
}

async fn health(State(state): State<SharedState>) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match state.db.health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::warn!("health check failed: {}", e);
            (
                axum::http::StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}
