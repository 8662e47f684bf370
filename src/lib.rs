//! Foods API Library
//!
//! CRUD access to the `foods` and `customer` tables over HTTP, with a
//! generated OpenAPI document and Swagger UI.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod health;
pub mod middleware_helpers;
pub mod models;
pub mod openapi;
pub mod services;
pub mod tracing;

use axum::{extract::DefaultBodyLimit, Router};
use crate::config::{AppConfig, AppConfigError};
use http::HeaderValue;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<db::DbPool>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(db: db::DbPool, config: AppConfig) -> Self {
        Self {
            db: Arc::new(db),
            config,
        }
    }
}

/// Food and customer routes, without middleware
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(handlers::foods::food_routes())
        .merge(handlers::customers::customer_routes())
}

/// CORS layer: the configured origins, or permissive when none are set and
/// the configuration allows it
pub fn cors_layer(cfg: &AppConfig) -> Result<CorsLayer, AppConfigError> {
    let origins = cfg
        .cors_origins()
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|_| AppConfigError::Cors(format!("invalid CORS origin {origin:?}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if !origins.is_empty() {
        Ok(CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any))
    } else if cfg.should_allow_permissive_cors() {
        ::tracing::info!(
            "Using permissive CORS because explicit origins were not configured ({})",
            if cfg.is_development() {
                "development environment"
            } else {
                "explicit override enabled"
            }
        );
        Ok(CorsLayer::permissive())
    } else {
        ::tracing::error!("Missing CORS configuration detected; set APP__CORS_ALLOWED_ORIGINS or APP__CORS_ALLOW_ANY_ORIGIN=true");
        Err(AppConfigError::Cors(
            "set APP__CORS_ALLOWED_ORIGINS or APP__CORS_ALLOW_ANY_ORIGIN=true".to_string(),
        ))
    }
}

/// The complete application: API routes, health checks, Swagger UI, the JSON
/// 405 and 404 fallbacks and the middleware stack.
pub fn build_router(state: AppState) -> Result<Router, AppConfigError> {
    let cors = cors_layer(&state.config)?;

    let app = Router::<AppState>::new()
        .merge(api_routes())
        .merge(health::health_routes())
        .merge(openapi::swagger_ui(&state.config))
        .method_not_allowed_fallback(handlers::common::method_not_allowed)
        .fallback(handlers::common::not_found)
        .layer(DefaultBodyLimit::max(state.config.max_body_size))
        // HTTP tracing layer for consistent request/response telemetry
        .layer(crate::tracing::configure_http_tracing())
        .layer(cors)
        // Ensure every request carries a request id for traceability
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id::request_id_middleware,
        ))
        .with_state(state);

    Ok(app)
}
