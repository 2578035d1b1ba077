//! # Health Check Handler
//!
//! Liveness endpoint for load balancers and deployment tooling.

use axum::http::StatusCode;
use tracing::{debug, instrument};

/// Health check endpoint that returns 200 OK with an empty body.
///
/// GET /health-check
///
/// Only proves the process is serving HTTP; neither the database nor DNS
/// is touched.
#[instrument]
pub async fn health_check() -> StatusCode {
    debug!("Health check endpoint accessed");
    StatusCode::OK
}
