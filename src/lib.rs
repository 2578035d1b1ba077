//! # Matchmaker - User Records & Interest Matching
//!
//! ## Modules
//!
//! - [`handlers`] - HTTP request handlers for the user endpoints
//! - [`models`] - User records, request payloads and shared state
//! - [`services`] - Business logic (email validation, matching, user CRUD)
//! - [`store`] - Data-access interface and its PostgreSQL implementation
//! - [`utils`] - Constants and validators

pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod store;
pub mod utils;

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_user, delete_user, find_matches, get_user, health_check, list_users, populate_users,
    update_user, validate_email,
};
use crate::models::AppState;
use crate::services::email::{DnsMxResolver, EmailChecker, MxResolver};
use crate::services::user::UserService;
use crate::store::{PgUserStore, UserStore};

/// Creates an Axum router backed by PostgreSQL and the system DNS resolver.
///
/// This is a convenience function that calls [`app_with_services`] with a
/// [`PgUserStore`] over `db_pool` and a [`DnsMxResolver`].
#[inline]
pub fn app(db_pool: PgPool) -> Router {
    app_with_services(
        Arc::new(PgUserStore::new(db_pool)),
        Arc::new(DnsMxResolver::new()),
    )
}

/// Creates an Axum router with application routes and state.
///
/// # Arguments
///
/// * `store` - Persistence for user records
/// * `mx_resolver` - DNS lookup used by email validation
///
/// # Returns
///
/// A configured Axum router with all application routes and request tracing
pub fn app_with_services(store: Arc<dyn UserStore>, mx_resolver: Arc<dyn MxResolver>) -> Router {
    let user_service = UserService::new(store, EmailChecker::new(mx_resolver));
    let state = Arc::new(AppState::new(user_service));

    let user_routes = Router::new()
        .route("/users/", post(create_user).get(list_users))
        .route("/users/{user_id}", get(get_user))
        .route("/users/update/{user_id}", put(update_user))
        .route("/users/delete/{user_id}", delete(delete_user))
        .route("/users/matches/{user_id}", get(find_matches))
        .route("/users/populate/", post(populate_users))
        .route("/users/validate-email/", post(validate_email));

    Router::new()
        .route("/health-check", get(health_check))
        .merge(user_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
