use tracing::info;

use crate::services::user::UserService;

/// Application state shared across requests. Needs to be thread-safe.
pub struct AppState {
    /// CRUD and matching operations over the user store.
    pub user_service: UserService,
}

impl AppState {
    /// Creates a new application state around the given user service.
    pub fn new(user_service: UserService) -> Self {
        info!("Initializing application state");
        Self { user_service }
    }
}
