//! Application state shared across handlers

use std::sync::Arc;

use axum::extract::FromRef;

use crate::services::UserService;
use crate::store::UserStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
}

impl AppState {
    pub fn new(user_service: Arc<UserService>) -> Self {
        Self { user_service }
    }

    /// Wire a user service over the given store
    pub fn from_store(store: Arc<dyn UserStore>) -> Self {
        Self::new(Arc::new(UserService::new(store)))
    }
}

impl FromRef<AppState> for Arc<UserService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.user_service.clone()
    }
}
