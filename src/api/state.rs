//! Application state for shared services

use std::sync::Arc;

use crate::domain::user::UserRepository;
use crate::infrastructure::auth::JwtService;
use crate::infrastructure::user::PasswordHasher;

/// Application state shared by every handler, using dynamic dispatch so the
/// in-memory and Postgres repositories are interchangeable.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub jwt_service: Arc<JwtService>,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            users,
            hasher,
            jwt_service,
        }
    }
}
