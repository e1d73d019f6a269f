use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::health;
use super::state::AppState;
use super::users;

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        // Public endpoints
        .route("/users", post(users::signup))
        .route("/users/login", post(users::login))
        // Authenticated endpoints
        .route("/users", get(users::list_users))
        .route("/users/{id}", get(users::get_user))
        .route("/users/{id}", put(users::update_user))
        .route("/users/{id}", delete(users::delete_user))
        .route("/users/{id}/password", patch(users::update_password))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::infrastructure::auth::{JwtConfig, JwtService};
    use crate::infrastructure::user::{Argon2Hasher, InMemoryUserRepository};

    #[test]
    fn test_router_builds() {
        let state = AppState::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(Argon2Hasher::new()),
            Arc::new(JwtService::new(JwtConfig::default())),
        );

        let _router = create_router_with_state(state);
    }
}
