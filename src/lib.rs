//! Accounts API
//!
//! A user management and authentication service with:
//! - Signup / signin with JWT access tokens
//! - Password updates and user CRUD
//! - Paginated, sortable, filterable user listing
//! - Interchangeable in-memory and Postgres storage

pub mod api;
pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing::info;

use api::state::AppState;
use infrastructure::auth::{JwtConfig, JwtService};
use infrastructure::user::{Argon2Hasher, InMemoryUserRepository, PostgresUserRepository};

/// Build the application state from configuration.
///
/// Connects to Postgres and runs pending migrations when a database URL is
/// configured; otherwise serves from the in-memory store.
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let jwt_service = Arc::new(JwtService::new(JwtConfig::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
    )));
    let hasher = Arc::new(Argon2Hasher::new());

    if config.database.url.is_empty() {
        info!("No database configured, using in-memory storage");

        return Ok(AppState::new(
            Arc::new(InMemoryUserRepository::new()),
            hasher,
            jwt_service,
        ));
    }

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    info!("Connected to Postgres");

    Ok(AppState::new(
        Arc::new(PostgresUserRepository::new(pool)),
        hasher,
        jwt_service,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_app_state_without_database() {
        let config = AppConfig::default();

        let state = create_app_state(&config).await.unwrap();
        assert!(state.users.find_all().await.unwrap().is_empty());
    }
}
