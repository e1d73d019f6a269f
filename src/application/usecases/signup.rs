//! Signup use case

use std::sync::Arc;

use crate::application::dto::UserOutput;
use crate::domain::user::{User, UserProps, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::user::PasswordHasher;

#[derive(Debug, Clone)]
pub struct SignupInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Creates a user account. The email existence check runs before the insert;
/// the two calls are separate round trips, so a concurrent signup with the
/// same email can slip between them (backstopped by the storage layer's
/// unique index).
#[derive(Debug)]
pub struct SignupUseCase {
    repository: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl SignupUseCase {
    pub fn new(repository: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { repository, hasher }
    }

    pub async fn execute(&self, input: SignupInput) -> Result<UserOutput, DomainError> {
        if input.name.is_empty() || input.email.is_empty() || input.password.is_empty() {
            return Err(DomainError::bad_request("Input data not provided"));
        }

        self.repository.email_exists(&input.email).await?;

        let hash = self.hasher.hash(&input.password)?;

        let user = User::new(UserProps {
            name: input.name,
            email: input.email,
            password: hash,
            created_at: None,
        })?;

        self.repository.insert(user.clone()).await?;

        Ok(user.into())
    }
}
