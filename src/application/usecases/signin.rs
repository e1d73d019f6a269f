//! Signin use case

use std::sync::Arc;

use crate::application::dto::UserOutput;
use crate::domain::user::UserRepository;
use crate::domain::DomainError;
use crate::infrastructure::user::PasswordHasher;

#[derive(Debug, Clone)]
pub struct SigninInput {
    pub email: String,
    pub password: String,
}

/// Verifies credentials and returns the matching user. Token issuance is a
/// controller concern.
#[derive(Debug)]
pub struct SigninUseCase {
    repository: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl SigninUseCase {
    pub fn new(repository: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { repository, hasher }
    }

    pub async fn execute(&self, input: SigninInput) -> Result<UserOutput, DomainError> {
        if input.email.is_empty() || input.password.is_empty() {
            return Err(DomainError::bad_request("Input data not provided"));
        }

        let user = self.repository.find_by_email(&input.email).await?;

        if !self.hasher.verify(&input.password, user.password()) {
            return Err(DomainError::invalid_credentials("Invalid credentials"));
        }

        Ok(user.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::usecases::signup::{SignupInput, SignupUseCase};
    use crate::infrastructure::user::{Argon2Hasher, InMemoryUserRepository};

    async fn sut_with_user() -> SigninUseCase {
        let repository = Arc::new(InMemoryUserRepository::new());
        let hasher = Arc::new(Argon2Hasher::new());

        SignupUseCase::new(repository.clone(), hasher.clone())
            .execute(SignupInput {
                name: "Test User".to_string(),
                email: "a@a.com".to_string(),
                password: "secret123".to_string(),
            })
            .await
            .unwrap();

        SigninUseCase::new(repository, hasher)
    }

    #[tokio::test]
    async fn test_authenticates_with_valid_credentials() {
        let sut = sut_with_user().await;

        let output = sut
            .execute(SigninInput {
                email: "a@a.com".to_string(),
                password: "secret123".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(output.email, "a@a.com");
    }

    #[tokio::test]
    async fn test_unknown_email_is_not_found() {
        let sut = sut_with_user().await;

        let err = sut
            .execute(SigninInput {
                email: "b@b.com".to_string(),
                password: "secret123".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_wrong_password_is_invalid_credentials() {
        let sut = sut_with_user().await;

        let err = sut
            .execute(SigninInput {
                email: "a@a.com".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::InvalidCredentials { .. }));
    }

    #[tokio::test]
    async fn test_missing_fields_are_bad_request() {
        let sut = sut_with_user().await;

        let err = sut
            .execute(SigninInput {
                email: String::new(),
                password: "secret123".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::BadRequest { .. }));

        let err = sut
            .execute(SigninInput {
                email: "a@a.com".to_string(),
                password: String::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::BadRequest { .. }));
    }
}
