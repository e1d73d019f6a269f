//! Update password use case

use std::sync::Arc;
use uuid::Uuid;

use crate::application::dto::UserOutput;
use crate::domain::user::UserRepository;
use crate::domain::DomainError;
use crate::infrastructure::user::PasswordHasher;

#[derive(Debug, Clone)]
pub struct UpdatePasswordInput {
    pub id: Uuid,
    pub old_password: String,
    pub new_password: String,
}

/// Verifies the old password before re-hashing and persisting the new one.
/// Empty passwords are rejected before the lookup, so the failure is the
/// same whether or not the id exists.
#[derive(Debug)]
pub struct UpdatePasswordUseCase {
    repository: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UpdatePasswordUseCase {
    pub fn new(repository: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { repository, hasher }
    }

    pub async fn execute(&self, input: UpdatePasswordInput) -> Result<UserOutput, DomainError> {
        if input.old_password.is_empty() || input.new_password.is_empty() {
            return Err(DomainError::invalid_password(
                "Password and old password are required",
            ));
        }

        let user = self.repository.find_by_id(&input.id).await?;

        if !self.hasher.verify(&input.old_password, user.password()) {
            return Err(DomainError::invalid_password("Old password does not match"));
        }

        let hash = self.hasher.hash(&input.new_password)?;
        let updated = user.change_password(hash)?;

        self.repository.update(updated.clone()).await?;

        Ok(updated.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::usecases::signup::{SignupInput, SignupUseCase};
    use crate::domain::repository::Repository;
    use crate::infrastructure::user::{Argon2Hasher, InMemoryUserRepository};

    struct Fixture {
        sut: UpdatePasswordUseCase,
        repository: Arc<InMemoryUserRepository>,
        user_id: Uuid,
    }

    async fn fixture() -> Fixture {
        let repository = Arc::new(InMemoryUserRepository::new());
        let hasher = Arc::new(Argon2Hasher::new());

        let output = SignupUseCase::new(repository.clone(), hasher.clone())
            .execute(SignupInput {
                name: "Test User".to_string(),
                email: "a@a.com".to_string(),
                password: "old_password".to_string(),
            })
            .await
            .unwrap();

        Fixture {
            sut: UpdatePasswordUseCase::new(repository.clone(), hasher),
            repository,
            user_id: output.id,
        }
    }

    #[tokio::test]
    async fn test_rehashes_and_persists() {
        let f = fixture().await;
        let hasher = Argon2Hasher::new();

        f.sut
            .execute(UpdatePasswordInput {
                id: f.user_id,
                old_password: "old_password".to_string(),
                new_password: "new_password".to_string(),
            })
            .await
            .unwrap();

        let stored = f.repository.find_by_id(&f.user_id).await.unwrap();
        assert!(hasher.verify("new_password", stored.password()));
        assert!(!hasher.verify("old_password", stored.password()));
    }

    #[tokio::test]
    async fn test_empty_old_password_fails_even_for_missing_id() {
        let f = fixture().await;

        // existing id
        let err = f
            .sut
            .execute(UpdatePasswordInput {
                id: f.user_id,
                old_password: String::new(),
                new_password: "new_password".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidPassword { .. }));

        // missing id: same failure, checked before the lookup
        let err = f
            .sut
            .execute(UpdatePasswordInput {
                id: Uuid::new_v4(),
                old_password: String::new(),
                new_password: "new_password".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidPassword { .. }));
    }

    #[tokio::test]
    async fn test_empty_new_password_fails() {
        let f = fixture().await;

        let err = f
            .sut
            .execute(UpdatePasswordInput {
                id: f.user_id,
                old_password: "old_password".to_string(),
                new_password: String::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::InvalidPassword { .. }));
    }

    #[tokio::test]
    async fn test_wrong_old_password_fails() {
        let f = fixture().await;

        let err = f
            .sut
            .execute(UpdatePasswordInput {
                id: f.user_id,
                old_password: "wrong".to_string(),
                new_password: "new_password".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::InvalidPassword { .. }));
        assert_eq!(
            err.to_string(),
            "Invalid password: Old password does not match"
        );
    }

    #[tokio::test]
    async fn test_missing_id_is_not_found() {
        let f = fixture().await;

        let err = f
            .sut
            .execute(UpdatePasswordInput {
                id: Uuid::new_v4(),
                old_password: "old_password".to_string(),
                new_password: "new_password".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
