//! Update user use case

use std::sync::Arc;
use uuid::Uuid;

use crate::application::dto::UserOutput;
use crate::domain::user::UserRepository;
use crate::domain::DomainError;

#[derive(Debug, Clone)]
pub struct UpdateUserInput {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug)]
pub struct UpdateUserUseCase {
    repository: Arc<dyn UserRepository>,
}

impl UpdateUserUseCase {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, input: UpdateUserInput) -> Result<UserOutput, DomainError> {
        if input.name.is_empty() {
            return Err(DomainError::bad_request("Name not provided"));
        }

        let user = self.repository.find_by_id(&input.id).await?;
        let renamed = user.rename(input.name)?;

        self.repository.update(renamed.clone()).await?;

        Ok(renamed.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::Repository;
    use crate::domain::user::testing::user_with_name;
    use crate::infrastructure::user::InMemoryUserRepository;

    #[tokio::test]
    async fn test_renames_and_persists() {
        let user = user_with_name("before");
        let repository = Arc::new(InMemoryUserRepository::with_users(vec![user.clone()]));
        let sut = UpdateUserUseCase::new(repository.clone());

        let output = sut
            .execute(UpdateUserInput {
                id: user.id(),
                name: "after".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(output.name, "after");
        assert_eq!(repository.find_by_id(&user.id()).await.unwrap().name(), "after");
    }

    #[tokio::test]
    async fn test_empty_name_is_bad_request() {
        let user = user_with_name("test");
        let sut = UpdateUserUseCase::new(Arc::new(InMemoryUserRepository::with_users(vec![
            user.clone(),
        ])));

        let err = sut
            .execute(UpdateUserInput {
                id: user.id(),
                name: String::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn test_missing_id_is_not_found() {
        let sut = UpdateUserUseCase::new(Arc::new(InMemoryUserRepository::new()));

        let err = sut
            .execute(UpdateUserInput {
                id: Uuid::new_v4(),
                name: "test".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_overlong_name_is_validation_error() {
        let user = user_with_name("test");
        let sut = UpdateUserUseCase::new(Arc::new(InMemoryUserRepository::with_users(vec![
            user.clone(),
        ])));

        let err = sut
            .execute(UpdateUserInput {
                id: user.id(),
                name: "a".repeat(256),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation { .. }));
    }
}
