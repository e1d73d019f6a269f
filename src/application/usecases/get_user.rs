//! Get user use case

use std::sync::Arc;
use uuid::Uuid;

use crate::application::dto::UserOutput;
use crate::domain::user::UserRepository;
use crate::domain::DomainError;

#[derive(Debug)]
pub struct GetUserUseCase {
    repository: Arc<dyn UserRepository>,
}

impl GetUserUseCase {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, id: Uuid) -> Result<UserOutput, DomainError> {
        let user = self.repository.find_by_id(&id).await?;
        Ok(user.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::testing::user_with_name;
    use crate::infrastructure::user::InMemoryUserRepository;

    #[tokio::test]
    async fn test_returns_stored_user() {
        let user = user_with_name("test");
        let repository = Arc::new(InMemoryUserRepository::with_users(vec![user.clone()]));
        let sut = GetUserUseCase::new(repository);

        let output = sut.execute(user.id()).await.unwrap();

        assert_eq!(output.id, user.id());
        assert_eq!(output.name, "test");
    }

    #[tokio::test]
    async fn test_missing_id_is_not_found() {
        let sut = GetUserUseCase::new(Arc::new(InMemoryUserRepository::new()));

        let err = sut.execute(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
