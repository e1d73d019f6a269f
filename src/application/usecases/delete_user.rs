//! Delete user use case

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::user::UserRepository;
use crate::domain::DomainError;

#[derive(Debug)]
pub struct DeleteUserUseCase {
    repository: Arc<dyn UserRepository>,
}

impl DeleteUserUseCase {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, id: Uuid) -> Result<(), DomainError> {
        self.repository.delete(&id).await
    }
}
