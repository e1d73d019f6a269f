//! List users use case

use std::sync::Arc;

use crate::application::dto::ListUsersOutput;
use crate::domain::repository::{SearchInput, SearchParams};
use crate::domain::user::UserRepository;
use crate::domain::DomainError;

/// Translates an external search request into normalized `SearchParams` and
/// delegates to the repository's search pipeline.
#[derive(Debug)]
pub struct ListUsersUseCase {
    repository: Arc<dyn UserRepository>,
}

impl ListUsersUseCase {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, input: SearchInput) -> Result<ListUsersOutput, DomainError> {
        let params = SearchParams::from_input(input);
        let result = self.repository.search(params).await?;
        Ok(result.into())
    }
}
