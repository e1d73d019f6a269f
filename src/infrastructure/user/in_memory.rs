//! In-memory user repository
//!
//! Array-backed reference implementation of the repository contracts. It is
//! the behavioral oracle for the Postgres implementation and the test double
//! for the use cases. Not meant for production traffic: a single `RwLock`
//! around a `Vec` gives last-writer-wins semantics on concurrent updates.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::repository::{
    Repository, SearchParams, SearchResult, SearchableRepository, SortDirection,
};
use crate::domain::user::{User, UserRepository, UserSortField};
use crate::domain::DomainError;

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    items: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            items: RwLock::new(users),
        }
    }

    fn apply_filter(items: Vec<User>, filter: Option<&str>) -> Vec<User> {
        match filter {
            None => items,
            Some(filter) => {
                let needle = filter.to_lowercase();
                items
                    .into_iter()
                    .filter(|user| user.name().to_lowercase().contains(&needle))
                    .collect()
            }
        }
    }

    fn apply_sort(
        mut items: Vec<User>,
        sort: Option<&str>,
        sort_dir: Option<SortDirection>,
    ) -> Vec<User> {
        // Sort fields outside the allow-list fall back to newest-first.
        let (field, dir) = match sort.and_then(UserSortField::from_name) {
            Some(field) => (field, sort_dir.unwrap_or(SortDirection::Desc)),
            None => (UserSortField::CreatedAt, SortDirection::Desc),
        };

        items.sort_by(|a, b| {
            let ordering = field.compare(a, b);
            match dir {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        items
    }

    fn apply_pagination(items: Vec<User>, params: &SearchParams) -> Vec<User> {
        items
            .into_iter()
            .skip(params.offset() as usize)
            .take(params.per_page() as usize)
            .collect()
    }
}

#[async_trait]
impl Repository<User> for InMemoryUserRepository {
    async fn insert(&self, entity: User) -> Result<(), DomainError> {
        self.items.write().await.push(entity);
        Ok(())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<User, DomainError> {
        self.items
            .read()
            .await
            .iter()
            .find(|user| user.id() == *id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("User with id {} not found", id)))
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.items.read().await.clone())
    }

    async fn update(&self, entity: User) -> Result<(), DomainError> {
        let mut items = self.items.write().await;

        let index = items
            .iter()
            .position(|user| user.id() == entity.id())
            .ok_or_else(|| {
                DomainError::not_found(format!("User with id {} not found", entity.id()))
            })?;

        items[index] = entity;
        Ok(())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        let mut items = self.items.write().await;

        let index = items
            .iter()
            .position(|user| user.id() == *id)
            .ok_or_else(|| DomainError::not_found(format!("User with id {} not found", id)))?;

        items.remove(index);
        Ok(())
    }
}

#[async_trait]
impl SearchableRepository<User> for InMemoryUserRepository {
    /// Fixed pipeline: filter, then sort, then paginate. `total` is the
    /// filtered count before pagination.
    async fn search(&self, params: SearchParams) -> Result<SearchResult<User>, DomainError> {
        let items = self.items.read().await.clone();

        let filtered = Self::apply_filter(items, params.filter());
        let total = filtered.len() as u64;

        let sorted = Self::apply_sort(filtered, params.sort(), params.sort_dir());
        let page = Self::apply_pagination(sorted, &params);

        Ok(SearchResult::new(page, total, &params))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<User, DomainError> {
        self.items
            .read()
            .await
            .iter()
            .find(|user| user.email() == email)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("User with email {} not found", email)))
    }

    async fn email_exists(&self, email: &str) -> Result<(), DomainError> {
        let taken = self
            .items
            .read()
            .await
            .iter()
            .any(|user| user.email() == email);

        if taken {
            return Err(DomainError::conflict("Email address already used"));
        }

        Ok(())
    }
}
