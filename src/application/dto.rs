//! Use case output shapes

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::repository::{SearchResult, SortDirection};
use crate::domain::user::User;

/// Entity-shaped use case output. Still carries the password hash: redaction
/// happens in the presentation layer, not here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserOutput {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserOutput {
    fn from(user: User) -> Self {
        Self {
            id: user.id(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            password: user.password().to_string(),
            created_at: user.created_at(),
        }
    }
}

impl From<&User> for UserOutput {
    fn from(user: &User) -> Self {
        user.clone().into()
    }
}

/// Paginated listing output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListUsersOutput {
    pub items: Vec<UserOutput>,
    pub total: u64,
    pub current_page: u64,
    pub per_page: u64,
    pub last_page: u64,
    pub sort: Option<String>,
    pub sort_dir: Option<SortDirection>,
    pub filter: Option<String>,
}

impl From<SearchResult<User>> for ListUsersOutput {
    fn from(result: SearchResult<User>) -> Self {
        Self {
            total: result.total(),
            current_page: result.current_page(),
            per_page: result.per_page(),
            last_page: result.last_page(),
            sort: result.sort().map(String::from),
            sort_dir: result.sort_dir(),
            filter: result.filter().map(String::from),
            items: result.into_items().into_iter().map(Into::into).collect(),
        }
    }
}
