//! User repository contract and sort dispatch

use async_trait::async_trait;
use std::cmp::Ordering;

use super::entity::User;
use crate::domain::repository::SearchableRepository;
use crate::domain::DomainError;

/// Repository contract for user storage. Email uniqueness lives here, not on
/// the entity: `email_exists` is the pre-insert existence check used by
/// signup.
#[async_trait]
pub trait UserRepository: SearchableRepository<User> {
    /// Look up a user by email. Fails with `NotFound` on a miss.
    async fn find_by_email(&self, email: &str) -> Result<User, DomainError>;

    /// Fails with `Conflict` when the email is already taken.
    async fn email_exists(&self, email: &str) -> Result<(), DomainError>;
}

/// Sortable fields for user search, selected by name from the allow-list.
/// Each variant carries its own comparator, so ordering never relies on
/// dynamic property access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserSortField {
    Name,
    Email,
    CreatedAt,
}

impl UserSortField {
    pub const SORTABLE_FIELDS: &'static [&'static str] = &["name", "email", "created_at"];

    /// Resolve a requested sort field; `None` for anything outside the
    /// allow-list.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "name" => Some(Self::Name),
            "email" => Some(Self::Email),
            "created_at" => Some(Self::CreatedAt),
            _ => None,
        }
    }

    /// Column name for SQL ordering. Safe to splice into a query because the
    /// set is closed.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::CreatedAt => "created_at",
        }
    }

    /// Ascending comparison between two users on this field.
    pub fn compare(&self, a: &User, b: &User) -> Ordering {
        match self {
            Self::Name => compare_text(a.name(), b.name()),
            Self::Email => compare_text(a.email(), b.email()),
            Self::CreatedAt => a.created_at().cmp(&b.created_at()),
        }
    }
}

/// Case-insensitive text ordering with lowercase sorting before uppercase on
/// ties, matching the collation the database uses for text columns.
fn compare_text(a: &str, b: &str) -> Ordering {
    let key = |s: &str| {
        s.chars()
            .map(|c| (c.to_ascii_lowercase(), c.is_ascii_uppercase()))
            .collect::<Vec<_>>()
    };

    key(a).cmp(&key(b))
}
