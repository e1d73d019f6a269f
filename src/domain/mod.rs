//! Domain layer - Core business logic and entities

pub mod error;
pub mod repository;
pub mod user;

pub use error::{DomainError, FieldViolation};
pub use repository::{
    Repository, SearchInput, SearchParams, SearchResult, SearchableRepository, SortDirection,
};
pub use user::{User, UserProps, UserRepository, UserSortField};
