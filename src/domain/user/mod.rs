//! User domain
//!
//! Domain types for user accounts: the user entity, declarative validation
//! schemas, and the repository contract with its sort allow-list.

mod entity;
mod repository;
mod validation;

pub use entity::{User, UserProps};
pub use repository::{UserRepository, UserSortField};
pub use validation::{
    validate_name, validate_password, validate_user, MAX_EMAIL_LENGTH, MAX_NAME_LENGTH,
    MAX_PASSWORD_LENGTH,
};

#[cfg(test)]
pub use entity::testing;
