//! User infrastructure module
//!
//! Storage and hashing implementations behind the user domain contracts:
//! Argon2 password hashing, the in-memory repository used as test double and
//! behavioral oracle, and the Postgres-backed repository.

mod in_memory;
mod password;
mod postgres;

pub use in_memory::InMemoryUserRepository;
pub use password::{Argon2Hasher, PasswordHasher};
pub use postgres::PostgresUserRepository;
