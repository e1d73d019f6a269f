//! Application layer - use cases and their input/output shapes

pub mod dto;
pub mod usecases;

pub use dto::{ListUsersOutput, UserOutput};
