//! Use cases - thin orchestration over the domain contracts
//!
//! Each use case exposes a single `execute(input) -> output` entry point and
//! is the only surface controllers talk to.

pub mod delete_user;
pub mod get_user;
pub mod list_users;
pub mod signin;
pub mod signup;
pub mod update_password;
pub mod update_user;

pub use delete_user::DeleteUserUseCase;
pub use get_user::GetUserUseCase;
pub use list_users::ListUsersUseCase;
pub use signin::{SigninInput, SigninUseCase};
pub use signup::{SignupInput, SignupUseCase};
pub use update_password::{UpdatePasswordInput, UpdatePasswordUseCase};
pub use update_user::{UpdateUserInput, UpdateUserUseCase};
