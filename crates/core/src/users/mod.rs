//! Users module - credential models, services, and traits.

mod users_model;
mod users_service;
mod users_traits;

// Re-export the public interface
pub use users_model::{ChangePasswordInput, Credentials, RegisterInput, User};
pub use users_service::UserService;
pub use users_traits::{PasswordHasherTrait, UserRepositoryTrait, UserServiceTrait};
