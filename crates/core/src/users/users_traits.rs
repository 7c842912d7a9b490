//! User repository and service traits.
//!
//! These traits define the contract for credential operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::users_model::{ChangePasswordInput, Credentials, RegisterInput, User};
use crate::errors::Result;

/// Trait defining the contract for password hashing.
///
/// The core never touches a concrete hash algorithm; the server supplies
/// an Argon2 implementation and tests may substitute a plain fake.
pub trait PasswordHasherTrait: Send + Sync {
    /// Hash a plaintext password into a storable PHC string.
    fn hash_password(&self, plaintext: &str) -> Result<String>;

    /// Verify a plaintext password against a stored hash.
    ///
    /// Returns `Ok(false)` on a mismatch; `Err` is reserved for malformed
    /// hashes and backend failures. The comparison is timing-safe inside
    /// the hashing primitive.
    fn verify_password(&self, plaintext: &str, stored_hash: &str) -> Result<bool>;
}

/// Trait defining the contract for User repository operations.
///
/// Implementations of this trait handle the persistence of user data.
/// The trait is database-agnostic - storage-specific details are handled
/// by concrete implementations.
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    /// Persists a new user.
    ///
    /// Username uniqueness is enforced by the store; a collision surfaces
    /// as a unique-violation database error.
    async fn create(&self, user: User) -> Result<User>;

    /// Retrieves a user by id.
    fn get_by_id(&self, user_id: &str) -> Result<User>;

    /// Retrieves a user by username, or `None` when unknown.
    fn get_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Replaces the stored password hash.
    async fn update_password_hash(&self, user_id: &str, password_hash: String) -> Result<()>;
}

/// Trait defining the contract for User service operations.
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    /// Registers a new user with the configured starting cash balance.
    ///
    /// No user row is created when validation fails.
    async fn register(&self, input: RegisterInput) -> Result<User>;

    /// Verifies a username/password pair and returns the user.
    ///
    /// Unknown usernames and wrong passwords are indistinguishable to the
    /// caller.
    async fn authenticate(&self, credentials: Credentials) -> Result<User>;

    /// Changes the user's password after verifying the current one.
    async fn change_password(&self, user_id: &str, input: ChangePasswordInput) -> Result<()>;

    /// Retrieves a user by id.
    fn get_user(&self, user_id: &str) -> Result<User>;
}
