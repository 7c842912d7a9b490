//! User service: registration, authentication, password changes.

use log::debug;
use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::users_model::{ChangePasswordInput, Credentials, RegisterInput, User};
use super::users_traits::{PasswordHasherTrait, UserRepositoryTrait, UserServiceTrait};
use crate::errors::{CredentialError, DatabaseError, Error, Result};

/// Service for managing users and credentials.
pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
    hasher: Arc<dyn PasswordHasherTrait>,
    starting_cash: Decimal,
}

impl UserService {
    /// Creates a new UserService instance.
    pub fn new(
        repository: Arc<dyn UserRepositoryTrait>,
        hasher: Arc<dyn PasswordHasherTrait>,
        starting_cash: Decimal,
    ) -> Self {
        Self {
            repository,
            hasher,
            starting_cash,
        }
    }
}

#[async_trait::async_trait]
impl UserServiceTrait for UserService {
    async fn register(&self, input: RegisterInput) -> Result<User> {
        input.validate()?;
        let username = input.normalized_username();
        debug!("Registering user '{}'", username);

        let password_hash = self.hasher.hash_password(&input.password)?;
        let now = Utc::now().naive_utc();
        let user = User {
            id: Uuid::new_v4().to_string(),
            username: username.clone(),
            password_hash,
            cash_balance: self.starting_cash,
            created_at: now,
            updated_at: now,
        };

        // The unique index is the authority on username collisions; a
        // pre-check would race with concurrent registrations.
        match self.repository.create(user).await {
            Ok(created) => Ok(created),
            Err(Error::Database(DatabaseError::UniqueViolation(_))) => {
                Err(CredentialError::DuplicateUsername(username).into())
            }
            Err(e) => Err(e),
        }
    }

    async fn authenticate(&self, credentials: Credentials) -> Result<User> {
        credentials.validate()?;

        let user = match self.repository.get_by_username(credentials.username.trim())? {
            Some(user) => user,
            None => return Err(CredentialError::InvalidCredentials.into()),
        };

        if !self
            .hasher
            .verify_password(&credentials.password, &user.password_hash)?
        {
            return Err(CredentialError::InvalidCredentials.into());
        }

        Ok(user)
    }

    async fn change_password(&self, user_id: &str, input: ChangePasswordInput) -> Result<()> {
        input.validate()?;

        let user = self.repository.get_by_id(user_id)?;
        if !self
            .hasher
            .verify_password(&input.current_password, &user.password_hash)?
        {
            return Err(CredentialError::InvalidCredentials.into());
        }

        let new_hash = self.hasher.hash_password(&input.new_password)?;
        self.repository
            .update_password_hash(user_id, new_hash)
            .await?;
        debug!("Password updated for user {}", user_id);
        Ok(())
    }

    fn get_user(&self, user_id: &str) -> Result<User> {
        self.repository.get_by_id(user_id)
    }
}
