//! User domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::CredentialError;
use crate::Result;

/// Domain model representing a registered user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    /// Unique, stored trimmed, matched case-sensitively
    pub username: String,
    /// PHC-format hash of the password. Never serialized out.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Virtual cash available for trading, mutated only by trade settlement
    pub cash_balance: Decimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for registering a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    pub username: String,
    pub password: String,
    pub password_confirmation: String,
}

impl RegisterInput {
    /// Validates the registration input.
    ///
    /// Field presence is checked before the confirmation match, so a
    /// submission with no password reports the missing field rather than
    /// a mismatch.
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(CredentialError::WeakInput("Username is required".to_string()).into());
        }
        if self.password.is_empty() {
            return Err(CredentialError::WeakInput("Password is required".to_string()).into());
        }
        if self.password != self.password_confirmation {
            return Err(CredentialError::PasswordMismatch.into());
        }
        Ok(())
    }

    /// Username with surrounding whitespace removed, as stored.
    pub fn normalized_username(&self) -> String {
        self.username.trim().to_string()
    }
}

/// Input model for logging in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Validates that both fields are present.
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(CredentialError::WeakInput("Username is required".to_string()).into());
        }
        if self.password.is_empty() {
            return Err(CredentialError::WeakInput("Password is required".to_string()).into());
        }
        Ok(())
    }
}

/// Input model for changing a password.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordInput {
    pub current_password: String,
    pub new_password: String,
    pub new_password_confirmation: String,
}

impl ChangePasswordInput {
    /// Validates the password change input.
    ///
    /// Checks run in a fixed order: field presence, confirmation match,
    /// then the no-op guard comparing the submitted current and new
    /// passwords. Verifying the current password against the stored hash
    /// happens in the service, after these checks pass.
    pub fn validate(&self) -> Result<()> {
        if self.current_password.is_empty() {
            return Err(
                CredentialError::WeakInput("Current password is required".to_string()).into(),
            );
        }
        if self.new_password.is_empty() {
            return Err(CredentialError::WeakInput("New password is required".to_string()).into());
        }
        if self.new_password != self.new_password_confirmation {
            return Err(CredentialError::PasswordMismatch.into());
        }
        if self.current_password == self.new_password {
            return Err(CredentialError::NoOpChange.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn register_input(username: &str, password: &str, confirmation: &str) -> RegisterInput {
        RegisterInput {
            username: username.to_string(),
            password: password.to_string(),
            password_confirmation: confirmation.to_string(),
        }
    }

    #[test]
    fn test_register_validate_ok() {
        assert!(register_input("alice", "hunter2!", "hunter2!")
            .validate()
            .is_ok());
    }

    #[test]
    fn test_register_requires_username() {
        let err = register_input("   ", "pw", "pw").validate().unwrap_err();
        assert!(matches!(
            err,
            Error::Credential(CredentialError::WeakInput(_))
        ));
    }

    #[test]
    fn test_register_requires_password_before_mismatch() {
        // An empty password reports the missing field, not a mismatch
        // against the non-empty confirmation.
        let err = register_input("alice", "", "pw").validate().unwrap_err();
        assert!(matches!(
            err,
            Error::Credential(CredentialError::WeakInput(_))
        ));
    }

    #[test]
    fn test_register_mismatch() {
        let err = register_input("alice", "pw-one", "pw-two")
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Credential(CredentialError::PasswordMismatch)
        ));
    }

    #[test]
    fn test_register_normalizes_username() {
        assert_eq!(
            register_input("  alice  ", "pw", "pw").normalized_username(),
            "alice"
        );
    }

    #[test]
    fn test_change_password_noop_guard() {
        let input = ChangePasswordInput {
            current_password: "same".to_string(),
            new_password: "same".to_string(),
            new_password_confirmation: "same".to_string(),
        };
        assert!(matches!(
            input.validate().unwrap_err(),
            Error::Credential(CredentialError::NoOpChange)
        ));
    }

    #[test]
    fn test_change_password_mismatch_before_noop() {
        let input = ChangePasswordInput {
            current_password: "same".to_string(),
            new_password: "same".to_string(),
            new_password_confirmation: "other".to_string(),
        };
        assert!(matches!(
            input.validate().unwrap_err(),
            Error::Credential(CredentialError::PasswordMismatch)
        ));
    }

    #[test]
    fn test_user_serialization_hides_password_hash() {
        let now = Utc::now().naive_utc();
        let user = User {
            id: "u-1".to_string(),
            username: "alice".to_string(),
            password_hash: "$argon2id$...".to_string(),
            cash_balance: dec!(10000.00),
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json.get("username").unwrap(), "alice");
    }
}
