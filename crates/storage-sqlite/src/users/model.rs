//! Database model for users.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use paperfolio_core::users::User;

use crate::utils::parse_decimal_text;

/// Database model for users.
///
/// The cash balance is stored as text and parsed back into a Decimal, so
/// amounts round-trip without binary float drift.
#[derive(Queryable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub cash_balance: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        Self {
            cash_balance: parse_decimal_text(&db.cash_balance, "cash_balance"),
            id: db.id,
            username: db.username,
            password_hash: db.password_hash,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<User> for UserDB {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            password_hash: user.password_hash,
            cash_balance: user.cash_balance.to_string(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
