//! Database models for the trade ledger.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use paperfolio_core::errors::{DatabaseError, Error};
use paperfolio_core::ledger::LedgerEntry;

use crate::utils::parse_decimal_text;

/// Database model for an executed trade.
#[derive(Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: i64,
    pub user_id: String,
    pub symbol: String,
    pub shares: i64,
    pub unit_price: String,
    pub action: String,
    pub created_at: NaiveDateTime,
}

/// Insertable model; the id is assigned by SQLite.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
pub struct NewTransactionDB {
    pub user_id: String,
    pub symbol: String,
    pub shares: i64,
    pub unit_price: String,
    pub action: String,
    pub created_at: NaiveDateTime,
}

impl TryFrom<TransactionDB> for LedgerEntry {
    type Error = Error;

    fn try_from(db: TransactionDB) -> Result<Self, Self::Error> {
        let action = db.action.parse().map_err(|_| {
            Error::Database(DatabaseError::Internal(format!(
                "unknown trade action '{}' on transaction {}",
                db.action, db.id
            )))
        })?;

        Ok(Self {
            action,
            unit_price: parse_decimal_text(&db.unit_price, "unit_price"),
            id: db.id,
            user_id: db.user_id,
            symbol: db.symbol,
            shares: db.shares,
            created_at: db.created_at,
        })
    }
}
