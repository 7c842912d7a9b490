//! Database model for holdings.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use paperfolio_core::holdings::Holding;

/// Database model for a user's net position in one symbol.
///
/// Rows are kept when a position is sold down to zero; reads that feed
/// user-facing views filter on `shares > 0`.
#[derive(Queryable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::holdings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HoldingDB {
    pub user_id: String,
    pub symbol: String,
    pub shares: i64,
    pub updated_at: NaiveDateTime,
}

impl From<HoldingDB> for Holding {
    fn from(db: HoldingDB) -> Self {
        Self {
            user_id: db.user_id,
            symbol: db.symbol,
            shares: db.shares,
        }
    }
}
