use diesel::prelude::*;
use std::sync::Arc;

use paperfolio_core::errors::Result;
use paperfolio_core::ledger::{LedgerEntry, LedgerRepositoryTrait};

use super::model::TransactionDB;
use crate::db::{get_connection, DbPool};
use crate::errors::StorageError;
use crate::schema::transactions;

/// Read-side repository for the trade ledger.
///
/// Rows are appended by [`crate::trading::TradingRepository`] inside its
/// settlement transaction; this repository only reads them back.
pub struct LedgerRepository {
    pool: Arc<DbPool>,
}

impl LedgerRepository {
    /// Creates a new LedgerRepository instance
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl LedgerRepositoryTrait for LedgerRepository {
    fn history_for_user(&self, user_id: &str) -> Result<Vec<LedgerEntry>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = transactions::table
            .filter(transactions::user_id.eq(user_id))
            .select(TransactionDB::as_select())
            .order((transactions::created_at.asc(), transactions::id.asc()))
            .load::<TransactionDB>(&mut conn)
            .map_err(StorageError::from)?;

        rows.into_iter().map(LedgerEntry::try_from).collect()
    }
}
