use diesel::prelude::*;
use std::sync::Arc;

use paperfolio_core::errors::Result;
use paperfolio_core::holdings::{Holding, HoldingsRepositoryTrait};

use super::model::HoldingDB;
use crate::db::{get_connection, DbPool};
use crate::errors::StorageError;
use crate::schema::holdings;

/// Read-side repository for materialized positions.
///
/// Rows are upserted by [`crate::trading::TradingRepository`] inside its
/// settlement transaction.
pub struct HoldingsRepository {
    pool: Arc<DbPool>,
}

impl HoldingsRepository {
    /// Creates a new HoldingsRepository instance
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl HoldingsRepositoryTrait for HoldingsRepository {
    fn current_holdings(&self, user_id: &str) -> Result<Vec<Holding>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = holdings::table
            .filter(holdings::user_id.eq(user_id))
            .filter(holdings::shares.gt(0))
            .select(HoldingDB::as_select())
            .order(holdings::symbol.asc())
            .load::<HoldingDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(Holding::from).collect())
    }

    fn all_positions(&self, user_id: &str) -> Result<Vec<Holding>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = holdings::table
            .filter(holdings::user_id.eq(user_id))
            .select(HoldingDB::as_select())
            .order(holdings::symbol.asc())
            .load::<HoldingDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(Holding::from).collect())
    }

    fn shares_held(&self, user_id: &str, symbol: &str) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;

        let shares = holdings::table
            .filter(holdings::user_id.eq(user_id))
            .filter(holdings::symbol.eq(symbol))
            .select(holdings::shares)
            .first::<i64>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;

        Ok(shares.unwrap_or(0))
    }
}
