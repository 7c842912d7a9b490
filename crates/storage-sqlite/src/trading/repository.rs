use async_trait::async_trait;
use diesel::prelude::*;

use paperfolio_core::errors::Result;
use paperfolio_core::ledger::LedgerEntry;
use paperfolio_core::trading::{TradeExecution, TradePlan, TradingRepositoryTrait};
use paperfolio_core::users::User;

use crate::db::WriteHandle;
use crate::errors::StorageError;
use crate::holdings::HoldingDB;
use crate::ledger::{NewTransactionDB, TransactionDB};
use crate::schema::{holdings, transactions, users};
use crate::users::UserDB;

/// Settles trades against the store.
///
/// Every order runs as one job on the writer actor, so the balance
/// checks, the ledger append, the cash update, and the holding upsert
/// commit or roll back as a unit.
pub struct TradingRepository {
    writer: WriteHandle,
}

impl TradingRepository {
    /// Creates a new TradingRepository instance
    pub fn new(writer: WriteHandle) -> Self {
        Self { writer }
    }
}

#[async_trait]
impl TradingRepositoryTrait for TradingRepository {
    async fn execute_trade(&self, plan: TradePlan) -> Result<TradeExecution> {
        self.writer
            .exec(move |conn| {
                // Balances are re-read here, inside the transaction, so a
                // concurrent order cannot spend the same cash or shares.
                let user_db = users::table
                    .select(UserDB::as_select())
                    .find(&plan.user_id)
                    .first::<UserDB>(conn)
                    .map_err(StorageError::from)?;
                let user = User::from(user_db);

                let held = holdings::table
                    .filter(holdings::user_id.eq(&plan.user_id))
                    .filter(holdings::symbol.eq(&plan.symbol))
                    .select(holdings::shares)
                    .first::<i64>(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .unwrap_or(0);

                let settlement = plan.settle(user.cash_balance, held)?;
                let now = chrono::Utc::now().naive_utc();

                let transaction_db: TransactionDB = diesel::insert_into(transactions::table)
                    .values(&NewTransactionDB {
                        user_id: plan.user_id.clone(),
                        symbol: plan.symbol.clone(),
                        shares: settlement.signed_shares,
                        unit_price: plan.unit_price.to_string(),
                        action: plan.action.as_str().to_string(),
                        created_at: now,
                    })
                    .returning(TransactionDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;

                diesel::update(users::table.find(&plan.user_id))
                    .set((
                        users::cash_balance.eq(settlement.new_cash_balance.to_string()),
                        users::updated_at.eq(now),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let new_shares_held = held + settlement.signed_shares;
                diesel::insert_into(holdings::table)
                    .values(&HoldingDB {
                        user_id: plan.user_id.clone(),
                        symbol: plan.symbol.clone(),
                        shares: new_shares_held,
                        updated_at: now,
                    })
                    .on_conflict((holdings::user_id, holdings::symbol))
                    .do_update()
                    .set((
                        holdings::shares.eq(new_shares_held),
                        holdings::updated_at.eq(now),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                log::debug!(
                    "Settled {} {} x {} for user {}; cash {}",
                    plan.action,
                    plan.shares,
                    plan.symbol,
                    plan.user_id,
                    settlement.new_cash_balance
                );

                Ok(TradeExecution {
                    transaction: LedgerEntry::try_from(transaction_db)?,
                    new_cash_balance: settlement.new_cash_balance,
                    new_shares_held,
                })
            })
            .await
    }
}
