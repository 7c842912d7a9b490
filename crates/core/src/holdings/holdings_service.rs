//! Holdings service: position reads plus a ledger consistency check.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::holdings_model::{derive_from_entries, Holding};
use super::holdings_traits::{HoldingsRepositoryTrait, HoldingsServiceTrait};
use crate::errors::{Error, Result};
use crate::ledger::LedgerRepositoryTrait;

/// Service for reading positions and auditing them against the ledger.
pub struct HoldingsService {
    holdings_repository: Arc<dyn HoldingsRepositoryTrait>,
    ledger_repository: Arc<dyn LedgerRepositoryTrait>,
}

impl HoldingsService {
    /// Creates a new HoldingsService instance.
    pub fn new(
        holdings_repository: Arc<dyn HoldingsRepositoryTrait>,
        ledger_repository: Arc<dyn LedgerRepositoryTrait>,
    ) -> Self {
        Self {
            holdings_repository,
            ledger_repository,
        }
    }
}

impl HoldingsServiceTrait for HoldingsService {
    fn current_holdings(&self, user_id: &str) -> Result<Vec<Holding>> {
        self.holdings_repository.current_holdings(user_id)
    }

    fn shares_held(&self, user_id: &str, symbol: &str) -> Result<i64> {
        self.holdings_repository.shares_held(user_id, symbol)
    }

    fn verify_against_ledger(&self, user_id: &str) -> Result<()> {
        let entries = self.ledger_repository.history_for_user(user_id)?;
        let mut expected: BTreeMap<String, i64> = derive_from_entries(user_id, &entries)
            .into_iter()
            .map(|h| (h.symbol, h.shares))
            .collect();

        let mut drift = Vec::new();
        for stored in self.holdings_repository.all_positions(user_id)? {
            let from_ledger = expected.remove(&stored.symbol).unwrap_or(0);
            if from_ledger != stored.shares {
                drift.push(format!(
                    "{}: ledger nets {}, stored {}",
                    stored.symbol, from_ledger, stored.shares
                ));
            }
        }
        // Symbols the ledger knows but the table does not. A zero net with
        // no row is not drift.
        for (symbol, shares) in expected {
            if shares != 0 {
                drift.push(format!("{}: ledger nets {}, stored 0", symbol, shares));
            }
        }

        if drift.is_empty() {
            Ok(())
        } else {
            let detail = format!("user {}: {}", user_id, drift.join("; "));
            log::error!("Holdings out of sync with ledger: {}", detail);
            Err(Error::LedgerDrift(detail))
        }
    }
}
