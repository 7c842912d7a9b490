//! Ledger service: read access to the trade history.

use std::sync::Arc;

use super::ledger_model::LedgerEntry;
use super::ledger_traits::{LedgerRepositoryTrait, LedgerServiceTrait};
use crate::errors::Result;

/// Service exposing the append-only trade history.
pub struct LedgerService {
    repository: Arc<dyn LedgerRepositoryTrait>,
}

impl LedgerService {
    /// Creates a new LedgerService instance.
    pub fn new(repository: Arc<dyn LedgerRepositoryTrait>) -> Self {
        Self { repository }
    }
}

impl LedgerServiceTrait for LedgerService {
    fn history(&self, user_id: &str) -> Result<Vec<LedgerEntry>> {
        self.repository.history_for_user(user_id)
    }
}
