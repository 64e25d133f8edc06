use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::accounts_model::{FinancialAccount, NewAccount};
use super::accounts_repository::AccountRepository;
use crate::accounts::Result;
use crate::db::DbPool;

/// Service for managing financial accounts
pub struct AccountService {
    pool: Arc<DbPool>,
}

impl AccountService {
    /// Creates a new AccountService instance
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Creates a new account; the balance starts at zero
    pub fn create_account(&self, new_account: NewAccount) -> Result<FinancialAccount> {
        debug!("Creating account '{}'", new_account.name);
        let repo = AccountRepository::new(self.pool.clone());
        repo.create(new_account)
    }

    /// Retrieves an account by its ID
    pub fn get_account(&self, account_id: &str) -> Result<FinancialAccount> {
        let repo = AccountRepository::new(self.pool.clone());
        repo.get_by_id(account_id)
    }

    /// Returns the cached balance of an account
    pub fn get_balance(&self, account_id: &str) -> Result<Decimal> {
        Ok(self.get_account(account_id)?.credits)
    }

    /// Lists all accounts with optional filtering by active status
    pub fn list_accounts(&self, is_active_filter: Option<bool>) -> Result<Vec<FinancialAccount>> {
        let repo = AccountRepository::new(self.pool.clone());
        repo.list(is_active_filter)
    }

    /// Lists only active accounts
    pub fn get_active_accounts(&self) -> Result<Vec<FinancialAccount>> {
        self.list_accounts(Some(true))
    }

    /// Deactivates an account without touching its ledger history
    pub fn deactivate_account(&self, account_id: &str) -> Result<FinancialAccount> {
        debug!("Deactivating account {}", account_id);
        let repo = AccountRepository::new(self.pool.clone());
        repo.set_active(account_id, false)
    }
}
