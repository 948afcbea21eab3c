use super::MemRepo;
use crate::account_repo::{validate_ledger_balance, Account, AccountRepo, NewAccount};
use crate::error::{EntityKind, RepoError};
use crate::validation::{normalize_amount, Validate};
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

#[async_trait]
impl AccountRepo for MemRepo {
    async fn create_account(&self, new_account: NewAccount) -> Result<Account, RepoError> {
        new_account.validate()?;
        let mut write_guard = self.write_lock()?;

        let account = write_guard
            .accounts
            .insert_with(|id| new_account.to_account(id));
        Ok(account)
    }

    async fn get_account(&self, account_id: i32) -> Result<Account, RepoError> {
        let read_guard = self.read_lock()?;

        read_guard
            .accounts
            .get(account_id, EntityKind::Account)
            .cloned()
    }

    async fn get_all_accounts(&self) -> Result<Vec<Account>, RepoError> {
        let read_guard = self.read_lock()?;

        let mut accounts: Vec<Account> = read_guard.accounts.values().cloned().collect();
        accounts.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(accounts)
    }

    async fn update_account(
        &self,
        account_id: i32,
        updated_account: NewAccount,
    ) -> Result<Account, RepoError> {
        updated_account.validate()?;
        let mut write_guard = self.write_lock()?;

        let account = write_guard
            .accounts
            .get_mut(account_id, EntityKind::Account)?;
        account.name = updated_account.name;
        account.sort_code = updated_account.sort_code;
        account.account_number = updated_account.account_number;
        Ok(account.clone())
    }

    async fn update_ledger_balance(
        &self,
        account_id: i32,
        balance: Decimal,
        date: NaiveDate,
    ) -> Result<Account, RepoError> {
        validate_ledger_balance(balance)?;
        let mut write_guard = self.write_lock()?;

        let account = write_guard
            .accounts
            .get_mut(account_id, EntityKind::Account)?;
        account.ledger_balance = normalize_amount(balance);
        account.ledger_balance_date = Some(date);
        Ok(account.clone())
    }

    async fn delete_account(&self, account_id: i32) -> Result<Account, RepoError> {
        let mut write_guard = self.write_lock()?;
        let state = &mut *write_guard;

        let account = state.accounts.remove(account_id, EntityKind::Account)?;

        let owned: Vec<i32> = state
            .transactions
            .values()
            .filter(|t| t.account_id == account_id)
            .map(|t| t.id)
            .collect();
        for transaction_id in &owned {
            let transaction = state
                .transactions
                .remove(*transaction_id, EntityKind::Transaction)?;
            state.ofx_ids.remove(&transaction.ofx_id);
        }
        debug!(account_id, deleted = owned.len(), "Deleted account transactions");

        Ok(account)
    }
}
