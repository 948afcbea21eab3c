use super::MemRepo;
use crate::error::{EntityKind, RepoError};
use crate::transaction_repo::{Filter, NewTransaction, PageOptions, Transaction, TransactionRepo};
use crate::validation::{normalize_amount, Validate};
use async_trait::async_trait;
use std::collections::hash_map::Entry;
use tracing::warn;

#[async_trait]
impl TransactionRepo for MemRepo {
    async fn get_transaction(&self, transaction_id: i32) -> Result<Transaction, RepoError> {
        let read_guard = self.read_lock()?;

        read_guard
            .transactions
            .get(transaction_id, EntityKind::Transaction)
            .cloned()
    }

    async fn get_transaction_by_ofx_id(
        &self,
        ofx_id: &str,
    ) -> Result<Option<Transaction>, RepoError> {
        let read_guard = self.read_lock()?;

        let Some(transaction_id) = read_guard.ofx_ids.get(ofx_id) else {
            return Ok(None);
        };
        let transaction = read_guard
            .transactions
            .get(*transaction_id, EntityKind::Transaction)?
            .clone();
        Ok(Some(transaction))
    }

    async fn get_all_transactions(
        &self,
        filter: Filter,
        page_options: Option<PageOptions>,
    ) -> Result<Vec<Transaction>, RepoError> {
        if let Some(page_options) = &page_options {
            page_options.validate()?;
        }
        let read_guard = self.read_lock()?;

        let mut transactions: Vec<Transaction> = read_guard
            .transactions
            .values()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        transactions.sort_by(|a, b| b.cmp(a));

        if let Some(page_options) = page_options {
            transactions = transactions
                .into_iter()
                .skip(page_options.offset as usize)
                .take(page_options.limit as usize)
                .collect();
        }

        Ok(transactions)
    }

    async fn create_new_transaction(
        &self,
        mut new_transaction: NewTransaction,
    ) -> Result<Transaction, RepoError> {
        new_transaction.validate()?;
        new_transaction.amount = normalize_amount(new_transaction.amount);
        let mut write_guard = self.write_lock()?;
        let state = &mut *write_guard;

        state.check_references(&new_transaction)?;
        let Entry::Vacant(ofx_entry) = state.ofx_ids.entry(new_transaction.ofx_id.clone()) else {
            warn!(ofx_id = %new_transaction.ofx_id, "Rejected duplicate transaction");
            return Err(RepoError::UniquenessViolation(new_transaction.ofx_id));
        };

        let transaction = state
            .transactions
            .insert_with(|id| new_transaction.to_transaction(id));
        ofx_entry.insert(transaction.id);

        Ok(transaction)
    }

    async fn update_transaction(
        &self,
        transaction_id: i32,
        mut updated_transaction: NewTransaction,
    ) -> Result<Transaction, RepoError> {
        updated_transaction.validate()?;
        updated_transaction.amount = normalize_amount(updated_transaction.amount);
        let mut write_guard = self.write_lock()?;
        let state = &mut *write_guard;

        let old_ofx_id = state
            .transactions
            .get(transaction_id, EntityKind::Transaction)?
            .ofx_id
            .clone();
        state.check_references(&updated_transaction)?;
        if let Some(&owner) = state.ofx_ids.get(&updated_transaction.ofx_id) {
            if owner != transaction_id {
                return Err(RepoError::UniquenessViolation(updated_transaction.ofx_id));
            }
        }

        state.ofx_ids.remove(&old_ofx_id);
        state
            .ofx_ids
            .insert(updated_transaction.ofx_id.clone(), transaction_id);
        let transaction = updated_transaction.to_transaction(transaction_id);
        *state
            .transactions
            .get_mut(transaction_id, EntityKind::Transaction)? = transaction.clone();

        Ok(transaction)
    }

    async fn delete_transaction(&self, transaction_id: i32) -> Result<Transaction, RepoError> {
        let mut write_guard = self.write_lock()?;

        let transaction = write_guard
            .transactions
            .remove(transaction_id, EntityKind::Transaction)?;
        write_guard.ofx_ids.remove(&transaction.ofx_id);
        Ok(transaction)
    }
}
