use super::MemRepo;
use crate::error::{EntityKind, RepoError};
use crate::transaction_group_repo::{NewTransactionGroup, TransactionGroup, TransactionGroupRepo};
use crate::validation::Validate;
use async_trait::async_trait;

#[async_trait]
impl TransactionGroupRepo for MemRepo {
    async fn create_group(
        &self,
        new_group: NewTransactionGroup,
    ) -> Result<TransactionGroup, RepoError> {
        new_group.validate()?;
        let mut write_guard = self.write_lock()?;

        let group = write_guard
            .groups
            .insert_with(|id| new_group.to_transaction_group(id));
        Ok(group)
    }

    async fn get_group(&self, group_id: i32) -> Result<TransactionGroup, RepoError> {
        let read_guard = self.read_lock()?;

        read_guard
            .groups
            .get(group_id, EntityKind::TransactionGroup)
            .cloned()
    }

    async fn get_all_groups(&self) -> Result<Vec<TransactionGroup>, RepoError> {
        let read_guard = self.read_lock()?;

        let groups: Vec<TransactionGroup> = read_guard.groups.values().cloned().collect();
        Ok(groups)
    }

    async fn update_group(
        &self,
        group_id: i32,
        updated_group: NewTransactionGroup,
    ) -> Result<TransactionGroup, RepoError> {
        updated_group.validate()?;
        let mut write_guard = self.write_lock()?;

        let group = write_guard
            .groups
            .get_mut(group_id, EntityKind::TransactionGroup)?;
        *group = updated_group.to_transaction_group(group_id);
        Ok(group.clone())
    }

    async fn delete_group(&self, group_id: i32) -> Result<TransactionGroup, RepoError> {
        let mut write_guard = self.write_lock()?;

        let group = write_guard
            .groups
            .remove(group_id, EntityKind::TransactionGroup)?;
        for transaction in write_guard.transactions_mut() {
            if transaction.group_id == Some(group_id) {
                transaction.group_id = None;
            }
        }
        Ok(group)
    }
}
