use crate::error::{EntityKind, RepoError};
use crate::sqlx_repo::SQLxRepo;
use crate::transaction_group_repo::{NewTransactionGroup, TransactionGroup, TransactionGroupRepo};
use crate::validation::Validate;
use anyhow::Context;
use async_trait::async_trait;
use sqlx::query_as;
use tracing::instrument;

#[derive(sqlx::FromRow)]
struct TransactionGroupEntry {
    id: i32,
    name: String,
    description: Option<String>,
    active: bool,
}

impl From<TransactionGroupEntry> for TransactionGroup {
    fn from(value: TransactionGroupEntry) -> Self {
        TransactionGroup {
            id: value.id,
            name: value.name,
            description: value.description,
            active: value.active,
        }
    }
}

#[async_trait]
impl TransactionGroupRepo for SQLxRepo {
    #[instrument(skip(self, new_group))]
    async fn create_group(
        &self,
        new_group: NewTransactionGroup,
    ) -> Result<TransactionGroup, RepoError> {
        new_group.validate()?;
        let group_entry: TransactionGroupEntry = query_as(
            "INSERT INTO transaction_groups(name, description, active) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&new_group.name)
        .bind(&new_group.description)
        .bind(new_group.active)
        .fetch_one(&self.pool)
        .await
        .context("Unable to insert transaction group")?;
        Ok(group_entry.into())
    }

    #[instrument(skip(self))]
    async fn get_group(&self, group_id: i32) -> Result<TransactionGroup, RepoError> {
        let group_entry: Option<TransactionGroupEntry> =
            query_as("SELECT * FROM transaction_groups WHERE id = $1")
                .bind(group_id)
                .fetch_optional(&self.pool)
                .await
                .with_context(|| format!("Unable to get transaction group {}", group_id))?;
        group_entry
            .map(|g| g.into())
            .ok_or(RepoError::NotFound(EntityKind::TransactionGroup, group_id))
    }

    #[instrument(skip(self))]
    async fn get_all_groups(&self) -> Result<Vec<TransactionGroup>, RepoError> {
        let group_entries: Vec<TransactionGroupEntry> =
            query_as("SELECT * FROM transaction_groups ORDER BY id")
                .fetch_all(&self.pool)
                .await
                .context("Unable to get transaction groups")?;
        Ok(group_entries.into_iter().map(|g| g.into()).collect())
    }

    #[instrument(skip(self, updated_group))]
    async fn update_group(
        &self,
        group_id: i32,
        updated_group: NewTransactionGroup,
    ) -> Result<TransactionGroup, RepoError> {
        updated_group.validate()?;
        let group_entry: Option<TransactionGroupEntry> = query_as(
            "UPDATE transaction_groups SET name = $1, description = $2, active = $3 WHERE id = $4 RETURNING *",
        )
        .bind(&updated_group.name)
        .bind(&updated_group.description)
        .bind(updated_group.active)
        .bind(group_id)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Unable to update transaction group {}", group_id))?;
        group_entry
            .map(|g| g.into())
            .ok_or(RepoError::NotFound(EntityKind::TransactionGroup, group_id))
    }

    #[instrument(skip(self))]
    async fn delete_group(&self, group_id: i32) -> Result<TransactionGroup, RepoError> {
        let group_entry: Option<TransactionGroupEntry> =
            query_as("DELETE FROM transaction_groups WHERE id = $1 RETURNING *")
                .bind(group_id)
                .fetch_optional(&self.pool)
                .await
                .with_context(|| format!("Unable to delete transaction group {}", group_id))?;
        group_entry
            .map(|g| g.into())
            .ok_or(RepoError::NotFound(EntityKind::TransactionGroup, group_id))
    }
}
