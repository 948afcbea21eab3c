use crate::error::{EntityKind, RepoError};
use crate::sqlx_repo::{map_constraint_error, SQLxRepo};
use crate::transaction_repo::{Filter, NewTransaction, PageOptions, Transaction, TransactionRepo};
use crate::validation::Validate;
use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{query_as, Postgres, QueryBuilder};
use tracing::{instrument, warn};

#[derive(sqlx::FromRow)]
struct TransactionEntry {
    id: i32,
    account_id: i32,
    date: NaiveDate,
    amount: Decimal,
    description: String,
    memo: Option<String>,
    category_id: Option<i32>,
    tag_id: Option<i32>,
    group_id: Option<i32>,
    ofx_id: String,
    ofx_type: Option<String>,
}

impl From<TransactionEntry> for Transaction {
    fn from(value: TransactionEntry) -> Self {
        Transaction {
            id: value.id,
            account_id: value.account_id,
            date: value.date,
            amount: value.amount,
            description: value.description,
            memo: value.memo,
            category_id: value.category_id,
            tag_id: value.tag_id,
            group_id: value.group_id,
            ofx_id: value.ofx_id,
            ofx_type: value.ofx_type,
        }
    }
}

fn push_filter(query_builder: &mut QueryBuilder<Postgres>, filter: Filter) {
    if let Some(account_id) = filter.account_id {
        query_builder.push(" AND account_id = ").push_bind(account_id);
    }
    if let Some(from) = filter.from {
        query_builder.push(" AND date >= ").push_bind(from);
    }
    if let Some(until) = filter.until {
        query_builder.push(" AND date <= ").push_bind(until);
    }
    if let Some(category_id) = filter.category_id {
        query_builder.push(" AND category_id = ").push_bind(category_id);
    }
    if let Some(tag_id) = filter.tag_id {
        query_builder.push(" AND tag_id = ").push_bind(tag_id);
    }
    if let Some(group_id) = filter.group_id {
        query_builder.push(" AND group_id = ").push_bind(group_id);
    }
    if filter.untagged {
        query_builder.push(" AND tag_id IS NULL");
    }
}

/// Foreign keys a transaction write can violate, with the id that was referenced.
fn referenced_ids(transaction: &NewTransaction) -> Vec<(&'static str, EntityKind, i32)> {
    let mut refs = vec![(
        "transactions_account_id_fkey",
        EntityKind::Account,
        transaction.account_id,
    )];
    if let Some(category_id) = transaction.category_id {
        refs.push((
            "transactions_category_id_fkey",
            EntityKind::Category,
            category_id,
        ));
    }
    if let Some(tag_id) = transaction.tag_id {
        refs.push(("transactions_tag_id_fkey", EntityKind::Tag, tag_id));
    }
    if let Some(group_id) = transaction.group_id {
        refs.push((
            "transactions_group_id_fkey",
            EntityKind::TransactionGroup,
            group_id,
        ));
    }
    refs
}

fn map_write_error(
    error: sqlx::Error,
    transaction: &NewTransaction,
    context: String,
) -> RepoError {
    let repo_error = map_constraint_error(
        error,
        &referenced_ids(transaction),
        Some(&transaction.ofx_id),
        context,
    );
    if let RepoError::UniquenessViolation(ofx_id) = &repo_error {
        warn!(%ofx_id, "Rejected duplicate transaction");
    }
    repo_error
}

#[async_trait]
impl TransactionRepo for SQLxRepo {
    #[instrument(skip(self))]
    async fn get_transaction(&self, transaction_id: i32) -> Result<Transaction, RepoError> {
        let transaction_entry: Option<TransactionEntry> =
            query_as("SELECT * FROM transactions WHERE id = $1")
                .bind(transaction_id)
                .fetch_optional(&self.pool)
                .await
                .with_context(|| format!("Unable to get transaction {}", transaction_id))?;
        transaction_entry
            .map(|t| t.into())
            .ok_or(RepoError::NotFound(EntityKind::Transaction, transaction_id))
    }

    #[instrument(skip(self))]
    async fn get_transaction_by_ofx_id(
        &self,
        ofx_id: &str,
    ) -> Result<Option<Transaction>, RepoError> {
        let transaction_entry: Option<TransactionEntry> =
            query_as("SELECT * FROM transactions WHERE ofx_id = $1")
                .bind(ofx_id)
                .fetch_optional(&self.pool)
                .await
                .with_context(|| format!("Unable to get transaction with ofx_id {}", ofx_id))?;
        Ok(transaction_entry.map(|t| t.into()))
    }

    #[instrument(skip(self, page_options))]
    async fn get_all_transactions(
        &self,
        filter: Filter,
        page_options: Option<PageOptions>,
    ) -> Result<Vec<Transaction>, RepoError> {
        if let Some(page_options) = &page_options {
            page_options.validate()?;
        }
        let mut query_builder = QueryBuilder::new("SELECT * FROM transactions WHERE TRUE");
        push_filter(&mut query_builder, filter);
        query_builder.push(" ORDER BY date DESC, id DESC");
        if let Some(po) = page_options {
            query_builder
                .push(" OFFSET ")
                .push_bind(po.offset)
                .push(" LIMIT ")
                .push_bind(po.limit);
        }
        let transaction_entries: Vec<TransactionEntry> = query_builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .context("Unable to get transactions")?;
        Ok(transaction_entries.into_iter().map(|t| t.into()).collect())
    }

    #[instrument(skip(self, new_transaction))]
    async fn create_new_transaction(
        &self,
        new_transaction: NewTransaction,
    ) -> Result<Transaction, RepoError> {
        new_transaction.validate()?;
        let transaction_entry: TransactionEntry = query_as(
            r#"
            INSERT INTO transactions(account_id, date, amount, description, memo,
                                     category_id, tag_id, group_id, ofx_id, ofx_type)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(new_transaction.account_id)
        .bind(new_transaction.date)
        .bind(new_transaction.amount)
        .bind(&new_transaction.description)
        .bind(&new_transaction.memo)
        .bind(new_transaction.category_id)
        .bind(new_transaction.tag_id)
        .bind(new_transaction.group_id)
        .bind(&new_transaction.ofx_id)
        .bind(&new_transaction.ofx_type)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(e, &new_transaction, "Unable to insert transaction".to_owned())
        })?;
        Ok(transaction_entry.into())
    }

    #[instrument(skip(self, updated_transaction))]
    async fn update_transaction(
        &self,
        transaction_id: i32,
        updated_transaction: NewTransaction,
    ) -> Result<Transaction, RepoError> {
        updated_transaction.validate()?;
        let transaction_entry: Option<TransactionEntry> = query_as(
            r#"
            UPDATE transactions
            SET account_id = $1, date = $2, amount = $3, description = $4, memo = $5,
                category_id = $6, tag_id = $7, group_id = $8, ofx_id = $9, ofx_type = $10
            WHERE id = $11
            RETURNING *
            "#,
        )
        .bind(updated_transaction.account_id)
        .bind(updated_transaction.date)
        .bind(updated_transaction.amount)
        .bind(&updated_transaction.description)
        .bind(&updated_transaction.memo)
        .bind(updated_transaction.category_id)
        .bind(updated_transaction.tag_id)
        .bind(updated_transaction.group_id)
        .bind(&updated_transaction.ofx_id)
        .bind(&updated_transaction.ofx_type)
        .bind(transaction_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(
                e,
                &updated_transaction,
                format!("Unable to update transaction {}", transaction_id),
            )
        })?;
        transaction_entry
            .map(|t| t.into())
            .ok_or(RepoError::NotFound(EntityKind::Transaction, transaction_id))
    }

    #[instrument(skip(self))]
    async fn delete_transaction(&self, transaction_id: i32) -> Result<Transaction, RepoError> {
        let transaction_entry: Option<TransactionEntry> =
            query_as("DELETE FROM transactions WHERE id = $1 RETURNING *")
                .bind(transaction_id)
                .fetch_optional(&self.pool)
                .await
                .with_context(|| format!("Unable to delete transaction {}", transaction_id))?;
        transaction_entry
            .map(|t| t.into())
            .ok_or(RepoError::NotFound(EntityKind::Transaction, transaction_id))
    }
}
