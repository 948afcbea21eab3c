use crate::account_repo::{validate_ledger_balance, Account, AccountRepo, NewAccount};
use crate::error::{EntityKind, RepoError};
use crate::sqlx_repo::SQLxRepo;
use crate::validation::Validate;
use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::query_as;
use tracing::{info, instrument};

#[derive(sqlx::FromRow)]
struct AccountEntry {
    id: i32,
    name: String,
    sort_code: Option<String>,
    account_number: Option<String>,
    ledger_balance: Decimal,
    ledger_balance_date: Option<NaiveDate>,
}

impl From<AccountEntry> for Account {
    fn from(value: AccountEntry) -> Self {
        Account {
            id: value.id,
            name: value.name,
            sort_code: value.sort_code,
            account_number: value.account_number,
            ledger_balance: value.ledger_balance,
            ledger_balance_date: value.ledger_balance_date,
        }
    }
}

#[async_trait]
impl AccountRepo for SQLxRepo {
    #[instrument(skip(self, new_account))]
    async fn create_account(&self, new_account: NewAccount) -> Result<Account, RepoError> {
        new_account.validate()?;
        let account_entry: AccountEntry = query_as(
            "INSERT INTO accounts(name, sort_code, account_number) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&new_account.name)
        .bind(&new_account.sort_code)
        .bind(&new_account.account_number)
        .fetch_one(&self.pool)
        .await
        .context("Unable to insert account")?;
        Ok(account_entry.into())
    }

    #[instrument(skip(self))]
    async fn get_account(&self, account_id: i32) -> Result<Account, RepoError> {
        let account_entry: Option<AccountEntry> =
            query_as("SELECT * FROM accounts WHERE id = $1")
                .bind(account_id)
                .fetch_optional(&self.pool)
                .await
                .with_context(|| format!("Unable to get account {}", account_id))?;
        account_entry
            .map(|a| a.into())
            .ok_or(RepoError::NotFound(EntityKind::Account, account_id))
    }

    #[instrument(skip(self))]
    async fn get_all_accounts(&self) -> Result<Vec<Account>, RepoError> {
        let account_entries: Vec<AccountEntry> =
            query_as(r#"SELECT * FROM accounts ORDER BY name COLLATE "C", id"#)
                .fetch_all(&self.pool)
                .await
                .context("Unable to get accounts")?;
        Ok(account_entries.into_iter().map(|a| a.into()).collect())
    }

    #[instrument(skip(self, updated_account))]
    async fn update_account(
        &self,
        account_id: i32,
        updated_account: NewAccount,
    ) -> Result<Account, RepoError> {
        updated_account.validate()?;
        let account_entry: Option<AccountEntry> = query_as(
            "UPDATE accounts SET name = $1, sort_code = $2, account_number = $3 WHERE id = $4 RETURNING *",
        )
        .bind(&updated_account.name)
        .bind(&updated_account.sort_code)
        .bind(&updated_account.account_number)
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Unable to update account {}", account_id))?;
        account_entry
            .map(|a| a.into())
            .ok_or(RepoError::NotFound(EntityKind::Account, account_id))
    }

    #[instrument(skip(self))]
    async fn update_ledger_balance(
        &self,
        account_id: i32,
        balance: Decimal,
        date: NaiveDate,
    ) -> Result<Account, RepoError> {
        validate_ledger_balance(balance)?;
        let account_entry: Option<AccountEntry> = query_as(
            "UPDATE accounts SET ledger_balance = $1, ledger_balance_date = $2 WHERE id = $3 RETURNING *",
        )
        .bind(balance)
        .bind(date)
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Unable to update balance of account {}", account_id))?;
        account_entry
            .map(|a| a.into())
            .ok_or(RepoError::NotFound(EntityKind::Account, account_id))
    }

    #[instrument(skip(self))]
    async fn delete_account(&self, account_id: i32) -> Result<Account, RepoError> {
        // transactions go with it through ON DELETE CASCADE
        let account_entry: AccountEntry =
            query_as("DELETE FROM accounts WHERE id = $1 RETURNING *")
                .bind(account_id)
                .fetch_optional(&self.pool)
                .await
                .with_context(|| format!("Unable to delete account {}", account_id))?
                .ok_or(RepoError::NotFound(EntityKind::Account, account_id))?;
        info!(account_id, "Deleted account and its transactions");
        Ok(account_entry.into())
    }
}
