use crate::error::RepoError;
use crate::validation::{
    check_amount, check_name, check_optional_length, Validate, ValidationError,
    ACCOUNT_NUMBER_MAX_LEN, SORT_CODE_MAX_LEN,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[async_trait]
pub trait AccountRepo: Sync + Send {
    async fn create_account(&self, new_account: NewAccount) -> Result<Account, RepoError>;

    async fn get_account(&self, account_id: i32) -> Result<Account, RepoError>;

    async fn get_all_accounts(&self) -> Result<Vec<Account>, RepoError>;

    /// Replaces the name and bank details. The ledger balance is left as is.
    async fn update_account(
        &self,
        account_id: i32,
        updated_account: NewAccount,
    ) -> Result<Account, RepoError>;

    async fn update_ledger_balance(
        &self,
        account_id: i32,
        balance: Decimal,
        date: NaiveDate,
    ) -> Result<Account, RepoError>;

    /// Deletes the account together with every transaction it owns.
    async fn delete_account(&self, account_id: i32) -> Result<Account, RepoError>;
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Account {
    pub id: i32,
    pub name: String,
    pub sort_code: Option<String>,
    pub account_number: Option<String>,
    /// Balance as last reported by the bank.
    pub ledger_balance: Decimal,
    pub ledger_balance_date: Option<NaiveDate>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NewAccount {
    pub name: String,
    pub sort_code: Option<String>,
    pub account_number: Option<String>,
}

impl NewAccount {
    pub fn new(name: impl Into<String>) -> NewAccount {
        NewAccount {
            name: name.into(),
            sort_code: None,
            account_number: None,
        }
    }

    pub fn with_bank_details(
        mut self,
        sort_code: impl Into<String>,
        account_number: impl Into<String>,
    ) -> NewAccount {
        self.sort_code = Some(sort_code.into());
        self.account_number = Some(account_number.into());
        self
    }

    pub fn to_account(self, id: i32) -> Account {
        Account {
            id,
            name: self.name,
            sort_code: self.sort_code,
            account_number: self.account_number,
            ledger_balance: Decimal::ZERO,
            ledger_balance_date: None,
        }
    }
}

impl Validate for NewAccount {
    fn validate(&self) -> Result<(), ValidationError> {
        check_name(&self.name)?;
        check_optional_length("sort_code", &self.sort_code, SORT_CODE_MAX_LEN)?;
        check_optional_length("account_number", &self.account_number, ACCOUNT_NUMBER_MAX_LEN)
    }
}

pub(crate) fn validate_ledger_balance(balance: Decimal) -> Result<(), ValidationError> {
    check_amount("ledger_balance", balance)
}
