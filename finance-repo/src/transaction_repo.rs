use crate::error::RepoError;
use crate::validation::{
    check_amount, check_length, check_not_blank, check_not_negative, check_optional_length,
    Validate, ValidationError, DESCRIPTION_MAX_LEN, MEMO_MAX_LEN, OFX_ID_MAX_LEN,
    OFX_TYPE_MAX_LEN,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub struct PageOptions {
    pub offset: i64,
    pub limit: i64,
}

impl Validate for PageOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        check_not_negative("offset", self.offset)?;
        check_not_negative("limit", self.limit)
    }
}

/// Narrows `get_all_transactions`. Every set field must match; dates are inclusive.
#[derive(Default, Clone, Debug)]
pub struct Filter {
    pub account_id: Option<i32>,
    pub from: Option<NaiveDate>,
    pub until: Option<NaiveDate>,
    pub category_id: Option<i32>,
    pub tag_id: Option<i32>,
    pub group_id: Option<i32>,
    /// Only transactions without a tag.
    pub untagged: bool,
}

impl Filter {
    pub const NONE: Filter = Filter {
        account_id: None,
        from: None,
        until: None,
        category_id: None,
        tag_id: None,
        group_id: None,
        untagged: false,
    };

    pub fn account(account_id: i32) -> Filter {
        Filter {
            account_id: Some(account_id),
            ..Filter::NONE
        }
    }

    pub(crate) fn matches(&self, transaction: &Transaction) -> bool {
        if self.account_id.is_some_and(|id| id != transaction.account_id) {
            return false;
        }
        if self.from.is_some_and(|from| transaction.date < from) {
            return false;
        }
        if self.until.is_some_and(|until| transaction.date > until) {
            return false;
        }
        if self.category_id.is_some() && self.category_id != transaction.category_id {
            return false;
        }
        if self.tag_id.is_some() && self.tag_id != transaction.tag_id {
            return false;
        }
        if self.group_id.is_some() && self.group_id != transaction.group_id {
            return false;
        }
        !(self.untagged && transaction.tag_id.is_some())
    }
}

#[async_trait]
pub trait TransactionRepo: Sync + Send {
    async fn get_transaction(&self, transaction_id: i32) -> Result<Transaction, RepoError>;

    async fn get_transaction_by_ofx_id(
        &self,
        ofx_id: &str,
    ) -> Result<Option<Transaction>, RepoError>;

    /// Newest first: date descending, then id descending.
    async fn get_all_transactions(
        &self,
        filter: Filter,
        page_options: Option<PageOptions>,
    ) -> Result<Vec<Transaction>, RepoError>;

    /// Fails with [`RepoError::UniquenessViolation`] when the ofx_id has been seen before.
    async fn create_new_transaction(
        &self,
        new_transaction: NewTransaction,
    ) -> Result<Transaction, RepoError>;

    async fn update_transaction(
        &self,
        transaction_id: i32,
        updated_transaction: NewTransaction,
    ) -> Result<Transaction, RepoError>;

    async fn delete_transaction(&self, transaction_id: i32) -> Result<Transaction, RepoError>;
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct Transaction {
    pub id: i32,
    pub account_id: i32,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub description: String,
    pub memo: Option<String>,
    pub category_id: Option<i32>,
    pub tag_id: Option<i32>,
    pub group_id: Option<i32>,
    /// Bank identifier of the imported record, unique across all transactions.
    pub ofx_id: String,
    pub ofx_type: Option<String>,
}

impl PartialOrd for Transaction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Transaction {
    fn cmp(&self, other: &Self) -> Ordering {
        self.date
            .cmp(&other.date)
            .then_with(|| self.id.cmp(&other.id))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NewTransaction {
    pub account_id: i32,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub description: String,
    pub memo: Option<String>,
    pub category_id: Option<i32>,
    pub tag_id: Option<i32>,
    pub group_id: Option<i32>,
    pub ofx_id: String,
    pub ofx_type: Option<String>,
}

impl NewTransaction {
    pub fn new(
        account_id: i32,
        date: NaiveDate,
        amount: Decimal,
        description: impl Into<String>,
        ofx_id: impl Into<String>,
    ) -> NewTransaction {
        NewTransaction {
            account_id,
            date,
            amount,
            description: description.into(),
            memo: None,
            category_id: None,
            tag_id: None,
            group_id: None,
            ofx_id: ofx_id.into(),
            ofx_type: None,
        }
    }

    pub fn with_category(mut self, category_id: i32) -> NewTransaction {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_tag(mut self, tag_id: i32) -> NewTransaction {
        self.tag_id = Some(tag_id);
        self
    }

    pub fn with_group(mut self, group_id: i32) -> NewTransaction {
        self.group_id = Some(group_id);
        self
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> NewTransaction {
        self.memo = Some(memo.into());
        self
    }

    pub fn with_ofx_type(mut self, ofx_type: impl Into<String>) -> NewTransaction {
        self.ofx_type = Some(ofx_type.into());
        self
    }

    pub fn to_transaction(self, id: i32) -> Transaction {
        Transaction {
            id,
            account_id: self.account_id,
            date: self.date,
            amount: self.amount,
            description: self.description,
            memo: self.memo,
            category_id: self.category_id,
            tag_id: self.tag_id,
            group_id: self.group_id,
            ofx_id: self.ofx_id,
            ofx_type: self.ofx_type,
        }
    }
}

impl Validate for NewTransaction {
    fn validate(&self) -> Result<(), ValidationError> {
        check_amount("amount", self.amount)?;
        check_length("description", &self.description, DESCRIPTION_MAX_LEN)?;
        check_optional_length("memo", &self.memo, MEMO_MAX_LEN)?;
        check_not_blank("ofx_id", &self.ofx_id)?;
        check_length("ofx_id", &self.ofx_id, OFX_ID_MAX_LEN)?;
        check_optional_length("ofx_type", &self.ofx_type, OFX_TYPE_MAX_LEN)
    }
}
