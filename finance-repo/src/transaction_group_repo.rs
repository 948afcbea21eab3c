use crate::error::RepoError;
use crate::validation::{check_name, Validate, ValidationError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct TransactionGroup {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub active: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NewTransactionGroup {
    pub name: String,
    pub description: Option<String>,
    pub active: bool,
}

impl NewTransactionGroup {
    pub fn new(name: impl Into<String>, description: Option<String>) -> NewTransactionGroup {
        NewTransactionGroup {
            name: name.into(),
            description,
            active: true,
        }
    }

    pub fn inactive(mut self) -> NewTransactionGroup {
        self.active = false;
        self
    }

    pub fn to_transaction_group(self, id: i32) -> TransactionGroup {
        TransactionGroup {
            id,
            name: self.name,
            description: self.description,
            active: self.active,
        }
    }
}

impl Validate for NewTransactionGroup {
    fn validate(&self) -> Result<(), ValidationError> {
        check_name(&self.name)
    }
}

#[async_trait]
pub trait TransactionGroupRepo: Sync + Send {
    async fn create_group(
        &self,
        new_group: NewTransactionGroup,
    ) -> Result<TransactionGroup, RepoError>;

    async fn get_group(&self, group_id: i32) -> Result<TransactionGroup, RepoError>;

    async fn get_all_groups(&self) -> Result<Vec<TransactionGroup>, RepoError>;

    async fn update_group(
        &self,
        group_id: i32,
        updated_group: NewTransactionGroup,
    ) -> Result<TransactionGroup, RepoError>;

    /// Member transactions are kept and removed from the group.
    async fn delete_group(&self, group_id: i32) -> Result<TransactionGroup, RepoError>;
}
