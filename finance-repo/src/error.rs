use crate::validation::ValidationError;
use std::fmt::{Display, Formatter};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Account,
    Category,
    Tag,
    TransactionGroup,
    Transaction,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EntityKind::Account => "Account",
            EntityKind::Category => "Category",
            EntityKind::Tag => "Tag",
            EntityKind::TransactionGroup => "Transaction group",
            EntityKind::Transaction => "Transaction",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum RepoError {
    #[error("{0} with id {1} not found")]
    NotFound(EntityKind, i32),
    #[error("Transaction with ofx_id {0} already exists")]
    UniquenessViolation(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RepoError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepoError::NotFound(..))
    }
}
