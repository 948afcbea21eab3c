use async_trait::async_trait;

pub mod account_repo;
pub mod category_repo;
pub mod error;
pub mod tag_repo;
pub mod transaction_group_repo;
pub mod transaction_repo;
pub mod validation;

// implementation modules
pub mod mem_repo;
pub mod sqlx_repo;

use account_repo::AccountRepo;
use category_repo::CategoryRepo;
use tag_repo::TagRepo;
use transaction_group_repo::TransactionGroupRepo;
use transaction_repo::TransactionRepo;

#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn check(&self) -> bool;
}

/// Handle to a store holding every record kind of the ledger.
///
/// Deletes that span record kinds (an account and its transactions, a label and the
/// references to it) happen inside one store, so they are applied atomically.
#[async_trait]
pub trait LedgerRepo:
    AccountRepo + CategoryRepo + TagRepo + TransactionGroupRepo + TransactionRepo + HealthCheck
{
    /// Releases the store's resources. The handle must not be used afterwards.
    async fn close(&self);
}
