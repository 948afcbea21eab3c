pub mod config;
pub mod tracing;

use config::Config;
use finance_repo::LedgerRepo;
use std::sync::Arc;

/// Opens the store named by `config`, running migrations for a database.
/// Call [`LedgerRepo::close`] on the handle when done.
pub async fn open_ledger(config: &Config) -> Result<Arc<dyn LedgerRepo>, anyhow::Error> {
    match &config.database {
        Some(database) => {
            finance_repo::sqlx_repo::create_repo(&database.url, database.max_pool_size).await
        }
        None => {
            ::tracing::info!("No database configured, using in-memory ledger");
            Ok(finance_repo::mem_repo::create_repo())
        }
    }
}
