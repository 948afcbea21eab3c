mod account_repo;
mod category_repo;
mod tag_repo;
mod transaction_group_repo;
mod transaction_repo;

use crate::error::{EntityKind, RepoError};
use crate::{HealthCheck, LedgerRepo};
use anyhow::Context;
use async_trait::async_trait;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::{query, Pool, Postgres};
use std::sync::Arc;
use tracing::{info, instrument};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

const OFX_ID_CONSTRAINT: &str = "transactions_ofx_id_key";

pub struct SQLxRepo {
    pool: Pool<Postgres>,
}

impl SQLxRepo {
    pub fn new(pool: Pool<Postgres>) -> SQLxRepo {
        SQLxRepo { pool }
    }

    /// Opens a pool and brings the schema up to date.
    #[instrument(skip(database_url))]
    pub async fn connect(
        database_url: &str,
        max_pool_size: u32,
    ) -> Result<SQLxRepo, anyhow::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_pool_size)
            .connect(database_url)
            .await
            .context("Unable to connect to database")?;
        MIGRATOR
            .run(&pool)
            .await
            .context("Unable to run database migrations")?;
        info!("Database migrations applied");
        Ok(SQLxRepo::new(pool))
    }
}

pub async fn create_repo(
    database_url: &str,
    max_pool_size: u32,
) -> Result<Arc<dyn LedgerRepo>, anyhow::Error> {
    let repo = SQLxRepo::connect(database_url, max_pool_size).await?;
    Ok(Arc::new(repo))
}

#[async_trait]
impl HealthCheck for SQLxRepo {
    async fn check(&self) -> bool {
        query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

#[async_trait]
impl LedgerRepo for SQLxRepo {
    async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}

/// Turns a constraint violation into the matching [`RepoError`], falling back to
/// `Other` with `context` for anything else.
fn map_constraint_error(
    error: sqlx::Error,
    foreign_keys: &[(&str, EntityKind, i32)],
    ofx_id: Option<&str>,
    context: String,
) -> RepoError {
    if let sqlx::Error::Database(db_error) = &error {
        if db_error.is_unique_violation() {
            if let Some(ofx_id) = ofx_id {
                if db_error.constraint() == Some(OFX_ID_CONSTRAINT) {
                    return RepoError::UniquenessViolation(ofx_id.to_owned());
                }
            }
        }
        if db_error.is_foreign_key_violation() {
            let violated = foreign_keys
                .iter()
                .find(|(constraint, _, _)| db_error.constraint() == Some(*constraint));
            if let Some((_, kind, id)) = violated {
                return RepoError::NotFound(*kind, *id);
            }
        }
    }
    RepoError::Other(anyhow::Error::new(error).context(context))
}
