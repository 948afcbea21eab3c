pub mod generator;

use finance_repo::account_repo::{Account, NewAccount};
use finance_repo::LedgerRepo;
use serde::Deserialize;
use std::fs;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

#[derive(Deserialize)]
struct TestConfig {
    database_url: String,
}

#[derive(Debug)]
pub enum RepoType {
    SQLx,
    Mem,
}

/// Builds the store under test. The SQLx store reads `database_url` from `config_test.toml`.
pub async fn build_repo(repo_type: RepoType) -> Arc<dyn LedgerRepo> {
    match repo_type {
        RepoType::Mem => finance_repo::mem_repo::create_repo(),
        RepoType::SQLx => {
            let config = fs::read_to_string("config_test.toml")
                .expect("SQLx cases need config_test.toml with a database_url");
            let config: TestConfig = toml::from_str(config.as_str()).unwrap();
            let repo = finance_repo::sqlx_repo::create_repo(&config.database_url, 2)
                .await
                .unwrap();
            info!("Connected to test database");
            repo
        }
    }
}

/// Account with a unique name so SQLx cases sharing a database do not see each other.
pub async fn create_test_account(repo: &Arc<dyn LedgerRepo>) -> Account {
    let name = "test-account-".to_owned() + &Uuid::new_v4().simple().to_string()[..12];
    let account = repo.create_account(NewAccount::new(name)).await.unwrap();
    info!(account_id = account.id, "Created account");
    account
}

pub fn unique_ofx_id() -> String {
    "ofx-".to_owned() + &Uuid::new_v4().to_string()
}
