use crate::account_repo::Account;
use crate::category_repo::Category;
use crate::error::{EntityKind, RepoError};
use crate::tag_repo::Tag;
use crate::transaction_group_repo::TransactionGroup;
use crate::transaction_repo::{NewTransaction, Transaction};
use crate::{HealthCheck, LedgerRepo};
use anyhow::anyhow;
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

mod account_repo;
mod category_repo;
mod tag_repo;
mod transaction_group_repo;
mod transaction_repo;

/// Rows of one record kind, keyed by an id handed out from a per-table sequence.
struct Table<T> {
    rows: BTreeMap<i32, T>,
    last_id: i32,
}

impl<T: Clone> Table<T> {
    fn new() -> Table<T> {
        Table {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }

    fn insert_with(&mut self, make_row: impl FnOnce(i32) -> T) -> T {
        self.last_id += 1;
        let row = make_row(self.last_id);
        self.rows.insert(self.last_id, row.clone());
        row
    }

    fn get(&self, id: i32, kind: EntityKind) -> Result<&T, RepoError> {
        self.rows.get(&id).ok_or(RepoError::NotFound(kind, id))
    }

    fn get_mut(&mut self, id: i32, kind: EntityKind) -> Result<&mut T, RepoError> {
        self.rows.get_mut(&id).ok_or(RepoError::NotFound(kind, id))
    }

    fn contains(&self, id: i32) -> bool {
        self.rows.contains_key(&id)
    }

    fn remove(&mut self, id: i32, kind: EntityKind) -> Result<T, RepoError> {
        self.rows.remove(&id).ok_or(RepoError::NotFound(kind, id))
    }

    fn values(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }
}

struct State {
    accounts: Table<Account>,
    categories: Table<Category>,
    tags: Table<Tag>,
    groups: Table<TransactionGroup>,
    transactions: Table<Transaction>,
    /// ofx_id -> transaction id, the in-memory counterpart of the unique index.
    ofx_ids: HashMap<String, i32>,
}

impl State {
    /// Every id a transaction points at must exist, as a foreign key would require.
    fn check_references(&self, transaction: &NewTransaction) -> Result<(), RepoError> {
        if !self.accounts.contains(transaction.account_id) {
            return Err(RepoError::NotFound(
                EntityKind::Account,
                transaction.account_id,
            ));
        }
        if let Some(category_id) = transaction.category_id {
            if !self.categories.contains(category_id) {
                return Err(RepoError::NotFound(EntityKind::Category, category_id));
            }
        }
        if let Some(tag_id) = transaction.tag_id {
            if !self.tags.contains(tag_id) {
                return Err(RepoError::NotFound(EntityKind::Tag, tag_id));
            }
        }
        if let Some(group_id) = transaction.group_id {
            if !self.groups.contains(group_id) {
                return Err(RepoError::NotFound(EntityKind::TransactionGroup, group_id));
            }
        }
        Ok(())
    }

    fn transactions_mut(&mut self) -> impl Iterator<Item = &mut Transaction> {
        self.transactions.rows.values_mut()
    }
}

pub struct MemRepo {
    state: RwLock<State>,
}

impl MemRepo {
    pub fn new() -> MemRepo {
        let state = State {
            accounts: Table::new(),
            categories: Table::new(),
            tags: Table::new(),
            groups: Table::new(),
            transactions: Table::new(),
            ofx_ids: HashMap::new(),
        };
        MemRepo {
            state: RwLock::new(state),
        }
    }

    fn read_lock(&self) -> Result<RwLockReadGuard<State>, anyhow::Error> {
        self.state
            .read()
            .map_err(|_| anyhow!("Unable to acquire lock"))
    }

    fn write_lock(&self) -> Result<RwLockWriteGuard<State>, anyhow::Error> {
        self.state
            .write()
            .map_err(|_| anyhow!("Unable to acquire lock"))
    }
}

impl Default for MemRepo {
    fn default() -> Self {
        MemRepo::new()
    }
}

#[async_trait]
impl HealthCheck for MemRepo {
    async fn check(&self) -> bool {
        self.read_lock().is_ok()
    }
}

#[async_trait]
impl LedgerRepo for MemRepo {
    async fn close(&self) {}
}

pub fn create_repo() -> Arc<dyn LedgerRepo> {
    Arc::new(MemRepo::new())
}
