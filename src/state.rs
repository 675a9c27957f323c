// src/state.rs
use crate::auth::{AccountConfig, AccountService};
use crate::config::Config;
use crate::db::Database;

/// Everything a request handler needs, shared by all workers.
pub struct AppState {
    pub db: Database,
    pub accounts: AccountService,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            db: Database::new(config.db_path.clone()),
            accounts: AccountService::new(AccountConfig::from(config)),
        }
    }
}
