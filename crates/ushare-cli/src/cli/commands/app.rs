//! Handles shared by every command: config, store, identity client, stored session.

use std::sync::Arc;

use anyhow::{Context, Result};
use ushare_core::account::AccountService;
use ushare_core::config::UshareConfig;
use ushare_core::dashboard::Dashboard;
use ushare_core::identity::{RemoteIdentity, SessionFile};
use ushare_core::model::AuthSession;
use ushare_core::store::SqliteStore;

pub struct App {
    pub cfg: UshareConfig,
    pub store: Arc<SqliteStore>,
    pub identity: Arc<RemoteIdentity>,
    pub sessions: SessionFile,
}

impl App {
    pub fn accounts(&self) -> AccountService<RemoteIdentity, SqliteStore> {
        AccountService::new(Arc::clone(&self.identity), Arc::clone(&self.store))
    }

    /// The stored session; fails when nobody is signed in.
    pub fn session(&self) -> Result<AuthSession> {
        self.sessions
            .load()?
            .context("not signed in; run `ushare signin` first")
    }

    pub fn dashboard(&self) -> Result<Dashboard<SqliteStore>> {
        Ok(Dashboard::new(
            Arc::clone(&self.store),
            self.session()?,
            self.cfg.submit_policy,
        ))
    }
}
