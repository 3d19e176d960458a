//! Persistence collaborator: link rows, public profiles and follows.
//!
//! The traits are the narrow contract the services depend on; `SqliteStore`
//! is the bundled implementation (SQLite via sqlx). Ids and `created_at` are
//! assigned by the store on insert.

mod db;
mod links;
mod social;

use anyhow::Result;
use async_trait::async_trait;

use crate::model::{FriendEntry, LinkDraft, LinkId, ProfileLink, ProfileSummary, UserId};

pub use db::SqliteStore;

/// Storage for profile links.
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Inserts a link for `owner` and returns it with its assigned id.
    async fn create(&self, owner: &UserId, draft: &LinkDraft) -> Result<ProfileLink>;

    /// Overwrites platform, username and url. Returns false if `owner` has no link `id`.
    async fn update(&self, owner: &UserId, id: LinkId, draft: &LinkDraft) -> Result<bool>;

    /// Removes the link. Returns false if `owner` has no link `id`.
    async fn delete(&self, owner: &UserId, id: LinkId) -> Result<bool>;

    /// All links of `owner`, oldest first.
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<ProfileLink>>;

    /// Owner of the public profile `handle`, if any.
    async fn find_by_handle(&self, handle: &str) -> Result<Option<UserId>>;
}

/// Public profiles and the follow graph.
#[async_trait]
pub trait SocialGraph: Send + Sync {
    /// Creates or renames the public profile row for `id`.
    async fn upsert_profile(&self, id: &UserId, handle: &str) -> Result<()>;

    /// Profiles whose handle contains `query` (case-insensitive), at most `limit`.
    async fn search_profiles(&self, query: &str, limit: u32) -> Result<Vec<ProfileSummary>>;

    /// Records that `user` follows `friend`. Returns false if it already did.
    async fn add_friend(&self, user: &UserId, friend: &UserId) -> Result<bool>;

    /// Accounts `user` follows, most recently followed first.
    async fn list_friends(&self, user: &UserId) -> Result<Vec<FriendEntry>>;
}

#[cfg(test)]
pub(crate) async fn db_for_tests() -> SqliteStore {
    db::open_memory().await.expect("in-memory store")
}
