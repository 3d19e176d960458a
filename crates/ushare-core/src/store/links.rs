//! Link rows: create, update, delete, list by owner.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::db::{unix_timestamp, SqliteStore};
use super::LinkStore;
use crate::model::{LinkDraft, LinkId, ProfileLink, UserId};

fn link_from_row(row: &SqliteRow) -> ProfileLink {
    ProfileLink {
        id: row.get("id"),
        owner_id: row.get("user_id"),
        platform: row.get("platform"),
        username: row.get("username"),
        url: row.get("url"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl LinkStore for SqliteStore {
    async fn create(&self, owner: &UserId, draft: &LinkDraft) -> Result<ProfileLink> {
        let now = unix_timestamp();
        let id = sqlx::query(
            r#"
            INSERT INTO social_links (user_id, platform, username, url, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(owner)
        .bind(&draft.platform)
        .bind(&draft.username)
        .bind(&draft.url)
        .bind(now)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        tracing::info!(link_id = id, owner = %owner, platform = %draft.platform, "link created");
        Ok(ProfileLink {
            id,
            owner_id: owner.clone(),
            platform: draft.platform.clone(),
            username: draft.username.clone(),
            url: draft.url.clone(),
            created_at: now,
        })
    }

    async fn update(&self, owner: &UserId, id: LinkId, draft: &LinkDraft) -> Result<bool> {
        let r = sqlx::query(
            r#"
            UPDATE social_links
            SET platform = ?1,
                username = ?2,
                url = ?3
            WHERE id = ?4 AND user_id = ?5
            "#,
        )
        .bind(&draft.platform)
        .bind(&draft.username)
        .bind(&draft.url)
        .bind(id)
        .bind(owner)
        .execute(&self.pool)
        .await?;
        Ok(r.rows_affected() > 0)
    }

    async fn delete(&self, owner: &UserId, id: LinkId) -> Result<bool> {
        let r = sqlx::query(
            r#"
            DELETE FROM social_links
            WHERE id = ?1 AND user_id = ?2
            "#,
        )
        .bind(id)
        .bind(owner)
        .execute(&self.pool)
        .await?;
        Ok(r.rows_affected() > 0)
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<ProfileLink>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, platform, username, url, created_at
            FROM social_links
            WHERE user_id = ?1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(link_from_row).collect())
    }

    async fn find_by_handle(&self, handle: &str) -> Result<Option<UserId>> {
        let row = sqlx::query(
            r#"
            SELECT id FROM profiles
            WHERE handle = ?1
            "#,
        )
        .bind(handle)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| r.get("id")))
    }
}
