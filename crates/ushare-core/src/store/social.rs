//! Public profile rows and follows.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::Row;

use super::db::{unix_timestamp, SqliteStore};
use super::SocialGraph;
use crate::model::{FriendEntry, ProfileSummary, UserId, UNKNOWN_HANDLE};

/// Escapes LIKE wildcards so user input matches literally (escape char `\`).
fn like_pattern(query: &str) -> String {
    let mut out = String::with_capacity(query.len() + 2);
    out.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}

#[async_trait]
impl SocialGraph for SqliteStore {
    async fn upsert_profile(&self, id: &UserId, handle: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO profiles (id, handle, created_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT (id) DO UPDATE SET handle = excluded.handle
            "#,
        )
        .bind(id)
        .bind(handle)
        .bind(unix_timestamp())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn search_profiles(&self, query: &str, limit: u32) -> Result<Vec<ProfileSummary>> {
        // SQLite LIKE is case-insensitive for ASCII.
        let rows = sqlx::query(
            r#"
            SELECT id, handle FROM profiles
            WHERE handle LIKE ?1 ESCAPE '\'
            ORDER BY handle ASC
            LIMIT ?2
            "#,
        )
        .bind(like_pattern(query))
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| ProfileSummary {
                id: row.get("id"),
                handle: row.get("handle"),
            })
            .collect())
    }

    async fn add_friend(&self, user: &UserId, friend: &UserId) -> Result<bool> {
        let r = sqlx::query(
            r#"
            INSERT OR IGNORE INTO friends (user_id, friend_id, created_at)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(user)
        .bind(friend)
        .bind(unix_timestamp())
        .execute(&self.pool)
        .await?;
        Ok(r.rows_affected() > 0)
    }

    async fn list_friends(&self, user: &UserId) -> Result<Vec<FriendEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT f.id AS id, f.friend_id AS friend_id, p.handle AS handle
            FROM friends f
            LEFT JOIN profiles p ON p.id = f.friend_id
            WHERE f.user_id = ?1
            ORDER BY f.created_at DESC, f.id DESC
            "#,
        )
        .bind(user)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| {
                let handle: Option<String> = row.get("handle");
                FriendEntry {
                    id: row.get("id"),
                    friend_id: row.get("friend_id"),
                    handle: handle.unwrap_or_else(|| UNKNOWN_HANDLE.to_string()),
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("al"), "%al%");
        assert_eq!(like_pattern("a_b%"), "%a\\_b\\%%");
        assert_eq!(like_pattern("x\\y"), "%x\\\\y%");
    }
}
