// Blindodon - An accessibility-first Mastodon client
// Copyright (C) 2025 Blindodon Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Cache module for local entity storage
//!
//! Uses SQLite for persistent caching of users, notes, files and other
//! entities received from the server. Each entity is stored as its JSON
//! snapshot, keyed by kind and identifier.

use anyhow::{Context, Result};
use serde::Serialize;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::decode::{EntityKind, Schema};
use crate::log_cache;
use crate::models::{Entity, Id, MessagingMessage, Note, Page};

/// Cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Database file path
    pub db_path: PathBuf,
    /// Maximum pool connections
    pub max_connections: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            db_path: get_db_path(),
            max_connections: 5,
        }
    }
}

/// One row destined for the entities table
struct Row {
    kind: EntityKind,
    id: Id,
    owner_id: Option<Id>,
    data: String,
}

impl Row {
    fn of<T: Entity + Schema>(entity: &T) -> Result<Self> {
        Ok(Self {
            kind: T::KIND,
            id: entity.id().clone(),
            owner_id: entity.owner_id().cloned(),
            data: to_json(entity)?,
        })
    }
}

fn to_json<T: Serialize>(entity: &T) -> Result<String> {
    serde_json::to_string(entity).context("Failed to serialize entity")
}

/// Cache manager for received entities
pub struct EntityCache {
    pool: SqlitePool,
}

impl EntityCache {
    /// Open the cache with default configuration
    pub async fn new() -> Result<Self> {
        Self::open(CacheConfig::default()).await
    }

    /// Open (or create) the cache database described by `config`
    pub async fn open(config: CacheConfig) -> Result<Self> {
        if let Some(parent) = config.db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db_url = format!("sqlite:{}?mode=rwc", config.db_path.display());

        info!("Opening cache database at {}", config.db_path.display());

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&db_url)
            .await
            .with_context(|| format!("Failed to open {}", config.db_path.display()))?;

        let cache = Self { pool };
        cache.init_schema().await?;

        Ok(cache)
    }

    /// Open a throwaway in-memory cache
    pub async fn in_memory() -> Result<Self> {
        // Each connection would get its own memory database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        let cache = Self { pool };
        cache.init_schema().await?;

        Ok(cache)
    }

    /// Initialize the database schema
    async fn init_schema(&self) -> Result<()> {
        debug!("Initializing cache schema");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS entities (
                kind TEXT NOT NULL,
                id TEXT NOT NULL,
                owner_id TEXT,
                data TEXT NOT NULL,
                cached_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                PRIMARY KEY (kind, id)
            );

            CREATE INDEX IF NOT EXISTS idx_entities_owner ON entities(kind, owner_id);
            CREATE INDEX IF NOT EXISTS idx_entities_cached ON entities(cached_at);
            "#,
        )
        .execute(&self.pool)
        .await?;

        info!("Cache schema initialized");

        Ok(())
    }

    /// Get the database pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Save or replace a single entity
    pub async fn put<T: Entity + Schema>(&self, entity: &T) -> Result<()> {
        let row = Row::of(entity)?;
        self.write_rows(vec![row]).await?;
        Ok(())
    }

    /// Save a note together with every snapshot embedded in it
    ///
    /// Returns the number of rows written.
    pub async fn put_note(&self, note: &Note) -> Result<usize> {
        let mut rows = Vec::new();
        collect_note_rows(note, &mut rows)?;
        self.write_rows(rows).await
    }

    /// Save a chat message with its sender and attached file
    pub async fn put_message(&self, message: &MessagingMessage) -> Result<usize> {
        let mut rows = vec![Row::of(message)?, Row::of(&message.user)?];
        if let Some(file) = &message.file {
            rows.push(Row::of(file)?);
        }
        self.write_rows(rows).await
    }

    /// Save a page with its author and cover image
    pub async fn put_page(&self, page: &Page) -> Result<usize> {
        let mut rows = vec![Row::of(page)?, Row::of(&page.user)?];
        if let Some(image) = &page.eye_catching_image {
            rows.push(Row::of(image)?);
        }
        self.write_rows(rows).await
    }

    async fn write_rows(&self, rows: Vec<Row>) -> Result<usize> {
        let mut tx = self.pool.begin().await?;

        for row in &rows {
            sqlx::query(
                r#"
                INSERT INTO entities (kind, id, owner_id, data, cached_at)
                VALUES (?, ?, ?, ?, CURRENT_TIMESTAMP)
                ON CONFLICT(kind, id) DO UPDATE SET
                    owner_id = COALESCE(excluded.owner_id, entities.owner_id),
                    data = excluded.data,
                    cached_at = excluded.cached_at
                "#,
            )
            .bind(row.kind.as_str())
            .bind(row.id.as_str())
            .bind(row.owner_id.as_ref().map(Id::as_str))
            .bind(&row.data)
            .execute(&mut *tx)
            .await?;

            log_cache!(stored, row.kind, row.id);
        }

        tx.commit().await?;

        Ok(rows.len())
    }

    /// Get a cached entity by id
    pub async fn get<T: Entity + Schema>(&self, id: &Id) -> Result<Option<T>> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT data FROM entities WHERE kind = ? AND id = ?")
                .bind(T::KIND.as_str())
                .bind(id.as_str())
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some((data,)) => {
                log_cache!(hit, T::KIND, id);
                let entity = serde_json::from_str(&data)
                    .with_context(|| format!("Corrupt cached {} {}", T::KIND, id))?;
                Ok(Some(entity))
            }
            None => {
                log_cache!(miss, T::KIND, id);
                Ok(None)
            }
        }
    }

    /// Delete a cached entity, returning whether it existed
    pub async fn remove<T: Entity + Schema>(&self, id: &Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM entities WHERE kind = ? AND id = ?")
            .bind(T::KIND.as_str())
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Number of cached entities of a kind
    pub async fn count(&self, kind: EntityKind) -> Result<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM entities WHERE kind = ?")
            .bind(kind.as_str())
            .fetch_one(&self.pool)
            .await?;

        Ok(count.max(0) as u64)
    }

    /// Cached notes written by a user, newest first
    pub async fn notes_by_user(&self, user_id: &Id) -> Result<Vec<Note>> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT data FROM entities WHERE kind = ? AND owner_id = ?",
        )
        .bind(EntityKind::Note.as_str())
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        let mut notes = rows
            .into_iter()
            .map(|(data,)| {
                serde_json::from_str::<Note>(&data)
                    .with_context(|| format!("Corrupt cached note by {}", user_id))
            })
            .collect::<Result<Vec<_>>>()?;
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(notes)
    }

    /// Clean up old cached data
    pub async fn cleanup(&self, max_age_days: u32) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM entities
            WHERE cached_at < datetime('now', '-' || ? || ' days')
            "#,
        )
        .bind(max_age_days)
        .execute(&self.pool)
        .await?;

        let deleted = result.rows_affected();
        if deleted > 0 {
            info!("Cleaned up {} old cached entities", deleted);
        }

        Ok(deleted)
    }
}

/// Flatten a note and its embedded snapshots into rows
fn collect_note_rows(note: &Note, rows: &mut Vec<Row>) -> Result<()> {
    rows.push(Row::of(note)?);
    rows.push(Row::of(&note.user)?);

    for file in &note.files {
        rows.push(Row::of(file)?);
    }
    if let Some(reply) = &note.reply {
        collect_note_rows(reply, rows)?;
    }
    if let Some(renote) = &note.renote {
        collect_note_rows(renote, rows)?;
    }

    Ok(())
}

/// Get the database file path
fn get_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Blindodon")
        .join("misskey-cache.db")
}
