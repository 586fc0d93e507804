//! SQLite-backed storage for processed images.
//!
//! The store is a single `images` table holding encoded image payloads
//! keyed by an auto-incrementing integer id. Ids are assigned by SQLite's
//! `AUTOINCREMENT`, so they increase monotonically and are never reused
//! after a delete.
//!
//! Unlike a lazily opened global handle, [`ImageStore`] is constructed
//! explicitly with [`ImageStore::open`] and owns its connection pool; drop
//! it (or call [`ImageStore::close`]) to release the database. All
//! operations are single-record and atomic - a `put` either fully creates
//! a record or creates nothing.
//!
//! # Examples
//! ```no_run
//! use tonelab_store::ImageStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), tonelab_store::StoreError> {
//!     let store = ImageStore::open("/path/to/images.db").await?;
//!     let id = store.put("data:image/png;base64,...", "grayscale_cat.png").await?;
//!     let records = store.list_all().await?;
//!     assert!(records.iter().any(|r| r.id == id));
//!     store.delete(id).await?;
//!     Ok(())
//! }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::{
    migrate::MigrateDatabase,
    sqlite::{Sqlite, SqlitePoolOptions},
    Pool,
};
use thiserror::Error;

/// Maximum number of concurrent database connections in the pool
const MAX_CONNECTIONS: u32 = 3;

/// Name of the single table holding image records (schema version 1).
const IMAGES_TABLE: &str = "images";

/// Errors surfaced by the store.
///
/// Every operation fails the same way: the underlying storage was
/// unavailable or rejected the statement. There is no per-operation
/// taxonomy - a missing id on delete is not an error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying SQLite database could not be reached or updated.
    #[error("Image storage unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),
}

/// A stored image record.
///
/// `data` holds the encoded image as a self-describing string (a
/// `data:image/png;base64,...` URL); `created_at` is epoch milliseconds.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ImageRecord {
    /// Unique id assigned by the store; monotonic, never reused.
    pub id: i64,
    /// Encoded image payload.
    pub data: String,
    /// Display name of the image.
    pub name: String,
    /// Creation timestamp in epoch milliseconds.
    pub created_at: i64,
}

/// Handle to an on-disk image store.
///
/// Cloning is cheap (the pool is internally reference-counted); the store
/// is single-process, single-writer.
#[derive(Debug, Clone)]
pub struct ImageStore {
    pool: Pool<Sqlite>,
}

impl ImageStore {
    /// Open (creating if necessary) the store at `db_path`.
    ///
    /// Creates the database file and the `images` table on first use. The
    /// schema needs no migrations beyond this initial creation.
    pub async fn open(db_path: &str) -> Result<Self, StoreError> {
        if !Sqlite::database_exists(db_path).await.unwrap_or(false) {
            Sqlite::create_database(db_path).await?;
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect(&format!("sqlite:{}", db_path))
            .await?;

        sqlx::query(&format!(
            "CREATE TABLE IF NOT EXISTS {IMAGES_TABLE} (
                 id INTEGER PRIMARY KEY AUTOINCREMENT,
                 data TEXT NOT NULL,
                 name TEXT NOT NULL,
                 created_at INTEGER NOT NULL
                 )"
        ))
        .execute(&pool)
        .await?;

        log::debug!("opened image store at {db_path}");
        Ok(Self { pool })
    }

    /// Insert a new image record, returning its freshly assigned id.
    pub async fn put(&self, data: &str, name: &str) -> Result<i64, StoreError> {
        let created_at = Utc::now().timestamp_millis();
        let result = sqlx::query(&format!(
            "INSERT INTO {IMAGES_TABLE} (data, name, created_at) VALUES (?, ?, ?)"
        ))
        .bind(data)
        .bind(name)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        log::debug!("stored image {name:?} as id {id}");
        Ok(id)
    }

    /// Fetch every stored record in insertion (id) order.
    pub async fn list_all(&self) -> Result<Vec<ImageRecord>, StoreError> {
        Ok(sqlx::query_as::<_, ImageRecord>(&format!(
            "SELECT id, data, name, created_at FROM {IMAGES_TABLE} ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?)
    }

    /// Delete the record with the given id.
    ///
    /// Idempotent: deleting an id that does not exist succeeds and changes
    /// nothing.
    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query(&format!("DELETE FROM {IMAGES_TABLE} WHERE id=?"))
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            log::debug!("delete of absent image id {id} ignored");
        }
        Ok(())
    }

    /// Number of stored records.
    pub async fn count(&self) -> Result<i64, StoreError> {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {IMAGES_TABLE}"))
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }

    /// Close the underlying connection pool.
    ///
    /// Outstanding clones of this store will start failing with
    /// [`StoreError::Unavailable`] afterwards.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Each test opens its own database file so tests stay independent.
    async fn fresh_store(file_name: &str) -> ImageStore {
        let db_path = std::env::temp_dir().join(file_name);
        let _ = std::fs::remove_file(&db_path);
        ImageStore::open(db_path.to_str().expect("utf-8 temp path"))
            .await
            .expect("open store")
    }

    #[tokio::test]
    async fn test_open_creates_database_file() {
        let db_path = std::env::temp_dir().join("tonelab-store-open.db");
        let _ = std::fs::remove_file(&db_path);

        let _store = ImageStore::open(db_path.to_str().unwrap()).await.unwrap();
        assert!(db_path.exists());
    }

    #[tokio::test]
    async fn test_open_is_reusable_across_instances() {
        let db_path = std::env::temp_dir().join("tonelab-store-reopen.db");
        let _ = std::fs::remove_file(&db_path);
        let path = db_path.to_str().unwrap();

        let first = ImageStore::open(path).await.unwrap();
        let id = first.put("payload", "kept.png").await.unwrap();
        first.close().await;

        // Records survive a close/reopen cycle.
        let second = ImageStore::open(path).await.unwrap();
        let records = second.list_all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, id);
        assert_eq!(records[0].name, "kept.png");
    }

    #[tokio::test]
    async fn test_put_then_list_contains_record() {
        let store = fresh_store("tonelab-store-put.db").await;

        let id = store.put("data:image/png;base64,AAAA", "grayscale_cat.png")
            .await
            .unwrap();

        let records = store.list_all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, id);
        assert_eq!(records[0].data, "data:image/png;base64,AAAA");
        assert_eq!(records[0].name, "grayscale_cat.png");
        assert!(records[0].created_at > 0);
    }

    #[tokio::test]
    async fn test_ids_increase_monotonically() {
        let store = fresh_store("tonelab-store-ids.db").await;

        let a = store.put("a", "a.png").await.unwrap();
        let b = store.put("b", "b.png").await.unwrap();
        let c = store.put("c", "c.png").await.unwrap();
        assert!(a < b && b < c);
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let store = fresh_store("tonelab-store-id-reuse.db").await;

        let first = store.put("a", "a.png").await.unwrap();
        store.delete(first).await.unwrap();

        let second = store.put("b", "b.png").await.unwrap();
        assert!(second > first, "id {second} must not reuse deleted id {first}");
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let store = fresh_store("tonelab-store-delete.db").await;

        let keep = store.put("keep", "keep.png").await.unwrap();
        let doomed = store.put("drop", "drop.png").await.unwrap();
        assert_eq!(store.count().await.unwrap(), 2);

        store.delete(doomed).await.unwrap();

        let records = store.list_all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, keep);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = fresh_store("tonelab-store-idempotent.db").await;

        let id = store.put("x", "x.png").await.unwrap();
        store.delete(id).await.unwrap();
        // Second delete of the same id and a delete of a never-assigned id
        // are both fine.
        store.delete(id).await.unwrap();
        store.delete(9999).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_all_is_in_insertion_order() {
        let store = fresh_store("tonelab-store-order.db").await;

        for name in ["one.png", "two.png", "three.png"] {
            store.put("payload", name).await.unwrap();
        }

        let names: Vec<String> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, ["one.png", "two.png", "three.png"]);
    }

    #[tokio::test]
    async fn test_operations_fail_after_close() {
        let store = fresh_store("tonelab-store-closed.db").await;
        store.close().await;

        assert!(matches!(
            store.put("x", "x.png").await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(matches!(
            store.list_all().await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(matches!(
            store.delete(1).await,
            Err(StoreError::Unavailable(_))
        ));
    }
}
