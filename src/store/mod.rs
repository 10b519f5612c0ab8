//! SQLite backend for durable record storage.
//!
//! This module provides:
//! - `RecordStore`: append-only SQLite persistence, source of truth
//! - `codec`: embedding BLOB conversion

pub mod codec;

use rusqlite::{Connection, OptionalExtension, Result as SqliteResult, params};
use std::path::Path;

use crate::errors::Error;
use crate::record::Record;

pub use self::codec::{blob_to_vec, vec_to_blob};

/// Maximum allowed limit for snapshot reads.
pub const MAX_RECALL_LIMIT: usize = 10_000;

/// Validate a result limit is within acceptable bounds.
pub fn validate_limit(limit: usize) -> Result<(), Error> {
    if limit == 0 {
        return Err(Error::InvalidLimit(
            "Limit must be greater than 0".to_string(),
        ));
    }
    if limit > i64::MAX as usize || limit > MAX_RECALL_LIMIT {
        return Err(Error::InvalidLimit(format!(
            "Limit {} exceeds maximum allowed ({})",
            limit, MAX_RECALL_LIMIT
        )));
    }
    Ok(())
}

/// Append-only SQLite store for records.
///
/// Each row holds `(text, annotation, embedding, timestamp)`; ids are SQLite
/// rowids and correlate rows with their vector index entries. Rows are never
/// updated in place.
pub struct RecordStore {
    conn: Connection,
}

fn create_schema(conn: &mut Connection) -> Result<(), Error> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS records (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            text TEXT NOT NULL,
            annotation TEXT NOT NULL DEFAULT '',
            embedding BLOB NOT NULL,
            timestamp INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_records_timestamp ON records(timestamp DESC);
        "#,
    )?;
    Ok(())
}

fn row_to_record(
    id: i64,
    text: String,
    annotation: String,
    blob: Vec<u8>,
    timestamp: i64,
) -> Result<Record, Error> {
    let embedding = codec::blob_to_vec(&blob).map_err(|e| Error::CorruptRecord {
        id,
        reason: e.to_string(),
    })?;
    Ok(Record {
        id,
        text,
        annotation,
        embedding,
        timestamp,
        distance: None,
    })
}

impl RecordStore {
    /// Open or create a SQLite database at the given path.
    ///
    /// Initializes the schema if the database is new.
    ///
    /// # Errors
    ///
    /// Returns error if the database cannot be opened or schema
    /// initialization fails.
    pub fn open(path: &Path) -> Result<Self, Error> {
        let mut conn = Connection::open(path)?;
        create_schema(&mut conn)?;
        Ok(Self { conn })
    }

    /// Append a new record inside a scoped transaction.
    ///
    /// A partially written record is never visible to readers: the insert
    /// either commits fully or rolls back.
    ///
    /// # Errors
    ///
    /// Returns error if the embedding cannot be encoded or the write fails.
    pub fn append(
        &mut self,
        text: &str,
        annotation: &str,
        embedding: &[f32],
        timestamp: i64,
    ) -> Result<i64, Error> {
        let blob = vec_to_blob(embedding)?;

        let tx = self.conn.transaction()?;
        tx.execute(
            r#"
            INSERT INTO records (text, annotation, embedding, timestamp)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![text, annotation, &blob, timestamp],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(id)
    }

    /// Retrieve a single record by id.
    ///
    /// Returns `None` if the record does not exist.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails or the stored embedding is corrupt.
    pub fn get(&self, id: i64) -> Result<Option<Record>, Error> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, text, annotation, embedding, timestamp
            FROM records
            WHERE id = ?1
            "#,
        )?;

        let row = stmt
            .query_row([id], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, Vec<u8>>(3)?,
                    row.get::<_, i64>(4)?,
                ))
            })
            .optional()?;

        match row {
            Some((id, text, annotation, blob, timestamp)) => {
                Ok(Some(row_to_record(id, text, annotation, blob, timestamp)?))
            }
            None => Ok(None),
        }
    }

    /// Load the full ordered snapshot, most recent first.
    ///
    /// Records are ordered by timestamp descending, then id descending, so
    /// rows sharing a timestamp still come back in a deterministic
    /// newest-first order. With `limit`, returns at most that many.
    ///
    /// # Errors
    ///
    /// Returns error if the limit is invalid, the query fails, or a stored
    /// embedding is corrupt.
    pub fn load_all(&self, limit: Option<usize>) -> Result<Vec<Record>, Error> {
        if let Some(limit) = limit {
            validate_limit(limit)?;
        }

        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, text, annotation, embedding, timestamp
            FROM records
            ORDER BY timestamp DESC, id DESC
            LIMIT ?1
            "#,
        )?;

        let rows: SqliteResult<Vec<(i64, String, String, Vec<u8>, i64)>> = stmt
            .query_map(params![limit.map(|l| l as i64).unwrap_or(-1)], |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                ))
            })?
            .collect();

        rows?
            .into_iter()
            .map(|(id, text, annotation, blob, timestamp)| {
                row_to_record(id, text, annotation, blob, timestamp)
            })
            .collect()
    }

    /// Number of stored records.
    pub fn count(&self) -> Result<usize, Error> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Largest stored timestamp, or `None` for an empty store.
    ///
    /// Seeds the engine's monotonic clock floor on cold start.
    pub fn max_timestamp(&self) -> Result<Option<i64>, Error> {
        let max: Option<i64> = self
            .conn
            .query_row("SELECT MAX(timestamp) FROM records", [], |row| row.get(0))?;
        Ok(max)
    }
}
