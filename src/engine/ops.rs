//! Ingest, query, and recall operations for the memory engine.

use chrono::Utc;

use crate::embedding::TextEmbedder;
use crate::errors::Error;
use crate::record::Record;

use super::{EngineState, MemoryEngine};

impl<E: TextEmbedder> MemoryEngine<E> {
    #[must_use = "handle the error or results may be lost"]
    /// Store a new entry and return its nearest neighbors.
    ///
    /// Embeds the text, appends `(text, annotation, embedding, now)` to the
    /// record store, adds the embedding to the vector index, and searches
    /// with the new record's own embedding as the query. The just-inserted
    /// record appears in the results at distance 0 unless the
    /// `exclude_self` configuration flag is set.
    ///
    /// The embedding call runs before anything is written: if the model
    /// fails, no trace of the entry is observable. Append, index insert, and
    /// search then execute under a single lock, so concurrent ingests
    /// serialize and none are lost.
    ///
    /// # Arguments
    ///
    /// * `text` - Entry text (1 to 100,000 characters)
    /// * `annotation` - Companion annotation, may be empty
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Text is empty or whitespace-only
    /// - Text exceeds 100,000 characters
    /// - Embedding generation fails
    /// - The embedding has unexpected dimensions
    /// - The database write fails
    pub fn ingest(&self, text: &str, annotation: &str) -> Result<Vec<Record>, Error> {
        Self::validate_input_length(text)?;

        let vector = self.embed_text(text)?;
        self.validate_vector(&vector)?;

        let mut state = self.lock_state();

        let timestamp = Utc::now().timestamp_millis().max(state.clock_floor);
        let id = state.store.append(text, annotation, &vector, timestamp)?;
        state.index.insert(id, vector.clone())?;
        state.clock_floor = timestamp;

        let exclude = if self.config.exclude_self {
            Some(id)
        } else {
            None
        };
        Self::neighbors(&state, &vector, self.config.neighbor_count, exclude)
    }

    #[must_use = "handle the error or results may be lost"]
    /// Return the nearest neighbors for a query text without storing it.
    ///
    /// Read-only: embeds the query and ranks the current store contents by
    /// squared L2 distance. For a fixed snapshot and a deterministic
    /// embedder, repeated calls return identical ordered results.
    ///
    /// # Errors
    ///
    /// Returns error if the query is empty, too long, or embedding fails.
    pub fn query(&self, text: &str) -> Result<Vec<Record>, Error> {
        Self::validate_input_length(text)?;

        let vector = self.embed_text(text)?;
        self.validate_vector(&vector)?;

        let state = self.lock_state();
        Self::neighbors(&state, &vector, self.config.neighbor_count, None)
    }

    #[must_use = "handle the error or results may be lost"]
    /// Load the stored snapshot, most recent first.
    ///
    /// # Arguments
    ///
    /// * `limit` - Maximum number of records to return (1 to 10,000), or
    ///   `None` for all
    pub fn recall(&self, limit: Option<usize>) -> Result<Vec<Record>, Error> {
        let state = self.lock_state();
        state.store.load_all(limit)
    }

    /// Low-level append used by bulk import: takes a prepared embedding and
    /// an optional historical timestamp, bypassing the embedding step.
    ///
    /// Keeps the index consistent with the store and ratchets the clock
    /// floor so later ingests never time-travel behind imported records.
    pub(crate) fn append_prepared(
        &self,
        text: &str,
        annotation: &str,
        vector: Vec<f32>,
        timestamp: Option<i64>,
    ) -> Result<i64, Error> {
        Self::validate_input_length(text)?;
        self.validate_vector(&vector)?;

        let mut state = self.lock_state();

        let timestamp = timestamp.unwrap_or_else(|| Utc::now().timestamp_millis());
        let id = state.store.append(text, annotation, &vector, timestamp)?;
        state.index.insert(id, vector)?;
        state.clock_floor = state.clock_floor.max(timestamp);

        Ok(id)
    }

    /// Rank the indexed vectors against `query` and map the hits back to
    /// store rows, attaching distances.
    fn neighbors(
        state: &EngineState,
        query: &[f32],
        k: usize,
        exclude: Option<i64>,
    ) -> Result<Vec<Record>, Error> {
        let fetch = if exclude.is_some() {
            k.saturating_add(1)
        } else {
            k
        };

        let hits = state.index.search(query, fetch)?;

        let mut records = Vec::with_capacity(k);
        for hit in hits {
            if Some(hit.id) == exclude {
                continue;
            }
            if records.len() == k {
                break;
            }
            let mut record = state
                .store
                .get(hit.id)?
                .ok_or_else(|| Error::CorruptRecord {
                    id: hit.id,
                    reason: "indexed record missing from store".to_string(),
                })?;
            record.distance = Some(hit.distance);
            records.push(record);
        }

        Ok(records)
    }
}
