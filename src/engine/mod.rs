//! Memory engine orchestrating embedding, persistence, and index search.
//!
//! Provides the caller-facing API: ingest a new entry, query for neighbors,
//! and recall the stored snapshot. The engine owns the record store and the
//! vector index and keeps them consistent with each other.

mod ops;


use std::path::Path;
use std::sync::Mutex;

use crate::config::Config;
use crate::embedding::TextEmbedder;
use crate::errors::Error;
use crate::index::VectorIndex;
use crate::store::RecordStore;

/// Maximum allowed input length (100,000 characters).
pub const MAX_INPUT_LENGTH: usize = 100_000;

/// Store, index, and timestamp floor, guarded as one unit.
///
/// Every ingest holds this lock across append + index insert + search, so the
/// store/index bijection is preserved under concurrent writers and every
/// search sees a consistent snapshot.
pub(crate) struct EngineState {
    pub(crate) store: RecordStore,
    pub(crate) index: VectorIndex,
    pub(crate) clock_floor: i64,
}

/// Semantic memory engine combining embedding generation, durable storage,
/// and exact nearest-neighbor retrieval.
///
/// The embedding model stays behind the [`TextEmbedder`] trait; the engine
/// never touches model internals. All methods take `&self`: the embedder and
/// the engine state are independently locked, so an engine wrapped in `Arc`
/// can be shared across threads.
pub struct MemoryEngine<E: TextEmbedder> {
    pub(crate) embedder: Mutex<E>,
    pub(crate) state: Mutex<EngineState>,
    pub(crate) config: Config,
}

impl<E: TextEmbedder> MemoryEngine<E> {
    /// Open the engine against a database path, replaying the stored records
    /// into a fresh vector index.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Database path contains path traversal sequences (e.g., "../")
    /// - Parent directory cannot be canonicalized
    /// - Database cannot be opened
    /// - A stored embedding does not match the embedder's dimensionality
    pub fn open(db_path: &Path, embedder: E, config: Config) -> Result<Self, Error> {
        use std::path::Component;

        // Path traversal guard: reject parent directory components (works on all platforms)
        for component in db_path.components() {
            if matches!(component, Component::ParentDir) {
                return Err(Error::Config(
                    "Invalid database path: contains '..' which may escape the intended directory"
                        .to_string(),
                ));
            }
        }

        // Validate parent directory exists and is accessible
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::canonicalize(parent).map_err(|e| {
                    Error::Config(format!(
                        "Invalid database path: parent directory not accessible: {}",
                        e
                    ))
                })?;
            }
        }

        let store = RecordStore::open(db_path)?;

        let mut index = VectorIndex::new(embedder.dimensions());
        let snapshot = store.load_all(None)?;
        let entries = snapshot
            .into_iter()
            .map(|record| (record.id, record.embedding))
            .collect();
        index.rebuild(entries)?;

        let clock_floor = store.max_timestamp()?.unwrap_or(0);

        Ok(MemoryEngine {
            embedder: Mutex::new(embedder),
            state: Mutex::new(EngineState {
                store,
                index,
                clock_floor,
            }),
            config,
        })
    }

    /// Embedding dimensionality the engine was opened with.
    pub fn dimensions(&self) -> usize {
        self.lock_state().index.dims()
    }

    /// Configuration in effect.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Validate input length (rejects empty and whitespace-only inputs).
    pub(crate) fn validate_input_length(text: &str) -> Result<(), Error> {
        if text.trim().is_empty() {
            return Err(Error::EmptyInput);
        }
        if text.len() > MAX_INPUT_LENGTH {
            return Err(Error::InputTooLong {
                max_length: MAX_INPUT_LENGTH,
                actual_length: text.len(),
            });
        }
        Ok(())
    }

    /// Check an embedder output against the index dimensionality before
    /// anything is written.
    pub(crate) fn validate_vector(&self, vector: &[f32]) -> Result<(), Error> {
        let expected = self.dimensions();
        if vector.len() != expected {
            return Err(Error::DimensionMismatch {
                expected,
                actual: vector.len(),
            });
        }
        if vector.iter().any(|x| !x.is_finite()) {
            return Err(Error::InvalidVector(
                "Embedding contains NaN or infinite values".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn lock_state(&self) -> std::sync::MutexGuard<'_, EngineState> {
        // Poison recovery: the append transaction cannot leave a partially
        // committed record behind a panicked writer.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub(crate) fn embed_text(&self, text: &str) -> Result<Vec<f32>, Error> {
        let mut embedder = self.embedder.lock().unwrap_or_else(|e| e.into_inner());
        embedder.embed(text)
    }
}
