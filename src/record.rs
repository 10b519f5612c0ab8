//! Record data types.

use serde::Serialize;

/// A single stored memory record with an optional search distance.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    /// Row identifier assigned by the record store.
    pub id: i64,
    /// Original entry text.
    pub text: String,
    /// Companion annotation (empty string when absent).
    pub annotation: String,
    /// Embedding vector, length fixed by the embedding model.
    pub embedding: Vec<f32>,
    /// Creation time in epoch milliseconds, assigned by the engine.
    pub timestamp: i64,

    /// Squared L2 distance to the query (lower = closer).
    /// Populated on search results only; never persisted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f32>,
}
