//! engram - a semantic memory store for journal entries.
//!
//! This crate persists short text records together with vector embeddings
//! and answers k-nearest-neighbor queries by exact squared-L2 distance.
//! All operations are synchronous (no async/await required).
//!
//! # Example
//!
//! ```no_run
//! use engram::{Config, MemoryEngine};
//! use engram::embedding::OnnxEmbedder;
//!
//! let config = Config::default();
//! let embedder = OnnxEmbedder::new(&config.embedding_model)
//!     .expect("Failed to load embedding model");
//! let db_path = config.database_path.clone();
//! let engine = MemoryEngine::open(&db_path, embedder, config)
//!     .expect("Failed to open engine");
//!
//! // Store an entry; its nearest neighbors come back, the new entry
//! // itself ranked first at distance 0.
//! let neighbors = engine.ingest("I felt anxious today", "Let's breathe").unwrap();
//! for record in &neighbors {
//!     println!("{:.4}: {}", record.distance.unwrap_or(0.0), record.text);
//! }
//!
//! // Query without storing anything.
//! let results = engine.query("I feel anxious").unwrap();
//! for record in &results {
//!     println!("{:.4}: {}", record.distance.unwrap_or(0.0), record.text);
//! }
//! ```
//!
//! # Consistency
//!
//! The engine keeps the durable record store and the in-memory vector index
//! in lockstep: an ingest either completes fully (durable and indexed) or
//! leaves no observable trace. Engine state is guarded by a single writer
//! lock, so an engine wrapped in `Arc` is safe to share across threads.

pub mod commands;
pub mod config;
pub mod embedding;
pub mod engine;
pub mod errors;
pub mod index;
pub mod output;
pub mod record;
pub mod store;
pub mod transfer;

// Re-export public API
pub use config::Config;
pub use embedding::{EMBEDDING_DIMS, OnnxEmbedder, TextEmbedder};
pub use engine::{MAX_INPUT_LENGTH, MemoryEngine};
pub use errors::Error;
pub use index::{Neighbor, VectorIndex};
pub use record::Record;
pub use store::{MAX_RECALL_LIMIT, RecordStore};
pub use transfer::{ImportStats, export_to_json, import_from_json};
