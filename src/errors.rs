//! Error types for engram.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for engram operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Input text is empty or whitespace-only.
    #[error("Input text cannot be empty")]
    EmptyInput,

    /// Input text exceeds the maximum allowed length.
    #[error("Input too long: {actual_length} characters (maximum {max_length})")]
    InputTooLong {
        max_length: usize,
        actual_length: usize,
    },

    /// Invalid result limit.
    #[error("Invalid limit: {0}")]
    InvalidLimit(String),

    /// Embedding length does not match the store's dimensionality.
    #[error("Dimension mismatch: expected {expected} dimensions, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Vector contains NaN or infinite values.
    #[error("Invalid vector: {0}")]
    InvalidVector(String),

    /// Persisted embedding BLOB cannot be decoded.
    #[error("Corrupt record {id}: {reason}")]
    CorruptRecord { id: i64, reason: String },

    /// SQLite error.
    #[error("SQLite error: {0}")]
    SQLite(#[from] rusqlite::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// ONNX inference error.
    #[error("Inference error: {0}")]
    Inference(String),

    /// Tokenization error.
    #[error("Tokenization error: {0}")]
    Tokenization(#[from] tokenizers::Error),

    /// ONNX session error.
    #[error("ONNX session error: {0}")]
    Onnx(#[from] ort::Error),

    /// HuggingFace Hub error.
    #[error("HuggingFace Hub error: {0}")]
    HfHub(#[from] hf_hub::api::sync::ApiError),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}
