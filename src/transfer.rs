//! Bulk JSON export and import for record backups.
//!
//! Export serializes every record verbatim, embeddings included. Import
//! replays such a file through the engine's low-level write path: records
//! carrying a valid embedding are written without re-embedding; records with
//! a missing or wrong-dimension embedding go back through the model.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::embedding::TextEmbedder;
use crate::engine::MemoryEngine;
use crate::errors::Error;
use crate::record::Record;

/// Wire format for exported records.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonRecord {
    pub text: String,
    #[serde(default)]
    pub annotation: String,
    #[serde(default)]
    pub embedding: Option<Vec<f32>>,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

impl From<Record> for JsonRecord {
    fn from(record: Record) -> Self {
        JsonRecord {
            text: record.text,
            annotation: record.annotation,
            embedding: Some(record.embedding),
            timestamp: Some(record.timestamp),
        }
    }
}

/// Import statistics for reporting.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ImportStats {
    pub total_records: usize,
    pub imported_records: usize,
    pub re_embedded: usize,
    pub skipped_invalid: usize,
}

/// Export all records to a JSON file, most recent first.
///
/// # Returns
///
/// The number of records written.
///
/// # Errors
///
/// Returns error if the snapshot read fails or the file cannot be written.
pub fn export_to_json<E: TextEmbedder>(
    engine: &MemoryEngine<E>,
    json_path: &Path,
) -> Result<usize, Error> {
    let records = engine.recall(None)?;
    let exported: Vec<JsonRecord> = records.into_iter().map(JsonRecord::from).collect();

    let json = serde_json::to_string_pretty(&exported)?;
    std::fs::write(json_path, json)?;

    Ok(exported.len())
}

/// Import records from a JSON export file.
///
/// Records whose stored embedding matches the engine's dimensionality are
/// written as-is; others are re-embedded through the model. Records with
/// empty text are skipped with a warning. Supplied timestamps are preserved.
///
/// # Returns
///
/// Import statistics.
///
/// # Errors
///
/// Returns error if the file is missing or unparseable, or a write fails
/// for a reason other than invalid record content.
pub fn import_from_json<E: TextEmbedder>(
    engine: &MemoryEngine<E>,
    json_path: &Path,
) -> Result<ImportStats, Error> {
    if !json_path.exists() {
        return Err(Error::FileNotFound(json_path.to_path_buf()));
    }

    let content = std::fs::read_to_string(json_path)?;
    let records: Vec<JsonRecord> = serde_json::from_str(&content)?;

    let mut stats = ImportStats {
        total_records: records.len(),
        ..ImportStats::default()
    };

    let dims = engine.dimensions();

    for record in records {
        if record.text.trim().is_empty() {
            eprintln!("Warning: skipping record with empty text");
            stats.skipped_invalid += 1;
            continue;
        }

        let vector = match record.embedding {
            Some(v) if v.len() == dims && v.iter().all(|x| x.is_finite()) => v,
            Some(v) => {
                eprintln!(
                    "Warning: invalid embedding ({} values) for record '{}', re-embedding",
                    v.len(),
                    record.text
                );
                stats.re_embedded += 1;
                engine.embed_text(&record.text)?
            }
            None => {
                eprintln!(
                    "Warning: missing embedding for record '{}', re-embedding",
                    record.text
                );
                stats.re_embedded += 1;
                engine.embed_text(&record.text)?
            }
        };

        match engine.append_prepared(&record.text, &record.annotation, vector, record.timestamp) {
            Ok(_) => stats.imported_records += 1,
            Err(e) => {
                eprintln!("Warning: failed to import record '{}': {}", record.text, e);
                stats.skipped_invalid += 1;
            }
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_stats_default() {
        let stats = ImportStats::default();
        assert_eq!(stats.total_records, 0);
        assert_eq!(stats.imported_records, 0);
        assert_eq!(stats.re_embedded, 0);
        assert_eq!(stats.skipped_invalid, 0);
    }

    #[test]
    fn test_json_record_deserialize() {
        let json = r#"{
            "text": "I felt anxious today",
            "annotation": "Let's breathe",
            "embedding": [0.1, 0.2],
            "timestamp": 1700000000000
        }"#;
        let record: JsonRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.text, "I felt anxious today");
        assert_eq!(record.annotation, "Let's breathe");
        assert_eq!(record.embedding, Some(vec![0.1, 0.2]));
        assert_eq!(record.timestamp, Some(1_700_000_000_000));
    }

    #[test]
    fn test_json_record_deserialize_minimal() {
        let json = r#"{"text": "bare entry"}"#;
        let record: JsonRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.text, "bare entry");
        assert_eq!(record.annotation, "");
        assert!(record.embedding.is_none());
        assert!(record.timestamp.is_none());
    }
}
