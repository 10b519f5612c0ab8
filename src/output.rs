//! JSON response types and formatting for CLI output.

use serde::Serialize;

/// A neighbor returned from ingest or query.
#[derive(Serialize)]
pub struct NeighborItem {
    pub id: i64,
    pub text: String,
    pub annotation: String,
    pub distance: f32,
    pub timestamp: i64,
}

/// Response for successful ingest.
#[derive(Serialize)]
pub struct IngestResponse {
    pub status: String,
    pub neighbors: Vec<NeighborItem>,
}

/// Response for query results.
#[derive(Serialize)]
pub struct QueryResponse {
    pub results: Vec<NeighborItem>,
}

/// Response for recalling stored records.
#[derive(Serialize)]
pub struct RecallResponse {
    pub records: Vec<RecordItem>,
}

/// Individual recalled record.
#[derive(Serialize)]
pub struct RecordItem {
    pub id: i64,
    pub text: String,
    pub annotation: String,
    pub timestamp: i64,
}

/// Response for export operations.
#[derive(Serialize)]
pub struct ExportResponse {
    pub status: String,
    pub path: String,
    pub exported: usize,
}

/// Response for import operations.
#[derive(Serialize)]
pub struct ImportResponse {
    pub status: String,
    pub total_records: usize,
    pub imported: usize,
    pub re_embedded: usize,
    pub skipped_invalid: usize,
}

/// Response for errors.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Print a value as formatted JSON to stdout.
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_ingest_response() {
        let response = IngestResponse {
            status: "ingested".to_string(),
            neighbors: vec![NeighborItem {
                id: 1,
                text: "entry".to_string(),
                annotation: String::new(),
                distance: 0.0,
                timestamp: 1_700_000_000_000,
            }],
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"ingested\""));
        assert!(json.contains("\"distance\":0.0"));
    }

    #[test]
    fn test_serialize_query_response() {
        let response = QueryResponse {
            results: vec![NeighborItem {
                id: 2,
                text: "close match".to_string(),
                annotation: "note".to_string(),
                distance: 0.25,
                timestamp: 1_700_000_000_000,
            }],
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"results\""));
        assert!(json.contains("\"distance\":0.25"));
    }

    #[test]
    fn test_serialize_import_response() {
        let response = ImportResponse {
            status: "imported".to_string(),
            total_records: 100,
            imported: 95,
            re_embedded: 3,
            skipped_invalid: 5,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"imported\":95"));
        assert!(json.contains("\"re_embedded\":3"));
        assert!(json.contains("\"skipped_invalid\":5"));
    }
}
