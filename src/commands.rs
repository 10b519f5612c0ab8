//! Command handlers for the engram CLI.

use std::path::PathBuf;
use std::process::ExitCode;

use crate::embedding::TextEmbedder;
use crate::engine::MemoryEngine;
use crate::errors::Error;
use crate::output::*;
use crate::record::Record;
use crate::transfer;

/// Commands supported by the engram CLI.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Store a new entry and show its nearest neighbors
    Ingest {
        /// Entry text
        text: String,

        /// Optional companion annotation
        #[arg(short = 'a', long, default_value = "")]
        annotation: String,
    },
    /// Find entries similar to a query without storing it
    Query {
        /// Query text
        text: String,
    },
    /// List stored entries, most recent first
    Recall {
        /// Maximum number of results
        #[arg(short = 'l', long)]
        limit: Option<usize>,
    },
    /// Export all entries to a JSON file
    Export {
        /// Output file path
        path: PathBuf,
    },
    /// Import entries from a JSON export file
    Import {
        /// Input file path
        path: PathBuf,
    },
    Version,
}

/// Execute a CLI command.
pub fn execute<E: TextEmbedder>(
    command: &Commands,
    engine: &MemoryEngine<E>,
    json: bool,
) -> Result<ExitCode, Error> {
    match command {
        Commands::Ingest { text, annotation } => handle_ingest(engine, text, annotation, json),
        Commands::Query { text } => handle_query(engine, text, json),
        Commands::Recall { limit } => handle_recall(engine, *limit, json),
        Commands::Export { path } => handle_export(engine, path, json),
        Commands::Import { path } => handle_import(engine, path, json),
        Commands::Version => handle_version(json),
    }
}

fn neighbor_items(records: Vec<Record>) -> Vec<NeighborItem> {
    records
        .into_iter()
        .map(|r| NeighborItem {
            id: r.id,
            text: r.text,
            annotation: r.annotation,
            distance: r.distance.unwrap_or(0.0),
            timestamp: r.timestamp,
        })
        .collect()
}

fn handle_ingest<E: TextEmbedder>(
    engine: &MemoryEngine<E>,
    text: &str,
    annotation: &str,
    json: bool,
) -> Result<ExitCode, Error> {
    let neighbors = engine.ingest(text, annotation)?;
    if json {
        print_json(&IngestResponse {
            status: "ingested".to_string(),
            neighbors: neighbor_items(neighbors),
        });
    } else {
        println!("Stored entry. Nearest neighbors:");
        for record in neighbors {
            println!(
                "  {} [distance: {:.4}] {}",
                record.id,
                record.distance.unwrap_or(0.0),
                record.text
            );
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_query<E: TextEmbedder>(
    engine: &MemoryEngine<E>,
    text: &str,
    json: bool,
) -> Result<ExitCode, Error> {
    let results = engine.query(text)?;
    if json {
        print_json(&QueryResponse {
            results: neighbor_items(results),
        });
    } else {
        for record in results {
            println!(
                "{} [distance: {:.4}]\n  {}\n",
                record.id,
                record.distance.unwrap_or(0.0),
                record.text
            );
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_recall<E: TextEmbedder>(
    engine: &MemoryEngine<E>,
    limit: Option<usize>,
    json: bool,
) -> Result<ExitCode, Error> {
    let records = engine.recall(limit)?;
    if json {
        let items: Vec<RecordItem> = records
            .into_iter()
            .map(|r| RecordItem {
                id: r.id,
                text: r.text,
                annotation: r.annotation,
                timestamp: r.timestamp,
            })
            .collect();
        print_json(&RecallResponse { records: items });
    } else {
        for record in records {
            println!("{}: {}", record.id, record.text);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_export<E: TextEmbedder>(
    engine: &MemoryEngine<E>,
    path: &PathBuf,
    json: bool,
) -> Result<ExitCode, Error> {
    let exported = transfer::export_to_json(engine, path)?;
    if json {
        print_json(&ExportResponse {
            status: "exported".to_string(),
            path: path.display().to_string(),
            exported,
        });
    } else {
        println!("Exported {} record(s) to {}", exported, path.display());
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_import<E: TextEmbedder>(
    engine: &MemoryEngine<E>,
    path: &PathBuf,
    json: bool,
) -> Result<ExitCode, Error> {
    let stats = transfer::import_from_json(engine, path)?;
    if json {
        print_json(&ImportResponse {
            status: "imported".to_string(),
            total_records: stats.total_records,
            imported: stats.imported_records,
            re_embedded: stats.re_embedded,
            skipped_invalid: stats.skipped_invalid,
        });
    } else {
        println!(
            "Imported {}/{} record(s) ({} re-embedded, {} skipped)",
            stats.imported_records, stats.total_records, stats.re_embedded, stats.skipped_invalid
        );
    }
    Ok(ExitCode::SUCCESS)
}

/// Print version information without touching the model or database.
pub fn version(json: bool) -> Result<ExitCode, Error> {
    handle_version(json)
}

fn handle_version(json: bool) -> Result<ExitCode, Error> {
    if json {
        print_json(&serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "name": env!("CARGO_PKG_NAME")
        }));
    } else {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    }
    Ok(ExitCode::SUCCESS)
}
