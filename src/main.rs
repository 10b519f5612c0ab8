use clap::Parser;
use std::process::ExitCode;

use engram::commands::{self, Commands};
use engram::embedding::OnnxEmbedder;
use engram::engine::MemoryEngine;
use engram::errors::Error;
use engram::output::{ErrorResponse, print_json};
use engram::Config;

/// engram - a semantic memory store for journal entries
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Emit machine-readable JSON output
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            if cli.json {
                print_json(&ErrorResponse {
                    error: e.to_string(),
                });
            } else {
                eprintln!("Error: {}", e);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode, Error> {
    // Version needs no model or database.
    if matches!(cli.command, Commands::Version) {
        return commands::version(cli.json);
    }

    let config = Config::load()?;
    config.ensure_directories()?;

    let embedder = OnnxEmbedder::new(&config.embedding_model)?;
    let engine = MemoryEngine::open(&config.database_path, embedder, config.clone())?;

    commands::execute(&cli.command, &engine, cli.json)
}
