//! Environment variable parsing utilities for configuration.

use crate::errors::Error;
use std::path::PathBuf;

use super::paths;

/// Parse environment variable value or return error if empty/whitespace.
fn parse_env_string(name: &str, value: &str) -> Result<String, Error> {
    if value.trim().is_empty() {
        return Err(Error::Config(format!("{name} cannot be empty")));
    }
    Ok(value.to_string())
}

/// Parse environment variable as a path, expanding tilde.
fn parse_env_path(name: &str, value: &str) -> Result<PathBuf, Error> {
    if value.trim().is_empty() {
        return Err(Error::Config(format!("{name} cannot be empty")));
    }
    Ok(paths::expand_tilde_path(&PathBuf::from(value)))
}

/// Parse environment variable as a usize.
fn parse_env_usize(name: &str, value: &str) -> Result<usize, Error> {
    if value.trim().is_empty() {
        return Err(Error::Config(format!("{name} cannot be empty")));
    }
    value
        .trim()
        .parse()
        .map_err(|e| Error::Config(format!("Invalid {name} value: {e}")))
}

/// Parse environment variable as a bool (`true`/`false`/`1`/`0`).
fn parse_env_bool(name: &str, value: &str) -> Result<bool, Error> {
    match value.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(Error::Config(format!(
            "Invalid {name} value: expected true/false, got '{other}'"
        ))),
    }
}

/// Apply ENGRAM_DATABASE_PATH environment variable override.
pub fn apply_database_path_override(database_path: &mut PathBuf) -> Result<(), Error> {
    if let Ok(val) = std::env::var("ENGRAM_DATABASE_PATH") {
        *database_path = parse_env_path("ENGRAM_DATABASE_PATH", &val)?;
    }
    Ok(())
}

/// Apply ENGRAM_EMBEDDING_MODEL environment variable override.
pub fn apply_embedding_model_override(embedding_model: &mut String) -> Result<(), Error> {
    if let Ok(val) = std::env::var("ENGRAM_EMBEDDING_MODEL") {
        *embedding_model = parse_env_string("ENGRAM_EMBEDDING_MODEL", &val)?;
    }
    Ok(())
}

/// Apply ENGRAM_MODEL_CACHE environment variable override.
pub fn apply_model_cache_override(model_cache: &mut PathBuf) -> Result<(), Error> {
    if let Ok(val) = std::env::var("ENGRAM_MODEL_CACHE") {
        *model_cache = parse_env_path("ENGRAM_MODEL_CACHE", &val)?;
    }
    Ok(())
}

/// Apply ENGRAM_NEIGHBOR_COUNT environment variable override.
pub fn apply_neighbor_count_override(neighbor_count: &mut usize) -> Result<(), Error> {
    if let Ok(val) = std::env::var("ENGRAM_NEIGHBOR_COUNT") {
        *neighbor_count = parse_env_usize("ENGRAM_NEIGHBOR_COUNT", &val)?;
    }
    Ok(())
}

/// Apply ENGRAM_EXCLUDE_SELF environment variable override.
pub fn apply_exclude_self_override(exclude_self: &mut bool) -> Result<(), Error> {
    if let Ok(val) = std::env::var("ENGRAM_EXCLUDE_SELF") {
        *exclude_self = parse_env_bool("ENGRAM_EXCLUDE_SELF", &val)?;
    }
    Ok(())
}
