//! Configuration validation logic.

use crate::errors::Error;
use std::path::PathBuf;

/// Upper bound on the configurable neighbor count.
const MAX_NEIGHBOR_COUNT: usize = 100;

/// Validates configuration values.
pub struct ConfigValidator {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,
    /// HuggingFace embedding model identifier.
    pub embedding_model: String,
    /// Number of neighbors returned per operation.
    pub neighbor_count: usize,
}

impl ConfigValidator {
    /// Validate all configuration values for correctness and constraints.
    ///
    /// Checks that:
    /// - Neighbor count is between 1 and 100
    /// - Embedding model is not empty
    /// - Database path is not empty
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if any validation check fails.
    pub fn validate(&self) -> Result<(), Error> {
        self.validate_neighbor_count()?;
        self.validate_embedding_model()?;
        self.validate_database_path()?;

        Ok(())
    }

    fn validate_neighbor_count(&self) -> Result<(), Error> {
        if self.neighbor_count == 0 {
            return Err(Error::Config(
                "Invalid neighbor count: must be at least 1".to_string(),
            ));
        }

        if self.neighbor_count > MAX_NEIGHBOR_COUNT {
            return Err(Error::Config(format!(
                "Invalid neighbor count: {} (must be at most {})",
                self.neighbor_count, MAX_NEIGHBOR_COUNT
            )));
        }

        Ok(())
    }

    fn validate_embedding_model(&self) -> Result<(), Error> {
        if self.embedding_model.trim().is_empty() {
            return Err(Error::Config("Embedding model cannot be empty".to_string()));
        }

        Ok(())
    }

    fn validate_database_path(&self) -> Result<(), Error> {
        if self.database_path.as_os_str().is_empty() {
            return Err(Error::Config("Database path cannot be empty".to_string()));
        }

        Ok(())
    }
}
