//! Environment variable overrides for configuration.

use crate::errors::Error;
use std::path::PathBuf;

use super::env_parser;

#[cfg(test)]
use super::tests_utils::ENV_MUTEX;

/// Apply environment variable overrides to configuration.
pub fn apply_env_overrides(
    database_path: &mut PathBuf,
    embedding_model: &mut String,
    model_cache: &mut PathBuf,
    neighbor_count: &mut usize,
    exclude_self: &mut bool,
) -> Result<(), Error> {
    env_parser::apply_database_path_override(database_path)?;
    env_parser::apply_embedding_model_override(embedding_model)?;
    env_parser::apply_model_cache_override(model_cache)?;
    env_parser::apply_neighbor_count_override(neighbor_count)?;
    env_parser::apply_exclude_self_override(exclude_self)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleanup_env_vars() {
        let vars = [
            "ENGRAM_DATABASE_PATH",
            "ENGRAM_EMBEDDING_MODEL",
            "ENGRAM_MODEL_CACHE",
            "ENGRAM_NEIGHBOR_COUNT",
            "ENGRAM_EXCLUDE_SELF",
        ];
        for var in vars {
            #[allow(clippy::disallowed_methods)]
            unsafe {
                std::env::remove_var(var)
            };
        }
    }

    fn default_values() -> (PathBuf, String, PathBuf, usize, bool) {
        (
            PathBuf::from("/default"),
            "default/model".to_string(),
            PathBuf::from("/default/cache"),
            3,
            false,
        )
    }

    #[test]
    fn test_env_var_overrides_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        cleanup_env_vars();

        #[allow(clippy::disallowed_methods)]
        unsafe {
            std::env::set_var("ENGRAM_DATABASE_PATH", "/custom/path/db.db");
            std::env::set_var("ENGRAM_EMBEDDING_MODEL", "env/model");
            std::env::set_var("ENGRAM_MODEL_CACHE", "/custom/cache");
            std::env::set_var("ENGRAM_NEIGHBOR_COUNT", "7");
            std::env::set_var("ENGRAM_EXCLUDE_SELF", "true");
        }

        let (mut database_path, mut embedding_model, mut model_cache, mut neighbor_count, mut exclude_self) =
            default_values();

        apply_env_overrides(
            &mut database_path,
            &mut embedding_model,
            &mut model_cache,
            &mut neighbor_count,
            &mut exclude_self,
        )
        .unwrap();

        assert_eq!(database_path, PathBuf::from("/custom/path/db.db"));
        assert_eq!(embedding_model, "env/model");
        assert_eq!(model_cache, PathBuf::from("/custom/cache"));
        assert_eq!(neighbor_count, 7);
        assert!(exclude_self);

        cleanup_env_vars();
    }

    #[test]
    fn test_invalid_neighbor_count() {
        let _guard = ENV_MUTEX.lock().unwrap();
        cleanup_env_vars();

        #[allow(clippy::disallowed_methods)]
        unsafe {
            std::env::set_var("ENGRAM_NEIGHBOR_COUNT", "invalid")
        };

        let (mut database_path, mut embedding_model, mut model_cache, mut neighbor_count, mut exclude_self) =
            default_values();

        let result = apply_env_overrides(
            &mut database_path,
            &mut embedding_model,
            &mut model_cache,
            &mut neighbor_count,
            &mut exclude_self,
        );

        assert!(matches!(result, Err(Error::Config(_))));

        cleanup_env_vars();
    }

    #[test]
    fn test_empty_env_var_rejected() {
        let _guard = ENV_MUTEX.lock().unwrap();
        cleanup_env_vars();

        #[allow(clippy::disallowed_methods)]
        unsafe {
            std::env::set_var("ENGRAM_DATABASE_PATH", "")
        };

        let (mut database_path, mut embedding_model, mut model_cache, mut neighbor_count, mut exclude_self) =
            default_values();

        let result = apply_env_overrides(
            &mut database_path,
            &mut embedding_model,
            &mut model_cache,
            &mut neighbor_count,
            &mut exclude_self,
        );

        assert!(matches!(result, Err(Error::Config(_))));

        cleanup_env_vars();
    }

    #[test]
    fn test_invalid_exclude_self_format() {
        let _guard = ENV_MUTEX.lock().unwrap();
        cleanup_env_vars();

        #[allow(clippy::disallowed_methods)]
        unsafe {
            std::env::set_var("ENGRAM_EXCLUDE_SELF", "maybe")
        };

        let (mut database_path, mut embedding_model, mut model_cache, mut neighbor_count, mut exclude_self) =
            default_values();

        let result = apply_env_overrides(
            &mut database_path,
            &mut embedding_model,
            &mut model_cache,
            &mut neighbor_count,
            &mut exclude_self,
        );

        assert!(matches!(result, Err(Error::Config(_))));

        cleanup_env_vars();
    }
}
