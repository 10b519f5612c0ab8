//! Shared test utilities for configuration tests.

use std::sync::Mutex;

/// Serializes tests that mutate process environment variables.
pub static ENV_MUTEX: Mutex<()> = Mutex::new(());
