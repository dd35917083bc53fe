//! Engine Configuration
//!
//! Worker thread settings for generator engines. Every engine spawns exactly
//! one OS thread; this controls how that thread is created.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Worker thread configuration for generator engines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Thread name prefix for spawned workers; an engine id is appended
    #[serde(default = "default_thread_name")]
    pub thread_name: String,

    /// Worker stack size in bytes (None = platform default)
    #[serde(default)]
    pub stack_size: Option<usize>,
}

fn default_thread_name() -> String {
    "spindle-worker".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            thread_name: default_thread_name(),
            stack_size: None,
        }
    }
}

impl EngineConfig {
    /// Validate settings that `std::thread::Builder` would otherwise panic on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thread_name.is_empty() {
            return Err(ConfigError::EmptyThreadName);
        }
        if self.thread_name.contains('\0') {
            return Err(ConfigError::ThreadNameInteriorNul);
        }
        Ok(())
    }
}
