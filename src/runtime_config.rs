//! # Runtime Configuration
//!
//! Environment-driven settings for the `may` coroutine runtime that serves
//! requests.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `BRRTR_STACK_SIZE` | `0x4000` | Coroutine stack size in bytes, decimal or `0x` hex |
//! | `BRRTR_WORKERS` | runtime default | Number of `may` worker threads |
//!
//! ```rust
//! use brrthooks::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! assert!(config.stack_size > 0);
//! ```

use std::env;
use tracing::info;

const DEFAULT_STACK_SIZE: usize = 0x4000;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Stack size for coroutines in bytes
    pub stack_size: usize,
    /// Worker thread count; `None` keeps the runtime default
    pub workers: Option<usize>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            stack_size: DEFAULT_STACK_SIZE,
            workers: None,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let stack_size = env::var("BRRTR_STACK_SIZE")
            .ok()
            .and_then(|val| parse_size(&val))
            .unwrap_or(DEFAULT_STACK_SIZE);
        let workers = env::var("BRRTR_WORKERS")
            .ok()
            .and_then(|val| val.trim().parse().ok())
            .filter(|n: &usize| *n > 0);
        RuntimeConfig {
            stack_size,
            workers,
        }
    }

    /// Push the settings into the global `may` configuration.
    ///
    /// Must run before the first coroutine is spawned.
    pub fn apply(&self) {
        let config = may::config();
        config.set_stack_size(self.stack_size);
        if let Some(workers) = self.workers {
            config.set_workers(workers);
        }
        info!(
            stack_size = self.stack_size,
            workers = ?self.workers,
            "Coroutine runtime configured"
        );
    }
}

fn parse_size(val: &str) -> Option<usize> {
    let val = val.trim();
    match val.strip_prefix("0x") {
        Some(hex) => usize::from_str_radix(hex, 16).ok(),
        None => val.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("0x8000"), Some(0x8000));
        assert_eq!(parse_size("32768"), Some(32768));
        assert_eq!(parse_size("lots"), None);
    }

    #[test]
    fn test_default() {
        let config = RuntimeConfig::default();
        assert_eq!(config.stack_size, 0x4000);
        assert!(config.workers.is_none());
    }
}
