//! Runner configuration.

use std::env;

use crate::error::{Error, Result};

/// Worker count used when nothing else is configured.
pub const DEFAULT_WORKERS: usize = 4;

/// Environment variable overriding [`RunConfig::workers`].
pub const WORKERS_ENV: &str = "MATMUL_WORKERS";
/// Environment variable enabling [`RunConfig::strict`] (`1`/`true`/`yes`).
pub const STRICT_ENV: &str = "MATMUL_STRICT";

/// Settings for one parallel multiplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    /// Number of worker threads spawned, independent of the matrix shape.
    pub workers: usize,
    /// Reject plans that leave cells uncovered or contested instead of
    /// logging a warning and running them.
    pub strict: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            workers: DEFAULT_WORKERS,
            strict: false,
        }
    }
}

impl RunConfig {
    pub fn with_workers(workers: usize) -> Self {
        RunConfig {
            workers,
            ..RunConfig::default()
        }
    }

    /// Defaults overridden by `MATMUL_WORKERS` and `MATMUL_STRICT`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = RunConfig::default();

        if let Some(value) = lookup(WORKERS_ENV) {
            config.workers = value.trim().parse().map_err(|_| Error::InvalidEnv {
                var: WORKERS_ENV,
                value: value.clone(),
            })?;
        }

        if let Some(value) = lookup(STRICT_ENV) {
            config.strict = match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" | "" => false,
                _ => {
                    return Err(Error::InvalidEnv {
                        var: STRICT_ENV,
                        value,
                    });
                }
            };
        }

        Ok(config)
    }

    /// Rejects a zero worker count.
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(Error::InvalidWorkerCount(self.workers));
        }
        Ok(())
    }
}
