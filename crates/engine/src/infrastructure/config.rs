//! Engine configuration

use std::env;

use anyhow::{ensure, Context, Result};

use super::broadcast::DEFAULT_BROADCAST_CAPACITY;

pub const DEFAULT_MAX_COMMIT_RETRIES: u32 = 3;
pub const DEFAULT_LOG_FILTER: &str = "tablekeep_engine=debug";

/// Engine configuration loaded from environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Re-reads allowed after a version conflict before giving up
    pub max_commit_retries: u32,
    /// Seed for reproducible dice; system randomness when unset
    pub rng_seed: Option<u64>,
    /// Per-session broadcast backlog
    pub broadcast_capacity: usize,
    /// Fallback tracing filter when RUST_LOG is unset
    pub log_filter: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_commit_retries: DEFAULT_MAX_COMMIT_RETRIES,
            rng_seed: None,
            broadcast_capacity: DEFAULT_BROADCAST_CAPACITY,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl EngineConfig {
    /// Load `.env` (if present) and then read configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // A missing .env file is fine; real deployments set variables directly.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let max_commit_retries = match lookup("TABLEKEEP_MAX_COMMIT_RETRIES") {
            Some(raw) => raw
                .trim()
                .parse()
                .context("TABLEKEEP_MAX_COMMIT_RETRIES must be a non-negative integer")?,
            None => defaults.max_commit_retries,
        };

        let rng_seed = lookup("TABLEKEEP_RNG_SEED")
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(|raw| {
                raw.parse::<u64>()
                    .context("TABLEKEEP_RNG_SEED must be an unsigned 64-bit integer")
            })
            .transpose()?;

        let broadcast_capacity = match lookup("TABLEKEEP_BROADCAST_CAPACITY") {
            Some(raw) => raw
                .trim()
                .parse()
                .context("TABLEKEEP_BROADCAST_CAPACITY must be a positive integer")?,
            None => defaults.broadcast_capacity,
        };
        ensure!(
            broadcast_capacity > 0,
            "TABLEKEEP_BROADCAST_CAPACITY must be a positive integer"
        );

        let log_filter = lookup("TABLEKEEP_LOG_FILTER")
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .unwrap_or(defaults.log_filter);

        Ok(Self {
            max_commit_retries,
            rng_seed,
            broadcast_capacity,
            log_filter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = EngineConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.max_commit_retries, 3);
        assert_eq!(config.broadcast_capacity, 64);
        assert_eq!(config.log_filter, "tablekeep_engine=debug");
    }

    #[test]
    fn reads_every_variable() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            ("TABLEKEEP_MAX_COMMIT_RETRIES", "5"),
            ("TABLEKEEP_RNG_SEED", " 1234 "),
            ("TABLEKEEP_BROADCAST_CAPACITY", "16"),
            ("TABLEKEEP_LOG_FILTER", "tablekeep_engine=trace"),
        ]))
        .unwrap();
        assert_eq!(config.max_commit_retries, 5);
        assert_eq!(config.rng_seed, Some(1234));
        assert_eq!(config.broadcast_capacity, 16);
        assert_eq!(config.log_filter, "tablekeep_engine=trace");
    }

    #[test]
    fn empty_seed_means_system_randomness() {
        let config =
            EngineConfig::from_lookup(lookup_from(&[("TABLEKEEP_RNG_SEED", "")])).unwrap();
        assert_eq!(config.rng_seed, None);
    }

    #[test]
    fn rejects_malformed_values() {
        let err = EngineConfig::from_lookup(lookup_from(&[("TABLEKEEP_RNG_SEED", "abc")]))
            .unwrap_err();
        assert!(err.to_string().contains("TABLEKEEP_RNG_SEED"));

        assert!(EngineConfig::from_lookup(lookup_from(&[(
            "TABLEKEEP_MAX_COMMIT_RETRIES",
            "-1"
        )]))
        .is_err());
        assert!(EngineConfig::from_lookup(lookup_from(&[(
            "TABLEKEEP_BROADCAST_CAPACITY",
            "0"
        )]))
        .is_err());
    }
}
