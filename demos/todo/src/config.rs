//! Configuration management for the todo application.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::reducer::TodoEnvironment;
use crate::types::TodoState;
use unistore_core::environment::{IdGenerator, UuidIds};
use std::sync::atomic::{AtomicU64, Ordering};
use std::env;

/// How new todo ids are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdStrategy {
    /// Random v4 UUIDs
    #[default]
    Uuid,
    /// Counting integers, handy for demos
    Sequential,
}

impl IdStrategy {
    /// Parses `uuid` or `sequential` (case-insensitive)
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "uuid" => Some(Self::Uuid),
            "sequential" | "seq" => Some(Self::Sequential),
            _ => None,
        }
    }
}

/// Counter-backed ids for [`IdStrategy::Sequential`]
///
/// Production counterpart of the `SequentialIds` test mock.
#[derive(Debug)]
struct CountingIds(AtomicU64);

impl IdGenerator for CountingIds {
    fn next_id(&self) -> String {
        self.0.fetch_add(1, Ordering::Relaxed).to_string()
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Start from the seeded list instead of an empty one
    pub seed: bool,
    /// Id generation strategy
    pub id_strategy: IdStrategy,
    /// Change feed buffer size
    pub broadcast_capacity: usize,
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            seed: true,
            id_strategy: IdStrategy::Uuid,
            broadcast_capacity: 16,
        }
    }
}

impl TodoConfig {
    /// Load configuration from the process environment
    ///
    /// Environment variables:
    /// - `TODO_LOG_LEVEL` (default `info`)
    /// - `TODO_SEED` (default `true`)
    /// - `TODO_ID_STRATEGY`: `uuid` or `sequential` (default `uuid`)
    /// - `TODO_BROADCAST_CAPACITY` (default 16)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// Unparseable values fall back to their defaults.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            log_level: lookup("TODO_LOG_LEVEL").unwrap_or(defaults.log_level),
            seed: lookup("TODO_SEED")
                .and_then(|s| parse_bool(&s))
                .unwrap_or(defaults.seed),
            id_strategy: lookup("TODO_ID_STRATEGY")
                .and_then(|s| IdStrategy::parse(&s))
                .unwrap_or(defaults.id_strategy),
            broadcast_capacity: lookup("TODO_BROADCAST_CAPACITY")
                .and_then(|s| s.trim().parse().ok())
                .filter(|&n: &usize| n > 0)
                .unwrap_or(defaults.broadcast_capacity),
        }
    }

    /// State the store starts from
    #[must_use]
    pub fn initial_state(&self) -> TodoState {
        if self.seed {
            TodoState::seeded()
        } else {
            TodoState::new()
        }
    }

    /// Reducer environment for the configured id strategy
    ///
    /// Sequential ids start after the seeded todo.
    #[must_use]
    pub fn environment(&self) -> TodoEnvironment {
        match self.id_strategy {
            IdStrategy::Uuid => TodoEnvironment::new(UuidIds),
            IdStrategy::Sequential => {
                let first = u64::try_from(self.initial_state().len()).map_or(1, |n| n + 1);
                TodoEnvironment::new(CountingIds(AtomicU64::new(first)))
            },
        }
    }

    /// Default `tracing` filter directive for this configuration
    #[must_use]
    pub fn log_filter(&self) -> String {
        format!(
            "todo={level},unistore_runtime={level}",
            level = self.log_level
        )
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
