//! # Unistore Testing
//!
//! Testing utilities and helpers for the Unistore architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A Given-When-Then harness for reducers ([`ReducerTest`])
//! - proptest strategies for common inputs
//!
//! ## Example
//!
//! ```ignore
//! use unistore_testing::{ReducerTest, SequentialIds};
//!
//! ReducerTest::new(TodoReducer::new())
//!     .with_env(TodoEnvironment::new(SequentialIds::starting_at(2)))
//!     .given_state(TodoState::seeded())
//!     .when_action(TodoAction::add("Buy milk"))
//!     .then_state(|state| assert_eq!(state.len(), 2))
//!     .run();
//! ```

/// Fluent reducer test harness
pub mod reducer_test;

/// Mock implementations of Environment traits
pub mod mocks {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::collections::VecDeque;
    use unistore_core::environment::IdGenerator;

    /// Predictable id generator: `"1"`, `"2"`, `"3"`, ...
    ///
    /// # Example
    ///
    /// ```
    /// use unistore_testing::mocks::SequentialIds;
    /// use unistore_core::environment::IdGenerator;
    ///
    /// let ids = SequentialIds::starting_at(7);
    /// assert_eq!(ids.next_id(), "7");
    /// assert_eq!(ids.next_id(), "8");
    /// ```
    #[derive(Debug)]
    pub struct SequentialIds {
        next: AtomicU64,
    }

    impl SequentialIds {
        /// Start counting at 1
        #[must_use]
        pub const fn new() -> Self {
            Self::starting_at(1)
        }

        /// Start counting at `first`
        #[must_use]
        pub const fn starting_at(first: u64) -> Self {
            Self {
                next: AtomicU64::new(first),
            }
        }
    }

    impl Default for SequentialIds {
        fn default() -> Self {
            Self::new()
        }
    }

    impl IdGenerator for SequentialIds {
        fn next_id(&self) -> String {
            self.next.fetch_add(1, Ordering::Relaxed).to_string()
        }
    }

    /// Id generator that replays a fixed script, then falls back to a counter
    ///
    /// Useful for forcing collisions with identifiers already in state.
    #[derive(Debug)]
    pub struct ScriptedIds {
        script: Mutex<VecDeque<String>>,
        fallback: SequentialIds,
    }

    impl ScriptedIds {
        /// Replay `ids` in order; afterwards produce `"scripted-1"`, `"scripted-2"`, ...
        #[must_use]
        pub fn new<I, T>(ids: I) -> Self
        where
            I: IntoIterator<Item = T>,
            T: Into<String>,
        {
            Self {
                script: Mutex::new(ids.into_iter().map(Into::into).collect()),
                fallback: SequentialIds::new(),
            }
        }
    }

    impl IdGenerator for ScriptedIds {
        fn next_id(&self) -> String {
            let scripted = match self.script.lock() {
                Ok(mut script) => script.pop_front(),
                Err(poisoned) => poisoned.into_inner().pop_front(),
            };
            scripted.unwrap_or_else(|| format!("scripted-{}", self.fallback.next_id()))
        }
    }
}

/// Property-based testing utilities using proptest
pub mod properties {
    use proptest::prelude::*;

    /// Arbitrary user-entered text, including empty and whitespace-only strings
    pub fn any_text() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(String::new()),
            Just("   ".to_string()),
            "\\PC{0,40}",
        ]
    }
}

// Re-export commonly used items
pub use mocks::{ScriptedIds, SequentialIds};
pub use reducer_test::{ReducerTest, assertions};

#[cfg(test)]
mod tests {
    use super::*;
    use unistore_core::environment::IdGenerator;

    #[test]
    fn test_sequential_ids() {
        let ids = SequentialIds::new();
        assert_eq!(ids.next_id(), "1");
        assert_eq!(ids.next_id(), "2");
    }

    #[test]
    fn test_scripted_ids_fall_back_after_script() {
        let ids = ScriptedIds::new(["1", "1"]);
        assert_eq!(ids.next_id(), "1");
        assert_eq!(ids.next_id(), "1");
        assert_eq!(ids.next_id(), "scripted-1");
    }
}
