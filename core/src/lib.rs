//! # Unistore Core
//!
//! Core traits and types for the Unistore architecture.
//!
//! A feature is described by four pieces:
//!
//! - **State**: owned domain data for the feature
//! - **Action**: every input the feature understands
//! - **Reducer**: `(State, Action, Environment) → Effects`
//! - **Environment**: injected dependencies (id generation, clocks, ...)
//!
//! The runtime crate owns the state and drives actions through the reducer;
//! views only ever read state and send actions.
//!
//! ## Example
//!
//! ```
//! use unistore_core::{effect::Effect, reducer::Reducer, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct CounterState {
//!     count: i64,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut CounterState,
//!         action: CounterAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<CounterAction>; 4]> {
//!         match action {
//!             CounterAction::Increment => state.count += 1,
//!         }
//!         SmallVec::new()
//!     }
//! }
//!
//! let mut state = CounterState::default();
//! let effects = CounterReducer.reduce(&mut state, CounterAction::Increment, &());
//! assert_eq!(state.count, 1);
//! assert!(effects.is_empty());
//! ```

// Re-export commonly used types
pub use smallvec::{smallvec, SmallVec};

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.
/// All business logic lives here, which keeps it deterministic and testable
/// without a runtime.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// Updates `state` in place and returns descriptions of any follow-up
        /// work. Most reducers return an empty vector; the inline capacity of
        /// four covers the rest without allocating.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe work to be performed by the runtime. They are values,
/// not execution: a reducer returning an effect has not done anything yet.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;
    use std::time::Duration;

    /// Effect type - describes a side effect to be executed
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Arbitrary async computation
        ///
        /// If the future resolves to `Some(action)`, the action is fed back
        /// into the store.
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),

        /// Dispatch an action after a delay
        Delay {
            /// How long to wait
            duration: Duration,
            /// Action to dispatch after delay
            action: Box<Action>,
        },
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
                Effect::Delay { duration, action } => f
                    .debug_struct("Effect::Delay")
                    .field("duration", duration)
                    .field("action", action)
                    .finish(),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Returns `true` for [`Effect::None`]
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }

        /// Wrap an async block producing an optional action
        #[must_use]
        pub fn future<F>(fut: F) -> Self
        where
            F: Future<Output = Option<Action>> + Send + 'static,
        {
            Effect::Future(Box::pin(fut))
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All sources of non-determinism are abstracted behind traits and injected
/// via the Environment parameter, so reducers stay reproducible under test.
pub mod environment {
    use uuid::Uuid;

    /// Source of fresh identifiers
    ///
    /// Implementations must be cheap to call repeatedly; callers may retry
    /// when a candidate collides with an identifier already in use.
    ///
    /// # Examples
    ///
    /// ```
    /// use unistore_core::environment::{IdGenerator, UuidIds};
    ///
    /// let ids = UuidIds;
    /// assert_ne!(ids.next_id(), ids.next_id());
    /// ```
    pub trait IdGenerator: Send + Sync {
        /// Produce the next identifier
        fn next_id(&self) -> String;
    }

    /// Production id generator backed by random v4 UUIDs
    #[derive(Debug, Clone, Copy, Default)]
    pub struct UuidIds;

    impl IdGenerator for UuidIds {
        fn next_id(&self) -> String {
            Uuid::new_v4().to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::effect::Effect;
    use super::environment::{IdGenerator, UuidIds};
    use std::time::Duration;

    #[test]
    fn test_effect_is_none() {
        assert!(Effect::<u8>::None.is_none());
        assert!(!Effect::<u8>::future(async { None }).is_none());
    }

    #[test]
    fn test_effect_debug() {
        let delay = Effect::Delay {
            duration: Duration::from_millis(5),
            action: Box::new(7_u8),
        };
        assert!(format!("{delay:?}").starts_with("Effect::Delay"));
        assert_eq!(
            format!("{:?}", Effect::<u8>::future(async { None })),
            "Effect::Future(<future>)"
        );
    }

    #[test]
    fn test_future_effect_resolves() {
        let Effect::Future(fut) = Effect::future(async { Some(42_u8) }) else {
            unreachable!("constructed as a future effect");
        };
        assert_eq!(tokio_test::block_on(fut), Some(42));
    }

    #[test]
    fn test_uuid_ids_are_parseable_and_distinct() {
        let ids = UuidIds;
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
        assert!(uuid::Uuid::parse_str(&a).is_ok());
    }
}
