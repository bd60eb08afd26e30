//! Reducer logic for the todo list.
//!
//! Two mutations: append a record with a fresh id, and drop the record with
//! a given id. Neither can fail.

use crate::types::{Todo, TodoAction, TodoId, TodoState};
use std::sync::Arc;
use unistore_core::{
    SmallVec,
    effect::Effect,
    environment::{IdGenerator, UuidIds},
    reducer::Reducer,
};

/// Generator draws before falling back to suffixing the last candidate
const MAX_ID_ATTEMPTS: usize = 16;

/// Environment dependencies for the todo reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Source of ids for new todos
    pub ids: Arc<dyn IdGenerator>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(ids: impl IdGenerator + 'static) -> Self {
        Self { ids: Arc::new(ids) }
    }

    /// Environment backed by random UUIDs
    #[must_use]
    pub fn production() -> Self {
        Self::new(UuidIds)
    }
}

impl std::fmt::Debug for TodoEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoEnvironment").finish_non_exhaustive()
    }
}

/// Reducer for the todo list
#[derive(Clone, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Picks an id not present in `state`
    ///
    /// Asks the generator until it yields an unused id. A generator that keeps
    /// colliding gets its last candidate suffixed with `-2`, `-3`, ... which
    /// terminates because the list is finite.
    fn fresh_id(state: &TodoState, env: &TodoEnvironment) -> TodoId {
        let mut candidate = TodoId::new(env.ids.next_id());

        for _ in 1..MAX_ID_ATTEMPTS {
            if !state.contains(&candidate) {
                return candidate;
            }
            tracing::warn!(id = %candidate, "Generated id already in use, retrying");
            candidate = TodoId::new(env.ids.next_id());
        }

        let base = candidate.to_string();
        let mut suffix = 2_usize;
        while state.contains(&candidate) {
            candidate = TodoId::new(format!("{base}-{suffix}"));
            suffix += 1;
        }
        candidate
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TodoAction::Add { text } => {
                let id = Self::fresh_id(state, env);
                tracing::debug!(%id, "Adding todo");
                state.todos.push(Todo { id, text });
            },
            TodoAction::Remove { id } => {
                let before = state.len();
                state.todos.retain(|todo| todo.id != id);
                if state.len() == before {
                    tracing::debug!(%id, "Remove ignored, no such todo");
                } else {
                    tracing::debug!(%id, "Removed todo");
                }
            },
        }

        SmallVec::new()
    }
}
