//! Todo list wired to a Unistore store.
//!
//! The smallest useful feature: a list of todos that can be added and
//! removed, owned by a [`Store`](unistore_runtime::Store) and shown by a
//! terminal view. It demonstrates:
//!
//! - Domain state and actions ([`TodoState`], [`TodoAction`])
//! - A pure reducer with an injected id generator ([`TodoReducer`])
//! - A view that only reads snapshots and sends actions ([`view`])
//! - Testing with `ReducerTest` and proptest
//!
//! # Quick Start
//!
//! ```no_run
//! use todo::{TodoAction, TodoEnvironment, TodoReducer, TodoState, TodoStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store: TodoStore = TodoStore::new(
//!     TodoState::seeded(),
//!     TodoReducer::new(),
//!     TodoEnvironment::production(),
//! );
//!
//! store.send(TodoAction::add("Buy milk")).await?;
//! store.send(TodoAction::remove("1")).await?;
//!
//! let count = store.state(TodoState::len).await;
//! println!("Total todos: {count}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod reducer;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use config::{IdStrategy, TodoConfig};
pub use reducer::{TodoEnvironment, TodoReducer};
pub use types::{Todo, TodoAction, TodoId, TodoState};

/// Store type used by the todo application
pub type TodoStore =
    unistore_runtime::Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>;
