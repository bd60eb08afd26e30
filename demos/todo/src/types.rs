//! Domain types for the Todo example.
//!
//! A todo list is an ordered collection of records that can be added and
//! removed. Records are never edited in place.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::str::FromStr;

/// Unique identifier for a todo item
///
/// Opaque text so that hand-written ids (`"1"`) and generated UUIDs live in
/// the same list.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    /// Creates a `TodoId` from any string-like value
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TodoId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s.trim()))
    }
}

impl From<&str> for TodoId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TodoId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier
    pub id: TodoId,
    /// Free-form text, possibly empty
    pub text: String,
}

impl Todo {
    /// Creates a new todo item
    #[must_use]
    pub fn new(id: impl Into<TodoId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// State of the todo list
///
/// Todos are kept in insertion order and identifiers are unique.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoState {
    /// All todos in insertion order
    pub todos: Vec<Todo>,
}

impl TodoState {
    /// Creates a new empty todo state
    #[must_use]
    pub const fn new() -> Self {
        Self { todos: Vec::new() }
    }

    /// The starting list shown on first launch
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            todos: vec![Todo::new("1", "Hello world!")],
        }
    }

    /// Returns the number of todos
    #[must_use]
    pub fn len(&self) -> usize {
        self.todos.len()
    }

    /// Returns `true` if there are no todos
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Returns a todo by ID
    #[must_use]
    pub fn get(&self, id: &TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| &todo.id == id)
    }

    /// Checks if a todo exists
    #[must_use]
    pub fn contains(&self, id: &TodoId) -> bool {
        self.get(id).is_some()
    }

    /// Iterates todos in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Todo> {
        self.todos.iter()
    }

    /// The most recently added todo
    #[must_use]
    pub fn last(&self) -> Option<&Todo> {
        self.todos.last()
    }
}

impl<'a> IntoIterator for &'a TodoState {
    type Item = &'a Todo;
    type IntoIter = std::slice::Iter<'a, Todo>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Actions accepted by the todo store
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoAction {
    /// Append a todo with a freshly generated id
    Add {
        /// Text of the new todo; empty is allowed
        text: String,
    },

    /// Delete the todo with this id, if any
    Remove {
        /// Todo to delete
        id: TodoId,
    },
}

impl TodoAction {
    /// Shorthand for [`TodoAction::Add`]
    #[must_use]
    pub fn add(text: impl Into<String>) -> Self {
        Self::Add { text: text.into() }
    }

    /// Shorthand for [`TodoAction::Remove`]
    #[must_use]
    pub fn remove(id: impl Into<TodoId>) -> Self {
        Self::Remove { id: id.into() }
    }
}
