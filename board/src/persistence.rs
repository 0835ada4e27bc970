//! Persistence adapter for the todo list.
//!
//! The whole list is stored as one JSON array under a single key and
//! rewritten in full after every mutation.

use crate::types::TodoItem;
use std::collections::HashSet;
use std::sync::Arc;
use todo_board_core::effect::{Effect, StorageOperation};
use todo_board_core::environment::KeyValueStorage;
use todo_board_core::error::StorageError;

/// Loads and saves the todo list
#[derive(Clone)]
pub struct TodoRepository {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
}

impl TodoRepository {
    /// Creates a repository storing the list under `key`
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Storage key of the list
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Restores the list saved by a previous session
    ///
    /// Never fails: missing data yields an empty list, and unreadable or
    /// malformed data is logged and also yields an empty list.
    #[must_use]
    pub fn load(&self) -> Vec<TodoItem> {
        match self.try_load() {
            Ok(items) => {
                let loaded = items.len();
                let items = sanitize(items);
                if items.len() != loaded {
                    tracing::warn!(
                        key = %self.key,
                        dropped = loaded - items.len(),
                        "Dropped duplicate or blank todos from stored list"
                    );
                }
                tracing::debug!(key = %self.key, count = items.len(), "Loaded todos");
                items
            },
            Err(error) => {
                tracing::warn!(key = %self.key, error = %error, "Stored todos unusable, starting empty");
                Vec::new()
            },
        }
    }

    /// Reads and decodes the stored list without recovery
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the storage cannot be read or the value
    /// is not a JSON array of todo items.
    pub fn try_load(&self) -> Result<Vec<TodoItem>, StorageError> {
        let Some(raw) = self.storage.get(&self.key)? else {
            return Ok(Vec::new());
        };
        Ok(serde_json::from_str(&raw)?)
    }

    /// Overwrites the stored list
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if encoding or the write fails.
    pub fn save(&self, items: &[TodoItem]) -> Result<(), StorageError> {
        let value = serde_json::to_string(items)?;
        self.storage.set(&self.key, &value)
    }

    /// Describes a save as an effect for the runtime to execute
    #[must_use]
    pub fn save_effect<A>(&self, items: &[TodoItem]) -> Effect<A> {
        match serde_json::to_string(items) {
            Ok(value) => Effect::Storage(StorageOperation::Write {
                storage: Arc::clone(&self.storage),
                key: self.key.clone(),
                value,
            }),
            Err(error) => {
                tracing::warn!(key = %self.key, error = %error, "Could not encode todos, skipping save");
                Effect::None
            },
        }
    }
}

impl std::fmt::Debug for TodoRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoRepository")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

/// Restores list invariants on data written by something else
///
/// Keeps the first item for each id and drops items with blank text.
fn sanitize(items: Vec<TodoItem>) -> Vec<TodoItem> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| !item.text.trim().is_empty() && seen.insert(item.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TodoId;
    use todo_board_testing::{FailingStorage, MemoryStorage};

    fn item(id: i64, text: &str, completed: bool) -> TodoItem {
        TodoItem {
            id: TodoId::new(id),
            text: text.to_string(),
            completed,
        }
    }

    #[test]
    fn save_then_load_round_trips() {
        let storage = Arc::new(MemoryStorage::new());
        let repo = TodoRepository::new(storage.clone(), "todos");
        let items = vec![item(1, "a", true), item(2, "  b ", false)];

        repo.save(&items).unwrap();

        assert_eq!(repo.load(), items);
        assert_eq!(
            storage.raw("todos").as_deref(),
            Some(r#"[{"id":1,"text":"a","completed":true},{"id":2,"text":"  b ","completed":false}]"#)
        );
    }

    #[test]
    fn missing_key_loads_empty() {
        let repo = TodoRepository::new(Arc::new(MemoryStorage::new()), "todos");
        assert!(repo.load().is_empty());
        assert!(repo.try_load().unwrap().is_empty());
    }

    #[test]
    fn corrupted_value_loads_empty() {
        let storage = MemoryStorage::with_entry("todos", "not json {");
        let repo = TodoRepository::new(Arc::new(storage), "todos");

        assert!(repo.try_load().is_err());
        assert!(repo.load().is_empty());
    }

    #[test]
    fn wrong_shape_loads_empty() {
        let storage = MemoryStorage::with_entry("todos", r#"{"id":1}"#);
        let repo = TodoRepository::new(Arc::new(storage), "todos");
        assert!(repo.load().is_empty());
    }

    #[test]
    fn unreadable_storage_loads_empty() {
        let repo = TodoRepository::new(Arc::new(FailingStorage), "todos");
        assert!(repo.load().is_empty());
        assert!(repo.save(&[]).is_err());
    }

    #[test]
    fn load_drops_duplicates_and_blank_text() {
        let storage = MemoryStorage::with_entry(
            "todos",
            r#"[{"id":1,"text":"a","completed":false},
                {"id":1,"text":"dup","completed":true},
                {"id":2,"text":"   ","completed":false},
                {"id":3,"text":"c","completed":true}]"#,
        );
        let repo = TodoRepository::new(Arc::new(storage), "todos");

        assert_eq!(repo.load(), vec![item(1, "a", false), item(3, "c", true)]);
    }

    #[test]
    fn save_effect_carries_serialized_list() {
        let repo = TodoRepository::new(Arc::new(MemoryStorage::new()), "todos");
        let effect: Effect<()> = repo.save_effect(&[item(5, "x", false)]);

        match effect {
            Effect::Storage(StorageOperation::Write { key, value, .. }) => {
                assert_eq!(key, "todos");
                assert_eq!(value, r#"[{"id":5,"text":"x","completed":false}]"#);
            },
            other => panic!("unexpected effect {other:?}"),
        }
    }
}
