// ==========================================
// PIAR Portal - copy-on-write in-memory collection
// ==========================================
// Every mutation clones the vector, applies the change and swaps the
// new Arc in under the write lock (last write wins). Readers hold Arc
// snapshots that never change under them.
// ==========================================

use std::sync::{Arc, RwLock};

use crate::repository::error::{RepositoryError, RepositoryResult};

/// Entities stored in a [`Collection`] are addressed by a string id.
pub trait Keyed {
    fn key(&self) -> &str;
}

/// Immutable view of a collection at one revision.
#[derive(Debug)]
pub struct Snapshot<T> {
    pub revision: u64,
    pub items: Arc<Vec<T>>,
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            revision: self.revision,
            items: Arc::clone(&self.items),
        }
    }
}

pub struct Collection<T> {
    state: RwLock<Snapshot<T>>,
}

impl<T: Keyed + Clone> Collection<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            state: RwLock::new(Snapshot {
                revision: 0,
                items: Arc::new(items),
            }),
        }
    }

    pub fn snapshot(&self) -> RepositoryResult<Snapshot<T>> {
        let guard = self
            .state
            .read()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        Ok(guard.clone())
    }

    pub fn revision(&self) -> RepositoryResult<u64> {
        Ok(self.snapshot()?.revision)
    }

    pub fn find(&self, id: &str) -> RepositoryResult<Option<T>> {
        let snapshot = self.snapshot()?;
        Ok(snapshot.items.iter().find(|item| item.key() == id).cloned())
    }

    /// Apply `f` to a copy of the items and publish the copy as the next
    /// revision. If `f` fails nothing is published.
    pub fn mutate<R>(
        &self,
        f: impl FnOnce(&mut Vec<T>) -> RepositoryResult<R>,
    ) -> RepositoryResult<R> {
        let mut guard = self
            .state
            .write()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        let mut next: Vec<T> = guard.items.as_ref().clone();
        let result = f(&mut next)?;

        guard.items = Arc::new(next);
        guard.revision += 1;
        Ok(result)
    }

    /// Replace the element with the same key, keeping its position.
    pub fn replace(&self, updated: T, entity: &str) -> RepositoryResult<()> {
        self.mutate(|items| {
            if crate::engine::selection::replace_by_id(items, &updated) {
                Ok(())
            } else {
                Err(RepositoryError::not_found(entity, updated.key()))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: String,
        value: i32,
    }

    impl Keyed for Item {
        fn key(&self) -> &str {
            &self.id
        }
    }

    fn item(id: &str, value: i32) -> Item {
        Item {
            id: id.to_string(),
            value,
        }
    }

    #[test]
    fn test_mutation_publishes_new_snapshot() {
        let collection = Collection::new(vec![item("a", 1)]);
        let before = collection.snapshot().unwrap();

        collection
            .mutate(|items| {
                items.push(item("b", 2));
                Ok(())
            })
            .unwrap();

        let after = collection.snapshot().unwrap();
        assert_eq!(before.items.len(), 1, "old snapshot must not change");
        assert_eq!(after.items.len(), 2);
        assert_eq!(after.revision, before.revision + 1);
        assert!(!Arc::ptr_eq(&before.items, &after.items));
    }

    #[test]
    fn test_failed_mutation_leaves_state_untouched() {
        let collection = Collection::new(vec![item("a", 1)]);
        let result: RepositoryResult<()> = collection.mutate(|items| {
            items.clear();
            Err(RepositoryError::ValidationError("nope".to_string()))
        });

        assert!(result.is_err());
        let snapshot = collection.snapshot().unwrap();
        assert_eq!(snapshot.revision, 0);
        assert_eq!(snapshot.items.len(), 1);
    }

    #[test]
    fn test_replace_preserves_order() {
        let collection = Collection::new(vec![item("a", 1), item("b", 2), item("c", 3)]);
        collection.replace(item("b", 20), "Item").unwrap();

        let snapshot = collection.snapshot().unwrap();
        let values: Vec<i32> = snapshot.items.iter().map(|i| i.value).collect();
        assert_eq!(values, vec![1, 20, 3]);
    }

    #[test]
    fn test_replace_unknown_id_is_not_found() {
        let collection = Collection::new(vec![item("a", 1)]);
        let err = collection.replace(item("zz", 9), "Item").unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
        assert_eq!(collection.revision().unwrap(), 0);
    }
}
