use tracing::{debug, info};

use crate::account::types::AccountId;
use crate::client::types::Book;
use crate::storage::{Storage, StorageError};

/// Favorites keyed by account id, stored as one ordered list per account.
///
/// Account ids are not checked against the account table; an id nobody
/// registered simply owns an empty list.
#[derive(Clone)]
pub struct FavoritesStore {
    storage: Storage,
}

impl FavoritesStore {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Saved books in insertion order.
    pub fn list(&self, account_id: &AccountId) -> Result<Vec<Book>, StorageError> {
        self.storage.load_favorites(account_id)
    }

    /// Append `book` unless an entry with the same key is already saved.
    /// Returns whether the list changed.
    pub fn add(&self, account_id: &AccountId, book: &Book) -> Result<bool, StorageError> {
        let mut favorites = self.list(account_id)?;

        if favorites.iter().any(|b| b.key == book.key) {
            debug!(account_id = %account_id, key = %book.key, "already a favorite");
            return Ok(false);
        }

        favorites.push(book.clone());
        self.storage.save_favorites(account_id, &favorites)?;
        info!(account_id = %account_id, key = %book.key, "favorite added");
        Ok(true)
    }

    /// Drop every entry with `book_key`. Absent keys are a no-op.
    pub fn remove(&self, account_id: &AccountId, book_key: &str) -> Result<(), StorageError> {
        let mut favorites = self.list(account_id)?;
        let before = favorites.len();
        favorites.retain(|b| b.key != book_key);

        if favorites.len() != before {
            info!(account_id = %account_id, key = book_key, "favorite removed");
        }
        self.storage.save_favorites(account_id, &favorites)
    }

    pub fn contains(&self, account_id: &AccountId, book_key: &str) -> Result<bool, StorageError> {
        Ok(self.list(account_id)?.iter().any(|b| b.key == book_key))
    }

    /// Remove the book when saved, add it otherwise. Returns the new state.
    pub fn toggle(&self, account_id: &AccountId, book: &Book) -> Result<bool, StorageError> {
        if self.contains(account_id, &book.key)? {
            self.remove(account_id, &book.key)?;
            Ok(false)
        } else {
            self.add(account_id, book)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn book(key: &str, title: &str) -> Book {
        Book::new(key, title)
    }

    fn setup() -> (FavoritesStore, AccountId) {
        (FavoritesStore::new(Storage::in_memory()), "alice-id".to_string())
    }

    #[test]
    fn test_list_without_history_is_empty() {
        let (store, id) = setup();
        assert!(store.list(&id).unwrap().is_empty());
        assert!(!store.contains(&id, "/works/OL1W").unwrap());
    }

    #[test]
    fn test_add_is_idempotent() {
        let (store, id) = setup();
        assert!(store.add(&id, &book("/works/OL1", "Foo")).unwrap());
        assert!(!store.add(&id, &book("/works/OL1", "Foo again")).unwrap());

        let favorites = store.list(&id).unwrap();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].title, "Foo");
    }

    #[test]
    fn test_remove_then_contains() {
        let (store, id) = setup();
        store.add(&id, &book("/works/OL1", "Foo")).unwrap();
        store.remove(&id, "/works/OL1").unwrap();

        assert!(!store.contains(&id, "/works/OL1").unwrap());
        assert!(store.list(&id).unwrap().is_empty());
    }

    #[test]
    fn test_remove_absent_key_is_noop() {
        let (store, id) = setup();
        store.remove(&id, "/works/missing").unwrap();
        assert!(store.list(&id).unwrap().is_empty());

        store.add(&id, &book("/works/OL1", "Foo")).unwrap();
        store.remove(&id, "/works/missing").unwrap();
        assert_eq!(store.list(&id).unwrap().len(), 1);
    }

    #[test]
    fn test_insertion_order_kept() {
        let (store, id) = setup();
        for key in ["/works/C", "/works/A", "/works/B"] {
            store.add(&id, &book(key, key)).unwrap();
        }
        store.remove(&id, "/works/A").unwrap();
        store.add(&id, &book("/works/A", "A")).unwrap();

        let keys: Vec<_> = store.list(&id).unwrap().into_iter().map(|b| b.key).collect();
        assert_eq!(keys, vec!["/works/C", "/works/B", "/works/A"]);
    }

    #[test]
    fn test_lists_scoped_per_account() {
        let store = FavoritesStore::new(Storage::in_memory());
        let alice = "alice".to_string();
        let bob = "bob".to_string();

        store.add(&alice, &book("/works/OL1", "Foo")).unwrap();
        assert!(store.contains(&alice, "/works/OL1").unwrap());
        assert!(!store.contains(&bob, "/works/OL1").unwrap());

        store.remove(&bob, "/works/OL1").unwrap();
        assert!(store.contains(&alice, "/works/OL1").unwrap());
    }

    #[test]
    fn test_toggle() {
        let (store, id) = setup();
        let foo = book("/works/OL1", "Foo");

        assert!(store.toggle(&id, &foo).unwrap());
        assert!(store.contains(&id, &foo.key).unwrap());
        assert!(!store.toggle(&id, &foo).unwrap());
        assert!(!store.contains(&id, &foo.key).unwrap());
    }

    #[test]
    fn test_mixed_operations_never_duplicate_keys() {
        let (store, id) = setup();
        let keys = ["/works/1", "/works/2", "/works/3"];

        // Deterministic interleaving of adds and removes
        for step in 0..60usize {
            let key = keys[(step * 7 + step / 3) % keys.len()];
            if step % 4 == 3 {
                store.remove(&id, key).unwrap();
            } else {
                store.add(&id, &book(key, "t")).unwrap();
            }

            let listed = store.list(&id).unwrap();
            let unique: HashSet<_> = listed.iter().map(|b| b.key.as_str()).collect();
            assert_eq!(unique.len(), listed.len());
        }
    }

    #[test]
    fn test_walkthrough() {
        let storage = Storage::in_memory();
        let accounts = crate::account::AccountStore::new(storage.clone());
        let favorites = FavoritesStore::new(storage);

        let alice = accounts.register("alice", "a@x.com", "secret1").unwrap();
        assert_eq!(accounts.current_session().unwrap().unwrap().id, alice.id);

        assert!(favorites.add(&alice.id, &book("/works/OL1", "Foo")).unwrap());
        assert!(!favorites.add(&alice.id, &book("/works/OL1", "Foo")).unwrap());
        assert_eq!(favorites.list(&alice.id).unwrap().len(), 1);

        favorites.remove(&alice.id, "/works/OL1").unwrap();
        assert!(favorites.list(&alice.id).unwrap().is_empty());
    }
}
