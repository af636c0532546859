//! BookRegistry - the in-memory shelf of books.
//!
//! Owns every book record and the identifier counter. Identifiers are the
//! decimal text of a counter that starts at 0 and is bumped once per
//! [`BookRegistry::create`]; an identifier is never handed out twice, not even
//! after its book has been deleted. Nothing is persisted, so a new registry
//! (and a restarted process) starts counting from 0 again.
//!
//! ## Example
//!
//! ```
//! use bookshelf::{Book, BookRegistry};
//!
//! let registry = BookRegistry::new();
//! let id = registry.create(Book::new("Dune", "Desert planet", "Frank Herbert"));
//! assert_eq!(id, "0");
//!
//! assert!(registry.update(&id, Book::new("Dune", "Spice", "Frank Herbert")));
//! assert_eq!(registry.get(&id).unwrap().description, "Spice");
//!
//! assert!(registry.delete(&id));
//! assert!(registry.get(&id).is_none());
//! ```

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::book::{Book, BookEntry};

/// Records and counter, always updated together under one lock.
#[derive(Debug, Default)]
struct Shelf {
    books: HashMap<String, Book>,
    next_id: u64,
}

/// Thread-safe in-memory book store.
///
/// Shared between request handlers behind an `Arc`. Writers take an exclusive
/// lock, so concurrent creates always receive distinct identifiers.
#[derive(Debug, Default)]
pub struct BookRegistry {
    shelf: RwLock<Shelf>,
}

impl BookRegistry {
    /// Create an empty registry whose first identifier will be `"0"`.
    pub fn new() -> Self {
        Self::default()
    }

    // No critical section can panic halfway through a mutation, so a poisoned
    // lock still guards a consistent shelf.
    fn read(&self) -> RwLockReadGuard<'_, Shelf> {
        self.shelf.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Shelf> {
        self.shelf.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a new book and return the identifier assigned to it.
    pub fn create(&self, book: Book) -> String {
        let mut shelf = self.write();
        let id = shelf.next_id.to_string();
        shelf.books.insert(id.clone(), book);
        shelf.next_id += 1;
        tracing::info!(id = %id, total = shelf.books.len(), "created book");
        id
    }

    /// Every live book with its identifier, in identifier order.
    pub fn list(&self) -> Vec<BookEntry> {
        let shelf = self.read();
        let mut entries: Vec<BookEntry> = shelf
            .books
            .iter()
            .map(|(id, book)| BookEntry::new(id.clone(), book.clone()))
            .collect();
        // Keys are always counter output, so they parse.
        entries.sort_by_key(|entry| entry.id.parse::<u64>().unwrap_or(u64::MAX));
        entries
    }

    /// Look up a book by identifier. `None` if it was never issued or has
    /// been deleted.
    pub fn get(&self, id: &str) -> Option<Book> {
        let book = self.read().books.get(id).cloned();
        tracing::debug!(id, found = book.is_some(), "looked up book");
        book
    }

    /// Replace all three fields of an existing book.
    ///
    /// Returns `false`, leaving the registry untouched, if `id` is absent.
    #[must_use]
    pub fn update(&self, id: &str, book: Book) -> bool {
        let mut shelf = self.write();
        match shelf.books.get_mut(id) {
            Some(existing) => {
                *existing = book;
                tracing::info!(id, "updated book");
                true
            }
            None => false,
        }
    }

    /// Remove a book. Returns `false` if `id` is absent.
    #[must_use]
    pub fn delete(&self, id: &str) -> bool {
        let removed = self.write().books.remove(id).is_some();
        if removed {
            tracing::info!(id, "deleted book");
        }
        removed
    }

    /// Number of live books.
    pub fn len(&self) -> usize {
        self.read().books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
