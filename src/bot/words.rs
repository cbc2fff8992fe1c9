//! Shared in-memory word list managed from the chat.

use parking_lot::RwLock;

/// Thread-safe list of words, kept in insertion order without duplicates.
#[derive(Debug, Default)]
pub struct WordBook {
    words: RwLock<Vec<String>>,
}

impl WordBook {
    pub fn new(seed: impl IntoIterator<Item = String>) -> Self {
        let book = Self::default();
        for word in seed {
            book.add(&word);
        }
        book
    }

    /// Add a word. Returns `false` when it is blank or already present.
    pub fn add(&self, word: &str) -> bool {
        let word = word.trim();
        if word.is_empty() {
            return false;
        }
        let mut words = self.words.write();
        if words.iter().any(|existing| existing == word) {
            return false;
        }
        words.push(word.to_string());
        true
    }

    /// Remove a word. Returns `false` when it was not present.
    pub fn remove(&self, word: &str) -> bool {
        let word = word.trim();
        let mut words = self.words.write();
        let before = words.len();
        words.retain(|existing| existing != word);
        words.len() != before
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.read().iter().any(|existing| existing == word.trim())
    }

    pub fn list(&self) -> Vec<String> {
        self.words.read().clone()
    }

    pub fn len(&self) -> usize {
        self.words.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.read().is_empty()
    }
}
