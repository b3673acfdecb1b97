use crate::storage::Storage;

/// The user's saved-word list: lowercase, unique, insertion ordered.
///
/// The list is loaded once at startup, kept in memory for the session and
/// written back whole after every mutation.
pub struct SavedWords {
    words: Vec<String>,
    storage: Storage,
}

impl SavedWords {
    pub async fn load(storage: Storage) -> Self {
        let mut words = Vec::new();
        for word in storage.load_saved_words().await {
            let word = word.to_lowercase();
            if !words.contains(&word) {
                words.push(word);
            }
        }
        Self { words, storage }
    }

    /// Attempts to save a word, returns true if the list changed.
    pub async fn add(&mut self, word: &str) -> sqlx::Result<bool> {
        let word = word.to_lowercase();
        if self.words.contains(&word) {
            return Ok(false);
        }
        self.words.push(word);
        self.storage.save_saved_words(&self.words).await?;
        Ok(true)
    }

    /// Attempts to remove a word, returns true if the word was removed.
    pub async fn remove(&mut self, word: &str) -> sqlx::Result<bool> {
        let word = word.to_lowercase();
        let length_before = self.words.len();
        self.words.retain(|saved| *saved != word);
        let removed = self.words.len() != length_before;
        // Written back even when nothing matched, mirroring the mutation
        // contract: every call persists the current list.
        self.storage.save_saved_words(&self.words).await?;
        Ok(removed)
    }

    pub fn contains(&self, word: &str) -> bool {
        let word = word.to_lowercase();
        self.words.iter().any(|saved| *saved == word)
    }

    pub fn list(&self) -> impl Iterator<Item = &str> + '_ {
        self.words.iter().map(String::as_str)
    }
}
