use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to read word list {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("word list {0} contains no words")]
    Empty(PathBuf),
}

/// Immutable set of upper-case words. Built once at startup and shared
/// read-only between every round.
#[derive(Debug)]
pub struct Dictionary {
    words: HashSet<String>,
}

impl Dictionary {
    /// Load dictionary from a file, one word per line
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .await
            .map_err(|source| DictionaryError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let dictionary = Self::from_words(content.lines());
        if dictionary.is_empty() {
            return Err(DictionaryError::Empty(path.to_path_buf()));
        }

        tracing::info!(
            "Loaded {} words into dictionary from {}",
            dictionary.len(),
            path.display()
        );

        Ok(dictionary)
    }

    /// Build a dictionary from in-memory words
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|word| normalize(word.as_ref()))
            .filter(|word| !word.is_empty())
            .collect();

        Self { words }
    }

    /// Check if a word exists in the dictionary, ignoring case
    pub fn is_word(&self, word: &str) -> bool {
        self.words.contains(&normalize(word))
    }

    /// Get the number of words in the dictionary
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if dictionary is empty
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn normalize(word: &str) -> String {
    word.trim().to_uppercase()
}
