use crate::error::CbResult;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read-only word oracle. Loaded once before the run and shared across all
/// fitness evaluations; words are uppercase-normalized on the way in.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: HashSet<String>,
}

impl Dictionary {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_ascii_uppercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// One word per line; blank lines are skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> CbResult<Self> {
        let mut words = HashSet::new();
        for line in reader.lines() {
            let word = line?.trim().to_ascii_uppercase();
            if !word.is_empty() {
                words.insert(word);
            }
        }
        Ok(Self { words })
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> CbResult<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.trim().to_ascii_uppercase())
    }

    /// Number of whitespace-separated tokens of `text` that are known words.
    /// Tokens keep any attached punctuation, so "CAT." does not match "CAT".
    pub fn match_count(&self, text: &str) -> usize {
        if self.words.is_empty() {
            return 0;
        }
        text.split_whitespace()
            .filter(|token| self.contains(token))
            .count()
    }
}
