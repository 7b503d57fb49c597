use super::{check_level_range, filter::normalize_entry, Alphabet, WordFilter, WordSource};
use crate::error::Result;
use std::collections::HashSet;

/// In-memory leveled corpus, applying the same normalization and filters as [`super::Corpus`]
#[derive(Debug, Clone)]
pub struct MemoryCorpus {
    level_count: usize,
    categories: Vec<(String, Vec<Vec<String>>)>,
    excluded: HashSet<String>,
    alphabet: Alphabet,
}

impl MemoryCorpus {
    /// `level_count` must be at least one
    pub fn new(level_count: usize) -> Self {
        Self {
            level_count: level_count.max(1),
            categories: Vec::new(),
            excluded: HashSet::new(),
            alphabet: Alphabet::default(),
        }
    }

    /// Append `words` to `category` at `level`; levels past the end are ignored
    pub fn with_words<S: AsRef<str>>(mut self, category: &str, level: usize, words: &[S]) -> Self {
        if level >= self.level_count {
            log::warn!("ignoring words for level {level}, corpus has {} levels", self.level_count);
            return self;
        }

        let idx = match self.categories.iter().position(|(name, _)| name == category) {
            Some(idx) => idx,
            None => {
                self.categories
                    .push((category.to_string(), vec![Vec::new(); self.level_count]));
                self.categories.len() - 1
            }
        };
        self.categories[idx].1[level].extend(words.iter().map(|w| w.as_ref().to_string()));
        self
    }

    pub fn with_excluded<S: AsRef<str>>(mut self, words: &[S]) -> Self {
        self.excluded
            .extend(words.iter().filter_map(|w| normalize_entry(w.as_ref())));
        self
    }

    pub fn with_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }
}

impl WordSource for MemoryCorpus {
    fn max_level(&self) -> usize {
        self.level_count - 1
    }

    fn get_words(
        &self,
        min_level: usize,
        max_level: usize,
        filter: &WordFilter,
    ) -> Result<Vec<String>> {
        check_level_range(min_level, max_level, self.max_level())?;
        filter.validate()?;

        Ok(self
            .categories
            .iter()
            .flat_map(|(_, levels)| levels[min_level..=max_level].iter().flatten())
            .filter_map(|line| normalize_entry(line))
            .filter(|word| filter.accepts(word, &self.alphabet, &self.excluded))
            .collect())
    }
}
