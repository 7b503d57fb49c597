use crate::error::{Result, WordError};
use std::collections::{BTreeSet, HashSet};

/// Letters a corpus accepts by default, plus the letters that count as vowels
#[derive(Debug, Clone, PartialEq)]
pub struct Alphabet {
    letters: BTreeSet<char>,
    vowels: BTreeSet<char>,
}

impl Alphabet {
    pub fn new(letters: &str, vowels: &str) -> Self {
        Self {
            letters: lowercase_set(letters),
            vowels: lowercase_set(vowels),
        }
    }

    pub fn letters(&self) -> &BTreeSet<char> {
        &self.letters
    }

    pub fn vowels(&self) -> &BTreeSet<char> {
        &self.vowels
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::new(
            crate::config::DEFAULT_ALPHABET,
            crate::config::DEFAULT_VOWELS,
        )
    }
}

fn lowercase_set(letters: &str) -> BTreeSet<char> {
    letters.chars().flat_map(char::to_lowercase).collect()
}

/// Optional constraints applied to every word a corpus yields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordFilter {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    /// Overrides the corpus alphabet; stored lower-cased
    pub allowed_letters: Option<BTreeSet<char>>,
    pub vowel_required: bool,
}

impl WordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_length(mut self, len: usize) -> Self {
        self.min_length = Some(len);
        self
    }

    pub fn max_length(mut self, len: usize) -> Self {
        self.max_length = Some(len);
        self
    }

    pub fn allowed_letters(mut self, letters: &str) -> Self {
        self.allowed_letters = Some(lowercase_set(letters));
        self
    }

    pub fn vowel_required(mut self, required: bool) -> Self {
        self.vowel_required = required;
        self
    }

    /// Reject bounds and letter sets that can never match anything sensible
    pub fn validate(&self) -> Result<()> {
        if let (Some(min), Some(max)) = (self.min_length, self.max_length) {
            if min > max {
                return Err(WordError::OutOfRange(format!(
                    "min length {min} exceeds max length {max}"
                )));
            }
        }
        if let Some(allowed) = &self.allowed_letters {
            if allowed.is_empty() {
                return Err(WordError::InvalidParameter(
                    "allowed letters must not be empty".to_string(),
                ));
            }
            if let Some(bad) = allowed.iter().find(|c| !c.is_alphabetic()) {
                return Err(WordError::InvalidParameter(format!(
                    "allowed letters must be alphabetic, got '{bad}'"
                )));
            }
        }
        Ok(())
    }

    /// `word` must already be trimmed and lower-cased
    pub fn accepts(&self, word: &str, alphabet: &Alphabet, excluded: &HashSet<String>) -> bool {
        let len = word.chars().count();
        if self.min_length.is_some_and(|min| len < min) {
            return false;
        }
        if self.max_length.is_some_and(|max| len > max) {
            return false;
        }
        if excluded.contains(word) {
            return false;
        }

        let allowed = self.allowed_letters.as_ref().unwrap_or(&alphabet.letters);
        if !word.chars().all(|c| allowed.contains(&c)) {
            return false;
        }
        if self.vowel_required && !word.chars().any(|c| alphabet.vowels.contains(&c)) {
            return false;
        }
        true
    }
}

/// Trim and lower-case a raw list entry; blank lines yield `None`
pub fn normalize_entry(line: &str) -> Option<String> {
    let word = line.trim().to_lowercase();
    (!word.is_empty()).then_some(word)
}
