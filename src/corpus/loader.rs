use super::{check_level_range, filter::normalize_entry, Alphabet, WordFilter, WordSource};
use crate::config::Config;
use crate::error::{Result, WordError};
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Word lists on disk laid out as `{corpus_dir}/{category}.{level_tag}`
#[derive(Debug, Clone)]
pub struct Corpus {
    root: PathBuf,
    categories: Vec<String>,
    offensive: Vec<String>,
    level_tags: Vec<u32>,
    alphabet: Alphabet,
}

/// A list file that contains a searched-for word
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub category: String,
    pub level: usize,
    pub path: PathBuf,
}

impl Corpus {
    pub fn new<P: AsRef<Path>>(
        root: P,
        categories: Vec<String>,
        offensive: Vec<String>,
        level_tags: Vec<u32>,
        alphabet: Alphabet,
    ) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            categories,
            offensive,
            level_tags,
            alphabet,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.corpus_dir,
            config.categories.clone(),
            config.offensive.clone(),
            config.level_tags.clone(),
            Alphabet::new(&config.allowed_letters, &config.vowels),
        )
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn level_tags(&self) -> &[u32] {
        &self.level_tags
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    fn list_path(&self, category: &str, level: usize) -> PathBuf {
        self.root
            .join(format!("{category}.{}", self.level_tags[level]))
    }

    /// Union of all exclusion lists, normalized like corpus entries
    pub fn excluded_words(&self) -> Result<HashSet<String>> {
        let mut excluded = HashSet::new();
        for list in &self.offensive {
            let lines = read_list(&self.root.join(list))?;
            excluded.extend(lines.iter().filter_map(|line| normalize_entry(line)));
        }
        Ok(excluded)
    }

    /// Find every category/level list containing `word` verbatim (after trimming)
    pub fn search(&self, word: &str) -> Result<Vec<SearchHit>> {
        let needle = word.trim();
        let mut hits = Vec::new();
        for category in &self.categories {
            for level in 0..self.level_tags.len() {
                let path = self.list_path(category, level);
                if read_list(&path)?.iter().any(|line| line.trim() == needle) {
                    hits.push(SearchHit {
                        category: category.clone(),
                        level,
                        path,
                    });
                }
            }
        }
        Ok(hits)
    }
}

impl WordSource for Corpus {
    fn max_level(&self) -> usize {
        self.level_tags.len().saturating_sub(1)
    }

    fn get_words(
        &self,
        min_level: usize,
        max_level: usize,
        filter: &WordFilter,
    ) -> Result<Vec<String>> {
        if self.level_tags.is_empty() {
            return Err(WordError::OutOfRange("corpus has no level tags".to_string()));
        }
        check_level_range(min_level, max_level, self.max_level())?;
        filter.validate()?;

        let excluded = self.excluded_words()?;
        let mut words = Vec::new();
        for category in &self.categories {
            for level in min_level..=max_level {
                let lines = read_list(&self.list_path(category, level))?;
                words.extend(
                    lines
                        .iter()
                        .filter_map(|line| normalize_entry(line))
                        .filter(|word| filter.accepts(word, &self.alphabet, &excluded)),
                );
            }
        }

        log::debug!(
            "loaded {} words for levels {min_level}..={max_level}",
            words.len()
        );
        Ok(words)
    }
}

/// Read a Latin-1 encoded list; a missing file reads as empty
pub fn read_list(path: &Path) -> Result<Vec<String>> {
    match fs::read(path) {
        Ok(bytes) => Ok(decode_latin1(&bytes)
            .lines()
            .map(str::to_string)
            .collect()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("word list {} not found, treating as empty", path.display());
            Ok(Vec::new())
        }
        Err(e) => Err(e.into()),
    }
}

/// ISO-8859-1 maps every byte to the code point of the same value
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}
