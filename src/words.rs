use crate::config::Config;
use crate::corpus::{Corpus, WordFilter, WordSource};
use crate::error::Result;
use crate::frequency::{FrequencyCache, FrequencyStore, FrequencyTable, Normalization};
use crate::sampler::{self, SampleRequest, SampledWord};
use crate::scoring::{self, Difficulty};
use rand::Rng;
use std::sync::Arc;

/// Everything word operations need: a leveled source and the shared letter
/// frequency table. Built once per process and passed by reference.
#[derive(Debug)]
pub struct Words<S: WordSource = Corpus> {
    source: S,
    frequencies: FrequencyStore,
}

impl Words<Corpus> {
    /// Corpus and frequency cache as described by `config`. A missing cache is
    /// allowed here so it can be generated; scoring reports it as `MissingCache`.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let cache = FrequencyCache::new(config.frequency_cache_path());
        Ok(Self::new(
            Corpus::from_config(config),
            FrequencyStore::open_or_empty(cache)?,
        ))
    }
}

impl<S: WordSource> Words<S> {
    pub fn new(source: S, frequencies: FrequencyStore) -> Self {
        Self {
            source,
            frequencies,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn frequency_store(&self) -> &FrequencyStore {
        &self.frequencies
    }

    /// Current letter frequency table
    pub fn frequencies(&self) -> Result<Arc<FrequencyTable>> {
        self.frequencies.snapshot()
    }

    pub fn max_level(&self) -> usize {
        self.source.max_level()
    }

    pub fn get_words(
        &self,
        min_level: usize,
        max_level: usize,
        filter: &WordFilter,
    ) -> Result<Vec<String>> {
        self.source.get_words(min_level, max_level, filter)
    }

    pub fn get_random_word<R: Rng + ?Sized>(
        &self,
        request: &SampleRequest,
        rng: &mut R,
    ) -> Result<SampledWord> {
        sampler::get_random_word(&self.source, request, rng)
    }

    pub fn random_word(&self, request: &SampleRequest) -> Result<SampledWord> {
        self.get_random_word(request, &mut rand::thread_rng())
    }

    pub fn letter_frequency(&self, word: &str, average: bool, count_repeats: bool) -> Result<f64> {
        let table = self.frequencies()?;
        scoring::letter_frequency(&table, word, average, count_repeats)
    }

    /// Difficulty of `word` at `level`, relative to this source's highest level
    pub fn difficulty(&self, word: &str, level: usize) -> Result<Difficulty> {
        let table = self.frequencies()?;
        scoring::difficulty(&table, word, level, self.max_level())
    }

    /// Recount letter frequencies over every word at or below `max_level`
    /// (all levels when `None`), persist them, and swap them in
    pub fn generate_letter_frequencies(
        &self,
        max_level: Option<usize>,
        normalization: Normalization,
    ) -> Result<Arc<FrequencyTable>> {
        let max_level = max_level.unwrap_or_else(|| self.max_level());
        let words = self.source.words_up_to(max_level, &WordFilter::default())?;
        log::info!(
            "generating {normalization}-normalized letter frequencies from {} words",
            words.len()
        );
        let table = FrequencyTable::generate(&words, normalization)?;
        self.frequencies.replace(table)
    }
}
