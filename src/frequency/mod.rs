pub mod cache;

pub use cache::{FrequencyCache, FrequencyStore};

use crate::error::{Result, WordError};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How raw letter counts are scaled into weights
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Normalization {
    /// Divide by the total letter count, so weights sum to 1
    #[default]
    Sum,
    /// Divide by the largest count, so the most common letter weighs 1
    Max,
}

/// Letter -> normalized weight, ordered by letter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrequencyTable {
    weights: BTreeMap<char, f64>,
}

impl FrequencyTable {
    pub fn from_weights<I: IntoIterator<Item = (char, f64)>>(weights: I) -> Result<Self> {
        let table = Self {
            weights: weights.into_iter().collect(),
        };
        table.validate()?;
        Ok(table)
    }

    /// Count every letter occurrence in `words` and normalize the counts
    pub fn generate<S: AsRef<str>>(words: &[S], normalization: Normalization) -> Result<Self> {
        let counts = count_letters(words.iter().map(|w| w.as_ref()));
        Self::from_counts(&counts, normalization)
    }

    pub fn from_counts(counts: &BTreeMap<char, u64>, normalization: Normalization) -> Result<Self> {
        let divisor = match normalization {
            Normalization::Sum => counts.values().sum::<u64>(),
            Normalization::Max => counts.values().copied().max().unwrap_or(0),
        };
        if divisor == 0 {
            return Err(WordError::EmptyCorpus);
        }

        let divisor = divisor as f64;
        Ok(Self {
            weights: counts
                .iter()
                .map(|(&letter, &count)| (letter, count as f64 / divisor))
                .collect(),
        })
    }

    pub fn validate(&self) -> Result<()> {
        match self
            .weights
            .iter()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            Some((letter, weight)) => Err(WordError::InvalidParameter(format!(
                "frequency for '{letter}' must be a non-negative number, got {weight}"
            ))),
            None => Ok(()),
        }
    }

    pub fn get(&self, letter: char) -> Option<f64> {
        self.weights.get(&letter).copied()
    }

    /// Weight for `letter`, failing when the table has no entry for it
    pub fn weight(&self, letter: char) -> Result<f64> {
        self.get(letter).ok_or(WordError::UnknownLetter(letter))
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    /// Entries in alphabetical order
    pub fn iter(&self) -> impl Iterator<Item = (char, f64)> + '_ {
        self.weights.iter().map(|(&c, &w)| (c, w))
    }

    /// Entries from most to least frequent; ties stay alphabetical
    pub fn by_frequency(&self) -> Vec<(char, f64)> {
        self.iter()
            .sorted_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal))
            .collect()
    }
}

pub fn count_letters<'a, I: IntoIterator<Item = &'a str>>(words: I) -> BTreeMap<char, u64> {
    let mut counts = BTreeMap::new();
    for word in words {
        for letter in word.chars() {
            *counts.entry(letter).or_insert(0) += 1;
        }
    }
    counts
}

/// Letter weights over all positions and for each 1-based position, each sum-normalized
#[derive(Debug, Clone, PartialEq)]
pub struct PositionalFrequency {
    pub total: FrequencyTable,
    pub positions: Vec<FrequencyTable>,
}

impl PositionalFrequency {
    pub fn generate<S: AsRef<str>>(words: &[S]) -> Result<Self> {
        let mut total = BTreeMap::new();
        let mut positions: Vec<BTreeMap<char, u64>> = Vec::new();

        for word in words {
            for (idx, letter) in word.as_ref().chars().enumerate() {
                *total.entry(letter).or_insert(0) += 1;
                if positions.len() <= idx {
                    positions.resize_with(idx + 1, BTreeMap::new);
                }
                *positions[idx].entry(letter).or_insert(0) += 1;
            }
        }

        Ok(Self {
            total: FrequencyTable::from_counts(&total, Normalization::Sum)?,
            positions: positions
                .iter()
                .map(|counts| FrequencyTable::from_counts(counts, Normalization::Sum))
                .collect::<Result<_>>()?,
        })
    }
}
