use crate::corpus::{check_level_range, WordFilter, WordSource};
use crate::error::{Result, WordError};
use crate::util::truncated_normal_pdf;
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;

/// Parameters for drawing one word from a range of levels
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRequest {
    pub min_level: usize,
    pub max_level: usize,
    /// Centre of the level distribution; uniform over the range when `None`
    pub mean_level: Option<f64>,
    pub std: f64,
    pub filter: WordFilter,
}

impl SampleRequest {
    pub fn new(min_level: usize, max_level: usize) -> Self {
        Self {
            min_level,
            max_level,
            mean_level: None,
            std: 1.0,
            filter: WordFilter::default(),
        }
    }

    pub fn mean_level(mut self, mean: f64) -> Self {
        self.mean_level = Some(mean);
        self
    }

    pub fn std(mut self, std: f64) -> Self {
        self.std = std;
        self
    }

    pub fn filter(mut self, filter: WordFilter) -> Self {
        self.filter = filter;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SampledWord {
    pub word: String,
    pub level: usize,
    /// `level` divided by the source's highest level
    pub normalized_level: f64,
}

/// Sampling weight of each level in `min_level..=max_level`.
///
/// A single level gets `[1]`, no mean gives uniform weights, otherwise each
/// level is weighted by a normal(`mean`, `std`) density truncated to the range.
pub fn level_weights(
    min_level: usize,
    max_level: usize,
    mean_level: Option<f64>,
    std: f64,
) -> Result<Vec<f64>> {
    if min_level > max_level {
        return Err(WordError::OutOfRange(format!(
            "min level {min_level} exceeds max level {max_level}"
        )));
    }

    let size = max_level - min_level + 1;
    if size == 1 {
        return Ok(vec![1.0]);
    }

    let Some(mean) = mean_level else {
        return Ok(vec![1.0; size]);
    };

    check_mean(min_level, max_level, mean)?;
    if !(std > 0.0 && std.is_finite()) {
        return Err(WordError::InvalidParameter(format!(
            "standard deviation must be positive and finite, got {std}"
        )));
    }

    let (low, high) = (min_level as f64, max_level as f64);
    Ok((min_level..=max_level)
        .map(|level| truncated_normal_pdf(level as f64, mean, std, low, high))
        .collect())
}

fn check_mean(min_level: usize, max_level: usize, mean: f64) -> Result<()> {
    if !(min_level as f64 <= mean && mean <= max_level as f64) {
        return Err(WordError::OutOfRange(format!(
            "mean level must lie between {min_level} and {max_level}, got {mean}"
        )));
    }
    Ok(())
}

/// Draw a random word from a randomly chosen level.
///
/// Levels are drawn by weight; a level whose filtered word list is empty is
/// never drawn again, and once every level has come up empty the draw fails
/// with `NoWordsFound`.
pub fn get_random_word<S, R>(source: &S, request: &SampleRequest, rng: &mut R) -> Result<SampledWord>
where
    S: WordSource + ?Sized,
    R: Rng + ?Sized,
{
    let (min_level, max_level) = (request.min_level, request.max_level);
    let highest = source.max_level();
    check_level_range(min_level, max_level, highest)?;
    if let Some(mean) = request.mean_level {
        check_mean(min_level, max_level, mean)?;
    }
    request.filter.validate()?;

    let levels: Vec<usize> = (min_level..=max_level).collect();
    let mut weights = level_weights(min_level, max_level, request.mean_level, request.std)?;
    let mut exhausted = vec![false; levels.len()];

    for _ in 0..levels.len() {
        let idx = match WeightedIndex::new(&weights) {
            Ok(dist) => dist.sample(rng),
            // every live level's density underflowed; fall back to a uniform pick
            Err(_) => match pick_live_level(&exhausted, rng) {
                Some(idx) => idx,
                None => break,
            },
        };
        let level = levels[idx];

        let words = source.get_words(level, level, &request.filter)?;
        if let Some(word) = words.choose(rng) {
            return Ok(SampledWord {
                word: word.clone(),
                level,
                normalized_level: normalize_level(level, highest),
            });
        }

        log::debug!("level {level} has no matching words, excluding it from this draw");
        weights[idx] = 0.0;
        exhausted[idx] = true;
    }

    Err(WordError::NoWordsFound)
}

fn pick_live_level<R: Rng + ?Sized>(exhausted: &[bool], rng: &mut R) -> Option<usize> {
    let live: Vec<usize> = (0..exhausted.len()).filter(|&idx| !exhausted[idx]).collect();
    live.choose(rng).copied()
}

fn normalize_level(level: usize, highest: usize) -> f64 {
    if highest == 0 {
        0.0
    } else {
        level as f64 / highest as f64
    }
}
