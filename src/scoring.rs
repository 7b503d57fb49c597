use crate::error::{Result, WordError};
use crate::frequency::FrequencyTable;
use std::collections::BTreeSet;

/// Unique letter count the difficulty formula treats as easiest
const IDEAL_UNIQUE_LETTERS: f64 = 6.0;

/// Aggregate the table weights of a word's letters.
///
/// With `count_repeats` every occurrence contributes and the average is over
/// the word length; otherwise each distinct letter contributes once and the
/// average is over the distinct letters. An empty word scores 0.
pub fn letter_frequency(
    table: &FrequencyTable,
    word: &str,
    average: bool,
    count_repeats: bool,
) -> Result<f64> {
    if word.is_empty() {
        return Ok(0.0);
    }

    let mut total = 0.0;
    let mut seen = BTreeSet::new();
    for letter in word.chars() {
        let first = seen.insert(letter);
        if count_repeats || first {
            total += table.weight(letter)?;
        }
    }

    if !average {
        return Ok(total);
    }
    let count = if count_repeats {
        word.chars().count()
    } else {
        seen.len()
    };
    Ok(total / count as f64)
}

fn unique_letters(word: &str) -> BTreeSet<char> {
    word.chars().collect()
}

/// Result of scoring a word's difficulty
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    pub score: f64,
    /// Average unique-letter frequency the score was derived from
    pub frequency: f64,
}

/// Heuristic difficulty of `word` found at `level` out of `max_level`.
///
/// Rarer letters, unique letter counts far from six, and higher levels all
/// raise the score; the level term grows with its cube.
pub fn difficulty(
    table: &FrequencyTable,
    word: &str,
    level: usize,
    max_level: usize,
) -> Result<Difficulty> {
    if max_level == 0 {
        return Err(WordError::InvalidParameter(
            "max level must be positive to normalize the level".to_string(),
        ));
    }
    if level > max_level {
        return Err(WordError::OutOfRange(format!(
            "level {level} exceeds max level {max_level}"
        )));
    }

    let frequency = letter_frequency(table, word, true, false)?;
    if frequency == 0.0 {
        return Err(WordError::DivisionByZero(format!(
            "letter frequency of '{word}' is zero"
        )));
    }

    let r = level as f64 / max_level as f64;
    let l = unique_letters(word).len() as f64;
    Ok(Difficulty {
        score: difficulty_formula(frequency, l, r),
        frequency,
    })
}

/// `((1/(10F)) - 2/3) * (|(L-6)/3| + 1) * (3R^3 + 1)`
pub fn difficulty_formula(frequency: f64, unique_letters: f64, relative_level: f64) -> f64 {
    let rarity = 1.0 / (10.0 * frequency) - 2.0 / 3.0;
    let shape = ((unique_letters - IDEAL_UNIQUE_LETTERS) / 3.0).abs() + 1.0;
    let level = 3.0 * relative_level.powi(3) + 1.0;
    rarity * shape * level
}
