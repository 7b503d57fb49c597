use crate::corpus::{WordFilter, WordSource};
use crate::error::Result;
use crate::scoring;
use crate::util::{mean, std_dev};
use crate::words::Words;
use itertools::Itertools;
use serde::Serialize;
use std::collections::BTreeSet;
use std::io::Write;

/// Letter frequency spread of the words at one level
#[derive(Debug, Clone, PartialEq)]
pub struct LevelStats {
    pub level: usize,
    pub word_count: usize,
    pub mean_frequency: Option<f64>,
    pub std_frequency: Option<f64>,
    /// Same statistics with repeated letters counted every time
    pub mean_frequency_repeats: Option<f64>,
    pub std_frequency_repeats: Option<f64>,
}

/// One scored word of a difficulty report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DifficultyRow {
    pub word: String,
    pub level: usize,
    pub length: usize,
    pub unique_letters: usize,
    pub frequency: f64,
    pub difficulty: f64,
}

/// Filters the difficulty report applies unless told otherwise
pub fn default_report_filter() -> WordFilter {
    WordFilter::new().min_length(4).vowel_required(true)
}

pub fn level_stats<S: WordSource>(
    words: &Words<S>,
    min_level: usize,
    max_level: usize,
    filter: &WordFilter,
) -> Result<Vec<LevelStats>> {
    let table = words.frequencies()?;
    crate::corpus::check_level_range(min_level, max_level, words.max_level())?;

    (min_level..=max_level)
        .map(|level| {
            let level_words = words.get_words(level, level, filter)?;
            let mut unique = Vec::with_capacity(level_words.len());
            let mut repeats = Vec::with_capacity(level_words.len());
            for word in &level_words {
                unique.push(scoring::letter_frequency(&table, word, true, false)?);
                repeats.push(scoring::letter_frequency(&table, word, true, true)?);
            }

            Ok(LevelStats {
                level,
                word_count: level_words.len(),
                mean_frequency: mean(&unique),
                std_frequency: std_dev(&unique),
                mean_frequency_repeats: mean(&repeats),
                std_frequency_repeats: std_dev(&repeats),
            })
        })
        .collect()
}

/// Score every word at each level in `min_level..=max_level`
pub fn difficulty_report<S: WordSource>(
    words: &Words<S>,
    min_level: usize,
    max_level: usize,
    filter: &WordFilter,
) -> Result<Vec<DifficultyRow>> {
    let table = words.frequencies()?;
    crate::corpus::check_level_range(min_level, max_level, words.max_level())?;

    let mut rows = Vec::new();
    for level in min_level..=max_level {
        for word in words.get_words(level, level, filter)? {
            let scored = scoring::difficulty(&table, &word, level, words.max_level())?;
            rows.push(DifficultyRow {
                length: word.chars().count(),
                unique_letters: word.chars().collect::<BTreeSet<_>>().len(),
                frequency: scored.frequency,
                difficulty: scored.score,
                level,
                word,
            });
        }
    }
    Ok(rows)
}

/// Rows from hardest to easiest
pub fn hardest_first(rows: &[DifficultyRow]) -> Vec<&DifficultyRow> {
    rows.iter()
        .sorted_by(|a, b| {
            b.difficulty
                .partial_cmp(&a.difficulty)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .collect()
}

pub fn write_csv<W: Write>(rows: &[DifficultyRow], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::MemoryCorpus;
    use crate::frequency::{FrequencyCache, FrequencyStore, FrequencyTable};
    use tempfile::{tempdir, TempDir};

    fn create_test_words() -> (TempDir, Words<MemoryCorpus>) {
        let dir = tempdir().unwrap();
        let corpus = MemoryCorpus::new(3)
            .with_words("english", 0, &["leap", "plea", "pal"])
            .with_words("english", 2, &["peal", "pppp", "apple"]);
        let table = FrequencyTable::from_weights([
            ('a', 0.2),
            ('p', 0.2),
            ('l', 0.2),
            ('e', 0.4),
        ])
        .unwrap();
        let store =
            FrequencyStore::with_table(FrequencyCache::new(dir.path().join("freqs.json")), table);
        (dir, Words::new(corpus, store))
    }

    #[test]
    fn test_level_stats() {
        let (_dir, words) = create_test_words();
        let stats = level_stats(&words, 0, 1, &WordFilter::new()).unwrap();
        assert_eq!(stats.len(), 2);

        assert_eq!(stats[0].level, 0);
        assert_eq!(stats[0].word_count, 3);
        // leap and plea average 0.25, pal 0.2
        let mean_freq = stats[0].mean_frequency.unwrap();
        assert!((mean_freq - 0.7 / 3.0).abs() < 1e-12);
        assert!(stats[0].std_frequency.unwrap() > 0.0);

        assert_eq!(stats[1].word_count, 0);
        assert_eq!(stats[1].mean_frequency, None);
        assert_eq!(stats[1].std_frequency_repeats, None);
    }

    #[test]
    fn test_difficulty_report_applies_filter() {
        let (_dir, words) = create_test_words();
        let rows = difficulty_report(&words, 0, 2, &default_report_filter()).unwrap();
        let listed: Vec<&str> = rows.iter().map(|r| r.word.as_str()).collect();
        // "pal" is too short, "pppp" has no vowel
        assert_eq!(listed, vec!["leap", "plea", "peal", "apple"]);

        let apple = &rows[3];
        assert_eq!(apple.level, 2);
        assert_eq!(apple.length, 5);
        assert_eq!(apple.unique_letters, 4);
    }

    #[test]
    fn test_hardest_first_is_descending() {
        let (_dir, words) = create_test_words();
        let rows = difficulty_report(&words, 0, 2, &default_report_filter()).unwrap();
        let sorted = hardest_first(&rows);
        assert_eq!(sorted.len(), rows.len());
        for pair in sorted.windows(2) {
            assert!(pair[0].difficulty >= pair[1].difficulty);
        }
    }

    #[test]
    fn test_write_csv() {
        let rows = vec![DifficultyRow {
            word: "leap".into(),
            level: 1,
            length: 4,
            unique_letters: 4,
            frequency: 0.25,
            difficulty: -0.5,
        }];
        let mut out = Vec::new();
        write_csv(&rows, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "word,level,length,unique_letters,frequency,difficulty\nleap,1,4,4,0.25,-0.5\n"
        );
    }
}
