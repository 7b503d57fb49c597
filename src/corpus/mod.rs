pub mod filter;
pub mod loader;
pub mod memory;

pub use filter::{Alphabet, WordFilter};
pub use loader::{Corpus, SearchHit};
pub use memory::MemoryCorpus;

use crate::error::{Result, WordError};

/// A leveled word collection the scorer and sampler can draw from
pub trait WordSource {
    /// Highest valid level index
    fn max_level(&self) -> usize;

    /// Every word at levels `min_level..=max_level` that passes `filter`, in
    /// category order, then level order, then list order. Repeats are kept.
    fn get_words(&self, min_level: usize, max_level: usize, filter: &WordFilter)
        -> Result<Vec<String>>;

    /// Every word at or below `max_level`
    fn words_up_to(&self, max_level: usize, filter: &WordFilter) -> Result<Vec<String>> {
        self.get_words(0, max_level, filter)
    }
}

/// Ensure `min_level <= max_level <= highest`
pub fn check_level_range(min_level: usize, max_level: usize, highest: usize) -> Result<()> {
    if min_level > max_level || max_level > highest {
        return Err(WordError::OutOfRange(format!(
            "levels must satisfy 0 <= min <= max <= {highest}, got {min_level}..={max_level}"
        )));
    }
    Ok(())
}
