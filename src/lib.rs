pub mod app_dirs;
pub mod config;
pub mod corpus;
pub mod error;
pub mod frequency;
pub mod report;
pub mod sampler;
pub mod scoring;
pub mod ui;
pub mod util;
pub mod words;

pub use config::{Config, ConfigStore, FileConfigStore};
pub use corpus::{Alphabet, Corpus, MemoryCorpus, WordFilter, WordSource};
pub use error::{Result, WordError};
pub use frequency::{FrequencyCache, FrequencyStore, FrequencyTable, Normalization};
pub use sampler::{SampleRequest, SampledWord};
pub use scoring::Difficulty;
pub use words::Words;
