use crate::app_dirs::AppDirs;
use crate::error::{Result, WordError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_LEVEL_TAGS: [u32; 10] = [10, 20, 35, 40, 50, 55, 60, 70, 80, 95];
pub const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";
pub const DEFAULT_VOWELS: &str = "aeiouyw";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Root directory of the word list database
    pub corpus_dir: PathBuf,
    /// Word list categories, relative to `corpus_dir`, read in this order
    pub categories: Vec<String>,
    /// Exclusion lists, relative to `corpus_dir`
    pub offensive: Vec<String>,
    /// External tier identifier for each level index, ascending
    pub level_tags: Vec<u32>,
    /// Letter frequency cache; resolved through `AppDirs` when unset
    pub frequency_cache: Option<PathBuf>,
    pub allowed_letters: String,
    pub vowels: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            corpus_dir: PathBuf::from("scowl-2020.12.07"),
            categories: vec![
                "final/english-words".to_string(),
                "final/american-words".to_string(),
            ],
            offensive: vec!["misc/offensive.1".to_string()],
            level_tags: DEFAULT_LEVEL_TAGS.to_vec(),
            frequency_cache: None,
            allowed_letters: DEFAULT_ALPHABET.to_string(),
            vowels: DEFAULT_VOWELS.to_string(),
        }
    }
}

impl Config {
    /// Highest valid level index
    pub fn max_level(&self) -> usize {
        self.level_tags.len().saturating_sub(1)
    }

    pub fn frequency_cache_path(&self) -> PathBuf {
        self.frequency_cache
            .clone()
            .unwrap_or_else(AppDirs::frequency_cache_path)
    }

    pub fn validate(&self) -> Result<()> {
        if self.level_tags.is_empty() {
            return Err(WordError::InvalidParameter(
                "at least one level tag is required".to_string(),
            ));
        }
        if self.level_tags.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(WordError::InvalidParameter(format!(
                "level tags must be strictly increasing, got {:?}",
                self.level_tags
            )));
        }
        if self.allowed_letters.is_empty() {
            return Err(WordError::InvalidParameter(
                "allowed letters must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            match serde_json::from_slice::<Config>(&bytes) {
                Ok(cfg) => return cfg,
                Err(e) => log::warn!(
                    "ignoring unreadable config {}: {e}",
                    self.path.display()
                ),
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn save_and_load_custom_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config {
            corpus_dir: PathBuf::from("/data/scowl"),
            categories: vec!["final/british-words".into()],
            offensive: vec![],
            level_tags: vec![10, 20, 35],
            frequency_cache: Some(PathBuf::from("/tmp/freqs.json")),
            allowed_letters: "abc".into(),
            vowels: "a".into(),
        };
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn missing_or_corrupt_config_falls_back_to_default() {
        let dir = tempdir().unwrap();
        let missing = FileConfigStore::with_path(dir.path().join("absent.json"));
        assert_eq!(missing.load(), Config::default());

        let corrupt_path = dir.path().join("corrupt.json");
        fs::write(&corrupt_path, b"{ not json").unwrap();
        let corrupt = FileConfigStore::with_path(&corrupt_path);
        assert_eq!(corrupt.load(), Config::default());
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, br#"{ "corpus_dir": "/srv/words" }"#).unwrap();
        let cfg = FileConfigStore::with_path(&path).load();
        assert_eq!(cfg.corpus_dir, PathBuf::from("/srv/words"));
        assert_eq!(cfg.level_tags, DEFAULT_LEVEL_TAGS.to_vec());
        assert_eq!(cfg.max_level(), 9);
    }

    #[test]
    fn validate_rejects_bad_level_tags() {
        let mut cfg = Config::default();
        assert!(cfg.validate().is_ok());

        cfg.level_tags = vec![];
        assert!(matches!(cfg.validate(), Err(WordError::InvalidParameter(_))));

        cfg.level_tags = vec![10, 10, 20];
        assert!(matches!(cfg.validate(), Err(WordError::InvalidParameter(_))));
    }
}
