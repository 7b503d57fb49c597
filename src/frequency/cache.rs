use super::FrequencyTable;
use crate::error::{Result, WordError};
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use tempfile::NamedTempFile;

/// Frequency table persisted as a pretty-printed JSON letter map
#[derive(Debug, Clone)]
pub struct FrequencyCache {
    path: PathBuf,
}

impl FrequencyCache {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn load(&self) -> Result<FrequencyTable> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(WordError::MissingCache(self.path.clone()))
            }
            Err(e) => return Err(e.into()),
        };

        let table: FrequencyTable = serde_json::from_slice(&bytes)?;
        table.validate()?;
        log::info!(
            "loaded {} letter frequencies from {}",
            table.len(),
            self.path.display()
        );
        Ok(table)
    }

    /// Write through a temp file in the same directory and rename it over the
    /// old cache, so readers see either the previous or the new table
    pub fn save(&self, table: &FrequencyTable) -> Result<()> {
        let parent_dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent_dir)?;

        let temp_file = NamedTempFile::new_in(parent_dir)?;
        {
            let mut writer = BufWriter::new(&temp_file);
            serde_json::to_writer_pretty(&mut writer, table)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        temp_file.persist(&self.path).map_err(|e| e.error)?;

        log::info!("exported frequency data to {}", self.path.display());
        Ok(())
    }
}

/// Process-wide frequency table that scoring reads and regeneration swaps.
///
/// Readers take an `Arc` snapshot, so a replacement never tears a table
/// that is being scored against.
#[derive(Debug)]
pub struct FrequencyStore {
    cache: FrequencyCache,
    current: RwLock<Option<Arc<FrequencyTable>>>,
}

impl FrequencyStore {
    /// Load the persisted table; fails with `MissingCache` when there is none
    pub fn open(cache: FrequencyCache) -> Result<Self> {
        let table = cache.load()?;
        Ok(Self::with_table(cache, table))
    }

    /// Like [`FrequencyStore::open`], but a missing cache leaves the store
    /// empty until [`FrequencyStore::replace`] fills it
    pub fn open_or_empty(cache: FrequencyCache) -> Result<Self> {
        match cache.load() {
            Ok(table) => Ok(Self::with_table(cache, table)),
            Err(WordError::MissingCache(path)) => {
                log::warn!("no letter frequency cache at {}", path.display());
                Ok(Self {
                    cache,
                    current: RwLock::new(None),
                })
            }
            Err(e) => Err(e),
        }
    }

    pub fn with_table(cache: FrequencyCache, table: FrequencyTable) -> Self {
        Self {
            cache,
            current: RwLock::new(Some(Arc::new(table))),
        }
    }

    pub fn cache(&self) -> &FrequencyCache {
        &self.cache
    }

    pub fn is_loaded(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn snapshot(&self) -> Result<Arc<FrequencyTable>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or_else(|| WordError::MissingCache(self.cache.path().to_path_buf()))
    }

    /// Persist `table`, then make it the table every later snapshot sees
    pub fn replace(&self, table: FrequencyTable) -> Result<Arc<FrequencyTable>> {
        self.cache.save(&table)?;
        let table = Arc::new(table);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&table));
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::Normalization;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_cache() {
        let dir = tempdir().unwrap();
        let cache = FrequencyCache::new(dir.path().join("freqs.json"));
        assert!(!cache.exists());
        assert_matches!(cache.load(), Err(WordError::MissingCache(_)));
        assert_matches!(
            FrequencyStore::open(cache.clone()),
            Err(WordError::MissingCache(_))
        );

        let store = FrequencyStore::open_or_empty(cache).unwrap();
        assert!(!store.is_loaded());
        assert_matches!(store.snapshot(), Err(WordError::MissingCache(_)));
    }

    #[test]
    fn test_empty_store_fills_on_replace() {
        let dir = tempdir().unwrap();
        let cache = FrequencyCache::new(dir.path().join("freqs.json"));
        let store = FrequencyStore::open_or_empty(cache.clone()).unwrap();
        let table = FrequencyTable::from_weights([('a', 1.0)]).unwrap();
        store.replace(table.clone()).unwrap();
        assert!(store.is_loaded());
        assert_eq!(*store.snapshot().unwrap(), table);

        let reopened = FrequencyStore::open(cache).unwrap();
        assert_eq!(*reopened.snapshot().unwrap(), table);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let cache = FrequencyCache::new(dir.path().join("nested").join("freqs.json"));
        let table = FrequencyTable::generate(&["leap", "plea", "apple"], Normalization::Sum).unwrap();
        cache.save(&table).unwrap();
        assert!(cache.exists());
        assert_eq!(cache.load().unwrap(), table);
    }

    #[test]
    fn test_save_is_byte_identical_for_same_table() {
        let dir = tempdir().unwrap();
        let cache = FrequencyCache::new(dir.path().join("freqs.json"));
        let words = ["quartz", "jumbo", "fjord"];

        cache
            .save(&FrequencyTable::generate(&words, Normalization::Sum).unwrap())
            .unwrap();
        let first = fs::read(cache.path()).unwrap();
        cache
            .save(&FrequencyTable::generate(&words, Normalization::Sum).unwrap())
            .unwrap();
        let second = fs::read(cache.path()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("freqs.json");
        fs::write(&path, b"[1, 2, 3]").unwrap();
        assert_matches!(FrequencyCache::new(&path).load(), Err(WordError::Json(_)));
    }

    #[test]
    fn test_store_replace_swaps_snapshot() {
        let dir = tempdir().unwrap();
        let cache = FrequencyCache::new(dir.path().join("freqs.json"));
        let old = FrequencyTable::from_weights([('a', 1.0)]).unwrap();
        let store = FrequencyStore::with_table(cache, old.clone());

        let before = store.snapshot().unwrap();
        let new = FrequencyTable::from_weights([('a', 0.5), ('b', 0.5)]).unwrap();
        store.replace(new.clone()).unwrap();

        // existing snapshots keep the table they started with
        assert_eq!(*before, old);
        assert_eq!(*store.snapshot().unwrap(), new);
        assert_eq!(store.cache().load().unwrap(), new);
    }

    #[test]
    fn test_store_is_shareable_across_threads() {
        let dir = tempdir().unwrap();
        let cache = FrequencyCache::new(dir.path().join("freqs.json"));
        let store = Arc::new(FrequencyStore::with_table(
            cache,
            FrequencyTable::from_weights([('a', 1.0)]).unwrap(),
        ));

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        let table = store.snapshot().unwrap();
                        // either the old or the new table, never a mix
                        assert!(table.len() == 1 || table.len() == 2);
                        assert!((table.total() - 1.0).abs() < 1e-9);
                    }
                })
            })
            .collect();

        store
            .replace(FrequencyTable::from_weights([('a', 0.5), ('b', 0.5)]).unwrap())
            .unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
    }
}
