use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::SystemTime;

use anyhow::{Context, Result};

use super::loader::load_file;
use super::model::AirQualityDataset;

// ---------------------------------------------------------------------------
// Dataset cache keyed by (path, modification time)
// ---------------------------------------------------------------------------

struct CacheEntry {
    modified: SystemTime,
    dataset: Arc<AirQualityDataset>,
}

/// Loaded datasets, reused until the file on disk changes.
#[derive(Default)]
pub struct DatasetCache {
    entries: HashMap<PathBuf, CacheEntry>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached dataset for `path` if its modification time is
    /// unchanged, otherwise (re)load it from disk.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<AirQualityDataset>> {
        let modified = std::fs::metadata(path)
            .and_then(|m| m.modified())
            .with_context(|| format!("reading modification time of {}", path.display()))?;

        if let Some(entry) = self.entries.get(path) {
            if entry.modified == modified {
                log::debug!("Dataset cache hit for {}", path.display());
                return Ok(Arc::clone(&entry.dataset));
            }
            log::info!("{} changed on disk, reloading", path.display());
        }

        let dataset = Arc::new(load_file(path)?);
        self.entries.insert(
            path.to_path_buf(),
            CacheEntry {
                modified,
                dataset: Arc::clone(&dataset),
            },
        );
        Ok(dataset)
    }

    /// Drop the entry for `path`; the next lookup re-reads the file.
    pub fn invalidate(&mut self, path: &Path) -> bool {
        self.entries.remove(path).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Process-wide instance
// ---------------------------------------------------------------------------

fn global() -> &'static Mutex<DatasetCache> {
    static CACHE: OnceLock<Mutex<DatasetCache>> = OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(DatasetCache::new()))
}

/// Load `path` through the shared cache.
pub fn load_cached(path: &Path) -> Result<Arc<AirQualityDataset>> {
    let mut cache = global().lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    cache.get_or_load(path)
}

/// Forget the shared cache entry for `path`.
pub fn invalidate(path: &Path) -> bool {
    let mut cache = global().lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    cache.invalidate(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::TempDir;

    const HEADER: &str =
        "No,year,month,day,hour,PM2.5,PM10,SO2,NO2,CO,O3,TEMP,PRES,DEWP,WSPM,Air Quality";

    fn write_csv(dir: &Path, rows: &[&str]) -> PathBuf {
        let path = dir.join("all_data.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{HEADER}").unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
        path
    }

    fn bump_mtime(path: &Path, secs: u64) {
        let file = std::fs::File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::now() + Duration::from_secs(secs))
            .unwrap();
    }

    #[test]
    fn unchanged_file_returns_same_arc() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), &["1,2013,3,1,0,1,1,1,1,1,1,1,1,1,1,Good"]);

        let mut cache = DatasetCache::new();
        let first = cache.get_or_load(&path).unwrap();
        let second = cache.get_or_load(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn modified_file_is_reloaded() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), &["1,2013,3,1,0,1,1,1,1,1,1,1,1,1,1,Good"]);

        let mut cache = DatasetCache::new();
        let first = cache.get_or_load(&path).unwrap();
        assert_eq!(first.len(), 1);

        write_csv(
            dir.path(),
            &[
                "1,2013,3,1,0,1,1,1,1,1,1,1,1,1,1,Good",
                "2,2013,3,1,1,1,1,1,1,1,1,1,1,1,1,Poor",
            ],
        );
        bump_mtime(&path, 60);

        let second = cache.get_or_load(&path).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 2);
    }

    #[test]
    fn invalidate_forces_reload() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), &["1,2013,3,1,0,1,1,1,1,1,1,1,1,1,1,Good"]);

        let mut cache = DatasetCache::new();
        let first = cache.get_or_load(&path).unwrap();
        assert!(cache.invalidate(&path));
        assert!(!cache.invalidate(&path));
        let second = cache.get_or_load(&path).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn missing_file_is_not_cached() {
        let mut cache = DatasetCache::new();
        assert!(cache
            .get_or_load(Path::new("/tmp/does-not-exist-aq-cache.csv"))
            .is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn shared_cache_reuses_dataset() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), &["1,2013,3,1,0,1,1,1,1,1,1,1,1,1,1,Good"]);
        let first = load_cached(&path).unwrap();
        let second = load_cached(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(invalidate(&path));
    }
}
