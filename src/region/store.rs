use std::{fs, path::Path, sync::Arc};

use ahash::AHashMap;
use anyhow::anyhow;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use super::collection::RegionCollection;
use super::geojson::read_district_features;

/// Loads and caches per-state boundary collections.
///
/// Entries are immutable once published and handed out as `Arc`s, so a store
/// behind a reader-writer guard is safe for concurrent readers; loads only
/// ever add entries.
#[derive(Debug, Default)]
pub struct BoundaryStore {
    regions: Vec<Arc<RegionCollection>>,
    by_state: AHashMap<Arc<str>, usize>,
}

impl BoundaryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load one state's boundary document, memoized by state name.
    /// A repeat load returns the cached collection without touching the file.
    pub fn load(&mut self, state: &str, path: &Path) -> Result<Arc<RegionCollection>> {
        if let Some(region) = self.get(state) {
            return Ok(region);
        }

        let bytes = fs::read(path).map_err(|e| Error::DataLoad {
            path: path.to_path_buf(),
            source: anyhow::Error::new(e).context("Failed to read boundary file"),
        })?;
        self.insert_from_bytes(state, &bytes, path)
    }

    /// Fetch one state's boundary document over HTTPS, memoized by state name.
    #[cfg(feature = "download")]
    pub fn load_url(&mut self, state: &str, url: &str) -> Result<Arc<RegionCollection>> {
        if let Some(region) = self.get(state) {
            return Ok(region);
        }

        use anyhow::Context;

        let fetch = || -> anyhow::Result<Vec<u8>> {
            let response = reqwest::blocking::get(url)
                .with_context(|| format!("Failed to fetch {url}"))?
                .error_for_status()
                .with_context(|| format!("Request for {url} failed"))?;
            Ok(response.bytes()?.to_vec())
        };
        let bytes = fetch().map_err(|source| Error::DataLoad {
            path: url.into(),
            source,
        })?;
        self.insert_from_bytes(state, &bytes, Path::new(url))
    }

    /// Discover and load every `<state>.json` document directly under `dir`.
    ///
    /// A document that fails to parse is skipped with a warning — that state
    /// is simply absent from the map. Only an unreadable directory is an
    /// error. Returns the number of regions loaded.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize> {
        let mut entries: Vec<_> = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| Error::DataLoad {
                path: dir.to_path_buf(),
                source: anyhow::Error::new(e).context("Failed to read boundary directory"),
            })?;
        entries.sort_by_key(|e| e.file_name().to_owned());

        let mut loaded = 0;
        for entry in entries {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            let Some(state) = path.file_stem().and_then(|s| s.to_str()) else { continue };

            match self.load(state, path) {
                Ok(_) => loaded += 1,
                Err(e) => warn!(state, error = %e, "skipping unloadable region"),
            }
        }
        Ok(loaded)
    }

    /// Look up a loaded region by state name.
    pub fn get(&self, state: &str) -> Option<Arc<RegionCollection>> {
        self.by_state.get(state).map(|&i| Arc::clone(&self.regions[i]))
    }

    /// All loaded regions, in insertion (discovery) order.
    pub fn regions(&self) -> &[Arc<RegionCollection>] {
        &self.regions
    }

    pub fn len(&self) -> usize { self.regions.len() }

    pub fn is_empty(&self) -> bool { self.regions.is_empty() }

    fn insert_from_bytes(
        &mut self,
        state: &str,
        bytes: &[u8],
        origin: &Path,
    ) -> Result<Arc<RegionCollection>> {
        let (features, skipped) = read_district_features(bytes).map_err(|source| Error::DataLoad {
            path: origin.to_path_buf(),
            source,
        })?;
        if features.is_empty() {
            return Err(Error::DataLoad {
                path: origin.to_path_buf(),
                source: anyhow!("Document contains no usable district features"),
            });
        }
        debug!(state, districts = features.len(), skipped, "loaded region");

        let region = Arc::new(RegionCollection::from_features(state, features));
        self.by_state.insert(Arc::clone(region.state()), self.regions.len());
        self.regions.push(Arc::clone(&region));
        Ok(region)
    }
}
