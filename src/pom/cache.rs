//! Memoized extraction results per descriptor file.
//!
//! A [`ResolutionCache`] parses each `(path, root)` key at most once and keeps the results
//! of *every* registered extractor, not only the one that was asked for, since the single
//! parse pass already produced them all.
//!
//! # Failure policy
//!
//! - Missing or unreadable file: `Ok(None)`, nothing cached. The caller decides whether
//!   that is acceptable.
//! - Malformed XML or invalid UTF-8: the [`PomError::MalformedDocument`] is returned and
//!   nothing is cached.
//! - Unregistered info type: [`PomError::MissingInfo`].
//!
//! # Concurrency
//!
//! The map is a `DashMap`. A miss holds the vacant entry while reading and parsing, so
//! concurrent requests for the same key wait for that one parse instead of starting
//! their own. Parsing never calls back into the cache, so holding the entry cannot
//! deadlock. [`ResolutionCache::clear`] needs `&mut self` and so cannot overlap a lookup.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, warn};

use super::extractor::{ExtractionResults, ExtractorRegistry, PomInfo};
use crate::core::PomError;

/// Identity of a cached descriptor: the path as requested plus the optional root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub path: PathBuf,
    pub root: Option<PathBuf>,
}

impl CacheKey {
    pub fn new(path: &Path, root: Option<&Path>) -> Self {
        Self {
            path: path.to_path_buf(),
            root: root.map(Path::to_path_buf),
        }
    }

    /// The path to open: `root/path` when a root is set, `path` otherwise.
    pub fn full_path(&self) -> PathBuf {
        match &self.root {
            Some(root) => root.join(&self.path),
            None => self.path.clone(),
        }
    }
}

/// Parse-once cache of [`ExtractionResults`].
#[derive(Debug)]
pub struct ResolutionCache {
    registry: ExtractorRegistry,
    entries: DashMap<CacheKey, Arc<ExtractionResults>>,
    parses: AtomicUsize,
}

impl Default for ResolutionCache {
    fn default() -> Self {
        Self::new(ExtractorRegistry::standard())
    }
}

impl ResolutionCache {
    /// A cache running `registry` over every descriptor it parses.
    pub fn new(registry: ExtractorRegistry) -> Self {
        Self {
            registry,
            entries: DashMap::new(),
            parses: AtomicUsize::new(0),
        }
    }

    pub fn registry(&self) -> &ExtractorRegistry {
        &self.registry
    }

    /// All extractor results for a descriptor, parsing it on first request.
    pub fn results(
        &self,
        path: &Path,
        root: Option<&Path>,
    ) -> Result<Option<Arc<ExtractionResults>>, PomError> {
        match self.entries.entry(CacheKey::new(path, root)) {
            Entry::Occupied(entry) => {
                debug!(target: "pom::cache", "Cache hit for {}", path.display());
                Ok(Some(entry.get().clone()))
            }
            Entry::Vacant(entry) => {
                let full_path = entry.key().full_path();
                let bytes = match std::fs::read(&full_path) {
                    Ok(bytes) => bytes,
                    Err(e) if e.kind() == ErrorKind::NotFound => {
                        debug!(target: "pom::cache", "No descriptor at {}", full_path.display());
                        return Ok(None);
                    }
                    Err(e) => {
                        warn!(
                            target: "pom::cache",
                            "Treating unreadable descriptor {} as absent: {}",
                            full_path.display(),
                            e
                        );
                        return Ok(None);
                    }
                };

                let content = String::from_utf8(bytes).map_err(|e| {
                    let offset = e.utf8_error().valid_up_to();
                    PomError::malformed(
                        path,
                        format!("invalid UTF-8: {}", e.utf8_error()),
                        &String::from_utf8_lossy(e.as_bytes()),
                        Some(offset),
                    )
                })?;

                self.parses.fetch_add(1, Ordering::Relaxed);
                debug!(target: "pom::cache", "Parsing {}", full_path.display());
                let results = Arc::new(self.registry.extract(path, &content)?);
                entry.insert(results.clone());
                Ok(Some(results))
            }
        }
    }

    /// One extractor's result for a descriptor; `Ok(None)` if the file does not exist.
    pub fn get<T: PomInfo>(
        &self,
        path: &Path,
        root: Option<&Path>,
    ) -> Result<Option<Arc<T>>, PomError> {
        self.results(path, root)?.map(|results| results.get::<T>()).transpose()
    }

    /// Number of documents parsed since construction or the last [`clear`](Self::clear).
    pub fn parse_count(&self) -> usize {
        self.parses.load(Ordering::Relaxed)
    }

    /// Number of cached descriptors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every cached entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        *self.parses.get_mut() = 0;
    }
}
