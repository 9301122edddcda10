//! Memoizing layer over [`PictureResolver`].
//!
//! At most one resolution runs per logical name: the first caller registers a
//! shared future under the cache lock before anything is awaited, and later
//! callers await a clone of it. Successful resolutions stay cached until
//! [`PictureCache::clear`]. Failures remove their own entry before any caller
//! sees the outcome, so the next request starts over.

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};
use parking_lot::Mutex;
use tracing::{debug, error, trace};

use crate::domain::entities::{ImageName, PictureSourceSet};
use crate::domain::errors::ResolveError;

use super::picture_resolver::PictureResolver;

type PictureOutcome = Result<Arc<PictureSourceSet>, ResolveError>;
type PendingPicture = Shared<BoxFuture<'static, PictureOutcome>>;
type EntryMap = HashMap<ImageName, CacheEntry>;

struct CacheEntry {
    generation: u64,
    pending: PendingPicture,
}

/// Process-wide cache of picture resolutions, shared by reference.
pub struct PictureCache {
    resolver: Arc<PictureResolver>,
    entries: Arc<Mutex<EntryMap>>,
    next_generation: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl std::fmt::Debug for PictureCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PictureCache")
            .field("resolver", &self.resolver)
            .field("entries", &self.entries.lock().len())
            .finish_non_exhaustive()
    }
}

impl PictureCache {
    /// Creates an empty cache over the resolver.
    #[must_use]
    pub fn new(resolver: Arc<PictureResolver>) -> Self {
        Self {
            resolver,
            entries: Arc::new(Mutex::new(HashMap::new())),
            next_generation: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Returns the underlying resolver.
    #[must_use]
    pub const fn resolver(&self) -> &Arc<PictureResolver> {
        &self.resolver
    }

    /// Resolves a name through the cache.
    ///
    /// Not-found and load failures yield `Ok(None)`. An empty name yields
    /// `Ok(None)` on first poll and creates no entry.
    ///
    /// # Errors
    /// Returns [`ResolveError::LoaderPanicked`] if the catalog loader panicked.
    /// The entry is removed first, so a retry invokes the loader again.
    pub async fn resolve(&self, name: &str) -> Result<Option<Arc<PictureSourceSet>>, ResolveError> {
        let Some(name) = ImageName::new(name) else {
            return Ok(None);
        };

        match self.pending_for(&name).await {
            Ok(picture) => Ok(Some(picture)),
            Err(err) if err.is_soft() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Drops every entry. In-flight resolutions finish for their current
    /// callers but are not cached.
    pub fn clear(&self) {
        let mut entries = self.entries.lock();
        let count = entries.len();
        entries.clear();
        debug!(count = count, "Cleared picture cache");
    }

    /// Returns a snapshot of the cached names.
    #[must_use]
    pub fn info(&self) -> CacheInfo {
        let entries = self.entries.lock();
        let mut keys: Vec<String> = entries.keys().map(|k| k.as_str().to_string()).collect();
        keys.sort_unstable();
        let pending = entries
            .values()
            .filter(|entry| entry.pending.peek().is_none())
            .count();
        CacheInfo {
            count: keys.len(),
            keys,
            pending,
        }
    }

    /// Returns hit/miss counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Returns the registered future for the name, registering one if absent.
    fn pending_for(&self, name: &ImageName) -> PendingPicture {
        let mut entries = self.entries.lock();

        if let Some(entry) = entries.get(name) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(name = %name, "Picture cache hit");
            return entry.pending.clone();
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        trace!(name = %name, "Picture cache miss");

        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let pending = Self::resolution_future(
            Arc::clone(&self.resolver),
            Arc::clone(&self.entries),
            name.clone(),
            generation,
        );
        entries.insert(
            name.clone(),
            CacheEntry {
                generation,
                pending: pending.clone(),
            },
        );
        pending
    }

    fn resolution_future(
        resolver: Arc<PictureResolver>,
        entries: Arc<Mutex<EntryMap>>,
        name: ImageName,
        generation: u64,
    ) -> PendingPicture {
        async move {
            let outcome = AssertUnwindSafe(resolver.try_resolve(&name))
                .catch_unwind()
                .await
                .unwrap_or_else(|_| {
                    let key = name.catalog_key(&resolver.config().catalog_root);
                    error!(name = %name, key = %key, "Catalog loader panicked");
                    Err(ResolveError::loader_panicked(key))
                })
                .map(Arc::new);

            if outcome.is_err() {
                let mut entries = entries.lock();
                if entries
                    .get(&name)
                    .is_some_and(|entry| entry.generation == generation)
                {
                    entries.remove(&name);
                    trace!(name = %name, "Evicted failed resolution");
                }
            }

            outcome
        }
        .boxed()
        .shared()
    }
}

/// Snapshot of the cache contents, for diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheInfo {
    /// Cached logical names, sorted.
    pub keys: Vec<String>,
    /// Number of cached names.
    pub count: usize,
    /// Entries whose resolution has not settled yet.
    pub pending: usize,
}

impl std::fmt::Display for CacheInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Picture cache: {} entries ({} pending)",
            self.count, self.pending
        )
    }
}

/// Hit/miss counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Requests served by an existing entry.
    pub hits: u64,
    /// Requests that registered a new resolution.
    pub misses: u64,
}
