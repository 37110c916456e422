//! Bounded in-memory cache for navaid lookups.
//!
//! Entries are keyed by a [`BoxKey`], a lookup box snapped outward to a fixed
//! grid, so nearby legs share an entry. The cache holds at most
//! [`CacheConfig::capacity`] entries, evicting the least recently used one,
//! and treats entries older than [`CacheConfig::ttl`] as misses.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::geo::BoundingBox;
use crate::openaip::Navaid;

/// Grid cells per degree used when snapping boxes (0.5° cells).
const CELLS_PER_DEGREE: f64 = 2.0;

/// Canonical, hashable cache key for a lookup box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoxKey {
    north: i32,
    south: i32,
    east: i32,
    west: i32,
}

impl BoxKey {
    /// Snap `bbox` outward to the grid.
    pub fn from_bbox(bbox: &BoundingBox) -> Self {
        Self {
            north: (bbox.north * CELLS_PER_DEGREE).ceil() as i32,
            south: (bbox.south * CELLS_PER_DEGREE).floor() as i32,
            east: (bbox.east * CELLS_PER_DEGREE).ceil() as i32,
            west: (bbox.west * CELLS_PER_DEGREE).floor() as i32,
        }
    }

    /// The snapped box this key stands for. Always contains the source box.
    pub fn to_bbox(&self) -> BoundingBox {
        BoundingBox {
            north: (f64::from(self.north) / CELLS_PER_DEGREE).min(90.0),
            south: (f64::from(self.south) / CELLS_PER_DEGREE).max(-90.0),
            east: (f64::from(self.east) / CELLS_PER_DEGREE).min(180.0),
            west: (f64::from(self.west) / CELLS_PER_DEGREE).max(-180.0),
        }
    }
}

/// Limits applied to an [`AirwayCache`].
#[derive(Debug, Clone, Copy)]
pub struct CacheConfig {
    pub capacity: usize,
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 64,
            ttl: Duration::from_secs(60 * 60),
        }
    }
}

/// Hit/miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
}

#[derive(Debug)]
struct CacheEntry {
    navaids: Arc<Vec<Navaid>>,
    inserted: Instant,
    last_accessed: Instant,
}

#[derive(Debug, Default)]
struct CacheInner {
    entries: HashMap<BoxKey, CacheEntry>,
    stats: CacheStats,
}

/// Thread-safe navaid cache shared between airway clients.
#[derive(Debug)]
pub struct AirwayCache {
    inner: Mutex<CacheInner>,
    config: CacheConfig,
}

impl Default for AirwayCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl AirwayCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            inner: Mutex::new(CacheInner::default()),
            config,
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheInner> {
        // A panic while holding the lock cannot leave entries half-written.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Look up `key`, refreshing its access time on a hit.
    pub fn get(&self, key: &BoxKey) -> Option<Arc<Vec<Navaid>>> {
        self.get_at(key, Instant::now())
    }

    fn get_at(&self, key: &BoxKey, now: Instant) -> Option<Arc<Vec<Navaid>>> {
        let mut guard = self.lock();
        let inner = &mut *guard;
        let expired = match inner.entries.get_mut(key) {
            Some(entry) if now.duration_since(entry.inserted) < self.config.ttl => {
                entry.last_accessed = now;
                let navaids = Arc::clone(&entry.navaids);
                inner.stats.hits += 1;
                return Some(navaids);
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            inner.entries.remove(key);
            inner.stats.expirations += 1;
            debug!(?key, "navaid cache entry expired");
        }
        inner.stats.misses += 1;
        None
    }

    /// Store `navaids` under `key`, evicting the least recently used entry
    /// when the cache is full.
    pub fn insert(&self, key: BoxKey, navaids: Vec<Navaid>) -> Arc<Vec<Navaid>> {
        self.insert_at(key, navaids, Instant::now())
    }

    fn insert_at(&self, key: BoxKey, navaids: Vec<Navaid>, now: Instant) -> Arc<Vec<Navaid>> {
        let navaids = Arc::new(navaids);
        if self.config.capacity == 0 {
            return navaids;
        }

        let mut inner = self.lock();
        if !inner.entries.contains_key(&key) {
            while inner.entries.len() >= self.config.capacity {
                let oldest = inner
                    .entries
                    .iter()
                    .min_by_key(|(_, entry)| entry.last_accessed)
                    .map(|(key, _)| *key);
                let Some(oldest) = oldest else {
                    break;
                };
                inner.entries.remove(&oldest);
                inner.stats.evictions += 1;
                debug!(key = ?oldest, "evicted navaid cache entry");
            }
        }

        inner.entries.insert(
            key,
            CacheEntry {
                navaids: Arc::clone(&navaids),
                inserted: now,
                last_accessed: now,
            },
        );
        navaids
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lock().entries.clear();
    }

    pub fn stats(&self) -> CacheStats {
        self.lock().stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinate;

    fn navaid(ident: &str) -> Navaid {
        Navaid {
            ident: Some(ident.to_string()),
            name: None,
            kind: None,
            coordinate: Coordinate::new_unchecked(0.0, 0.0),
            airways: Vec::new(),
        }
    }

    fn key(n: i32) -> BoxKey {
        BoxKey {
            north: n + 1,
            south: n,
            east: n + 1,
            west: n,
        }
    }

    #[test]
    fn box_key_snaps_outward_and_contains_source() {
        let bbox = BoundingBox {
            north: 42.7128,
            south: 31.6367,
            east: -71.7781,
            west: -86.4281,
        };
        let key = BoxKey::from_bbox(&bbox);
        let snapped = key.to_bbox();
        assert_eq!(snapped.north, 43.0);
        assert_eq!(snapped.south, 31.5);
        assert_eq!(snapped.east, -71.5);
        assert_eq!(snapped.west, -86.5);
    }

    #[test]
    fn nearby_boxes_share_a_key() {
        let a = BoundingBox {
            north: 42.71,
            south: 31.64,
            east: -71.78,
            west: -86.43,
        };
        let b = BoundingBox {
            north: 42.60,
            south: 31.70,
            east: -71.90,
            west: -86.10,
        };
        assert_eq!(BoxKey::from_bbox(&a), BoxKey::from_bbox(&b));
    }

    #[test]
    fn evicts_least_recently_used_at_capacity() {
        let cache = AirwayCache::new(CacheConfig {
            capacity: 2,
            ttl: Duration::from_secs(60),
        });
        let start = Instant::now();
        cache.insert_at(key(1), vec![navaid("A")], start);
        cache.insert_at(key(2), vec![navaid("B")], start + Duration::from_millis(1));
        // Touch key 1 so key 2 becomes the oldest.
        assert!(cache.get_at(&key(1), start + Duration::from_millis(2)).is_some());
        cache.insert_at(key(3), vec![navaid("C")], start + Duration::from_millis(3));

        assert_eq!(cache.len(), 2);
        let later = start + Duration::from_millis(4);
        assert!(cache.get_at(&key(1), later).is_some());
        assert!(cache.get_at(&key(2), later).is_none());
        assert!(cache.get_at(&key(3), later).is_some());
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn expired_entries_are_misses() {
        let cache = AirwayCache::new(CacheConfig {
            capacity: 4,
            ttl: Duration::from_secs(10),
        });
        let start = Instant::now();
        cache.insert_at(key(1), vec![navaid("A")], start);
        assert!(cache.get_at(&key(1), start + Duration::from_secs(5)).is_some());
        assert!(cache.get_at(&key(1), start + Duration::from_secs(11)).is_none());
        assert!(cache.is_empty());

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.expirations, 1);
    }

    #[test]
    fn clear_drops_entries_but_keeps_stats() {
        let cache = AirwayCache::default();
        cache.insert(key(1), vec![navaid("A")]);
        assert!(cache.get(&key(1)).is_some());

        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get(&key(1)).is_none());
        let stats = cache.stats();
        assert_eq!((stats.hits, stats.misses), (1, 1));
    }

    #[test]
    fn zero_capacity_never_stores() {
        let cache = AirwayCache::new(CacheConfig {
            capacity: 0,
            ttl: Duration::from_secs(10),
        });
        cache.insert(key(1), vec![navaid("A")]);
        assert!(cache.is_empty());
    }
}
