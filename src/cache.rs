//! The two-tier LRU caches the tile pipeline relies on for its serving
//! latency: compiled objects survive across tiles (a feature straddling
//! many tiles is only ever compiled once), and whole tile PNGs survive
//! across repeat requests for the same `{z}/{x}/{y}`.

use crate::tile::Object;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Mutex;

const DEFAULT_OBJECT_CACHE_SIZE: usize = 2000;
const DEFAULT_PNG_CACHE_SIZE: usize = 2000;

fn cache_capacity(size: usize) -> NonZeroUsize {
    NonZeroUsize::new(size).unwrap_or(NonZeroUsize::new(1).unwrap())
}

/// Caches the compiled `Object`s for one feature, keyed `"{KIND}:{id}"`
/// (`"WAY:123"`, `"REL:456"`, `"NODE:789"`) the way the source extract's
/// `objectCache` does.
pub struct ObjectCache {
    inner: Mutex<LruCache<String, Vec<Object>>>,
}

impl ObjectCache {
    pub fn new(capacity: usize) -> Self {
        ObjectCache {
            inner: Mutex::new(LruCache::new(cache_capacity(capacity))),
        }
    }

    pub fn get_or_compile(&self, key: &str, compile: impl FnOnce() -> Vec<Object>) -> Vec<Object> {
        let mut guard = self.inner.lock().expect("object cache mutex poisoned");
        if let Some(hit) = guard.get(key) {
            return hit.clone();
        }
        drop(guard);
        let compiled = compile();
        let mut guard = self.inner.lock().expect("object cache mutex poisoned");
        guard.put(key.to_string(), compiled.clone());
        compiled
    }
}

impl Default for ObjectCache {
    fn default() -> Self {
        ObjectCache::new(DEFAULT_OBJECT_CACHE_SIZE)
    }
}

/// Caches finished tile PNGs keyed `"{z}/{x}/{y}"`.
pub struct PngCache {
    inner: Mutex<LruCache<String, Vec<u8>>>,
}

impl PngCache {
    pub fn new(capacity: usize) -> Self {
        PngCache {
            inner: Mutex::new(LruCache::new(cache_capacity(capacity))),
        }
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.inner.lock().expect("png cache mutex poisoned").get(key).cloned()
    }

    pub fn put(&self, key: String, png: Vec<u8>) {
        self.inner.lock().expect("png cache mutex poisoned").put(key, png);
    }
}

impl Default for PngCache {
    fn default() -> Self {
        PngCache::new(DEFAULT_PNG_CACHE_SIZE)
    }
}

pub fn tile_cache_key(z: u8, x: i64, y: i64) -> String {
    format!("{z}/{x}/{y}")
}

pub fn way_cache_key(id: i64) -> String {
    format!("WAY:{id}")
}

pub fn relation_cache_key(id: i64) -> String {
    format!("REL:{id}")
}

pub fn node_cache_key(id: i64) -> String {
    format!("NODE:{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_lookups_do_not_recompile() {
        let cache = ObjectCache::new(10);
        let mut calls = 0;
        let key = way_cache_key(1);
        cache.get_or_compile(&key, || {
            calls += 1;
            Vec::new()
        });
        cache.get_or_compile(&key, || {
            calls += 1;
            Vec::new()
        });
        assert_eq!(calls, 1);
    }

    #[test]
    fn distinct_keys_do_not_collide() {
        assert_ne!(way_cache_key(1), relation_cache_key(1));
        assert_ne!(way_cache_key(1), node_cache_key(1));
    }

    #[test]
    fn png_cache_round_trips() {
        let cache = PngCache::new(4);
        let key = tile_cache_key(15, 1, 2);
        assert!(cache.get(&key).is_none());
        cache.put(key.clone(), vec![1, 2, 3]);
        assert_eq!(cache.get(&key), Some(vec![1, 2, 3]));
    }
}
