//! Bounded per-client response cache.
//!
//! Entries are keyed by the exact (operation, variables) pair and evicted in
//! least-recently-used order once the capacity is exceeded. There is no
//! expiry and no explicit invalidation.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::query::Operation;

/// Identifies one cached response.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    operation: Operation,
    /// Variables serialized with sorted keys.
    variables: String,
}

impl CacheKey {
    pub fn new(operation: Operation, variables: &Map<String, Value>) -> Self {
        let sorted: BTreeMap<&String, &Value> = variables.iter().collect();
        let variables = serde_json::to_string(&sorted).unwrap_or_default();
        Self {
            operation,
            variables,
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.operation, self.variables)
    }
}

/// Outcome of a cache lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hit => write!(f, "HIT"),
            Self::Miss => write!(f, "MISS"),
        }
    }
}

/// Counters for cache activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// LRU cache of decoded response data.
///
/// The most recently used entry sits at the end of the map; eviction removes
/// from the front.
#[derive(Debug)]
pub struct ResponseCache {
    entries: IndexMap<CacheKey, Arc<Value>>,
    capacity: usize,
    stats: CacheStats,
}

impl ResponseCache {
    /// Create a cache holding at most `capacity` entries (at least one).
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: IndexMap::new(),
            capacity: capacity.max(1),
            stats: CacheStats::default(),
        }
    }

    /// Look up an entry and mark it most recently used.
    pub fn get(&mut self, key: &CacheKey) -> Option<Arc<Value>> {
        match self.entries.shift_remove(key) {
            Some(value) => {
                self.stats.hits += 1;
                self.entries.insert(key.clone(), Arc::clone(&value));
                Some(value)
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Insert or replace an entry, evicting the least recently used ones
    /// beyond capacity.
    pub fn insert(&mut self, key: CacheKey, value: Arc<Value>) {
        self.entries.shift_remove(&key);
        self.entries.insert(key, value);
        while self.entries.len() > self.capacity {
            if self.entries.shift_remove_index(0).is_none() {
                break;
            }
            self.stats.evictions += 1;
        }
    }

    /// Check for an entry without touching recency or stats.
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Query;
    use serde_json::json;

    fn key(term: &str) -> CacheKey {
        Query::search_images(term).cache_key()
    }

    // === Key Tests ===

    #[test]
    fn test_key_ignores_variable_order() {
        let mut a = Map::new();
        a.insert("x".to_string(), json!(1));
        a.insert("y".to_string(), json!(2));
        let mut b = Map::new();
        b.insert("y".to_string(), json!(2));
        b.insert("x".to_string(), json!(1));

        assert_eq!(
            CacheKey::new(Operation::GetImage, &a),
            CacheKey::new(Operation::GetImage, &b)
        );
    }

    #[test]
    fn test_key_display() {
        assert_eq!(key("shoes").to_string(), r#"SearchImages:{"labelGroupName":"shoes"}"#);
    }

    // === LRU Tests ===

    #[test]
    fn test_get_hit_and_miss() {
        let mut cache = ResponseCache::new(4);
        cache.insert(key("a"), Arc::new(json!(1)));

        assert_eq!(cache.get(&key("a")).as_deref(), Some(&json!(1)));
        assert!(cache.get(&key("b")).is_none());
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().misses, 1);
        assert_eq!(cache.stats().hit_rate(), 0.5);
    }

    #[test]
    fn test_evicts_least_recently_used() {
        let mut cache = ResponseCache::new(2);
        cache.insert(key("a"), Arc::new(json!("a")));
        cache.insert(key("b"), Arc::new(json!("b")));

        // Touch "a" so "b" becomes the eviction candidate.
        cache.get(&key("a"));
        cache.insert(key("c"), Arc::new(json!("c")));

        assert!(cache.contains(&key("a")));
        assert!(!cache.contains(&key("b")));
        assert!(cache.contains(&key("c")));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_insert_replaces_existing() {
        let mut cache = ResponseCache::new(2);
        cache.insert(key("a"), Arc::new(json!(1)));
        cache.insert(key("a"), Arc::new(json!(2)));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&key("a")).as_deref(), Some(&json!(2)));
        assert_eq!(cache.stats().evictions, 0);
    }

    #[test]
    fn test_zero_capacity_holds_one() {
        let mut cache = ResponseCache::new(0);
        cache.insert(key("a"), Arc::new(json!(1)));
        cache.insert(key("b"), Arc::new(json!(2)));
        assert_eq!(cache.capacity(), 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.contains(&key("b")));
    }
}
