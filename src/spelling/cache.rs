//! Memo of previously computed corrections.

use ahash::AHashMap;

/// Maps a case-folded, punctuation-stripped token to its correction.
///
/// `None` records that no vocabulary word was found, so the caller's token is
/// returned as-is. Entries are never evicted: once `capacity` is reached new
/// results are simply not stored.
#[derive(Debug, Clone, Default)]
pub struct CorrectionCache {
    entries: AHashMap<String, Option<String>>,
    capacity: Option<usize>,
}

impl CorrectionCache {
    /// Create an unbounded cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache that stops growing after `capacity` entries.
    pub fn with_capacity_limit(capacity: Option<usize>) -> Self {
        CorrectionCache {
            entries: AHashMap::new(),
            capacity,
        }
    }

    /// Look up a previous result.
    pub fn get(&self, key: &str) -> Option<&Option<String>> {
        self.entries.get(key)
    }

    /// Check whether `key` has a stored result.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Store a result. Returns false when the cache is full and the entry was
    /// dropped.
    pub fn insert(&mut self, key: String, correction: Option<String>) -> bool {
        if let Some(capacity) = self.capacity
            && self.entries.len() >= capacity
            && !self.entries.contains_key(&key)
        {
            return false;
        }
        self.entries.insert(key, correction);
        true
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
