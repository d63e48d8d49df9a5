// src/viewer/cache.rs
use std::collections::{HashMap, VecDeque};

/// Bounded map from image reference to a pre-fetched handle. Eviction is
/// first-in-first-out; reads never refresh an entry.
#[derive(Debug, Clone)]
pub struct ImageCache<H> {
    capacity: usize,
    order: VecDeque<String>,
    entries: HashMap<String, H>,
}

impl<H> ImageCache<H> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            order: VecDeque::with_capacity(capacity),
            entries: HashMap::with_capacity(capacity),
        }
    }

    pub fn contains(&self, src: &str) -> bool {
        self.entries.contains_key(src)
    }

    // Returns the evicted reference. Re-inserting a cached one is a no-op.
    pub fn insert(&mut self, src: String, handle: H) -> Option<String> {
        if self.entries.contains_key(&src) {
            return None;
        }
        self.order.push_back(src.clone());
        self.entries.insert(src, handle);

        if self.order.len() > self.capacity {
            let evicted = self.order.pop_front()?;
            self.entries.remove(&evicted);
            return Some(evicted);
        }
        None
    }
}

#[cfg(test)]
impl<H> ImageCache<H> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, src: &str) -> Option<&H> {
        self.entries.get(src)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(count: usize) -> ImageCache<usize> {
        let mut cache = ImageCache::new(20);
        for i in 0..count {
            cache.insert(format!("img-{}", i), i);
        }
        cache
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let cache = filled(50);
        assert_eq!(cache.len(), 20);
        assert_eq!(cache.keys().next(), Some("img-30"));
    }

    #[test]
    fn test_twenty_first_insert_evicts_first_inserted() {
        let mut cache = filled(20);
        assert_eq!(cache.insert("img-20".to_string(), 20), Some("img-0".to_string()));
        assert!(!cache.contains("img-0"));
        assert!(cache.contains("img-1"));
        assert!(cache.contains("img-20"));
    }

    #[test]
    fn test_reads_do_not_refresh_position() {
        let mut cache = filled(20);
        // A read would move img-0 to the back under LRU; FIFO ignores it.
        assert_eq!(cache.get("img-0"), Some(&0));
        assert_eq!(cache.insert("new".to_string(), 99), Some("img-0".to_string()));
    }

    #[test]
    fn test_duplicate_insert_is_noop() {
        let mut cache = filled(3);
        assert_eq!(cache.insert("img-0".to_string(), 42), None);
        assert_eq!(cache.get("img-0"), Some(&0));
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.keys().collect::<Vec<_>>(), vec!["img-0", "img-1", "img-2"]);
    }
}
