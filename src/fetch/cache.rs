use std::collections::HashMap;
use std::sync::{Arc, Mutex};

type Slot = Arc<tokio::sync::Mutex<Option<Arc<Vec<u8>>>>>;

/// Process-lifetime cache of fetched payloads, keyed by URL.
///
/// Each URL gets its own async-mutexed slot, so concurrent runs against the
/// same URL wait for the first fetch to finish instead of issuing duplicate
/// network calls. Nothing expires on its own; invalidation is explicit.
#[derive(Default)]
pub struct FetchCache {
    slots: Mutex<HashMap<String, Slot>>,
}

impl FetchCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The slot for `url`, created empty on first use.
    pub(crate) fn slot(&self, url: &str) -> Slot {
        let mut slots = self.slots.lock().unwrap();
        slots.entry(url.to_string()).or_default().clone()
    }

    /// Drop the cached payload for `url`, if any. The next fetch of that
    /// URL goes back to the network.
    pub fn invalidate(&self, url: &str) {
        self.slots.lock().unwrap().remove(url);
    }

    /// Drop every cached payload.
    pub fn clear(&self) {
        self.slots.lock().unwrap().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn slot_is_shared_per_url() {
        let cache = FetchCache::new();
        let a = cache.slot("http://example.com/a");
        let b = cache.slot("http://example.com/a");
        assert!(Arc::ptr_eq(&a, &b));

        let other = cache.slot("http://example.com/b");
        assert!(!Arc::ptr_eq(&a, &other));
    }

    #[tokio::test]
    async fn invalidate_discards_the_payload() {
        let cache = FetchCache::new();
        let slot = cache.slot("http://example.com/data.csv");
        *slot.lock().await = Some(Arc::new(b"payload".to_vec()));

        cache.invalidate("http://example.com/data.csv");
        let fresh = cache.slot("http://example.com/data.csv");
        assert!(!Arc::ptr_eq(&slot, &fresh));
        assert!(fresh.lock().await.is_none());
    }

    #[tokio::test]
    async fn clear_discards_everything() {
        let cache = FetchCache::new();
        *cache.slot("http://a").lock().await = Some(Arc::new(vec![1]));
        *cache.slot("http://b").lock().await = Some(Arc::new(vec![2]));

        cache.clear();
        assert!(cache.slot("http://a").lock().await.is_none());
        assert!(cache.slot("http://b").lock().await.is_none());
    }
}
