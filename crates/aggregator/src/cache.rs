use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use normalizer::NormalizedUser;
use tokio::sync::Mutex;

/// Read-through result cache keyed by exact, case-sensitive username.
/// Bounded LRU; written only on successful aggregation, last writer
/// wins. No TTL and no invalidation API.
#[derive(Clone)]
pub struct UserCache {
    inner: Arc<Mutex<LruCache<String, NormalizedUser>>>,
}

impl UserCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1))
            .unwrap_or_else(|| NonZeroUsize::new(1).unwrap());
        Self {
            inner: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    pub async fn get(&self, key: &str) -> Option<NormalizedUser> {
        let mut guard = self.inner.lock().await;
        guard.get(key).cloned()
    }

    pub async fn put(&self, key: String, value: NormalizedUser) {
        let mut guard = self.inner.lock().await;
        guard.put(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> NormalizedUser {
        NormalizedUser {
            user_name: name.to_string(),
            display_name: None,
            avatar: None,
            geo_location: None,
            email: None,
            url: None,
            created_at: None,
            repos: None,
        }
    }

    #[tokio::test]
    async fn keys_are_case_sensitive() {
        let cache = UserCache::new(4);
        cache.put("octocat".into(), user("octocat")).await;
        assert!(cache.get("octocat").await.is_some());
        assert!(cache.get("Octocat").await.is_none());
    }

    #[tokio::test]
    async fn capacity_bounds_entry_count() {
        let cache = UserCache::new(2);
        cache.put("a".into(), user("a")).await;
        cache.put("b".into(), user("b")).await;
        cache.put("c".into(), user("c")).await;
        assert!(cache.get("a").await.is_none());
        assert!(cache.get("b").await.is_some());
        assert!(cache.get("c").await.is_some());
    }

    #[tokio::test]
    async fn later_success_overwrites_earlier_entry() {
        let cache = UserCache::new(2);
        cache.put("octocat".into(), user("first")).await;
        cache.put("octocat".into(), user("second")).await;
        assert_eq!(cache.get("octocat").await.unwrap().user_name, "second");
    }
}
