use std::collections::HashMap;
use std::sync::Arc;

use gh_client::{GithubApiError, GithubClient};
use normalizer::{merge_user, NormalizedUser};
use tokio::sync::{oneshot, Mutex};
use tracing::{debug, info, instrument};

use crate::cache::UserCache;
use crate::metrics;

type AggregationResult = Result<NormalizedUser, GithubApiError>;

/// Read-through aggregation over the upstream client: cache lookup,
/// then profile + repos fetched sequentially, merged, and cached on
/// success only. Concurrent misses for the same username coalesce onto
/// a single in-flight upstream pair.
pub struct UserAggregator {
    inner: Arc<Inner>,
}

struct Inner {
    client: Arc<dyn GithubClient>,
    cache: UserCache,
    pending: Mutex<HashMap<String, Vec<oneshot::Sender<AggregationResult>>>>,
}

impl UserAggregator {
    pub fn new(client: Arc<dyn GithubClient>, cache_capacity: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                client,
                cache: UserCache::new(cache_capacity),
                pending: Mutex::new(HashMap::new()),
            }),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, username: &str) -> AggregationResult {
        if let Some(user) = self.inner.cache.get(username).await {
            metrics::CACHE_HITS.inc();
            debug!(username, "serving aggregation from cache");
            return Ok(user);
        }
        metrics::CACHE_MISSES.inc();

        let (rx, is_leader) = self.inner.register_waiter(username).await;
        if is_leader {
            // The fetch runs detached from the requesting future: a
            // caller that disconnects mid-flight must not strand the
            // other waiters on this key.
            let inner = self.inner.clone();
            let username = username.to_string();
            tokio::spawn(async move {
                let result = inner.fetch_and_store(&username).await;
                inner.finish(&username, result).await;
            });
        } else {
            metrics::COALESCED_TOTAL.inc();
            debug!(username, "joining in-flight aggregation");
        }

        rx.await
            .unwrap_or_else(|_| Err(GithubApiError::unavailable("in-flight aggregation dropped")))
    }
}

impl Inner {
    async fn register_waiter(&self, key: &str) -> (oneshot::Receiver<AggregationResult>, bool) {
        let (tx, rx) = oneshot::channel();
        let mut guard = self.pending.lock().await;
        match guard.get_mut(key) {
            Some(waiters) => {
                waiters.push(tx);
                (rx, false)
            }
            None => {
                guard.insert(key.to_string(), vec![tx]);
                (rx, true)
            }
        }
    }

    async fn finish(&self, key: &str, result: AggregationResult) {
        let waiters = {
            let mut guard = self.pending.lock().await;
            guard.remove(key).unwrap_or_default()
        };
        for waiter in waiters {
            let _ = waiter.send(result.clone());
        }
    }

    async fn fetch_and_store(&self, username: &str) -> AggregationResult {
        let result = self.aggregate(username).await;
        let outcome = match &result {
            Ok(_) => "success",
            Err(err) if err.is_not_found() => "not_found",
            Err(_) => "error",
        };
        metrics::AGGREGATIONS_TOTAL
            .with_label_values(&[outcome])
            .inc();

        if let Ok(user) = &result {
            self.cache.put(username.to_string(), user.clone()).await;
        }
        result
    }

    async fn aggregate(&self, username: &str) -> AggregationResult {
        // Sequential on purpose: the repo call is never attempted when
        // the profile call fails, and no partial result is built.
        let profile = self.client.get_profile(username).await?;
        let repos = self.client.list_repos(username).await?;

        // A 2xx with an absent profile payload means the user does not
        // exist upstream; surfaced as not-found rather than an empty
        // merged entity.
        let Some(user) = merge_user(profile.as_ref(), Some(repos)) else {
            return Err(GithubApiError::not_found(username));
        };

        info!(
            username,
            repo_count = user.repos.as_ref().map(Vec::len).unwrap_or(0),
            "aggregated github user"
        );
        Ok(user)
    }
}
