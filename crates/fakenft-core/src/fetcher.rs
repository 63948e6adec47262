//! Batch NFT fetcher: resolve a list of ids into items.
//!
//! ```text
//! ids ─► dedup ─► [cache?] ─hit──────────────────────────► item
//!                     └─miss─► Transport::send ─► cache.put ─► item
//! ```
//!
//! Fetches run as a bounded task group (`max_concurrency` in flight at once)
//! and the batch resolves exactly once:
//! - success: one item per distinct id, in first-occurrence input order
//! - failure: the first transport error, unchanged; every fetch still in
//!   flight is dropped and items fetched so far are discarded from the result
//!   (they remain in the cache)

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use futures::stream::{self, StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::NftCache;
use crate::error::TransportError;
use crate::model::Nft;
use crate::request::ApiRequest;
use crate::transport::{Transport, TransportExt};

/// Result of a whole batch: every item or the first error.
pub type BatchResult = Result<Vec<Nft>, TransportError>;

/// Fetcher configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// Maximum fetches in flight at once. `1` fetches strictly one after another.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

fn default_max_concurrency() -> usize { 4 }

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            max_concurrency: default_max_concurrency(),
        }
    }
}

impl FetcherConfig {
    /// One fetch at a time, in input order.
    pub fn sequential() -> Self {
        Self { max_concurrency: 1 }
    }
}

/// Cache-first NFT loader over an injected transport.
#[derive(Clone)]
pub struct BatchFetcher {
    transport: Arc<dyn Transport>,
    cache: Arc<dyn NftCache>,
    config: FetcherConfig,
}

impl BatchFetcher {
    pub fn new(
        transport: Arc<dyn Transport>,
        cache: Arc<dyn NftCache>,
        config: FetcherConfig,
    ) -> Self {
        Self {
            transport,
            cache,
            config,
        }
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Load one NFT, from the cache when present.
    ///
    /// A freshly fetched item is written to the cache before this returns.
    pub async fn load_nft(&self, id: &str) -> Result<Nft, TransportError> {
        if let Some(nft) = self.cache.get(id) {
            debug!(id, "nft cache hit");
            return Ok(nft);
        }

        debug!(id, "nft cache miss, fetching");
        let nft: Nft = self.transport.fetch(ApiRequest::nft(id)).await?;
        self.cache.put(nft.clone());
        Ok(nft)
    }

    /// Load every NFT in `ids`.
    ///
    /// Duplicate ids are fetched once and appear once in the result. An empty
    /// input resolves immediately to an empty list.
    pub async fn load_nfts(&self, ids: &[String]) -> BatchResult {
        let unique = dedup_ids(ids);
        if unique.is_empty() {
            return Ok(Vec::new());
        }

        let total = unique.len();
        let limit = self.config.max_concurrency.max(1);
        let started = Instant::now();

        // Completion order is arbitrary; the index restores input order.
        let fetched = stream::iter(unique.into_iter().enumerate())
            .map(|(idx, id): (usize, String)| async move {
                match self.load_nft(&id).await {
                    Ok(nft) => Ok((idx, nft)),
                    Err(e) => {
                        warn!(id = %id, error = %e, "nft fetch failed, aborting batch");
                        Err(e)
                    }
                }
            })
            .buffer_unordered(limit)
            .try_collect::<Vec<_>>()
            .await?;

        let mut slots: Vec<Option<Nft>> = vec![None; total];
        for (idx, nft) in fetched {
            slots[idx] = Some(nft);
        }
        let nfts: Vec<Nft> = slots.into_iter().flatten().collect();

        info!(
            count = nfts.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "nft batch complete"
        );
        Ok(nfts)
    }

    /// Run [`load_nfts`](Self::load_nfts) on a background task and hand the
    /// single result to `on_complete`.
    pub fn spawn_load_nfts<F>(&self, ids: Vec<String>, on_complete: F) -> JoinHandle<()>
    where
        F: FnOnce(BatchResult) + Send + 'static,
    {
        let fetcher = self.clone();
        tokio::spawn(async move {
            let result = fetcher.load_nfts(&ids).await;
            on_complete(result);
        })
    }
}

impl std::fmt::Debug for BatchFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchFetcher")
            .field("transport", &self.transport.base_url())
            .field("config", &self.config)
            .finish()
    }
}

/// Distinct ids, first occurrence wins.
fn dedup_ids(ids: &[String]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter()
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InMemoryNftCache;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Serves `/api/v1/nft/{id}`; ids in `fail` return HTTP 500, `delays`
    /// holds per-id latency.
    #[derive(Default)]
    struct MockTransport {
        fail: HashSet<String>,
        delays: HashMap<String, u64>,
        calls: Mutex<Vec<String>>,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl MockTransport {
        fn failing(ids: &[&str]) -> Self {
            Self {
                fail: ids.iter().map(|s| s.to_string()).collect(),
                ..Default::default()
            }
        }

        fn with_delays(delays: &[(&str, u64)]) -> Self {
            Self {
                delays: delays.iter().map(|(id, ms)| (id.to_string(), *ms)).collect(),
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn calls_for(&self, id: &str) -> usize {
            self.calls().iter().filter(|c| *c == id).count()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn send(&self, req: ApiRequest) -> Result<Value, TransportError> {
            let id = req.path.rsplit('/').next().unwrap_or_default().to_string();
            self.calls.lock().unwrap().push(id.clone());

            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            let delay = self.delays.get(&id).copied().unwrap_or(1);
            tokio::time::sleep(Duration::from_millis(delay)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.fail.contains(&id) {
                return Err(TransportError::Status {
                    code: 500,
                    body: format!("boom {id}"),
                });
            }
            Ok(json!({ "id": id, "name": format!("NFT {id}"), "price": 1.5, "rating": 3 }))
        }

        fn base_url(&self) -> &str {
            "mock://fakenft"
        }
    }

    fn ids(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn fetcher(
        transport: Arc<MockTransport>,
        cache: Arc<InMemoryNftCache>,
        max_concurrency: usize,
    ) -> BatchFetcher {
        BatchFetcher::new(transport, cache, FetcherConfig { max_concurrency })
    }

    #[tokio::test]
    async fn fetches_all_and_fills_cache() {
        let transport = Arc::new(MockTransport::default());
        let cache = Arc::new(InMemoryNftCache::new());
        let f = fetcher(transport.clone(), cache.clone(), 4);

        let nfts = f.load_nfts(&ids(&["a", "b", "c"])).await.unwrap();

        let got: Vec<_> = nfts.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(got, ["a", "b", "c"]);
        assert!(cache.contains("a") && cache.contains("b") && cache.contains("c"));
        assert_eq!(transport.calls().len(), 3);
    }

    #[tokio::test]
    async fn cached_ids_skip_transport() {
        let transport = Arc::new(MockTransport::default());
        let cache = Arc::new(InMemoryNftCache::new());
        let f = fetcher(transport.clone(), cache.clone(), 4);

        f.load_nft("a").await.unwrap();
        assert_eq!(transport.calls_for("a"), 1);

        let nfts = f.load_nfts(&ids(&["a", "b"])).await.unwrap();
        assert_eq!(nfts.len(), 2);
        assert_eq!(transport.calls_for("a"), 1);
        assert_eq!(transport.calls_for("b"), 1);
    }

    #[tokio::test]
    async fn duplicates_fetched_once() {
        let transport = Arc::new(MockTransport::default());
        let cache = Arc::new(InMemoryNftCache::new());
        let f = fetcher(transport.clone(), cache, 4);

        let nfts = f.load_nfts(&ids(&["a", "a", "b", "a"])).await.unwrap();

        assert_eq!(nfts.len(), 2);
        assert_eq!(transport.calls_for("a"), 1);
    }

    #[tokio::test]
    async fn failure_returns_that_error() {
        let transport = Arc::new(MockTransport::failing(&["b"]));
        let cache = Arc::new(InMemoryNftCache::new());
        let f = fetcher(transport, cache.clone(), 1);

        let err = f.load_nfts(&ids(&["a", "b"])).await.unwrap_err();

        match err {
            TransportError::Status { code, body } => {
                assert_eq!(code, 500);
                assert_eq!(body, "boom b");
            }
            other => panic!("unexpected error: {other}"),
        }
        // `a` resolved first and stays cached, but is not part of any result.
        assert!(cache.contains("a"));
        assert!(!cache.contains("b"));
    }

    #[tokio::test]
    async fn sequential_failure_stops_remaining_fetches() {
        let transport = Arc::new(MockTransport::failing(&["b"]));
        let cache = Arc::new(InMemoryNftCache::new());
        let f = fetcher(transport.clone(), cache, 1);

        assert!(f.load_nfts(&ids(&["a", "b", "c", "d"])).await.is_err());
        assert_eq!(transport.calls(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn failure_does_not_wait_for_slow_fetches() {
        let transport = Arc::new(MockTransport {
            fail: ["bad".to_string()].into_iter().collect(),
            delays: [("slow".to_string(), 5_000)].into_iter().collect(),
            ..Default::default()
        });
        let cache = Arc::new(InMemoryNftCache::new());
        let f = fetcher(transport, cache.clone(), 4);

        let started = Instant::now();
        let res = f.load_nfts(&ids(&["slow", "bad"])).await;

        assert!(res.is_err());
        assert!(started.elapsed() < Duration::from_secs(2));
        assert!(!cache.contains("slow"), "slow fetch should have been dropped");
    }

    #[tokio::test]
    async fn keeps_input_order_when_completion_order_differs() {
        let transport = Arc::new(MockTransport::with_delays(&[("a", 60), ("b", 30), ("c", 1)]));
        let cache = Arc::new(InMemoryNftCache::new());
        let f = fetcher(transport, cache, 3);

        let nfts = f.load_nfts(&ids(&["a", "b", "c"])).await.unwrap();
        let got: Vec<_> = nfts.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(got, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn respects_concurrency_limit() {
        let delays: Vec<(String, u64)> = (0..8).map(|i| (i.to_string(), 10)).collect();
        let transport = Arc::new(MockTransport {
            delays: delays.into_iter().collect(),
            ..Default::default()
        });
        let cache = Arc::new(InMemoryNftCache::new());
        let f = fetcher(transport.clone(), cache, 2);

        let all: Vec<String> = (0..8).map(|i| i.to_string()).collect();
        assert_eq!(f.load_nfts(&all).await.unwrap().len(), 8);
        assert!(transport.max_in_flight.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn empty_input_is_empty_success() {
        let transport = Arc::new(MockTransport::default());
        let f = fetcher(transport.clone(), Arc::new(InMemoryNftCache::new()), 4);
        assert!(f.load_nfts(&[]).await.unwrap().is_empty());
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn spawned_batch_completes_once() {
        let transport = Arc::new(MockTransport::failing(&["b"]));
        let f = fetcher(transport, Arc::new(InMemoryNftCache::new()), 4);
        let completions = Arc::new(Mutex::new(Vec::<bool>::new()));

        let sink = completions.clone();
        f.spawn_load_nfts(ids(&["a", "b", "c"]), move |res| {
            sink.lock().unwrap().push(res.is_ok());
        })
        .await
        .unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert_eq!(*completions.lock().unwrap(), vec![false]);
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let input = ids(&["b", "a", "b", "c", "a"]);
        assert_eq!(dedup_ids(&input), vec!["b", "a", "c"]);
    }

    #[test]
    fn config_defaults() {
        let cfg: FetcherConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.max_concurrency, 4);
        assert_eq!(FetcherConfig::sequential().max_concurrency, 1);
    }
}
