//! NFT loading: single, batched, and paged.

use std::sync::Arc;

use tracing::debug;

use crate::cache::NftCache;
use crate::error::TransportError;
use crate::fetcher::{BatchFetcher, BatchResult, FetcherConfig};
use crate::model::Nft;
use crate::request::ApiRequest;
use crate::transport::{Transport, TransportExt};

#[derive(Debug, Clone)]
pub struct NftService {
    fetcher: BatchFetcher,
}

impl NftService {
    pub fn new(
        transport: Arc<dyn Transport>,
        cache: Arc<dyn NftCache>,
        config: FetcherConfig,
    ) -> Self {
        Self {
            fetcher: BatchFetcher::new(transport, cache, config),
        }
    }

    pub fn from_fetcher(fetcher: BatchFetcher) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &BatchFetcher {
        &self.fetcher
    }

    /// Cache-first single load.
    pub async fn load_nft(&self, id: &str) -> Result<Nft, TransportError> {
        self.fetcher.load_nft(id).await
    }

    pub async fn load_nfts(&self, ids: &[String]) -> BatchResult {
        self.fetcher.load_nfts(ids).await
    }

    /// One page of the full listing (1-based). Pages bypass the cache.
    pub async fn load_page(&self, page: u32) -> Result<Vec<Nft>, TransportError> {
        debug!(page, "loading nft page");
        self.fetcher
            .transport()
            .fetch(ApiRequest::nft_page(page))
            .await
    }

    /// A fresh cursor starting before page 1.
    pub fn pager(&self) -> NftPager {
        NftPager {
            service: self.clone(),
            last_loaded: None,
        }
    }
}

/// Caller-owned page cursor over [`NftService::load_page`].
#[derive(Debug, Clone)]
pub struct NftPager {
    service: NftService,
    last_loaded: Option<u32>,
}

impl NftPager {
    /// Load the page after the last one loaded; the cursor only advances on success.
    pub async fn next_page(&mut self) -> Result<Vec<Nft>, TransportError> {
        let page = self.last_loaded.map_or(1, |p| p + 1);
        let nfts = self.service.load_page(page).await?;
        self.last_loaded = Some(page);
        Ok(nfts)
    }

    pub fn last_loaded(&self) -> Option<u32> {
        self.last_loaded
    }

    pub fn reset(&mut self) {
        self.last_loaded = None;
    }
}
