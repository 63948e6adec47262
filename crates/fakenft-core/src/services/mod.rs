//! Domain services over the transport, cache and batch fetcher.
//!
//! Services are cheap to clone and keep no response state: every call returns
//! its result directly to the caller.

pub mod catalog;
pub mod nft;
pub mod order;
pub mod payment;
pub mod profile;
pub mod statistics;

pub use catalog::CatalogService;
pub use nft::{NftPager, NftService};
pub use order::OrderService;
pub use payment::PaymentService;
pub use profile::ProfileService;
pub use statistics::StatisticsService;

use std::sync::Arc;

use crate::cache::NftCache;
use crate::fetcher::{BatchFetcher, FetcherConfig};
use crate::transport::Transport;

/// Every service wired to one transport and one shared NFT cache.
#[derive(Debug, Clone)]
pub struct Marketplace {
    pub nfts: NftService,
    pub catalog: CatalogService,
    pub statistics: StatisticsService,
    pub profile: ProfileService,
    pub orders: OrderService,
    pub payments: PaymentService,
}

impl Marketplace {
    pub fn new(
        transport: Arc<dyn Transport>,
        cache: Arc<dyn NftCache>,
        config: FetcherConfig,
    ) -> Self {
        let fetcher = BatchFetcher::new(transport.clone(), cache, config);
        Self {
            nfts: NftService::from_fetcher(fetcher.clone()),
            catalog: CatalogService::new(fetcher.clone()),
            statistics: StatisticsService::new(fetcher.clone()),
            profile: ProfileService::new(transport.clone()),
            orders: OrderService::new(fetcher),
            payments: PaymentService::new(transport),
        }
    }
}
