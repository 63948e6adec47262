//! Basket: the server-side order and its resolved NFTs.

use tracing::debug;

use crate::basket::Basket;
use crate::error::TransportError;
use crate::fetcher::BatchFetcher;
use crate::model::Order;
use crate::request::ApiRequest;
use crate::transport::TransportExt;

#[derive(Debug, Clone)]
pub struct OrderService {
    fetcher: BatchFetcher,
}

impl OrderService {
    pub fn new(fetcher: BatchFetcher) -> Self {
        Self { fetcher }
    }

    pub async fn load_order(&self) -> Result<Order, TransportError> {
        self.fetcher.transport().fetch(ApiRequest::order()).await
    }

    /// The order with every NFT resolved, in order sequence.
    pub async fn load_basket(&self) -> Result<Basket, TransportError> {
        let order = self.load_order().await?;
        let nfts = self.fetcher.load_nfts(&order.nfts).await?;
        Ok(Basket::new(nfts))
    }

    /// Replace the order's NFT list.
    pub async fn update_order(&self, nfts: &[String]) -> Result<Order, TransportError> {
        self.fetcher
            .transport()
            .fetch(ApiRequest::update_order(nfts))
            .await
    }

    /// Drop `nft_id` from the order. A no-op (no PUT) if it is not there.
    pub async fn remove_from_basket(&self, nft_id: &str) -> Result<Order, TransportError> {
        let order = self.load_order().await?;
        if !order.nfts.iter().any(|id| id == nft_id) {
            return Ok(order);
        }
        let remaining: Vec<String> = order.nfts.into_iter().filter(|id| id != nft_id).collect();
        debug!(nft_id, remaining = remaining.len(), "removing nft from basket");
        self.update_order(&remaining).await
    }

    /// Add `nft_id` to the order unless it is already there.
    pub async fn add_to_basket(&self, nft_id: &str) -> Result<Order, TransportError> {
        let order = self.load_order().await?;
        if order.nfts.iter().any(|id| id == nft_id) {
            return Ok(order);
        }
        let mut nfts = order.nfts;
        nfts.push(nft_id.to_string());
        self.update_order(&nfts).await
    }

    /// Empty the order, e.g. after a successful payment.
    pub async fn clear(&self) -> Result<Order, TransportError> {
        self.update_order(&[]).await
    }
}
