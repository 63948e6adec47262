//! Client-side view of the order: the resolved NFTs plus totals.

use crate::model::Nft;
use crate::sort::{sort_nfts, SortKey};

/// The user's basket, resolved from the order's NFT ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Basket {
    items: Vec<Nft>,
}

impl Basket {
    pub fn new(items: Vec<Nft>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Nft] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of item prices.
    pub fn total_price(&self) -> f64 {
        self.items.iter().map(|n| n.price).sum()
    }

    /// Remove the item with `id`. Returns `true` if something was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    pub fn sort(&mut self, key: SortKey) {
        sort_nfts(&mut self.items, key);
    }

    /// NFT ids in basket order, as stored on the order.
    pub fn nft_ids(&self) -> Vec<String> {
        self.items.iter().map(|n| n.id.clone()).collect()
    }
}
