//! Sort orders for items, collections and users.
//!
//! All sorts are stable: equal keys keep their input order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::model::{Nft, NftCollection, User};

/// How to order a list of NFTs (basket, profile lists).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Cheapest first.
    Price,
    /// Best rated first.
    Rating,
    /// Alphabetical, case-insensitive.
    Name,
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "price" => Ok(Self::Price),
            "rating" => Ok(Self::Rating),
            "name" => Ok(Self::Name),
            other => Err(format!("unknown sort key '{other}'")),
        }
    }
}

/// How to order the catalog's collection list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionSort {
    ByName,
    /// Largest collections first.
    #[default]
    ByNftCount,
}

pub fn sort_nfts(nfts: &mut [Nft], key: SortKey) {
    match key {
        SortKey::Price => nfts.sort_by(|a, b| a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal)),
        SortKey::Rating => nfts.sort_by(|a, b| b.rating.cmp(&a.rating)),
        SortKey::Name => nfts.sort_by_cached_key(|n| n.name.to_lowercase()),
    }
}

pub fn sort_collections(collections: &mut [NftCollection], sort: CollectionSort) {
    match sort {
        CollectionSort::ByName => collections.sort_by(|a, b| a.name.cmp(&b.name)),
        CollectionSort::ByNftCount => collections.sort_by(|a, b| b.nfts.len().cmp(&a.nfts.len())),
    }
}

/// Statistics leaderboard order: highest rating first.
pub fn sort_users(users: &mut [User]) {
    users.sort_by(|a, b| b.rating.cmp(&a.rating));
}
