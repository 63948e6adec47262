//! NFT cache.
//!
//! Write-through, never evicts. An entry is treated as current for the
//! lifetime of the process.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::model::Nft;

/// Synchronous id → NFT lookup shared by the fetcher and services.
pub trait NftCache: Send + Sync + 'static {
    fn get(&self, id: &str) -> Option<Nft>;
    fn put(&self, nft: Nft);
}

/// In-memory cache backed by a `HashMap`.
///
/// All data is lost when the process exits.
#[derive(Default)]
pub struct InMemoryNftCache {
    entries: Mutex<HashMap<String, Nft>>,
}

impl InMemoryNftCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached items.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.lock().unwrap().contains_key(id)
    }
}

impl NftCache for InMemoryNftCache {
    fn get(&self, id: &str) -> Option<Nft> {
        self.entries.lock().unwrap().get(id).cloned()
    }

    fn put(&self, nft: Nft) {
        self.entries.lock().unwrap().insert(nft.id.clone(), nft);
    }
}

impl std::fmt::Debug for InMemoryNftCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryNftCache")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nft(id: &str, price: f64) -> Nft {
        Nft {
            id: id.into(),
            name: id.to_uppercase(),
            images: vec![],
            rating: 0,
            description: String::new(),
            price,
            author: String::new(),
            created_at: String::new(),
        }
    }

    #[test]
    fn put_then_get() {
        let cache = InMemoryNftCache::new();
        assert!(cache.is_empty());
        cache.put(nft("a", 1.0));
        assert_eq!(cache.get("a").unwrap().name, "A");
        assert!(cache.get("b").is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn put_overwrites_same_id() {
        let cache = InMemoryNftCache::new();
        cache.put(nft("a", 1.0));
        cache.put(nft("a", 2.0));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("a").unwrap().price, 2.0);
    }
}
