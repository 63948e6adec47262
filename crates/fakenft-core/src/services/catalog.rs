//! Catalog: collections and their NFTs.

use std::sync::Arc;

use crate::error::TransportError;
use crate::fetcher::BatchFetcher;
use crate::model::{Nft, NftCollection};
use crate::request::ApiRequest;
use crate::sort::{sort_collections, CollectionSort};
use crate::transport::{Transport, TransportExt};

#[derive(Debug, Clone)]
pub struct CatalogService {
    fetcher: BatchFetcher,
}

impl CatalogService {
    pub fn new(fetcher: BatchFetcher) -> Self {
        Self { fetcher }
    }

    fn transport(&self) -> &Arc<dyn Transport> {
        self.fetcher.transport()
    }

    /// Every collection, ordered by `sort`.
    pub async fn collections(
        &self,
        sort: CollectionSort,
    ) -> Result<Vec<NftCollection>, TransportError> {
        let mut collections: Vec<NftCollection> =
            self.transport().fetch(ApiRequest::collections()).await?;
        sort_collections(&mut collections, sort);
        Ok(collections)
    }

    pub async fn collection(&self, id: &str) -> Result<NftCollection, TransportError> {
        self.transport().fetch(ApiRequest::collection(id)).await
    }

    /// The collection plus its NFTs, in collection order.
    pub async fn collection_nfts(
        &self,
        id: &str,
    ) -> Result<(NftCollection, Vec<Nft>), TransportError> {
        let collection = self.collection(id).await?;
        let nfts = self.fetcher.load_nfts(&collection.nfts).await?;
        Ok((collection, nfts))
    }
}
