//! Statistics: the user leaderboard and each user's NFTs.

use crate::error::TransportError;
use crate::fetcher::BatchFetcher;
use crate::model::{Nft, User};
use crate::request::ApiRequest;
use crate::sort::sort_users;
use crate::transport::TransportExt;

#[derive(Debug, Clone)]
pub struct StatisticsService {
    fetcher: BatchFetcher,
}

impl StatisticsService {
    pub fn new(fetcher: BatchFetcher) -> Self {
        Self { fetcher }
    }

    /// All users, highest rating first.
    pub async fn users(&self) -> Result<Vec<User>, TransportError> {
        let mut users: Vec<User> = self.fetcher.transport().fetch(ApiRequest::users()).await?;
        sort_users(&mut users);
        Ok(users)
    }

    pub async fn user(&self, id: &str) -> Result<User, TransportError> {
        self.fetcher.transport().fetch(ApiRequest::user(id)).await
    }

    /// NFTs owned by `id`.
    pub async fn user_nfts(&self, id: &str) -> Result<Vec<Nft>, TransportError> {
        let user = self.user(id).await?;
        self.fetcher.load_nfts(&user.nfts).await
    }
}
