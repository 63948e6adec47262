//! Profile and likes.

use std::sync::Arc;

use tracing::debug;

use crate::error::TransportError;
use crate::model::Profile;
use crate::request::ApiRequest;
use crate::transport::{Transport, TransportExt};

#[derive(Clone)]
pub struct ProfileService {
    transport: Arc<dyn Transport>,
}

impl ProfileService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn load_profile(&self) -> Result<Profile, TransportError> {
        self.transport.fetch(ApiRequest::profile()).await
    }

    /// Replace the liked list; returns the profile as stored by the server.
    pub async fn update_likes(&self, likes: &[String]) -> Result<Profile, TransportError> {
        self.transport.fetch(ApiRequest::update_likes(likes)).await
    }

    /// Like `nft_id` if it is not liked yet, unlike it otherwise.
    pub async fn toggle_like(&self, nft_id: &str) -> Result<Profile, TransportError> {
        let profile = self.load_profile().await?;
        let mut likes = profile.likes;
        if let Some(pos) = likes.iter().position(|id| id == nft_id) {
            likes.remove(pos);
            debug!(nft_id, "unliking nft");
        } else {
            likes.push(nft_id.to_string());
            debug!(nft_id, "liking nft");
        }
        self.update_likes(&likes).await
    }
}

impl std::fmt::Debug for ProfileService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileService")
            .field("transport", &self.transport.base_url())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubTransport;
    use serde_json::json;

    fn profile_json(likes: &[&str]) -> serde_json::Value {
        json!({
            "id": "1",
            "name": "Student",
            "avatar": "",
            "description": "",
            "website": "https://example.org",
            "nfts": ["68", "69"],
            "likes": likes
        })
    }

    #[tokio::test]
    async fn toggle_adds_missing_like() {
        let stub = Arc::new(
            StubTransport::new()
                .route(&ApiRequest::profile(), profile_json(&["5"]))
                .route(
                    &ApiRequest::update_likes(&["5".into(), "13".into()]),
                    profile_json(&["5", "13"]),
                ),
        );
        let svc = ProfileService::new(stub.clone());

        let updated = svc.toggle_like("13").await.unwrap();
        assert!(updated.likes("13"));

        let put = stub.requests().pop().unwrap();
        assert_eq!(put.form, Some(vec![("likes".into(), "5,13".into())]));
    }

    #[tokio::test]
    async fn toggle_removes_last_like() {
        let stub = Arc::new(
            StubTransport::new()
                .route(&ApiRequest::profile(), profile_json(&["5"]))
                .route(&ApiRequest::update_likes(&[]), profile_json(&[])),
        );
        let svc = ProfileService::new(stub.clone());

        let updated = svc.toggle_like("5").await.unwrap();
        assert!(updated.likes.is_empty());

        let put = stub.requests().pop().unwrap();
        assert_eq!(put.form, Some(vec![("likes".into(), "null".into())]));
    }
}
