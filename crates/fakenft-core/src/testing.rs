//! Canned-response transport for service tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::TransportError;
use crate::request::ApiRequest;
use crate::transport::Transport;

/// Answers by exact request line plus form body
/// (`PUT /api/v1/orders/1 nfts=3,7`); unknown requests get a 404. Every
/// request is recorded.
#[derive(Default)]
pub struct StubTransport {
    routes: Mutex<HashMap<String, Value>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(self, req: &ApiRequest, body: Value) -> Self {
        self.routes.lock().unwrap().insert(route_key(req), body);
        self
    }

    /// Serve `/nft/{id}` for each id.
    pub fn with_nfts(mut self, ids: &[&str]) -> Self {
        for id in ids {
            self = self.route(&ApiRequest::nft(id), nft_json(id, 1.0, 3));
        }
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, req: &ApiRequest) -> usize {
        self.requests().iter().filter(|r| *r == req).count()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn send(&self, req: ApiRequest) -> Result<Value, TransportError> {
        let key = route_key(&req);
        self.requests.lock().unwrap().push(req);
        self.routes
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .ok_or(TransportError::Status {
                code: 404,
                body: format!("no route for {key}"),
            })
    }

    fn base_url(&self) -> &str {
        "stub://fakenft"
    }
}

fn route_key(req: &ApiRequest) -> String {
    match &req.form {
        Some(form) => {
            let body: Vec<String> = form.iter().map(|(k, v)| format!("{k}={v}")).collect();
            format!("{req} {}", body.join("&"))
        }
        None => req.to_string(),
    }
}

pub fn nft_json(id: &str, price: f64, rating: u8) -> Value {
    json!({
        "id": id,
        "name": format!("NFT {id}"),
        "images": [format!("https://img.example/{id}.png")],
        "rating": rating,
        "description": "",
        "price": price,
        "author": "https://author.example",
        "createdAt": "2023-10-01T10:00:00Z"
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn form_body_is_part_of_the_route() {
        let stub = StubTransport::new().route(
            &ApiRequest::update_order(&["3".into(), "7".into()]),
            json!({ "id": "1", "nfts": ["3", "7"] }),
        );

        assert!(stub
            .send(ApiRequest::update_order(&["3".into(), "7".into()]))
            .await
            .is_ok());
        let err = stub.send(ApiRequest::update_order(&[])).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
