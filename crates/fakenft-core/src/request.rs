//! REST request descriptors for the FakeNFT API.
//!
//! An [`ApiRequest`] is a plain value: method, path relative to the API base
//! URL, query parameters and an optional form body. It carries no connection
//! state and can be cloned and re-sent freely.

use serde::{Deserialize, Serialize};

/// Path prefix shared by every endpoint.
pub const API_PREFIX: &str = "/api/v1";

/// The only profile / order the fake server exposes.
pub const DEFAULT_PROFILE_ID: &str = "1";
pub const DEFAULT_ORDER_ID: &str = "1";

/// HTTP method of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Put,
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Put => write!(f, "PUT"),
        }
    }
}

/// A single REST call against the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiRequest {
    pub method: HttpMethod,
    /// Path relative to the base URL, always starting with `/`.
    pub path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub query: Vec<(String, String)>,
    /// Form-encoded body fields (PUT requests only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<Vec<(String, String)>>,
}

impl ApiRequest {
    /// A `GET` request for `path` (relative to [`API_PREFIX`]).
    pub fn get(path: impl AsRef<str>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: format!("{API_PREFIX}{}", path.as_ref()),
            query: Vec::new(),
            form: None,
        }
    }

    /// A `PUT` request with a form-encoded body.
    pub fn put(path: impl AsRef<str>, form: Vec<(String, String)>) -> Self {
        Self {
            method: HttpMethod::Put,
            path: format!("{API_PREFIX}{}", path.as_ref()),
            query: Vec::new(),
            form: Some(form),
        }
    }

    /// Append a query parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    // ----- item endpoints -----

    /// Fetch a single NFT by id.
    pub fn nft(id: &str) -> Self {
        Self::get(format!("/nft/{id}"))
    }

    /// Fetch one page of NFTs (1-based).
    pub fn nft_page(page: u32) -> Self {
        Self::get("/nft").with_query("page", page)
    }

    // ----- catalog / statistics -----

    pub fn collections() -> Self {
        Self::get("/collections")
    }

    pub fn collection(id: &str) -> Self {
        Self::get(format!("/collections/{id}"))
    }

    pub fn users() -> Self {
        Self::get("/users")
    }

    pub fn user(id: &str) -> Self {
        Self::get(format!("/users/{id}"))
    }

    // ----- profile -----

    pub fn profile() -> Self {
        Self::get(format!("/profile/{DEFAULT_PROFILE_ID}"))
    }

    /// Replace the liked-NFT list. The server expects `likes=null` for an empty list.
    pub fn update_likes(likes: &[String]) -> Self {
        Self::put(
            format!("/profile/{DEFAULT_PROFILE_ID}"),
            vec![("likes".into(), join_ids(likes))],
        )
    }

    // ----- basket / payment -----

    pub fn order() -> Self {
        Self::get(format!("/orders/{DEFAULT_ORDER_ID}"))
    }

    /// Replace the NFT ids held in the order.
    pub fn update_order(nfts: &[String]) -> Self {
        Self::put(
            format!("/orders/{DEFAULT_ORDER_ID}"),
            vec![("nfts".into(), join_ids(nfts))],
        )
    }

    pub fn currencies() -> Self {
        Self::get("/currencies")
    }

    /// Pay for the order with the given currency.
    pub fn pay_order(currency_id: &str) -> Self {
        Self::get(format!("/orders/{DEFAULT_ORDER_ID}/payment/{currency_id}"))
    }
}

impl std::fmt::Display for ApiRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method, self.path)?;
        for (i, (k, v)) in self.query.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{k}={v}")?;
        }
        Ok(())
    }
}

fn join_ids(ids: &[String]) -> String {
    if ids.is_empty() {
        "null".to_string()
    } else {
        ids.join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nft_by_id_path() {
        let req = ApiRequest::nft("abc");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "/api/v1/nft/abc");
        assert!(req.query.is_empty());
    }

    #[test]
    fn page_request_display() {
        let req = ApiRequest::nft_page(3);
        assert_eq!(req.to_string(), "GET /api/v1/nft?page=3");
    }

    #[test]
    fn empty_likes_are_sent_as_null() {
        let req = ApiRequest::update_likes(&[]);
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.form, Some(vec![("likes".into(), "null".into())]));
    }

    #[test]
    fn order_ids_are_comma_joined() {
        let req = ApiRequest::update_order(&["1".into(), "7".into()]);
        assert_eq!(req.path, "/api/v1/orders/1");
        assert_eq!(req.form, Some(vec![("nfts".into(), "1,7".into())]));
    }

    #[test]
    fn payment_path_includes_currency() {
        assert_eq!(ApiRequest::pay_order("4").path, "/api/v1/orders/1/payment/4");
    }
}
