//! fakenft-core: model, transport trait and batch fetcher for the FakeNFT
//! marketplace API.
//!
//! # Overview
//!
//! - [`Transport`]: the async single-call trait every transport implements
//! - [`ApiRequest`]: REST request descriptors for each endpoint
//! - [`TransportError`]: structured error type, propagated unchanged
//! - [`NftCache`] / [`InMemoryNftCache`]: write-through item cache
//! - [`BatchFetcher`]: bounded, fail-fast, order-preserving multi-item loader
//! - [`services`]: catalog, statistics, profile, basket and payment flows
//! - [`policy`]: retry and circuit breaker used by transports

pub mod basket;
pub mod cache;
pub mod error;
pub mod fetcher;
pub mod model;
pub mod policy;
pub mod request;
pub mod services;
pub mod sort;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use basket::Basket;
pub use cache::{InMemoryNftCache, NftCache};
pub use error::TransportError;
pub use fetcher::{BatchFetcher, BatchResult, FetcherConfig};
pub use model::{Currency, Nft, NftCollection, Order, PaymentOutcome, Profile, User};
pub use request::{ApiRequest, HttpMethod};
pub use sort::{CollectionSort, SortKey};
pub use services::Marketplace;
pub use transport::{HealthStatus, Transport, TransportExt};
