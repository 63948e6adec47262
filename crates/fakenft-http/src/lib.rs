//! fakenft-http: reqwest transport for the FakeNFT API.
//!
//! # Quick start
//! ```rust,no_run
//! use fakenft_http::profiles;
//! use std::sync::Arc;
//!
//! let transport = Arc::new(profiles::practicum("https://api.example", "TOKEN").unwrap());
//! ```

pub mod client;
pub mod profiles;

pub use client::{HttpClientConfig, HttpTransport, TOKEN_HEADER};
