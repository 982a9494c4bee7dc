//! HTTP client backend
//!
//! `api.<p1>.<p2>...` issues `GET {api_base_url}/p1/p2/...` and returns the
//! decoded JSON body. [`ApiClient::post`] is available for direct use.

mod client;

pub use client::{ApiClient, HttpClientConfig};
