//! HTTP module
//!
//! Connects the pagination engine to REST endpoints.
//!
//! # Features
//!
//! - **HttpClient**: base URL, default headers, auth; one attempt per request
//! - **HttpPageSource**: a `PageSource` for `?page=&per_page=` endpoints
//! - **ClientRegistry**: one shared client per access token

mod client;
mod registry;
mod source;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use registry::ClientRegistry;
pub use source::{HttpPageSource, DEFAULT_PAGE_PARAM, DEFAULT_PAGE_SIZE_PARAM};

#[cfg(test)]
mod tests;
