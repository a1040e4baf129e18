// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # virtual-pager
//!
//! Client-side virtual pagination for REST APIs that cap the page size.
//!
//! Ask for any logical window (page 3 of 500 items, trimmed by 10 at the
//! front) and the pager turns it into the physical requests the backend
//! accepts, fetches them in order, trims and concatenates the results.
//!
//! ## Features
//!
//! - **Window Planning**: minimal ordered physical pages for any window
//! - **Exact Trimming**: per-page trims line fetched pages up with the window
//! - **End-of-Data Detection**: stops at the first empty page
//! - **Not-Found Handling**: a missing parent resource yields `None`
//! - **HTTP Page Source**: `?page=&per_page=` endpoints via reqwest
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use virtual_pager::http::{HttpClient, HttpClientConfig, HttpPageSource};
//! use virtual_pager::pagination::{Pager, Paging, PagingLimits};
//!
//! #[tokio::main]
//! async fn main() -> virtual_pager::Result<()> {
//!     let config = HttpClientConfig::builder()
//!         .base_url("https://www.strava.com/api/v3")
//!         .build();
//!     let client = Arc::new(HttpClient::with_config(config)?);
//!     let source: HttpPageSource<serde_json::Value> =
//!         HttpPageSource::new(client, "/athlete/activities");
//!
//!     let pager = Pager::new(PagingLimits::default());
//!     match pager.collect(Some(&Paging::new(2, 500)), &source).await? {
//!         Some(items) => println!("{} activities", items.len()),
//!         None => println!("athlete not found"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                            Pager                             │
//! │   validate() → plan() → fetch_page()* → trim → concatenate   │
//! └──────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴───────┬───────────────────────┐
//! │  Pagination  │         HTTP          │     Config / CLI      │
//! ├──────────────┼───────────────────────┼───────────────────────┤
//! │ Paging       │ HttpClient            │ PagerConfig (YAML)    │
//! │ Planner      │ HttpPageSource        │ plan / fetch commands │
//! │ Trimming     │ ClientRegistry        │                       │
//! └──────────────┴───────────────────────┴───────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Authentication
pub mod auth;

/// HTTP client and page source
pub mod http;

/// Window planning and paging orchestration
pub mod pagination;

/// YAML configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};

// Re-export commonly used types
pub use config::{load_config, load_config_from_str, PagerConfig};
pub use pagination::{Page, PageSource, Pager, Paging, PagingLimits};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
