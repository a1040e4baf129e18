//! Pagination module
//!
//! Virtual pagination over backends that cap the page size per request.
//!
//! # Overview
//!
//! Callers ask for a logical window (any page, any page size, optionally
//! trimmed at either end). The [`plan`] function splits it into physical
//! pages the backend accepts, and the [`Pager`] fetches those pages in
//! order through a [`PageSource`], trims them and concatenates the result.
//!
//! ```rust,ignore
//! use virtual_pager::pagination::{Pager, Paging, PagingLimits};
//!
//! let pager = Pager::new(PagingLimits::default());
//! // 201 items starting at item 202: two physical requests of 200
//! let items = pager.collect(Some(&Paging::new(2, 201)), &source).await?;
//! ```

mod pager;
mod planner;
mod trim;
mod types;
mod validate;

pub use pager::Pager;
pub use planner::plan;
pub use trim::{drop_first_n, drop_last_n};
pub use types::{
    Page, PageSource, Paging, PagingLimits, PagingRequest, Window, DEFAULT_MAX_PAGE_SIZE,
    DEFAULT_PAGE_SIZE,
};
pub use validate::validate;
