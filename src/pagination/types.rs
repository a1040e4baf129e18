//! Pagination types and traits
//!
//! Defines the paging descriptor, the server limits it is planned against,
//! and the page source abstraction every fetch goes through.

use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Default page size used when a request leaves `page_size` at 0
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Largest page size the backend accepts per physical request
pub const DEFAULT_MAX_PAGE_SIZE: u32 = 200;

// ============================================================================
// Paging Descriptor
// ============================================================================

/// One logical or physical page.
///
/// `page` is 1-based, with 0 meaning "page 1". `page_size` of 0 means "use the
/// default page size". The trim counts say how many items to discard from the
/// start and end of the fetched page(s) before handing them to the caller.
///
/// The trim counts are not checked here: call [`validate`](super::validate)
/// (the [`Pager`](super::Pager) does this for you) before planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Paging {
    /// Page number (1-based, 0 = first page)
    #[serde(default)]
    pub page: u32,
    /// Page size (0 = default)
    #[serde(default)]
    pub page_size: u32,
    /// Items to drop from the start of the window
    #[serde(default)]
    pub ignore_first_n: u32,
    /// Items to drop from the end of the window
    #[serde(default)]
    pub ignore_last_n: u32,
}

impl Paging {
    /// Create a descriptor with no trimming
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page,
            page_size,
            ignore_first_n: 0,
            ignore_last_n: 0,
        }
    }

    /// Set the number of leading items to drop
    #[must_use]
    pub fn with_ignore_first_n(mut self, n: u32) -> Self {
        self.ignore_first_n = n;
        self
    }

    /// Set the number of trailing items to drop
    #[must_use]
    pub fn with_ignore_last_n(mut self, n: u32) -> Self {
        self.ignore_last_n = n;
        self
    }

    /// Replace the 0 sentinels with page 1 and the default page size
    pub fn normalized(self, limits: &PagingLimits) -> Self {
        Self {
            page: self.page.max(1),
            page_size: if self.page_size == 0 {
                limits.default_page_size
            } else {
                self.page_size
            },
            ..self
        }
    }

    /// The 1-based item window this descriptor addresses.
    ///
    /// Expects a normalized descriptor (page and page size both non-zero).
    pub fn window(&self) -> Window {
        let page = u64::from(self.page);
        let size = u64::from(self.page_size);
        Window {
            first: (page.saturating_sub(1)) * size + u64::from(self.ignore_first_n) + 1,
            last: (page * size).saturating_sub(u64::from(self.ignore_last_n)),
        }
    }
}

impl std::fmt::Display for Paging {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "page {} (size {}", self.page, self.page_size)?;
        if self.ignore_first_n > 0 {
            write!(f, ", ignore first {}", self.ignore_first_n)?;
        }
        if self.ignore_last_n > 0 {
            write!(f, ", ignore last {}", self.ignore_last_n)?;
        }
        write!(f, ")")
    }
}

// ============================================================================
// Paging Request
// ============================================================================

/// Signed paging parameters as they arrive from users (CLI flags, JSON, YAML).
///
/// Converting into [`Paging`] rejects negative values and then validates the
/// trim counts against the page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PagingRequest {
    /// Page number
    #[serde(default)]
    pub page: i64,
    /// Page size
    #[serde(default)]
    pub page_size: i64,
    /// Items to drop from the start of the window
    #[serde(default)]
    pub ignore_first_n: i64,
    /// Items to drop from the end of the window
    #[serde(default)]
    pub ignore_last_n: i64,
}

impl TryFrom<PagingRequest> for Paging {
    type Error = Error;

    fn try_from(request: PagingRequest) -> Result<Self> {
        let paging = Paging {
            page: non_negative("page", request.page)?,
            page_size: non_negative("page_size", request.page_size)?,
            ignore_first_n: non_negative("ignore_first_n", request.ignore_first_n)?,
            ignore_last_n: non_negative("ignore_last_n", request.ignore_last_n)?,
        };
        super::validate(Some(&paging))?;
        Ok(paging)
    }
}

fn non_negative(field: &str, value: i64) -> Result<u32> {
    if value < 0 {
        return Err(Error::invalid_argument(format!(
            "{field} must not be negative (got {value})"
        )));
    }
    u32::try_from(value)
        .map_err(|_| Error::invalid_argument(format!("{field} is too large (got {value})")))
}

// ============================================================================
// Server Limits
// ============================================================================

/// Page size limits of the backend being windowed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingLimits {
    /// Page size used when the caller omits one
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
    /// Hard ceiling on the page size of one physical request
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_max_page_size() -> u32 {
    DEFAULT_MAX_PAGE_SIZE
}

impl Default for PagingLimits {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }
}

impl PagingLimits {
    /// Create limits, rejecting zero sizes
    pub fn new(default_page_size: u32, max_page_size: u32) -> Result<Self> {
        let limits = Self {
            default_page_size,
            max_page_size,
        };
        limits.validate()?;
        Ok(limits)
    }

    /// Check that both sizes are usable
    pub fn validate(&self) -> Result<()> {
        if self.default_page_size == 0 {
            return Err(Error::invalid_config(
                "default_page_size",
                "must be greater than 0",
            ));
        }
        if self.max_page_size == 0 {
            return Err(Error::invalid_config(
                "max_page_size",
                "must be greater than 0",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Logical Window
// ============================================================================

/// Inclusive, 1-based range of item positions.
///
/// Empty when `last < first`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Position of the first item
    pub first: u64,
    /// Position of the last item
    pub last: u64,
}

impl Window {
    /// Number of items in the window
    pub fn len(&self) -> u64 {
        (self.last + 1).saturating_sub(self.first)
    }

    /// Check if the window holds no items
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// Page Source
// ============================================================================

/// Result of fetching one physical page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page<T> {
    /// The page was fetched; empty means there is no more data
    Found(Vec<T>),
    /// The parent resource being paged does not exist
    NotFound,
}

impl<T> Page<T> {
    /// Check if this is a not-found result
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

impl<T> From<Vec<T>> for Page<T> {
    fn from(items: Vec<T>) -> Self {
        Self::Found(items)
    }
}

/// Something that can fetch a single physical page.
///
/// Only `page` and `page_size` of the descriptor are meant for the backend;
/// trimming is applied by the [`Pager`](super::Pager).
#[async_trait]
pub trait PageSource<T: Send>: Send + Sync {
    /// Fetch one physical page
    async fn fetch_page(&self, paging: &Paging) -> Result<Page<T>>;
}
