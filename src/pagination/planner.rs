//! Window planning
//!
//! Translates one logical page into the physical pages a size-limited
//! backend will accept. The plan is pure: it depends only on the descriptor
//! and the limits, never on what a fetch returns.

use super::types::{Paging, PagingLimits};
use crate::error::{Error, Result};
use tracing::debug;

/// Plan the physical pages needed to reconstruct a logical window.
///
/// Fetching the returned pages in order and trimming each by its own
/// `ignore_first_n`/`ignore_last_n` yields exactly the logical window.
///
/// Callers are expected to have run [`validate`](super::validate) first.
///
/// A window trimmed to nothing plans no fetches, except when an oversized
/// first page is trimmed from the end down to zero items: that has no
/// physical request to collapse into and is reported as
/// [`Error::Planning`].
pub fn plan(paging: Option<&Paging>, limits: &PagingLimits) -> Result<Vec<Paging>> {
    let Some(paging) = paging else {
        return Ok(vec![Paging::new(1, limits.default_page_size)]);
    };

    let logical = paging.normalized(limits);

    // Already fits in one request
    if logical.page_size <= limits.max_page_size {
        return Ok(vec![logical]);
    }

    let window = logical.window();
    if window.last == 0 {
        return Err(Error::planning(format!(
            "{logical} ends before the first item"
        )));
    }

    let max = u64::from(limits.max_page_size);

    // Entire window sits inside the first `max` items: ask for the first
    // `last` items in one go and trim the front.
    if window.last <= max {
        let pages = vec![Paging {
            page: 1,
            page_size: physical_u32(window.last)?,
            ignore_first_n: logical.ignore_first_n,
            ignore_last_n: 0,
        }];
        debug!("Planned {} as a single first-page request", logical);
        return Ok(pages);
    }

    if window.is_empty() {
        debug!("{} trims away the whole window, nothing to fetch", logical);
        return Ok(Vec::new());
    }

    let first_page = (window.first - 1) / max + 1;
    let last_page = (window.last - 1) / max + 1;

    // Reject page numbers a physical request cannot carry before reserving
    // space for the whole span
    physical_u32(last_page)?;

    let mut pages = Vec::with_capacity((last_page - first_page + 1) as usize);
    for current in first_page..=last_page {
        let start = (current - 1) * max + 1;
        let end = current * max;

        pages.push(Paging {
            page: physical_u32(current)?,
            page_size: limits.max_page_size,
            ignore_first_n: physical_u32(window.first.saturating_sub(start))?,
            ignore_last_n: physical_u32(end.saturating_sub(window.last))?,
        });
    }

    debug!(
        "Planned {} as {} physical pages ({}..={})",
        logical,
        pages.len(),
        first_page,
        last_page
    );
    Ok(pages)
}

fn physical_u32(value: u64) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| Error::planning(format!("physical paging value {value} overflows u32")))
}
