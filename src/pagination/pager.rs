//! Paging orchestrator
//!
//! Drives a plan through a page source: fetch in order, trim each page,
//! concatenate, and stop on the first empty page.

use super::planner::plan;
use super::trim::{drop_first_n, drop_last_n};
use super::types::{Page, PageSource, Paging, PagingLimits, Window};
use super::validate::validate;
use crate::error::Result;
use std::future::Future;
use tracing::{debug, trace};

/// Collects logical windows from a size-limited backend.
///
/// A `Pager` holds no per-request state, so one instance can serve any
/// number of concurrent `collect` calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pager {
    limits: PagingLimits,
}

impl Pager {
    /// Create a pager for a backend with the given limits
    pub fn new(limits: PagingLimits) -> Self {
        Self { limits }
    }

    /// Limits this pager plans against
    pub fn limits(&self) -> &PagingLimits {
        &self.limits
    }

    /// Validate a logical descriptor and plan its physical pages
    pub fn plan(&self, paging: Option<&Paging>) -> Result<Vec<Paging>> {
        validate(paging)?;
        plan(paging, &self.limits)
    }

    /// Collect a logical window from a [`PageSource`].
    ///
    /// Returns `Ok(None)` when the source reports the parent resource as not
    /// found on any page, and `Ok(Some(items))` otherwise (possibly empty).
    /// Any other error from the source is returned unchanged.
    pub async fn collect<T, S>(&self, paging: Option<&Paging>, source: &S) -> Result<Option<Vec<T>>>
    where
        T: Send,
        S: PageSource<T> + ?Sized,
    {
        self.collect_with(paging, move |physical| async move {
            source.fetch_page(&physical).await
        })
        .await
    }

    /// Collect a logical window using an async fetch closure
    pub async fn collect_with<T, F, Fut>(
        &self,
        paging: Option<&Paging>,
        mut fetch: F,
    ) -> Result<Option<Vec<T>>>
    where
        F: FnMut(Paging) -> Fut,
        Fut: Future<Output = Result<Page<T>>>,
    {
        let pages = self.plan(paging)?;
        let mut collector = Collector::new(paging.map(|p| p.normalized(&self.limits)));

        for physical in pages {
            trace!("Fetching {}", physical);
            let page = fetch(physical).await?;
            match collector.accept(&physical, page) {
                Step::Continue => {}
                Step::EndOfData => break,
                Step::NotFound => return Ok(None),
            }
        }

        Ok(Some(collector.finish()))
    }

    /// Collect a logical window using a blocking fetch closure
    pub fn collect_blocking<T, F>(
        &self,
        paging: Option<&Paging>,
        mut fetch: F,
    ) -> Result<Option<Vec<T>>>
    where
        F: FnMut(&Paging) -> Result<Page<T>>,
    {
        let pages = self.plan(paging)?;
        let mut collector = Collector::new(paging.map(|p| p.normalized(&self.limits)));

        for physical in &pages {
            trace!("Fetching {}", physical);
            match collector.accept(physical, fetch(physical)?) {
                Step::Continue => {}
                Step::EndOfData => break,
                Step::NotFound => return Ok(None),
            }
        }

        Ok(Some(collector.finish()))
    }
}

/// Trim one fetched page down to its part of the window.
///
/// `ignore_last_n` counts back from the end of the page that was requested,
/// not from the end of what came back, so a short final page keeps every
/// item that lies inside the window.
pub(super) fn trim_page<T>(items: Vec<T>, physical: &Paging) -> Vec<T> {
    let keep = (physical.page_size as usize).saturating_sub(physical.ignore_last_n as usize);
    let excess = items.len().saturating_sub(keep);
    drop_first_n(drop_last_n(items, excess), physical.ignore_first_n as usize)
}

/// What to do after a page has been accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    EndOfData,
    NotFound,
}

/// Accumulator for one `collect` call
struct Collector<T> {
    window: Option<Window>,
    items: Vec<T>,
    pages: usize,
}

impl<T> Collector<T> {
    fn new(logical: Option<Paging>) -> Self {
        Self {
            window: logical.map(|p| p.window()),
            items: Vec::new(),
            pages: 0,
        }
    }

    fn accept(&mut self, physical: &Paging, page: Page<T>) -> Step {
        let items = match page {
            Page::NotFound => {
                debug!("Parent resource not found while fetching {}", physical);
                return Step::NotFound;
            }
            Page::Found(items) => items,
        };

        self.pages += 1;
        if items.is_empty() {
            debug!(
                "Empty page at {}, stopping after {} pages",
                physical, self.pages
            );
            return Step::EndOfData;
        }

        let fetched = items.len();
        let items = trim_page(items, physical);
        trace!("Kept {} of {} items from {}", items.len(), fetched, physical);

        self.items.extend(items);
        Step::Continue
    }

    /// Clamp to the logical window length. Per-page trims already place the
    /// window exactly; this only guards against a backend that returns more
    /// items than were asked for.
    fn finish(mut self) -> Vec<T> {
        if let Some(window) = self.window {
            let len = usize::try_from(window.len()).unwrap_or(usize::MAX);
            if self.items.len() > len {
                debug!(
                    "Clamping {} collected items to window of {}",
                    self.items.len(),
                    len
                );
                self.items.truncate(len);
            }
        }
        debug!(
            "Collected {} items from {} pages",
            self.items.len(),
            self.pages
        );
        self.items
    }
}
