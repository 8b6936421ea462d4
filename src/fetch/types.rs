//! Page fetching types and traits
//!
//! Defines the fetcher abstraction the iteration driver is built against.

use crate::error::Result;
use crate::types::OptionStringExt;
use async_trait::async_trait;

/// Parameters for a single page fetch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    /// Continuation token from the previous page; absent on the first fetch
    pub cursor: Option<String>,
    /// Hint for how many items the page should hold
    pub page_size: Option<u32>,
}

impl PageRequest {
    /// Create a request for the first page
    pub fn first() -> Self {
        Self::default()
    }

    /// Create a request resuming from a cursor
    pub fn resume(cursor: impl Into<String>) -> Self {
        Self {
            cursor: Some(cursor.into()),
            page_size: None,
        }
    }

    /// Set the page-size hint
    #[must_use]
    pub fn with_page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }
}

/// One page of a remote listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items in the order the service returned them
    pub items: Vec<T>,
    /// Continuation token for the next page; None when the listing is exhausted
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    /// Create a page with a continuation token
    pub fn new(items: Vec<T>, next_cursor: Option<String>) -> Self {
        Self {
            items,
            // An empty token means the same thing as an absent one
            next_cursor: next_cursor.none_if_empty(),
        }
    }

    /// Create the final page of a listing
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_cursor: None,
        }
    }

    /// Number of items in this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the page holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Check if more pages follow this one
    pub fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }
}

/// Core trait for fetching one page of a remote listing
///
/// Implementations pass the cursor through unmodified and perform no retry of
/// their own; retries belong to the transport underneath.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// The item type pages are made of
    type Item: Send;

    /// Fetch a single page
    async fn fetch_page(&self, request: &PageRequest) -> Result<Page<Self::Item>>;
}

/// A fetcher that applies a per-item transform to another fetcher's pages
///
/// This is the selector seam: callers pick what each raw item becomes by
/// supplying a plain function, keeping projection out of the fetch path.
pub struct MappedFetcher<F, G> {
    inner: F,
    map: G,
}

#[async_trait]
impl<F, G, U> PageFetcher for MappedFetcher<F, G>
where
    F: PageFetcher,
    G: Fn(F::Item) -> U + Send + Sync,
    U: Send,
{
    type Item = U;

    async fn fetch_page(&self, request: &PageRequest) -> Result<Page<U>> {
        let page = self.inner.fetch_page(request).await?;
        Ok(Page {
            items: page.items.into_iter().map(&self.map).collect(),
            next_cursor: page.next_cursor,
        })
    }
}

/// Extension methods for fetchers
pub trait PageFetcherExt: PageFetcher + Sized {
    /// Transform every item with `map`, leaving cursors untouched
    fn map_items<G, U>(self, map: G) -> MappedFetcher<Self, G>
    where
        G: Fn(Self::Item) -> U + Send + Sync,
        U: Send,
    {
        MappedFetcher { inner: self, map }
    }
}

impl<F: PageFetcher> PageFetcherExt for F {}
