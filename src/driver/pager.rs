//! The iteration state machine
//!
//! A `Pager` turns a `PageFetcher` into a bounded, resumable walk over a
//! remote listing. Pages are fetched strictly sequentially (each depends on
//! the prior cursor); items are handed downstream page by page, never
//! buffered into one collection.

use super::types::{IterateOptions, IterationState, StopReason};
use crate::error::{Error, Result};
use crate::fetch::{PageFetcher, PageRequest};
use crate::progress::{ProgressReporter, TracingReporter};
use futures::stream::{self, Stream, TryStreamExt};
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

/// Type alias for the lazy item sequence produced by `into_stream`
pub type ItemStream<T> = Pin<Box<dyn Stream<Item = Result<T>> + Send>>;

/// Drives repeated fetches over a `PageFetcher`
pub struct Pager<F: PageFetcher> {
    fetcher: F,
    options: IterateOptions,
    state: IterationState,
    progress: Arc<dyn ProgressReporter>,
    cancel: CancellationToken,
}

impl<F: PageFetcher> Pager<F> {
    /// Create a pager, validating the options before any fetch
    pub fn new(fetcher: F, options: IterateOptions) -> Result<Self> {
        options.validate()?;
        let state = IterationState::starting_at(options.starting_cursor());
        Ok(Self {
            fetcher,
            options,
            state,
            progress: Arc::new(TracingReporter),
            cancel: CancellationToken::new(),
        })
    }

    /// Replace the progress reporter
    #[must_use]
    pub fn with_progress(mut self, progress: Arc<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    /// Attach a cancellation token, checked between pages
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Current iteration state
    pub fn state(&self) -> &IterationState {
        &self.state
    }

    /// Cursor a later iteration would resume from, if any
    ///
    /// Stays valid after a failed fetch: it is the cursor the failed fetch
    /// was attempted with.
    pub fn resume_cursor(&self) -> Option<&str> {
        self.state.cursor.as_deref()
    }

    /// Options this pager runs with
    pub fn options(&self) -> &IterateOptions {
        &self.options
    }

    /// Fetch the next page, or None once the iteration is done
    ///
    /// Items already returned by earlier calls stay valid when a later fetch
    /// fails; the sequence is "failed after N items", not wholly invalid.
    pub async fn next_page(&mut self) -> Result<Option<Vec<F::Item>>> {
        if self.state.done {
            return Ok(None);
        }

        if self.cancel.is_cancelled() {
            self.state.finish(StopReason::Cancelled);
            self.report_finished();
            return Err(Error::Cancelled {
                pages: self.state.pages_fetched,
                items: self.state.total_fetched,
            });
        }

        let request = PageRequest {
            cursor: self.state.cursor.clone(),
            page_size: self.options.page_size,
        };
        let page = self.fetcher.fetch_page(&request).await?;

        let count = page.items.len();
        self.state.record_page(count, page.next_cursor);

        if self.options.paging_mode.is_auto() {
            self.progress
                .page_fetched(self.state.pages_fetched, count, self.state.total_fetched);
        }

        if let Some(reason) = self.stop_reason() {
            self.state.finish(reason);
            self.report_finished();
        }

        Ok(Some(page.items))
    }

    /// Drain the rest of the iteration into one vector
    ///
    /// Convenience for small listings; prefer `into_stream` or `next_page`
    /// when the listing may be large.
    pub async fn collect_remaining(mut self) -> Result<Vec<F::Item>> {
        let mut items = Vec::new();
        while let Some(page) = self.next_page().await? {
            items.extend(page);
        }
        Ok(items)
    }

    /// Decide whether the iteration continues after the page just recorded
    fn stop_reason(&self) -> Option<StopReason> {
        if self.state.cursor.is_none() {
            return Some(StopReason::Exhausted);
        }
        if let Some(cap) = self.options.cap {
            // Inherited safeguard against an empty-page/always-cursor loop
            if self.state.total_fetched == 0 && self.options.stop_capped_on_empty {
                return Some(StopReason::EmptyCapped);
            }
            if self.state.total_fetched >= cap {
                return Some(StopReason::CapReached);
            }
        }
        if self.options.paging_mode.is_manual() {
            return Some(StopReason::SinglePage);
        }
        None
    }

    fn report_finished(&self) {
        if self.options.paging_mode.is_auto() {
            if let Some(reason) = &self.state.stop {
                self.progress
                    .finished(self.state.pages_fetched, self.state.total_fetched, reason);
            }
        }
    }
}

impl<F: PageFetcher + 'static> Pager<F>
where
    F::Item: 'static,
{
    /// Turn the pager into a lazy, forward-only item stream
    ///
    /// The stream yields items in fetch order and stops per the pager's
    /// options. The returned `StateHandle` tracks the iteration state after
    /// every page, including after a failure, so the resume cursor is never
    /// lost to the stream adapter.
    pub fn into_stream(self) -> (ItemStream<F::Item>, StateHandle) {
        let handle = StateHandle::new(self.state.clone());
        let tracker = handle.clone();

        let pages = stream::try_unfold(self, move |mut pager| {
            let tracker = tracker.clone();
            async move {
                let step = pager.next_page().await;
                tracker.set(pager.state().clone());
                match step {
                    Ok(Some(items)) => Ok(Some((items, pager))),
                    Ok(None) => Ok(None),
                    Err(e) => Err(e),
                }
            }
        });

        let items = pages
            .map_ok(|page| stream::iter(page.into_iter().map(Ok)))
            .try_flatten();

        (Box::pin(items), handle)
    }
}

impl<F: PageFetcher> std::fmt::Debug for Pager<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager")
            .field("options", &self.options)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Shared view of an iteration's state
///
/// Handed out by `into_stream` so callers can observe progress and recover
/// the resume cursor even after the stream has been consumed or has failed.
#[derive(Debug, Clone)]
pub struct StateHandle {
    inner: Arc<Mutex<IterationState>>,
}

impl StateHandle {
    fn new(state: IterationState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    fn set(&self, state: IterationState) {
        *self.lock() = state;
    }

    /// Snapshot of the current iteration state
    pub fn snapshot(&self) -> IterationState {
        self.lock().clone()
    }

    /// Cursor a later iteration would resume from
    pub fn resume_cursor(&self) -> Option<String> {
        self.lock().cursor.clone()
    }

    /// Check if the iteration has finished
    pub fn is_done(&self) -> bool {
        self.lock().done
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, IterationState> {
        self.inner.lock().expect("iteration state lock poisoned")
    }
}
