//! Progress reporting
//!
//! Purely observational narration of a long auto-iteration. Reporters never
//! influence the item sequence; manual single-page calls stay silent.

use crate::driver::StopReason;
use tracing::info;

/// Observer notified as auto-iteration advances
pub trait ProgressReporter: Send + Sync {
    /// Called after each page during auto-iteration
    fn page_fetched(&self, page: u64, items_in_page: usize, total_items: u64);

    /// Called once when the loop ends
    fn finished(&self, pages: u64, total_items: u64, reason: &StopReason);
}

/// Reporter that narrates progress through tracing
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ProgressReporter for TracingReporter {
    fn page_fetched(&self, page: u64, items_in_page: usize, total_items: u64) {
        info!("Page {page}: fetched {items_in_page} items ({total_items} total)");
    }

    fn finished(&self, pages: u64, total_items: u64, reason: &StopReason) {
        info!("Finished after {pages} pages, {total_items} items ({reason})");
    }
}

/// Reporter that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn page_fetched(&self, _page: u64, _items_in_page: usize, _total_items: u64) {}

    fn finished(&self, _pages: u64, _total_items: u64, _reason: &StopReason) {}
}
