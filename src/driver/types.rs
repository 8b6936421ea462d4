//! Iteration driver types
//!
//! State and options for the pagination state machine.

use crate::error::{Error, Result};
use crate::types::{OptionStringExt, PagingMode};

/// Why an iteration stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The service returned no continuation token
    Exhausted,
    /// The cumulative item count reached the caller's cap
    CapReached,
    /// The caller is driving pagination manually; one fetch per call
    SinglePage,
    /// A cap was set and the run has fetched nothing at all
    EmptyCapped,
    /// Cancellation was requested between pages
    Cancelled,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Exhausted => "listing exhausted",
            Self::CapReached => "cap reached",
            Self::SinglePage => "single page",
            Self::EmptyCapped => "empty capped page",
            Self::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

/// Tracks iteration progress
///
/// Created fresh for every iteration; `cursor` is the only piece a caller
/// would persist, and only to resume manually later.
#[derive(Debug, Clone, Default)]
pub struct IterationState {
    /// Cursor the next fetch would use; after the loop stops, the resume point
    pub cursor: Option<String>,
    /// Pages fetched so far
    pub pages_fetched: u64,
    /// Items fetched so far; monotonically non-decreasing
    pub total_fetched: u64,
    /// Is the iteration complete?
    pub done: bool,
    /// Why the iteration stopped, once done
    pub stop: Option<StopReason>,
}

impl IterationState {
    /// Create a state starting from an optional cursor
    pub fn starting_at(cursor: Option<String>) -> Self {
        Self {
            cursor,
            ..Default::default()
        }
    }

    /// Record one fetched page
    pub fn record_page(&mut self, items: usize, next_cursor: Option<String>) {
        self.pages_fetched += 1;
        self.total_fetched += items as u64;
        self.cursor = next_cursor;
    }

    /// Mark the iteration complete
    pub fn finish(&mut self, reason: StopReason) {
        self.done = true;
        self.stop = Some(reason);
    }
}

/// Options for one iteration
#[derive(Debug, Clone)]
pub struct IterateOptions {
    /// Cursor to resume from; absent starts at the beginning of the listing
    pub initial_cursor: Option<String>,
    /// Stop issuing fetches once this many items have been yielded
    pub cap: Option<u64>,
    /// Whether the driver auto-exhausts the listing or the caller drives it
    pub paging_mode: PagingMode,
    /// Page-size hint forwarded to every fetch
    pub page_size: Option<u32>,
    /// Inherited quirk: a capped run that has fetched nothing stops even if a
    /// cursor remains. On by default for fidelity with the observed behavior.
    pub stop_capped_on_empty: bool,
}

impl Default for IterateOptions {
    fn default() -> Self {
        Self {
            initial_cursor: None,
            cap: None,
            paging_mode: PagingMode::default(),
            page_size: None,
            stop_capped_on_empty: true,
        }
    }
}

impl IterateOptions {
    /// Create options for a full auto-iteration
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a cursor
    #[must_use]
    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.initial_cursor = Some(cursor.into());
        self
    }

    /// Stop after roughly `cap` items (the overshooting page is not truncated)
    #[must_use]
    pub fn cap(mut self, cap: u64) -> Self {
        self.cap = Some(cap);
        self
    }

    /// Set the paging mode explicitly
    #[must_use]
    pub fn paging_mode(mut self, mode: PagingMode) -> Self {
        self.paging_mode = mode;
        self
    }

    /// Forward a page-size hint with every fetch
    #[must_use]
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Let a capped run continue through an empty first page
    #[must_use]
    pub fn keep_going_on_empty(mut self) -> Self {
        self.stop_capped_on_empty = false;
        self
    }

    /// Validate before any fetch is attempted
    pub fn validate(&self) -> Result<()> {
        if self.cap == Some(0) {
            return Err(Error::invalid_argument("cap", "must be greater than zero"));
        }
        if self.page_size == Some(0) {
            return Err(Error::invalid_argument(
                "page_size",
                "must be greater than zero",
            ));
        }
        if let Some(cursor) = &self.initial_cursor {
            if cursor.trim().is_empty() {
                return Err(Error::invalid_argument(
                    "initial_cursor",
                    "must not be blank when supplied",
                ));
            }
        }
        Ok(())
    }

    /// Normalized starting cursor
    pub(crate) fn starting_cursor(&self) -> Option<String> {
        self.initial_cursor.clone().none_if_empty()
    }
}
