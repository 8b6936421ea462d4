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

//! # pagewalk
//!
//! A toolkit for bounded cursor pagination over remote listing APIs.
//!
//! Remote listings hand back a batch of items plus an opaque continuation
//! token; pagewalk turns that shape into a single lazy sequence, a bounded
//! walk, or one manually-driven page at a time.
//!
//! ## Features
//!
//! - **Auto-iteration**: follow the continuation token until the listing ends
//! - **Caps**: stop issuing fetches once a caller-set item count is reached
//! - **Manual paging**: fetch one page, hand the caller the token to resume
//! - **Resumable**: the last-seen cursor survives caps, failures, and Ctrl-C
//! - **HTTP fetcher**: YAML-defined listings with retry, backoff, rate
//!   limiting, and auth handled by the transport
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pagewalk::{load_listing, HttpPageFetcher, IterateOptions, Pager, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let listing = load_listing("listings/cases.yaml")?;
//!     let fetcher = HttpPageFetcher::new(listing)?;
//!
//!     let mut pager = Pager::new(fetcher, IterateOptions::new())?;
//!     while let Some(items) = pager.next_page().await? {
//!         for item in items {
//!             println!("{item}");
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Pager (driver)                       │
//! │  next_page() → page    into_stream() → lazy item sequence   │
//! │  cap / manual paging / cancellation / resume cursor         │
//! └─────────────────────────────┬───────────────────────────────┘
//!                               │ PageFetcher
//! ┌─────────────┬───────────────┴───────────┬───────────────────┐
//! │   Config    │       HttpPageFetcher     │     Progress      │
//! ├─────────────┼───────────────────────────┼───────────────────┤
//! │ YAML defs   │ cursor/page-size params   │ tracing reporter  │
//! │ validation  │ item + token extraction   │ no-op reporter    │
//! │ auth        │ retry / backoff / limits  │                   │
//! └─────────────┴───────────────────────────┴───────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for pagewalk
pub mod error;

/// Common types and type aliases
pub mod types;

/// Authentication configuration
pub mod auth;

/// HTTP transport with retry and rate limiting
pub mod http;

/// Listing definitions and loader
pub mod config;

/// Page fetching trait and HTTP implementation
pub mod fetch;

/// The iteration driver
pub mod driver;

/// Progress reporting
pub mod progress;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::{load_listing, load_listing_from_str, ListingConfig};
pub use driver::{IterateOptions, IterationState, Pager, StateHandle, StopReason};
pub use fetch::{HttpPageFetcher, Page, PageFetcher, PageFetcherExt, PageRequest};
pub use progress::{NoopReporter, ProgressReporter, TracingReporter};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
