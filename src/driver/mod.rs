//! Iteration driver module
//!
//! Orchestrates repeated page fetches into a single logical sequence.
//!
//! # Overview
//!
//! The driver module provides:
//! - `Pager` - The iteration state machine over any `PageFetcher`
//! - `IterateOptions` - Cursor, cap, paging mode, and edge-case knobs
//! - `IterationState` / `StopReason` - Observable progress and outcome
//! - `StateHandle` - State snapshots for the streaming interface

mod pager;
mod types;

pub use pager::{ItemStream, Pager, StateHandle};
pub use types::{IterateOptions, IterationState, StopReason};
