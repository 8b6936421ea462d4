//! CLI module
//!
//! Command-line interface for walking listings.
//!
//! # Commands
//!
//! - `walk` - Iterate a listing, printing items as JSON lines
//! - `page` - Fetch exactly one page, printing items and the next cursor
//! - `validate` - Validate a listing definition

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
