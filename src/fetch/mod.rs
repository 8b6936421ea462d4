//! Page fetching module
//!
//! The fetcher is the collaborator the iteration driver calls once per page:
//! give it a cursor and an optional page-size hint, get back a batch of items
//! and the next cursor. `HttpPageFetcher` is the production implementation;
//! anything implementing `PageFetcher` plugs into the driver.

mod http;
mod types;

pub use http::HttpPageFetcher;
pub use types::{MappedFetcher, Page, PageFetcher, PageFetcherExt, PageRequest};
