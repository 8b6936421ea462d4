//! HTTP transport module
//!
//! The transport collaborator under the page fetcher. Handles:
//! - Automatic retries with configurable backoff
//! - Retry-After-aware 429 handling
//! - Token bucket rate limiting between requests
//! - Error classification for retry decisions

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};

#[cfg(test)]
mod tests;
