//! HTTP-backed page fetcher
//!
//! Translates a `PageRequest` into one HTTP call described by a
//! `ListingConfig`, then pulls the item array and the continuation token out
//! of the JSON response by dot-path.

use super::types::{Page, PageFetcher, PageRequest};
use crate::config::ListingConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::types::{JsonValue, Method, OptionStringExt, ParamLocation};
use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::debug;

/// Fetches listing pages over HTTP according to a `ListingConfig`
pub struct HttpPageFetcher {
    client: HttpClient,
    config: ListingConfig,
}

impl HttpPageFetcher {
    /// Create a fetcher, building the HTTP client from the listing definition
    pub fn new(config: ListingConfig) -> Result<Self> {
        config.validate()?;
        let client = HttpClient::with_auth(config.client_config(), config.auth.clone());
        Ok(Self { client, config })
    }

    /// Create a fetcher with a caller-supplied HTTP client
    pub fn with_client(config: ListingConfig, client: HttpClient) -> Result<Self> {
        config.validate()?;
        Ok(Self { client, config })
    }

    /// The listing definition this fetcher serves
    pub fn config(&self) -> &ListingConfig {
        &self.config
    }

    /// Clamp a page-size hint to what the remote operation accepts
    fn effective_page_size(&self, hint: Option<u32>) -> Option<u32> {
        match (hint, self.config.page.max_page_size) {
            (Some(hint), Some(max)) => Some(hint.min(max)),
            (Some(hint), None) => Some(hint),
            (None, _) => None,
        }
    }

    /// Assemble the request for one page
    fn build_request(&self, request: &PageRequest) -> RequestConfig {
        let mut req = RequestConfig::new();

        for (key, value) in &self.config.query {
            req = req.query(key, value);
        }
        for (key, value) in &self.config.headers {
            req = req.header(key, value);
        }

        let page = &self.config.page;
        let page_size = self.effective_page_size(request.page_size);

        match page.location {
            ParamLocation::Query => {
                if let Some(cursor) = &request.cursor {
                    req = req.query(&page.cursor_param, cursor);
                }
                if let (Some(param), Some(size)) = (&page.page_size_param, page_size) {
                    req = req.query(param, size.to_string());
                }
                if let Some(body) = &self.config.body {
                    req = req.json(body.clone());
                }
            }
            ParamLocation::Body => {
                let mut body = match &self.config.body {
                    Some(Value::Object(map)) => map.clone(),
                    _ => Map::new(),
                };
                if let Some(cursor) = &request.cursor {
                    body.insert(page.cursor_param.clone(), Value::String(cursor.clone()));
                }
                if let (Some(param), Some(size)) = (&page.page_size_param, page_size) {
                    body.insert(param.clone(), Value::from(size));
                }
                req = req.json(Value::Object(body));
            }
        }

        req
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    type Item = JsonValue;

    async fn fetch_page(&self, request: &PageRequest) -> Result<Page<JsonValue>> {
        let req = self.build_request(request);

        let response = match self.config.method {
            Method::GET => self.client.get(&self.config.path, req).await?,
            Method::POST => self.client.post(&self.config.path, req).await?,
        };

        let body_text = response
            .text()
            .await
            .map_err(|e| Error::decode(format!("Failed to read response body: {e}")))?;
        let body: Value = serde_json::from_str(&body_text)?;

        let items = extract_items(&body, &self.config.page.items_path)?;
        let next_cursor = extract_cursor(&body, &self.config.page.cursor_path)?;

        debug!(
            listing = self.config.display_name(),
            items = items.len(),
            has_more = next_cursor.is_some(),
            "fetched page"
        );

        Ok(Page::new(items, next_cursor))
    }
}

/// Pull the item array out of a response body
fn extract_items(body: &Value, path: &str) -> Result<Vec<JsonValue>> {
    match lookup_path(body, path) {
        // Services omit the array when a page is empty
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items.clone()),
        Some(other) => Err(Error::extraction(
            path,
            format!("expected an array, found {}", type_name(other)),
        )),
    }
}

/// Pull the continuation token out of a response body
fn extract_cursor(body: &Value, path: &str) -> Result<Option<String>> {
    match lookup_path(body, path) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(token)) => Ok(token.clone().none_if_empty()),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(Error::extraction(
            path,
            format!("expected a string token, found {}", type_name(other)),
        )),
    }
}

/// Walk a dot-path through nested objects
pub(crate) fn lookup_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);

    let mut current = value;
    for part in path.split('.') {
        match current {
            Value::Object(map) => current = map.get(part)?,
            _ => return None,
        }
    }

    Some(current)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
