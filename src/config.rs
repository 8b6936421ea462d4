//! Listing definitions
//!
//! A listing definition describes one remote listing operation declaratively:
//! where it lives, how to authenticate, where the continuation token and the
//! item array sit in the response, and how the transport should behave.
//! Definitions are parsed from YAML and validated before any request is made.
//! All credentials and region-like settings travel inside the definition;
//! nothing is read from ambient process state.
//!
//! # Example
//!
//! ```yaml
//! name: support-cases
//! base_url: "https://support.example.com"
//! path: /v1/cases
//! query:
//!   status: open
//! auth:
//!   type: bearer
//!   token: "${TOKEN}"
//! page:
//!   items_path: cases
//!   cursor_path: next_token
//!   cursor_param: next_token
//!   page_size_param: max_results
//!   max_page_size: 100
//! ```

use crate::auth::AuthConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::types::{JsonValue, Method, ParamLocation, StringMap};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

// ============================================================================
// Listing Definition
// ============================================================================

/// Declarative definition of a remote listing operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Listing name (informational, used in logs)
    #[serde(default)]
    pub name: Option<String>,

    /// Base URL of the service
    pub base_url: String,

    /// Request path for the listing operation
    pub path: String,

    /// HTTP method
    #[serde(default)]
    pub method: Method,

    /// Fixed query parameters sent with every fetch
    #[serde(default)]
    pub query: StringMap,

    /// Fixed headers sent with every fetch
    #[serde(default)]
    pub headers: StringMap,

    /// Base JSON body for POST listings; pagination fields are merged into it
    #[serde(default)]
    pub body: Option<JsonValue>,

    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// Pagination shape of the operation
    pub page: PageSpec,

    /// Transport configuration
    #[serde(default)]
    pub client: ClientSpec,
}

/// Where the cursor and items live on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSpec {
    /// Dot-path to the item array in the response
    pub items_path: String,

    /// Dot-path to the continuation token in the response
    pub cursor_path: String,

    /// Request parameter name for the continuation token
    pub cursor_param: String,

    /// Request parameter name for the page-size hint
    #[serde(default)]
    pub page_size_param: Option<String>,

    /// Largest page size the remote operation accepts; hints are clamped to it
    #[serde(default)]
    pub max_page_size: Option<u32>,

    /// Whether pagination parameters go in the query string or the JSON body
    #[serde(default)]
    pub location: ParamLocation,
}

/// Transport settings for a listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSpec {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Maximum retries per request
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Backoff strategy between retries
    #[serde(default)]
    pub backoff: crate::types::BackoffType,

    /// Initial backoff delay in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Maximum backoff delay in milliseconds
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,

    /// Rate limiting between requests; null disables it
    #[serde(default = "default_rate_limit")]
    pub rate_limit: Option<RateLimiterConfig>,
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_initial_backoff_ms() -> u64 {
    100
}

fn default_max_backoff_ms() -> u64 {
    60_000
}

fn default_rate_limit() -> Option<RateLimiterConfig> {
    Some(RateLimiterConfig::default())
}

impl Default for ClientSpec {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
            max_retries: default_max_retries(),
            backoff: crate::types::BackoffType::default(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            rate_limit: default_rate_limit(),
        }
    }
}

impl ListingConfig {
    /// Validate the definition before any fetch is attempted
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        if self.path.is_empty() {
            return Err(Error::missing_field("path"));
        }
        if self.page.items_path.is_empty() {
            return Err(Error::missing_field("page.items_path"));
        }
        if self.page.cursor_path.is_empty() {
            return Err(Error::missing_field("page.cursor_path"));
        }
        if self.page.cursor_param.is_empty() {
            return Err(Error::missing_field("page.cursor_param"));
        }

        if self.page.max_page_size == Some(0) {
            return Err(Error::invalid_value(
                "page.max_page_size",
                "must be greater than zero",
            ));
        }

        if self.page.location == ParamLocation::Body && self.method == Method::GET {
            return Err(Error::invalid_value(
                "page.location",
                "body placement requires a POST listing",
            ));
        }

        if let Some(body) = &self.body {
            if !body.is_object() {
                return Err(Error::invalid_value("body", "must be a JSON object"));
            }
        }

        Ok(())
    }

    /// Build the HTTP client configuration for this listing
    pub fn client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(self.base_url.clone())
            .timeout(Duration::from_secs(self.client.timeout_seconds))
            .max_retries(self.client.max_retries)
            .backoff(
                self.client.backoff,
                Duration::from_millis(self.client.initial_backoff_ms),
                Duration::from_millis(self.client.max_backoff_ms),
            );

        builder = match &self.client.rate_limit {
            Some(limit) => builder.rate_limit(limit.clone()),
            None => builder.no_rate_limit(),
        };

        builder.build()
    }

    /// Name to use in logs
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.path)
    }
}

// ============================================================================
// Loader Functions
// ============================================================================

/// Load a listing definition from a YAML file
pub fn load_listing<P: AsRef<Path>>(path: P) -> Result<ListingConfig> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    load_listing_from_str(&content)
}

/// Load a listing definition from a YAML string
pub fn load_listing_from_str(yaml: &str) -> Result<ListingConfig> {
    let config: ListingConfig = serde_yaml::from_str(yaml)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const FULL_YAML: &str = r#"
name: support-cases
base_url: "https://support.example.com"
path: /v1/cases
method: POST
query:
  status: open
headers:
  X-Team: billing
body:
  include_resolved: false
auth:
  type: bearer
  token: tok_123
page:
  items_path: cases
  cursor_path: next_token
  cursor_param: next_token
  page_size_param: max_results
  max_page_size: 100
  location: body
client:
  timeout_seconds: 10
  max_retries: 2
  backoff: linear
  initial_backoff_ms: 50
  max_backoff_ms: 1000
  rate_limit:
    requests_per_second: 5
    burst_size: 5
"#;

    const MINIMAL_YAML: &str = r#"
base_url: "https://api.example.com"
path: /v1/items
page:
  items_path: items
  cursor_path: next
  cursor_param: cursor
"#;

    #[test]
    fn test_load_full_definition() {
        let config = load_listing_from_str(FULL_YAML).unwrap();

        assert_eq!(config.name.as_deref(), Some("support-cases"));
        assert_eq!(config.method, Method::POST);
        assert_eq!(config.query.get("status"), Some(&"open".to_string()));
        assert_eq!(config.page.max_page_size, Some(100));
        assert_eq!(config.page.location, ParamLocation::Body);
        assert_eq!(config.client.timeout_seconds, 10);
        assert_eq!(
            config.client.rate_limit.as_ref().unwrap().requests_per_second,
            5
        );
        assert!(matches!(config.auth, AuthConfig::Bearer { .. }));
    }

    #[test]
    fn test_load_minimal_definition_uses_defaults() {
        let config = load_listing_from_str(MINIMAL_YAML).unwrap();

        assert_eq!(config.method, Method::GET);
        assert!(config.query.is_empty());
        assert!(config.auth.is_none());
        assert_eq!(config.page.location, ParamLocation::Query);
        assert!(config.page.page_size_param.is_none());
        assert_eq!(config.client.timeout_seconds, 30);
        assert_eq!(config.client.max_retries, 3);
        assert!(config.client.rate_limit.is_some());
        assert_eq!(config.display_name(), "/v1/items");
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let yaml = MINIMAL_YAML.replace("https://api.example.com", "ftp://api.example.com");
        let err = load_listing_from_str(&yaml).unwrap_err();
        assert!(err.to_string().contains("base_url"));

        let yaml = MINIMAL_YAML.replace("https://api.example.com", "not a url");
        assert!(load_listing_from_str(&yaml).is_err());
    }

    #[test]
    fn test_validate_rejects_zero_max_page_size() {
        let yaml = format!("{MINIMAL_YAML}  max_page_size: 0\n");
        let err = load_listing_from_str(&yaml).unwrap_err();
        assert!(err.to_string().contains("max_page_size"));
    }

    #[test]
    fn test_validate_rejects_body_location_on_get() {
        let yaml = format!("{MINIMAL_YAML}  location: body\n");
        let err = load_listing_from_str(&yaml).unwrap_err();
        assert!(err.to_string().contains("page.location"));
    }

    #[test]
    fn test_validate_rejects_missing_pagination_fields() {
        let yaml = r#"
base_url: "https://api.example.com"
path: /v1/items
page:
  items_path: items
  cursor_path: next
  cursor_param: ""
"#;
        let err = load_listing_from_str(yaml).unwrap_err();
        assert!(err.to_string().contains("page.cursor_param"));
    }

    #[test]
    fn test_client_config_mapping() {
        let config = load_listing_from_str(FULL_YAML).unwrap();
        let client = config.client_config();

        assert_eq!(client.base_url.as_deref(), Some("https://support.example.com"));
        assert_eq!(client.timeout, Duration::from_secs(10));
        assert_eq!(client.max_retries, 2);
        assert_eq!(client.initial_backoff, Duration::from_millis(50));
    }

    #[test]
    fn test_load_listing_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MINIMAL_YAML.as_bytes()).unwrap();

        let config = load_listing(file.path()).unwrap();
        assert_eq!(config.path, "/v1/items");
    }

    #[test]
    fn test_load_listing_missing_file() {
        let err = load_listing("/does/not/exist.yaml").unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
