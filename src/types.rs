//! Common types used throughout pagewalk
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    POST,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
        }
    }
}

// ============================================================================
// Paging Mode
// ============================================================================

/// Who drives pagination: the caller or the iteration driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PagingMode {
    /// The driver issues as many fetches as needed to exhaust the listing
    #[default]
    Auto,
    /// The caller drives pagination one page at a time using the returned cursor
    Manual,
}

impl PagingMode {
    /// Infer the paging mode from how the caller bound its inputs.
    ///
    /// The caller is manually driving pagination when it explicitly supplied a
    /// starting cursor, explicitly supplied a cap, or passed the opt-out flag.
    pub fn infer(explicit_cursor: bool, explicit_cap: bool, no_paginate: bool) -> Self {
        if explicit_cursor || explicit_cap || no_paginate {
            Self::Manual
        } else {
            Self::Auto
        }
    }

    /// Check if this is auto-iteration
    pub fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }

    /// Check if the caller controls paging
    pub fn is_manual(self) -> bool {
        matches!(self, Self::Manual)
    }
}

// ============================================================================
// Parameter Location
// ============================================================================

/// Where the cursor and page-size parameters are placed on the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamLocation {
    /// Query string parameters
    #[default]
    Query,
    /// Fields in a JSON request body
    Body,
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff for retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
///
/// Remote listings signal "no further pages" with either an absent or an
/// empty continuation token; both normalize to None.
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}
