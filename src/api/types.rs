// src/api/types.rs
//! Type definitions for the GitHub API module.
//!
//! Requests and responses are plain immutable values so that transports can
//! be swapped (the HTTP transport in production, scripted ones in tests)
//! without touching pagination or error classification.

use crate::error::AppError;
use crate::types::Credential;
use indexmap::IndexMap;
use reqwest::StatusCode;
use serde_json::{Map, Value};
use std::fmt;
use url::Url;

/// An untyped record exactly as the platform returned it.
pub type RawRecord = Map<String, Value>;

/// HTTP method. The client is read-only, so only `GET` exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    Integer(i64),
    Flag(bool),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(text) => f.write_str(text),
            ParamValue::Integer(number) => write!(f, "{}", number),
            ParamValue::Flag(flag) => write!(f, "{}", flag),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Integer(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Integer(i64::from(value))
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Flag(value)
    }
}

/// Ordered query parameters.
pub type Params = IndexMap<String, ParamValue>;

/// Everything a transport needs to perform one call.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    pub params: Params,
    pub credential: Option<Credential>,
}

impl Request {
    /// The URL with every parameter appended to its query string.
    pub fn full_url(&self) -> Url {
        let mut url = self.url.clone();
        if !self.params.is_empty() {
            let mut query = url.query_pairs_mut();
            for (key, value) in &self.params {
                query.append_pair(key, &value.to_string());
            }
        }
        url
    }
}

/// Status, body, and continuation locator of one HTTP exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
    /// The `rel="next"` link, when the platform advertised one.
    pub next: Option<Url>,
}

impl RawResponse {
    /// Decodes the body as JSON. An empty body decodes as `null`.
    pub fn json(&self) -> Result<Value, AppError> {
        if self.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&self.body).map_err(|e| {
            AppError::MalformedResponse(format!("response body is not JSON ({}): {}", self.status, e))
        })
    }
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub records: Vec<RawRecord>,
    pub status: StatusCode,
}

/// Interprets a decoded body as an array of records.
pub fn records_from_json(value: Value) -> Result<Vec<RawRecord>, AppError> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(record) => Ok(record),
                other => Err(AppError::MalformedResponse(format!(
                    "expected a JSON object in list, found {}",
                    json_kind(&other)
                ))),
            })
            .collect(),
        Value::Null => Ok(Vec::new()),
        other => Err(AppError::MalformedResponse(format!(
            "expected a JSON array, found {}",
            json_kind(&other)
        ))),
    }
}

/// Interprets a decoded body as a single record.
pub fn record_from_json(value: Value) -> Result<RawRecord, AppError> {
    match value {
        Value::Object(record) => Ok(record),
        other => Err(AppError::MalformedResponse(format!(
            "expected a JSON object, found {}",
            json_kind(&other)
        ))),
    }
}

/// Short name of a JSON value's kind for diagnostics.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
