// src/api/transport.rs
//! The network seam: one request in, one raw response out.
//!
//! `HttpTransport` is a thin wrapper around a blocking reqwest client. It does
//! not interpret status codes; classification happens in the client so every
//! transport (including scripted test transports) gets identical semantics.

use super::types::{RawResponse, Request};
use crate::config::ClientSettings;
use crate::error::AppError;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::blocking::Client;
use reqwest::header;
use url::Url;

/// Performs a single HTTP exchange.
///
/// Implementations must be shareable across fan-out workers.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &Request) -> Result<RawResponse, AppError>;
}

/// Production transport backed by `reqwest::blocking`.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport sending the configured media type and user agent.
    pub fn new(settings: &ClientSettings) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(settings)?)
            .user_agent(settings.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }

    fn create_headers(settings: &ClientSettings) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_str(&settings.media_type).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid media type: {}", e))
            })?,
        );
        Ok(headers)
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: &Request) -> Result<RawResponse, AppError> {
        let url = request.full_url();
        log::debug!("{} {}", request.method, url);

        let mut builder = match request.method {
            super::types::Method::Get => self.client.get(url),
        };
        if let Some(credential) = &request.credential {
            let mut value = header::HeaderValue::from_str(&credential.authorization())
                .map_err(|e| {
                    AppError::MissingConfiguration(format!("Invalid token format: {}", e))
                })?;
            value.set_sensitive(true);
            builder = builder.header(header::AUTHORIZATION, value);
        }

        let response = builder.send()?;
        let status = response.status();
        let next = response
            .headers()
            .get(header::LINK)
            .and_then(|value| value.to_str().ok())
            .and_then(next_link);
        if let Some(remaining) = response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|value| value.to_str().ok())
        {
            log::debug!("Rate limit remaining: {}", remaining);
        }
        let body = response.text()?;

        log::debug!("{} {} -> {}", request.method, request.url, status);

        Ok(RawResponse { status, body, next })
    }
}

static LINK_ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<([^>]+)>\s*((?:;\s*[a-zA-Z]+\s*=\s*"?[^";,]*"?\s*)*)"#)
        .unwrap_or_else(|e| unreachable!("link pattern is valid: {}", e))
});

static REL_PARAM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i);\s*rel\s*=\s*(?:"([^"]*)"|([^\s;,"]+))"#)
        .unwrap_or_else(|e| unreachable!("rel pattern is valid: {}", e))
});

fn has_next_relation(params: &str) -> bool {
    REL_PARAM.captures_iter(params).any(|rel| {
        rel.get(1)
            .or_else(|| rel.get(2))
            .is_some_and(|value| {
                value
                    .as_str()
                    .split_whitespace()
                    .any(|relation| relation.eq_ignore_ascii_case("next"))
            })
    })
}

/// Extracts the `rel="next"` target from an RFC 8288 `Link` header.
///
/// ```text
/// <https://api.github.com/x?page=2>; rel="next", <https://api.github.com/x?page=5>; rel="last"
/// ```
pub fn next_link(header: &str) -> Option<Url> {
    LINK_ENTRY
        .captures_iter(header)
        .find(|entry| entry.get(2).is_some_and(|params| has_next_relation(params.as_str())))
        .and_then(|entry| Url::parse(entry.get(1)?.as_str()).ok())
}
