// src/api/pagination.rs
//! Pull-driven pagination over `Link: rel="next"` continuations.

use super::client::GitHubClient;
use super::types::{records_from_json, Method, Page, Params};
use crate::error::AppError;
use reqwest::StatusCode;
use std::iter::FusedIterator;
use url::Url;

enum Cursor {
    /// The endpoint URL plus the caller's parameters.
    Start { url: Url, params: Params },
    /// A continuation URL, used verbatim.
    Next(Url),
    Done,
}

/// A lazy, finite sequence of pages.
///
/// Each call to `next` performs at most one request. A failure is yielded
/// once, after the pages that preceded it; the sequence is exhausted after
/// that. A continuation answered with `204 No Content` ends the sequence
/// without an error.
pub struct Pages<'a> {
    client: &'a GitHubClient,
    method: Method,
    cursor: Cursor,
    fetched: usize,
}

impl<'a> Pages<'a> {
    pub(crate) fn new(client: &'a GitHubClient, method: Method, url: Url, params: Params) -> Self {
        Self {
            client,
            method,
            cursor: Cursor::Start { url, params },
            fetched: 0,
        }
    }

    /// Number of pages requested so far.
    pub fn fetched(&self) -> usize {
        self.fetched
    }
}

impl Iterator for Pages<'_> {
    type Item = Result<Page, AppError>;

    fn next(&mut self) -> Option<Self::Item> {
        let (url, params, continuation) = match std::mem::replace(&mut self.cursor, Cursor::Done) {
            Cursor::Done => return None,
            Cursor::Start { url, params } => (url, params, false),
            Cursor::Next(url) => (url, Params::new(), true),
        };

        self.fetched += 1;
        let response = match self.client.call(self.method, url, params) {
            Ok(response) => response,
            Err(e) => return Some(Err(e)),
        };

        if continuation && response.status == StatusCode::NO_CONTENT {
            log::debug!("Continuation returned no content after {} pages", self.fetched - 1);
            return None;
        }

        let records = match response.json().and_then(records_from_json) {
            Ok(records) => records,
            Err(e) => return Some(Err(e)),
        };

        if let Some(next) = response.next {
            self.cursor = Cursor::Next(next);
        }

        Some(Ok(Page {
            records,
            status: response.status,
        }))
    }
}

impl FusedIterator for Pages<'_> {}

impl std::fmt::Debug for Pages<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match &self.cursor {
            Cursor::Start { url, .. } => format!("start {}", url),
            Cursor::Next(url) => format!("next {}", url),
            Cursor::Done => "done".to_string(),
        };
        f.debug_struct("Pages")
            .field("method", &self.method)
            .field("state", &state)
            .field("fetched", &self.fetched)
            .finish()
    }
}
