// tests/common/mod.rs
//! Scripted transport and fixtures shared by the test suite.

#![allow(dead_code)]

use ghrecon::{AppError, ClientSettings, Credential, GitHubClient, RawResponse, Request, Transport};
use reqwest::StatusCode;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use url::Url;

/// One canned response.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub body: String,
    pub next: Option<String>,
}

impl Reply {
    pub fn json(value: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body: value.to_string(),
            next: None,
        }
    }

    pub fn status(status: StatusCode, value: Value) -> Self {
        Self {
            status,
            body: value.to_string(),
            next: None,
        }
    }

    pub fn empty(status: StatusCode) -> Self {
        Self {
            status,
            body: String::new(),
            next: None,
        }
    }

    pub fn with_next(mut self, url: &str) -> Self {
        self.next = Some(url.to_string());
        self
    }
}

/// Answers requests by URL path from a script, counting every call.
///
/// Each path holds a queue of replies; the last reply repeats once the queue
/// is drained. Unknown paths answer 404.
#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<HashMap<String, Vec<Reply>>>,
    log: Mutex<Vec<Request>>,
    calls: AtomicUsize,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queues a reply for a path (`/users/octocat`) or a full URL with query.
    pub fn on(&self, key: &str, reply: Reply) -> &Self {
        self.script
            .lock()
            .unwrap()
            .entry(key.to_string())
            .or_default()
            .push(reply);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<Request> {
        self.log.lock().unwrap().clone()
    }

    fn lookup(&self, url: &Url) -> Option<Reply> {
        let mut script = self.script.lock().unwrap();
        let keys = [url.as_str().to_string(), url.path().to_string()];
        for key in keys {
            if let Some(queue) = script.get_mut(&key) {
                if queue.len() > 1 {
                    return Some(queue.remove(0));
                }
                return queue.first().cloned();
            }
        }
        None
    }
}

impl Transport for ScriptedTransport {
    fn execute(&self, request: &Request) -> Result<RawResponse, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.log.lock().unwrap().push(request.clone());

        let reply = self.lookup(&request.url).unwrap_or_else(|| {
            Reply::status(StatusCode::NOT_FOUND, serde_json::json!({"message": "Not Found"}))
        });
        Ok(RawResponse {
            status: reply.status,
            body: reply.body,
            next: reply.next.map(|next| Url::parse(&next).unwrap()),
        })
    }
}

pub fn client(transport: &Arc<ScriptedTransport>) -> GitHubClient {
    GitHubClient::with_transport(transport.clone(), ClientSettings::default(), None)
}

pub fn authenticated_client(transport: &Arc<ScriptedTransport>) -> GitHubClient {
    GitHubClient::with_transport(
        transport.clone(),
        ClientSettings::default(),
        Some(Credential::new("ghp_testtoken").unwrap()),
    )
}

pub fn api(path: &str) -> String {
    format!("https://api.github.com{}", path)
}
