// src/api/mod.rs
//! GitHub API access: transport, client core, pagination and endpoints.
//!
//! Business logic depends on [`GitHubClient`]; HTTP details stay behind the
//! [`Transport`] trait so tests can script responses.

mod client;
mod endpoints;
mod pagination;
mod transport;
mod types;

pub use client::GitHubClient;
pub use pagination::Pages;
pub use transport::{next_link, HttpTransport, Transport};
pub use types::{
    json_kind, record_from_json, records_from_json, Method, Page, ParamValue, Params, RawRecord,
    RawResponse, Request,
};
