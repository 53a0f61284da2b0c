// src/lib.rs
//! ghrecon library for read-only reconnaissance over the GitHub REST API.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ApiCallError`, `ValidationError`
//! - **Configuration**: `CommandLineInput`, `ReconConfig`, `ClientSettings`
//! - **API client**: `GitHubClient`, `Transport`, `Pages`
//! - **Analytics**: `normalize`, `aggregate`, `Record`, `RecordKind`
//! - **Output**: `Document`, `Renderer`, text and JSON renderers

pub mod analytics;
pub mod api;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod output;
pub mod types;

// --- Error Handling ---
pub use crate::error::{ApiCallError, AppError, Result};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{ClientSettings, CommandLineInput, ReconCommand, ReconConfig, ReconTarget};

// --- Domain Types ---
pub use crate::types::{
    AnonymousContributors, CommitFilter, Credential, OrganizationRepositoryType,
    RepositorySort, RepositoryTarget, SortDirection, UserRepositoryType,
};

// --- API Client ---
pub use crate::api::{
    GitHubClient, HttpTransport, Method, Page, ParamValue, Params, Pages, RawRecord, RawResponse,
    Request, Transport,
};

// --- Analytics ---
pub use crate::analytics::{
    aggregate, normalize, normalize_pages, CommitIdentity, FieldValue, Record, RecordKind,
};

// --- Output ---
pub use crate::output::{Document, JsonRenderer, Node, OutputFormat, Renderer, TextRenderer};
