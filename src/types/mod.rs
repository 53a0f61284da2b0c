//! Domain types shared by the API and aggregation layers.

use thiserror::Error;

mod credential;
mod params;
mod target;

pub use credential::*;
pub use params::*;
pub use target::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid credential: {reason}")]
    InvalidCredential { reason: String },

    #[error("Empty required field: {0}")]
    EmptyField(&'static str),

    #[error("Invalid repository target {input:?}: {reason}")]
    InvalidTarget { input: String, reason: String },

    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid path segment {0:?}")]
    InvalidPathSegment(String),
}
