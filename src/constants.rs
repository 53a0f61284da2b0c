// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role.

// ---------------------------------------------------------------------------
// GitHub API boundaries
// ---------------------------------------------------------------------------

/// Public GitHub REST API origin.
pub const GITHUB_API_BASE_URL: &str = "https://api.github.com";

/// Media type pinning the v3 REST API.
///
/// https://developer.github.com/v3/media/#request-specific-version
pub const GITHUB_API_MEDIA_TYPE: &str = "application/vnd.github.v3+json";

/// GitHub rejects requests without a user agent.
pub const USER_AGENT: &str = concat!("ghrecon/", env!("CARGO_PKG_VERSION"));

/// Documentation link GitHub attaches to rate-limited 403 responses.
pub const RATE_LIMIT_DOCUMENTATION_URL: &str = "https://developer.github.com/v3/#rate-limiting";

/// How many records GitHub returns per page of a list endpoint.
///
/// The API maximum is 100. We use the maximum to minimize round-trips.
pub const GITHUB_API_PAGE_SIZE: u32 = 100;

// ---------------------------------------------------------------------------
// Fan-out boundaries
// ---------------------------------------------------------------------------

/// Upper bound on lookup workers regardless of what the caller asks for.
pub const MAX_LOOKUP_WORKERS: usize = 32;

// ---------------------------------------------------------------------------
// Report boundaries
// ---------------------------------------------------------------------------

/// How many ranked items a report lists when not in verbose mode.
pub const CONCISE_COUNT: usize = 5;

/// Spaces added per nesting level in text output.
pub const INDENT_SPACES: usize = 2;

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// Environment variable consulted when no token flag is given.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Environment variable consulted when no API URL flag is given.
pub const API_URL_ENV_VAR: &str = "GITHUB_API_URL";

/// File name of the debug log written to the temp directory.
pub const LOG_FILE_NAME: &str = "ghrecon.log";
