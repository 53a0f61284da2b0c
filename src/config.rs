// src/config.rs
use crate::constants::{
    API_URL_ENV_VAR, GITHUB_API_BASE_URL, GITHUB_API_MEDIA_TYPE, GITHUB_API_PAGE_SIZE,
    RATE_LIMIT_DOCUMENTATION_URL, TOKEN_ENV_VAR, USER_AGENT,
};
use crate::error::AppError;
use crate::output::OutputFormat;
use crate::types::{Credential, RepositoryTarget, ValidationError};
use clap::{Parser, Subcommand};
use url::Url;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about = "A GitHub organization reconnaissance tool.", long_about = None)]
pub struct CommandLineInput {
    /// OAuth2 token for authentication (defaults to $GITHUB_TOKEN)
    #[arg(short = 'o', long = "oauth2-token")]
    pub oauth2_token: Option<String>,

    /// Verbose output: list every ranked item and log at debug level
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Number of parallel lookup workers (for applicable commands)
    #[arg(short, long)]
    pub processes: Option<usize>,

    /// Show results in this format
    #[arg(short = 't', long = "output", value_enum, default_value_t = OutputFormat::Stdout)]
    pub output: OutputFormat,

    /// GitHub API origin (defaults to $GITHUB_API_URL, then https://api.github.com)
    #[arg(long = "api-url")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: ReconCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ReconCommand {
    /// Report on a GitHub organization
    Organization {
        /// Github organization name
        name: String,
    },
    /// Report on a GitHub repository
    Repository {
        /// Github repository owner
        owner: String,
        /// Github repository name
        name: String,
    },
    /// Report on a GitHub user
    User {
        /// Github user name
        name: String,
    },
}

/// Settings fixed for the lifetime of one client.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    /// API origin every endpoint path is resolved against.
    pub base_url: Url,
    pub media_type: String,
    pub user_agent: String,
    /// Documentation URL that marks a 403 as rate limiting.
    pub rate_limit_documentation_url: String,
    /// `per_page` sent with the first request of every list endpoint.
    pub page_size: u32,
}

impl ClientSettings {
    /// Settings pointing at a different API origin (e.g. GitHub Enterprise).
    pub fn with_base_url(base_url: &str) -> Result<Self, AppError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            ..Self::default()
        })
    }

    /// Resolves endpoint path segments such as `["users", "octocat"]` against
    /// the origin.
    ///
    /// Each segment is percent-encoded on its own, so a `/`, `?` or `#` inside
    /// a name stays inside that segment. Empty, `.` and `..` segments are
    /// rejected.
    pub fn endpoint_url(&self, segments: &[&str]) -> Result<Url, AppError> {
        if let Some(segment) = segments
            .iter()
            .find(|segment| matches!(**segment, "" | "." | ".."))
        {
            return Err(ValidationError::InvalidPathSegment(segment.to_string()).into());
        }

        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|_| AppError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: "API origin cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: Url::parse(GITHUB_API_BASE_URL)
                .unwrap_or_else(|e| unreachable!("default API origin is valid: {}", e)),
            media_type: GITHUB_API_MEDIA_TYPE.to_string(),
            user_agent: USER_AGENT.to_string(),
            rate_limit_documentation_url: RATE_LIMIT_DOCUMENTATION_URL.to_string(),
            page_size: GITHUB_API_PAGE_SIZE,
        }
    }
}

fn parse_base_url(input: &str) -> Result<Url, AppError> {
    let url = Url::parse(input.trim()).map_err(|e| ValidationError::InvalidUrl {
        url: input.to_string(),
        reason: e.to_string(),
    })?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ValidationError::InvalidUrl {
            url: input.to_string(),
            reason: "only http and https are supported".to_string(),
        }
        .into());
    }
    Ok(url)
}

/// What the user asked for, validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconTarget {
    Organization(String),
    Repository(RepositoryTarget),
    User(String),
}

/// Resolved configuration, validated and ready to drive a report.
#[derive(Debug, Clone)]
pub struct ReconConfig {
    pub target: ReconTarget,
    pub credential: Option<Credential>,
    pub settings: ClientSettings,
    pub output: OutputFormat,
    pub verbose: bool,
    /// `None` means sequential lookups.
    pub workers: Option<usize>,
}

impl ReconConfig {
    /// Resolves a complete configuration from CLI input and environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        Self::resolve_with_env(cli, |key| std::env::var(key).ok())
    }

    /// Same as [`ReconConfig::resolve`] with an injectable environment lookup.
    pub fn resolve_with_env(
        cli: CommandLineInput,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let credential = cli
            .oauth2_token
            .or_else(|| env(TOKEN_ENV_VAR))
            .filter(|token| !token.trim().is_empty())
            .map(Credential::new)
            .transpose()?;

        let settings = match cli.api_url.or_else(|| env(API_URL_ENV_VAR)) {
            Some(url) if !url.trim().is_empty() => ClientSettings::with_base_url(&url)?,
            _ => ClientSettings::default(),
        };

        let target = match cli.command {
            ReconCommand::Organization { name } => ReconTarget::Organization(non_empty(name, "organization name")?),
            ReconCommand::Repository { owner, name } => {
                ReconTarget::Repository(RepositoryTarget::new(owner, name)?)
            }
            ReconCommand::User { name } => ReconTarget::User(non_empty(name, "user name")?),
        };

        Ok(ReconConfig {
            target,
            credential,
            settings,
            output: cli.output,
            verbose: cli.verbose,
            workers: cli.processes.filter(|&workers| workers > 0),
        })
    }
}

fn non_empty(value: String, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}
