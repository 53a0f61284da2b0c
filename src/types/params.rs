//! Enumerated query parameters accepted by list endpoints.
//!
//! Callers hand these over as plain strings; each type parses its string form
//! and rejects anything outside its value set with
//! [`AppError::InvalidArgument`] so that no request is ever sent with a value
//! the platform would reject.

use crate::error::AppError;

fn invalid(parameter: &'static str, value: &str, allowed: &'static [&'static str]) -> AppError {
    AppError::InvalidArgument {
        parameter,
        value: value.to_string(),
        allowed,
    }
}

/// Parses an optional caller-supplied value, keeping `None` as "not set".
pub fn parse_optional<T>(
    value: Option<&str>,
    parse: impl FnOnce(&str) -> Result<T, AppError>,
) -> Result<Option<T>, AppError> {
    value.map(parse).transpose()
}

/// Which of a user's repositories to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRepositoryType {
    All,
    Owner,
    Member,
}

impl UserRepositoryType {
    pub const ALLOWED: &'static [&'static str] = &["all", "owner", "member"];

    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value {
            "all" => Ok(Self::All),
            "owner" => Ok(Self::Owner),
            "member" => Ok(Self::Member),
            other => Err(invalid("type", other, Self::ALLOWED)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Owner => "owner",
            Self::Member => "member",
        }
    }
}

/// Which of an organization's repositories to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrganizationRepositoryType {
    All,
    Public,
    Private,
    Forks,
    Sources,
    Member,
}

impl OrganizationRepositoryType {
    pub const ALLOWED: &'static [&'static str] =
        &["all", "public", "private", "forks", "sources", "member"];

    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value {
            "all" => Ok(Self::All),
            "public" => Ok(Self::Public),
            "private" => Ok(Self::Private),
            "forks" => Ok(Self::Forks),
            "sources" => Ok(Self::Sources),
            "member" => Ok(Self::Member),
            other => Err(invalid("type", other, Self::ALLOWED)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Public => "public",
            Self::Private => "private",
            Self::Forks => "forks",
            Self::Sources => "sources",
            Self::Member => "member",
        }
    }
}

/// Sort key for repository listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositorySort {
    Created,
    Updated,
    Pushed,
    FullName,
}

impl RepositorySort {
    pub const ALLOWED: &'static [&'static str] = &["created", "updated", "pushed", "full_name"];

    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value {
            "created" => Ok(Self::Created),
            "updated" => Ok(Self::Updated),
            "pushed" => Ok(Self::Pushed),
            "full_name" => Ok(Self::FullName),
            other => Err(invalid("sort", other, Self::ALLOWED)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Pushed => "pushed",
            Self::FullName => "full_name",
        }
    }
}

/// Sort direction for repository listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub const ALLOWED: &'static [&'static str] = &["asc", "desc"];

    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(invalid("direction", other, Self::ALLOWED)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Whether contributor listings include anonymous contributors.
///
/// GitHub accepts `1` or `true`; the original spelling is kept so the request
/// carries exactly what the caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnonymousContributors {
    One,
    True,
}

impl AnonymousContributors {
    pub const ALLOWED: &'static [&'static str] = &["1", "true"];

    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value {
            "1" => Ok(Self::One),
            "true" => Ok(Self::True),
            other => Err(invalid("anon", other, Self::ALLOWED)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::One => "1",
            Self::True => "true",
        }
    }
}

/// Optional filters for the commit listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitFilter {
    pub sha: Option<String>,
    pub path: Option<String>,
    pub author: Option<String>,
    pub since: Option<String>,
    pub until: Option<String>,
}

impl CommitFilter {
    /// Filter on commits authored by the given login or email.
    pub fn by_author(author: impl Into<String>) -> Self {
        Self {
            author: Some(author.into()),
            ..Self::default()
        }
    }

    /// Non-empty filters in request order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        [
            ("sha", &self.sha),
            ("path", &self.path),
            ("author", &self.author),
            ("since", &self.since),
            ("until", &self.until),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .as_deref()
                .filter(|value| !value.is_empty())
                .map(|value| (key, value))
        })
    }
}
