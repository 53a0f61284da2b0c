// src/analytics/schema.rs
//! Field tables and strict extraction from raw records.
//!
//! Each record kind declares an ordered list of `(raw path, human name)`
//! pairs. Raw paths may be dotted to reach into nested objects
//! (`commit.author.email`).

use super::record::{FieldValue, Record};
use crate::api::{json_kind, Page, RawRecord};
use crate::error::AppError;
use serde_json::Value;

/// The shape a raw record is normalized into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Organization,
    OrganizationRepository,
    OrganizationMember,
    Repository,
    Contributor,
    ContributorStats,
    User,
    UserOrganization,
    UserRepository,
    CommitAuthor,
}

type FieldTable = &'static [(&'static str, &'static str)];

const ORGANIZATION: FieldTable = &[
    ("name", "Organization Name"),
    ("description", "Description"),
    ("blog", "Website"),
    ("html_url", "Github URL"),
    ("created_at", "Created"),
    ("updated_at", "Last Updated"),
    ("email", "Email Address"),
    ("location", "Location"),
    ("login", "Username"),
    ("public_repos", "# of Public Repositories"),
];

const ORGANIZATION_REPOSITORY: FieldTable = &[
    ("name", "Repository Name"),
    ("description", "Description"),
    ("html_url", "Github URL"),
    ("clone_url", "Clone URL"),
    ("watchers_count", "Watchers"),
    ("stargazers_count", "Stars"),
    ("forks_count", "Forks"),
    ("created_at", "Created"),
    ("updated_at", "Last Updated"),
    ("pushed_at", "Last Pushed"),
];

const ORGANIZATION_MEMBER: FieldTable = &[
    ("login", "Username"),
    ("site_admin", "Site Administrator"),
    ("html_url", "Github URL"),
];

const REPOSITORY: FieldTable = &[
    ("name", "Repository Name"),
    ("description", "Description"),
    ("homepage", "Homepage"),
    ("html_url", "Github URL"),
    ("clone_url", "Clone URL"),
    ("created_at", "Created"),
    ("updated_at", "Last Updated"),
    ("pushed_at", "Last Pushed"),
    ("language", "Language"),
    ("forks_count", "Forks"),
    ("stargazers_count", "Stars"),
    ("watchers_count", "Watchers"),
];

const CONTRIBUTOR: FieldTable = &[("login", "Username"), ("contributions", "Contributions")];

const CONTRIBUTOR_STATS: FieldTable = &[("author.login", "Username"), ("total", "Commits")];

const USER: FieldTable = &[
    ("login", "Username"),
    ("html_url", "Github URL"),
    ("name", "Name"),
    ("company", "Company"),
    ("blog", "Blog"),
    ("location", "Location"),
    ("email", "Email Address"),
    ("created_at", "Created"),
    ("updated_at", "Updated"),
];

const USER_ORGANIZATION: FieldTable = &[("login", "Organization")];

const USER_REPOSITORY: FieldTable = &[
    ("name", "Repository Name"),
    ("description", "Description"),
    ("html_url", "Github URL"),
    ("clone_url", "Clone URL"),
];

const COMMIT_AUTHOR: FieldTable = &[
    ("commit.author.name", "Name"),
    ("commit.author.email", "Email"),
];

impl RecordKind {
    pub const ALL: [RecordKind; 10] = [
        RecordKind::Organization,
        RecordKind::OrganizationRepository,
        RecordKind::OrganizationMember,
        RecordKind::Repository,
        RecordKind::Contributor,
        RecordKind::ContributorStats,
        RecordKind::User,
        RecordKind::UserOrganization,
        RecordKind::UserRepository,
        RecordKind::CommitAuthor,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RecordKind::Organization => "organization",
            RecordKind::OrganizationRepository => "organization repository",
            RecordKind::OrganizationMember => "organization member",
            RecordKind::Repository => "repository",
            RecordKind::Contributor => "contributor",
            RecordKind::ContributorStats => "contributor stats",
            RecordKind::User => "user",
            RecordKind::UserOrganization => "user organization",
            RecordKind::UserRepository => "user repository",
            RecordKind::CommitAuthor => "commit author",
        }
    }

    /// Declared `(raw path, human name)` pairs in output order.
    pub fn fields(&self) -> FieldTable {
        match self {
            RecordKind::Organization => ORGANIZATION,
            RecordKind::OrganizationRepository => ORGANIZATION_REPOSITORY,
            RecordKind::OrganizationMember => ORGANIZATION_MEMBER,
            RecordKind::Repository => REPOSITORY,
            RecordKind::Contributor => CONTRIBUTOR,
            RecordKind::ContributorStats => CONTRIBUTOR_STATS,
            RecordKind::User => USER,
            RecordKind::UserOrganization => USER_ORGANIZATION,
            RecordKind::UserRepository => USER_REPOSITORY,
            RecordKind::CommitAuthor => COMMIT_AUTHOR,
        }
    }

    /// Human names in output order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> {
        self.fields().iter().map(|(_, human)| *human)
    }
}

/// Follows a dotted path. A `null` parent yields `null`; a missing key or a
/// non-object parent is a mismatch.
fn lookup<'r>(kind: RecordKind, raw: &'r RawRecord, path: &'static str) -> Result<&'r Value, AppError> {
    let mismatch = |reason: String| AppError::SchemaMismatch {
        record: kind.name(),
        field: path,
        reason,
    };

    let mut segments = path.split('.');
    let first = segments.next().unwrap_or(path);
    let mut current = raw
        .get(first)
        .ok_or_else(|| mismatch(format!("missing key '{}'", first)))?;

    for segment in segments {
        current = match current {
            Value::Null => return Ok(current),
            Value::Object(map) => map
                .get(segment)
                .ok_or_else(|| mismatch(format!("missing key '{}'", segment)))?,
            other => {
                return Err(mismatch(format!(
                    "expected an object above '{}', found {}",
                    segment,
                    json_kind(other)
                )))
            }
        };
    }
    Ok(current)
}

/// Maps one raw record onto its kind's declared field set.
///
/// Every declared field must be present and scalar; the result always has
/// exactly the declared keys in the declared order.
pub fn normalize(kind: RecordKind, raw: &RawRecord) -> Result<Record, AppError> {
    let fields = kind.fields();
    let mut record = Record::with_capacity(fields.len());
    for &(path, human) in fields {
        let value = lookup(kind, raw, path)?;
        let value = FieldValue::from_json(value).ok_or_else(|| AppError::SchemaMismatch {
            record: kind.name(),
            field: path,
            reason: format!("expected a scalar, found {}", json_kind(value)),
        })?;
        record.insert(human, value);
    }
    Ok(record)
}

/// Normalizes a list of raw records, keeping their order.
pub fn normalize_all<'r>(
    kind: RecordKind,
    raws: impl IntoIterator<Item = &'r RawRecord>,
) -> Result<Vec<Record>, AppError> {
    raws.into_iter().map(|raw| normalize(kind, raw)).collect()
}

/// Flattens every page into one sequence in platform order.
///
/// Pages are pulled one at a time; the first failure stops iteration.
pub fn normalize_pages<I>(kind: RecordKind, pages: I) -> Result<Vec<Record>, AppError>
where
    I: IntoIterator<Item = Result<Page, AppError>>,
{
    let mut records = Vec::new();
    for page in pages {
        let page = page?;
        records.reserve(page.records.len());
        for raw in &page.records {
            records.push(normalize(kind, raw)?);
        }
    }
    log::debug!("Normalized {} {} records", records.len(), kind.name());
    Ok(records)
}
