// src/analytics/mod.rs
//! Normalized views over GitHub resources.
//!
//! Each function pulls one resource (or every page of a list), normalizes it
//! into its record kind, and hands back records whose keys never depend on
//! raw platform field names.

mod fanout;
mod record;
mod schema;

pub use fanout::aggregate;
pub use record::{FieldValue, Record};
pub use schema::{normalize, normalize_all, normalize_pages, RecordKind};

use crate::api::GitHubClient;
use crate::error::AppError;
use crate::types::{CommitFilter, RepositoryTarget};
use std::collections::BTreeSet;
use std::fmt;

/// A commit author as recorded in git, not as a GitHub account.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CommitIdentity {
    pub name: String,
    pub email: String,
}

impl CommitIdentity {
    fn from_record(record: &Record) -> Self {
        Self {
            name: record.text("Name"),
            email: record.text("Email"),
        }
    }
}

impl fmt::Display for CommitIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

pub fn organization_information(client: &GitHubClient, organization: &str) -> Result<Record, AppError> {
    let (raw, _) = client.get_public_organization(organization)?;
    normalize(RecordKind::Organization, &raw)
}

pub fn organization_repositories(
    client: &GitHubClient,
    organization: &str,
) -> Result<Vec<Record>, AppError> {
    let pages = client.get_organizations_public_repositories(organization, None)?;
    normalize_pages(RecordKind::OrganizationRepository, pages)
}

pub fn organization_members(client: &GitHubClient, organization: &str) -> Result<Vec<Record>, AppError> {
    let pages = client.get_organizations_public_members(organization)?;
    normalize_pages(RecordKind::OrganizationMember, pages)
}

pub fn repository_information(
    client: &GitHubClient,
    target: &RepositoryTarget,
) -> Result<Record, AppError> {
    let (raw, _) = client.get_public_repository(&target.owner, &target.name)?;
    normalize(RecordKind::Repository, &raw)
}

pub fn repository_contributors(
    client: &GitHubClient,
    target: &RepositoryTarget,
) -> Result<Vec<Record>, AppError> {
    let pages = client.get_repository_contributors(&target.owner, &target.name, None)?;
    normalize_pages(RecordKind::Contributor, pages)
}

/// Commit totals per contributor. Empty while GitHub is still computing them.
pub fn repository_contributor_stats(
    client: &GitHubClient,
    target: &RepositoryTarget,
) -> Result<Vec<Record>, AppError> {
    let (raws, _) = client.get_repository_contributor_stats(&target.owner, &target.name)?;
    normalize_all(RecordKind::ContributorStats, &raws)
}

pub fn user_information(client: &GitHubClient, username: &str) -> Result<Record, AppError> {
    let (raw, _) = client.get_user(username)?;
    normalize(RecordKind::User, &raw)
}

pub fn user_organizations(client: &GitHubClient, username: &str) -> Result<Vec<Record>, AppError> {
    let pages = client.get_users_public_organizations(username)?;
    normalize_pages(RecordKind::UserOrganization, pages)
}

pub fn user_repositories(client: &GitHubClient, username: &str) -> Result<Vec<Record>, AppError> {
    let pages = client.get_users_public_repositories(username, None, None, None)?;
    normalize_pages(RecordKind::UserRepository, pages)
}

/// Distinct commit author identities in one repository.
pub fn repository_commit_identities(
    client: &GitHubClient,
    target: &RepositoryTarget,
    filter: &CommitFilter,
) -> Result<BTreeSet<CommitIdentity>, AppError> {
    let pages = client.get_repository_commits(&target.owner, &target.name, filter)?;
    let records = normalize_pages(RecordKind::CommitAuthor, pages)?;
    Ok(records.iter().map(CommitIdentity::from_record).collect())
}

/// Commit identities a user authored across the given repositories.
///
/// Empty repositories are skipped; any other failure aborts the lookup.
pub fn user_commit_identities(
    client: &GitHubClient,
    username: &str,
    repositories: &[RepositoryTarget],
    workers: Option<usize>,
) -> Result<BTreeSet<CommitIdentity>, AppError> {
    let filter = CommitFilter::by_author(username);
    aggregate(
        repositories,
        |target| repository_commit_identities(client, target, &filter),
        workers,
    )
}
