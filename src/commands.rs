// src/commands.rs
//! The three reports: organization, repository, and user.
//!
//! Each report renders its documents as soon as they are ready, so a failure
//! part-way through still leaves the earlier sections on screen.

use crate::analytics::{self, Record};
use crate::api::GitHubClient;
use crate::config::{ReconConfig, ReconTarget};
use crate::constants::CONCISE_COUNT;
use crate::error::AppError;
use crate::output::{keyed_section, record_document, single, Node, Renderer};
use crate::types::RepositoryTarget;
use std::cmp::Reverse;

/// Options shared by every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// List every ranked item instead of the top few.
    pub verbose: bool,
    /// Fan-out workers for per-repository lookups; `None` is sequential.
    pub workers: Option<usize>,
}

impl ReportOptions {
    fn limit(&self, available: usize) -> usize {
        if self.verbose {
            available
        } else {
            available.min(CONCISE_COUNT)
        }
    }
}

/// Runs the report the configuration asks for.
pub fn run(config: &ReconConfig, client: &GitHubClient, renderer: &mut dyn Renderer) -> Result<(), AppError> {
    let options = ReportOptions {
        verbose: config.verbose,
        workers: config.workers,
    };
    match &config.target {
        ReconTarget::Organization(name) => organization(client, renderer, name, options),
        ReconTarget::Repository(target) => repository(client, renderer, target, options),
        ReconTarget::User(name) => user(client, renderer, name, options),
    }
}

fn popularity(repository: &Record) -> i64 {
    ["Watchers", "Stars", "Forks"]
        .iter()
        .filter_map(|field| repository.get(field).and_then(|value| value.as_i64()))
        .sum()
}

/// Organization profile, public members (site admins first), and the most
/// popular public repositories.
pub fn organization(
    client: &GitHubClient,
    renderer: &mut dyn Renderer,
    name: &str,
    options: ReportOptions,
) -> Result<(), AppError> {
    let info = analytics::organization_information(client, name)?;
    renderer.render(&record_document(&info))?;

    let mut members = analytics::organization_members(client, name)?;
    members.sort_by_key(|member| {
        Reverse(
            member
                .get("Site Administrator")
                .and_then(|value| value.as_bool())
                .unwrap_or(false),
        )
    });
    let shown = options.limit(members.len());
    renderer.render(&keyed_section("Public Members", &members[..shown], "Username"))?;

    let mut repositories = analytics::organization_repositories(client, name)?;
    repositories.sort_by_key(|repository| Reverse(popularity(repository)));
    let shown = options.limit(repositories.len());
    renderer.render(&keyed_section(
        "Public Repositories",
        &repositories[..shown],
        "Repository Name",
    ))?;

    Ok(())
}

/// Repository profile, contributors, and commit totals per contributor.
pub fn repository(
    client: &GitHubClient,
    renderer: &mut dyn Renderer,
    target: &RepositoryTarget,
    options: ReportOptions,
) -> Result<(), AppError> {
    let info = analytics::repository_information(client, target)?;
    renderer.render(&record_document(&info))?;

    let contributors = analytics::repository_contributors(client, target)?;
    let shown = options.limit(contributors.len());
    renderer.render(&keyed_section("Contributors", &contributors[..shown], "Username"))?;

    let mut stats = analytics::repository_contributor_stats(client, target)?;
    stats.sort_by_key(|entry| {
        Reverse(entry.get("Commits").and_then(|value| value.as_i64()).unwrap_or(0))
    });
    let shown = options.limit(stats.len());
    renderer.render(&keyed_section("Commit Totals", &stats[..shown], "Username"))?;

    Ok(())
}

/// User profile, organizations, repositories, and the commit identities the
/// user authored across all of their repositories.
pub fn user(
    client: &GitHubClient,
    renderer: &mut dyn Renderer,
    name: &str,
    options: ReportOptions,
) -> Result<(), AppError> {
    let info = analytics::user_information(client, name)?;
    renderer.render(&record_document(&info))?;

    let organizations = analytics::user_organizations(client, name)?;
    let shown = options.limit(organizations.len());
    renderer.render(&keyed_section(
        "Organizations",
        &organizations[..shown],
        "Organization",
    ))?;

    let repositories = analytics::user_repositories(client, name)?;
    let shown = options.limit(repositories.len());
    renderer.render(&keyed_section(
        "Repositories",
        &repositories[..shown],
        "Repository Name",
    ))?;

    let targets = repositories
        .iter()
        .map(|repository| RepositoryTarget::new(name, repository.text("Repository Name")))
        .collect::<Result<Vec<_>, _>>()?;
    let identities = analytics::user_commit_identities(client, name, &targets, options.workers)?;
    log::info!(
        "Found {} commit identities across {} repositories",
        identities.len(),
        targets.len()
    );
    renderer.render(&single(
        "Emails",
        Node::List(identities.iter().map(ToString::to_string).collect()),
    ))?;

    Ok(())
}

/// Turns rate limiting and missing resources into report documents.
///
/// Returns the error back when it needs no special guidance.
pub fn report_failure(error: AppError, renderer: &mut dyn Renderer) -> Result<(), AppError> {
    let Some(api_error) = error.as_api_call() else {
        return Err(error);
    };

    if api_error.rate_limited() {
        renderer.render(&single(
            "Error",
            "Your API requests are being rate-limited. \
             Please include an OAuth2 token and read the following:",
        ))?;
        renderer.render(&single("Rate Limiting", api_error.rate_limit_url()))?;
        Ok(())
    } else if api_error.not_found() {
        renderer.render(&single(
            "Error",
            "The requested resource was not found or private. \
             Please confirm that it exists.",
        ))?;
        Ok(())
    } else {
        Err(error)
    }
}
