// src/api/endpoints.rs
//! One entry point per GitHub resource.
//!
//! Enumerated parameters are validated and authentication is checked before
//! anything is handed to the transport. Single-resource endpoints return the
//! decoded record with its status; list endpoints return a lazy [`Pages`].
//! Names are passed as whole path segments and never spliced into a path.

use super::client::GitHubClient;
use super::pagination::Pages;
use super::types::{record_from_json, records_from_json, Method, Params, RawRecord};
use crate::error::AppError;
use crate::types::{
    parse_optional, AnonymousContributors, CommitFilter, OrganizationRepositoryType,
    RepositorySort, SortDirection, UserRepositoryType,
};
use reqwest::StatusCode;

impl GitHubClient {
    fn single(&self, endpoint: &[&str]) -> Result<(RawRecord, StatusCode), AppError> {
        let (value, status) = self.json_call(Method::Get, endpoint, Params::new())?;
        Ok((record_from_json(value)?, status))
    }

    /// https://docs.github.com/rest/users/users#get-a-user
    pub fn get_user(&self, username: &str) -> Result<(RawRecord, StatusCode), AppError> {
        self.single(&["users", username])
    }

    /// Organizations of the authenticated user.
    pub fn get_users_organizations(&self) -> Result<(Vec<RawRecord>, StatusCode), AppError> {
        self.require_credential("get_users_organizations")?;
        let (value, status) = self.json_call(Method::Get, &["user", "orgs"], Params::new())?;
        Ok((records_from_json(value)?, status))
    }

    pub fn get_users_public_organizations(&self, username: &str) -> Result<Pages<'_>, AppError> {
        self.paginated_call(Method::Get, &["users", username, "orgs"], Params::new())
    }

    /// Public repositories of a user, optionally filtered and ordered.
    ///
    /// `repository_type`, `sort` and `direction` must come from their
    /// respective value sets; `None` leaves the platform default.
    pub fn get_users_public_repositories(
        &self,
        username: &str,
        repository_type: Option<&str>,
        sort: Option<&str>,
        direction: Option<&str>,
    ) -> Result<Pages<'_>, AppError> {
        let repository_type = parse_optional(repository_type, UserRepositoryType::parse)?;
        let sort = parse_optional(sort, RepositorySort::parse)?;
        let direction = parse_optional(direction, SortDirection::parse)?;

        let mut params = Params::new();
        if let Some(repository_type) = repository_type {
            params.insert("type".to_string(), repository_type.as_str().into());
        }
        if let Some(sort) = sort {
            params.insert("sort".to_string(), sort.as_str().into());
        }
        if let Some(direction) = direction {
            params.insert("direction".to_string(), direction.as_str().into());
        }

        self.paginated_call(Method::Get, &["users", username, "repos"], params)
    }

    pub fn get_public_organization(
        &self,
        organization: &str,
    ) -> Result<(RawRecord, StatusCode), AppError> {
        self.single(&["orgs", organization])
    }

    /// Same resource as [`GitHubClient::get_public_organization`], but only
    /// meaningful to an authenticated owner, who sees private fields too.
    pub fn get_organization(&self, organization: &str) -> Result<(RawRecord, StatusCode), AppError> {
        self.require_credential("get_organization")?;
        self.get_public_organization(organization)
    }

    pub fn get_organizations_public_repositories(
        &self,
        organization: &str,
        repository_type: Option<&str>,
    ) -> Result<Pages<'_>, AppError> {
        let repository_type = parse_optional(repository_type, OrganizationRepositoryType::parse)?;

        let mut params = Params::new();
        if let Some(repository_type) = repository_type {
            params.insert("type".to_string(), repository_type.as_str().into());
        }

        self.paginated_call(Method::Get, &["orgs", organization, "repos"], params)
    }

    pub fn get_organizations_public_members(&self, organization: &str) -> Result<Pages<'_>, AppError> {
        self.paginated_call(
            Method::Get,
            &["orgs", organization, "public_members"],
            Params::new(),
        )
    }

    pub fn get_public_repository(
        &self,
        owner: &str,
        repository: &str,
    ) -> Result<(RawRecord, StatusCode), AppError> {
        self.single(&["repos", owner, repository])
    }

    /// Contributors ordered by commit count. `anon` is `1` or `true`.
    pub fn get_repository_contributors(
        &self,
        owner: &str,
        repository: &str,
        anon: Option<&str>,
    ) -> Result<Pages<'_>, AppError> {
        let anon = parse_optional(anon, AnonymousContributors::parse)?;

        let mut params = Params::new();
        if let Some(anon) = anon {
            params.insert("anon".to_string(), anon.as_str().into());
        }

        self.paginated_call(
            Method::Get,
            &["repos", owner, repository, "contributors"],
            params,
        )
    }

    /// Per-contributor commit statistics.
    ///
    /// GitHub answers `202 Accepted` while it computes the statistics; that
    /// response is returned as an empty list with its status.
    pub fn get_repository_contributor_stats(
        &self,
        owner: &str,
        repository: &str,
    ) -> Result<(Vec<RawRecord>, StatusCode), AppError> {
        let (value, status) = self.json_call(
            Method::Get,
            &["repos", owner, repository, "stats", "contributors"],
            Params::new(),
        )?;
        if status == StatusCode::ACCEPTED {
            log::info!("Contributor statistics for {}/{} are still being computed", owner, repository);
            return Ok((Vec::new(), status));
        }
        Ok((records_from_json(value)?, status))
    }

    pub fn get_repository_commits(
        &self,
        owner: &str,
        repository: &str,
        filter: &CommitFilter,
    ) -> Result<Pages<'_>, AppError> {
        let params = filter
            .entries()
            .map(|(key, value)| (key.to_string(), value.into()))
            .collect::<Params>();

        self.paginated_call(
            Method::Get,
            &["repos", owner, repository, "commits"],
            params,
        )
    }
}
