// src/api/client.rs
//! The GitHub API client core.
//!
//! `GitHubClient` owns the transport, the optional credential, and the
//! settings for its whole lifetime. Every call goes through [`GitHubClient::call`],
//! which is the single place the success predicate and failure classification
//! live.

use super::pagination::Pages;
use super::transport::{HttpTransport, Transport};
use super::types::{Method, Params, RawResponse, Request};
use crate::config::ClientSettings;
use crate::error::{ApiCallError, AppError};
use crate::types::Credential;
use reqwest::StatusCode;
use serde_json::Value;
use std::sync::Arc;
use url::Url;

/// A read-only GitHub REST client.
///
/// The client is `Sync`; fan-out workers share it by reference.
#[derive(Clone)]
pub struct GitHubClient {
    transport: Arc<dyn Transport>,
    credential: Option<Credential>,
    settings: ClientSettings,
}

impl GitHubClient {
    /// Creates a client talking HTTP to the configured origin.
    pub fn new(settings: ClientSettings, credential: Option<Credential>) -> Result<Self, AppError> {
        let transport = HttpTransport::new(&settings)?;
        Ok(Self::with_transport(Arc::new(transport), settings, credential))
    }

    /// Creates a client over an arbitrary transport.
    pub fn with_transport(
        transport: Arc<dyn Transport>,
        settings: ClientSettings,
        credential: Option<Credential>,
    ) -> Self {
        Self {
            transport,
            credential,
            settings,
        }
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Fails with `AuthenticationRequired` unless a credential is configured.
    pub(crate) fn require_credential(&self, endpoint: &'static str) -> Result<(), AppError> {
        if self.credential.is_none() {
            log::debug!("Refusing to call {} without a credential", endpoint);
            return Err(AppError::AuthenticationRequired { endpoint });
        }
        Ok(())
    }

    /// Performs one request against an absolute URL.
    ///
    /// Any 2xx status is success. Everything else becomes an
    /// [`ApiCallError`] carrying the decoded failure payload.
    pub fn call(&self, method: Method, url: Url, params: Params) -> Result<RawResponse, AppError> {
        let request = Request {
            method,
            url,
            params,
            credential: self.credential.clone(),
        };
        let response = self.transport.execute(&request)?;

        if response.status.is_success() {
            return Ok(response);
        }

        let error = ApiCallError::from_body(
            response.status,
            &response.body,
            &self.settings.rate_limit_documentation_url,
        );
        log::debug!("{} {} failed: {}", method, request.url, error);
        Err(error.into())
    }

    /// Performs one request against an endpoint and decodes the JSON body.
    ///
    /// `endpoint` is the list of path segments, e.g. `["users", username]`.
    pub fn json_call(
        &self,
        method: Method,
        endpoint: &[&str],
        params: Params,
    ) -> Result<(Value, StatusCode), AppError> {
        let url = self.settings.endpoint_url(endpoint)?;
        let response = self.call(method, url, params)?;
        Ok((response.json()?, response.status))
    }

    /// Returns a lazy sequence of pages for a list endpoint.
    ///
    /// Nothing is sent until the first page is pulled.
    pub fn paginated_call(
        &self,
        method: Method,
        endpoint: &[&str],
        mut params: Params,
    ) -> Result<Pages<'_>, AppError> {
        let url = self.settings.endpoint_url(endpoint)?;
        params
            .entry("per_page".to_string())
            .or_insert_with(|| self.settings.page_size.into());
        Ok(Pages::new(self, method, url, params))
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("base_url", &self.settings.base_url.as_str())
            .field("credential", &self.credential)
            .finish()
    }
}
