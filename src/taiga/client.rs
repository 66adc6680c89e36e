use reqwest::StatusCode;
use secrecy::{ExposeSecret, Secret};
use url::Url;

use super::TaigaError;
use super::types::{IssueDto, ProjectDto};
use crate::filters::{Dimension, Filters};

const API_V1_PREFIX: &str = "api/v1/";

/// Thin client for the Taiga v1 REST API.
///
/// Owns a connection pool; cheap to clone. All calls are bearer-authed and
/// return wire DTOs — domain mapping happens in the engine.
#[derive(Debug, Clone)]
pub struct TaigaClient {
    client: reqwest::Client,
    api_base_url: Url,
}

impl TaigaClient {
    /// Build a client for the given instance base URL (e.g.
    /// `https://tree.taiga.io/`).
    ///
    /// # Errors
    ///
    /// Returns `TaigaError::Url` when the base URL cannot be parsed.
    pub fn new(base_url: &str) -> Result<Self, TaigaError> {
        // A base URL without a trailing slash would swallow its last path
        // segment in joins.
        let normalized = if base_url.ends_with('/') {
            base_url.to_owned()
        } else {
            format!("{base_url}/")
        };
        Ok(Self {
            client: reqwest::Client::new(),
            api_base_url: Url::parse(&normalized)?,
        })
    }

    fn build_url(&self, path: &str) -> Result<Url, TaigaError> {
        let full_path = format!("{API_V1_PREFIX}{path}");
        self.api_base_url.join(&full_path).map_err(Into::into)
    }

    /// Fetch one project's detail payload (including its catalogs).
    pub async fn get_project(
        &self,
        token: &Secret<String>,
        project_id: i64,
    ) -> Result<ProjectDto, TaigaError> {
        let url = self.build_url(&format!("projects/{project_id}"))?;
        tracing::debug!(%url, "fetching project detail");

        let response = self
            .client
            .get(url)
            .bearer_auth(token.expose_secret())
            .send()
            .await?;

        check_status(response.status(), "projects")?;
        Ok(response.json::<ProjectDto>().await?)
    }

    /// List issues matching the given query parameters.
    pub async fn list_issues(
        &self,
        token: &Secret<String>,
        query: &[(String, String)],
    ) -> Result<Vec<IssueDto>, TaigaError> {
        let url = self.build_url("issues")?;
        tracing::debug!(%url, params = query.len(), "fetching issues");

        let response = self
            .client
            .get(url)
            .query(query)
            .bearer_auth(token.expose_secret())
            .send()
            .await?;

        check_status(response.status(), "issues")?;
        Ok(response.json::<Vec<IssueDto>>().await?)
    }
}

fn check_status(status: StatusCode, context: &str) -> Result<(), TaigaError> {
    if status.is_success() {
        return Ok(());
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(TaigaError::Unauthorized(status));
    }
    Err(TaigaError::Status {
        status,
        context: context.to_owned(),
    })
}

// ---------------------------------------------------------------------------
// Filters → query parameters
// ---------------------------------------------------------------------------

/// Translate a `Filters` snapshot into Taiga list-issues query parameters.
///
/// Each active dimension contributes one comma-joined parameter, prefixed
/// with `exclude_` when the dimension is in exclude mode. When no project
/// filter is active the query is pinned to the configured project ids so
/// the dashboard never pulls the whole instance.
pub fn filters_to_query(filters: &Filters, configured_projects: &[i64]) -> Vec<(String, String)> {
    let filters = filters.normalized();
    let mut query = Vec::new();

    for dimension in Dimension::ALL {
        let param = match dimension {
            Dimension::Project => "project",
            Dimension::Status => "status",
            Dimension::Assignee => "assigned_to",
            Dimension::Priority => "priority",
            Dimension::Severity => "severity",
            Dimension::Type => "type",
        };
        match filters.ids(dimension) {
            Some(ids) if !ids.is_empty() => {
                let name = if filters.exclude(dimension) {
                    format!("exclude_{param}")
                } else {
                    param.to_owned()
                };
                query.push((name, join_ids(ids)));
            }
            _ if dimension == Dimension::Project && !configured_projects.is_empty() => {
                query.push(("project".to_owned(), join_ids(configured_projects)));
            }
            _ => {}
        }
    }

    query
}

fn join_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
