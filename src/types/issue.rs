use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A Taiga issue as shown in the dashboard table.
///
/// `status_name`/`status_color` are denormalized onto the issue by the API
/// (`status_extra_info`), so status badges never need a metadata lookup.
/// `priority`/`severity`/`issue_type` are references into the owning
/// project's catalogs and must be resolved through [`crate::metadata`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub id: i64,
    pub subject: String,
    /// Owning project id; catalog references below are scoped to it.
    pub project: i64,
    pub status: i64,
    #[serde(default)]
    pub status_name: Option<String>,
    #[serde(default)]
    pub status_color: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<i64>,
    #[serde(default)]
    pub assigned_to_name: Option<String>,
    #[serde(default)]
    pub modified_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: Option<i64>,
    #[serde(default)]
    pub severity: Option<i64>,
    #[serde(default)]
    pub issue_type: Option<i64>,
}
