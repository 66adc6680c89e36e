//! Wire types for the Taiga v1 REST API.
//!
//! Field names mirror the API payloads; conversion into the domain types in
//! [`crate::types`] happens at the edge so the rest of the crate never sees
//! wire shapes.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::types::{CatalogEntry, Issue, Member, Project, ProjectMetadata};

#[derive(Debug, Clone, Deserialize)]
pub struct IssueStatusExtraInfo {
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub is_closed: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserExtraInfo {
    pub username: String,
    pub full_name_display: String,
    #[serde(default)]
    pub photo: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssueDto {
    pub id: i64,
    pub subject: String,
    pub project: i64,
    pub status: i64,
    #[serde(default)]
    pub status_extra_info: Option<IssueStatusExtraInfo>,
    #[serde(default)]
    pub assigned_to: Option<i64>,
    #[serde(default)]
    pub assigned_to_extra_info: Option<UserExtraInfo>,
    #[serde(default)]
    pub modified_date: Option<String>,
    #[serde(default)]
    pub priority: Option<i64>,
    #[serde(default)]
    pub severity: Option<i64>,
    #[serde(default, rename = "type")]
    pub issue_type: Option<i64>,
}

impl From<IssueDto> for Issue {
    fn from(dto: IssueDto) -> Self {
        Self {
            id: dto.id,
            subject: dto.subject,
            project: dto.project,
            status: dto.status,
            status_name: dto.status_extra_info.as_ref().map(|s| s.name.clone()),
            status_color: dto.status_extra_info.as_ref().map(|s| s.color.clone()),
            assigned_to: dto.assigned_to,
            assigned_to_name: dto
                .assigned_to_extra_info
                .as_ref()
                .map(|u| u.full_name_display.clone()),
            modified_date: dto.modified_date.as_deref().and_then(parse_timestamp),
            priority: dto.priority,
            severity: dto.severity,
            issue_type: dto.issue_type,
        }
    }
}

/// Taiga serves RFC 3339 timestamps; anything else degrades to `None`.
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntryDto {
    pub id: i64,
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub order: i64,
}

impl From<CatalogEntryDto> for CatalogEntry {
    fn from(dto: CatalogEntryDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            color: dto.color,
            order: dto.order,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemberDto {
    pub id: i64,
    pub full_name: String,
}

/// Project detail payload; the list endpoint returns a reduced shape but the
/// dashboard always loads details to get the catalogs.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectDto {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub issue_statuses: Option<Vec<CatalogEntryDto>>,
    #[serde(default)]
    pub members: Option<Vec<MemberDto>>,
    #[serde(default)]
    pub priorities: Option<Vec<CatalogEntryDto>>,
    #[serde(default)]
    pub severities: Option<Vec<CatalogEntryDto>>,
    #[serde(default)]
    pub issue_types: Option<Vec<CatalogEntryDto>>,
}

impl ProjectDto {
    /// Split the detail payload into the project row and its metadata.
    pub fn into_parts(self) -> (Project, ProjectMetadata) {
        let convert =
            |v: Option<Vec<CatalogEntryDto>>| -> Vec<CatalogEntry> {
                v.unwrap_or_default().into_iter().map(Into::into).collect()
            };
        let members = self
            .members
            .unwrap_or_default()
            .into_iter()
            .map(|m| Member {
                id: m.id,
                full_name: m.full_name,
            })
            .collect();

        let metadata = ProjectMetadata {
            statuses: convert(self.issue_statuses),
            members,
            priorities: convert(self.priorities),
            severities: convert(self.severities),
            issue_types: convert(self.issue_types),
        };
        let project = Project {
            id: self.id,
            name: self.name,
            slug: self.slug,
        };
        (project, metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_dto_maps_extra_info() {
        let json = r##"{
            "id": 123,
            "subject": "Broken layout",
            "project": 7,
            "status": 2,
            "status_extra_info": {"name": "In progress", "color": "#ff9900", "is_closed": false},
            "assigned_to": 42,
            "assigned_to_extra_info": {"username": "ada", "full_name_display": "Ada Byron"},
            "modified_date": "2026-01-02T12:00:00Z",
            "priority": 3,
            "severity": 4,
            "type": 5
        }"##;
        let dto: IssueDto = serde_json::from_str(json).expect("valid issue payload");
        let issue: Issue = dto.into();
        assert_eq!(issue.status_name.as_deref(), Some("In progress"));
        assert_eq!(issue.status_color.as_deref(), Some("#ff9900"));
        assert_eq!(issue.assigned_to_name.as_deref(), Some("Ada Byron"));
        assert_eq!(issue.issue_type, Some(5));
        assert!(issue.modified_date.is_some());
    }

    #[test]
    fn minimal_issue_dto_maps_to_none_fields() {
        let json = r#"{"id": 1, "subject": "x", "project": 1, "status": 1}"#;
        let dto: IssueDto = serde_json::from_str(json).expect("valid minimal payload");
        let issue: Issue = dto.into();
        assert!(issue.status_name.is_none());
        assert!(issue.priority.is_none());
        assert!(issue.modified_date.is_none());
    }

    #[test]
    fn bad_timestamp_degrades_to_none() {
        assert!(parse_timestamp("not-a-date").is_none());
    }
}
