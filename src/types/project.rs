use serde::{Deserialize, Serialize};

use crate::filters::Dimension;

/// A project the dashboard is configured to show.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

/// One entry of a per-project catalog (status, priority, severity, type).
///
/// Ids are unique within a catalog but NOT across projects: the same
/// priority id can name different things in different projects, so every
/// lookup is scoped by project id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: i64,
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub order: i64,
}

/// A project member, used for the assignee filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: i64,
    pub full_name: String,
}

/// Per-project catalogs and membership.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectMetadata {
    #[serde(default)]
    pub statuses: Vec<CatalogEntry>,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub priorities: Vec<CatalogEntry>,
    #[serde(default)]
    pub severities: Vec<CatalogEntry>,
    #[serde(default)]
    pub issue_types: Vec<CatalogEntry>,
}

impl ProjectMetadata {
    /// The catalog backing a filter dimension, if that dimension is
    /// catalog-valued (project and assignee are not).
    pub fn catalog(&self, dimension: Dimension) -> Option<&[CatalogEntry]> {
        match dimension {
            Dimension::Status => Some(&self.statuses),
            Dimension::Priority => Some(&self.priorities),
            Dimension::Severity => Some(&self.severities),
            Dimension::Type => Some(&self.issue_types),
            Dimension::Project | Dimension::Assignee => None,
        }
    }
}
