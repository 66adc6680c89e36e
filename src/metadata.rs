//! Project-scoped metadata resolution.
//!
//! Catalog ids are only meaningful within their own project, so every lookup
//! here takes the full metadata map and scopes by project id. Missing or
//! stale references are a normal, renderable state: lookups return `None`
//! (or a placeholder label) and never fail.

use std::collections::BTreeSet;

use crate::filters::Dimension;
use crate::labels::ResolvedLabels;
use crate::types::{CatalogEntry, Issue, MetadataMap, Project};

// ---------------------------------------------------------------------------
// Per-issue reference resolution
// ---------------------------------------------------------------------------

/// Resolve an issue's priority/severity/type reference to the catalog entry
/// of the issue's own project.
///
/// Returns `None` when the issue lacks the reference field, when no metadata
/// is loaded for the issue's project, or when the id matches no entry —
/// callers render a placeholder in all three cases.
pub fn resolve<'a>(
    issue: &Issue,
    dimension: Dimension,
    metadata: &'a MetadataMap,
) -> Option<&'a CatalogEntry> {
    let reference = match dimension {
        Dimension::Priority => issue.priority,
        Dimension::Severity => issue.severity,
        Dimension::Type => issue.issue_type,
        // Status is denormalized onto the issue; project/assignee are not
        // catalog references at all.
        _ => None,
    }?;
    let meta = metadata.get(&issue.project)?;
    meta.catalog(dimension)?.iter().find(|e| e.id == reference)
}

// ---------------------------------------------------------------------------
// Chip summarization
// ---------------------------------------------------------------------------

/// Reduce a multi-select to a single chip value.
///
/// Walks every loaded project's catalog for the dimension and collects the
/// distinct names matching the selected ids (a set — the same name from two
/// projects counts once). Exactly one distinct name yields that name; zero
/// or several yield the "multiple" placeholder. An empty selection yields
/// the empty string (no chip is shown).
pub fn summarize(
    dimension: Dimension,
    selected_ids: &[i64],
    metadata: &MetadataMap,
    labels: &ResolvedLabels,
) -> String {
    if selected_ids.is_empty() {
        return String::new();
    }

    let mut names = BTreeSet::new();
    for meta in metadata.values() {
        match dimension {
            Dimension::Assignee => {
                for member in &meta.members {
                    if selected_ids.contains(&member.id) {
                        names.insert(member.full_name.clone());
                    }
                }
            }
            _ => {
                if let Some(catalog) = meta.catalog(dimension) {
                    for entry in catalog {
                        if selected_ids.contains(&entry.id) {
                            names.insert(entry.name.clone());
                        }
                    }
                }
            }
        }
    }

    single_or_multiple(names, labels)
}

/// Chip value for the project dimension, which resolves against the project
/// list rather than per-project metadata.
pub fn summarize_projects(
    selected_ids: &[i64],
    projects: &[Project],
    labels: &ResolvedLabels,
) -> String {
    if selected_ids.is_empty() {
        return String::new();
    }

    let names: BTreeSet<String> = projects
        .iter()
        .filter(|p| selected_ids.contains(&p.id))
        .map(|p| p.name.clone())
        .collect();

    single_or_multiple(names, labels)
}

fn single_or_multiple(names: BTreeSet<String>, labels: &ResolvedLabels) -> String {
    let mut iter = names.into_iter();
    match (iter.next(), iter.next()) {
        (Some(name), None) => name,
        _ => labels.multiple.clone(),
    }
}

// ---------------------------------------------------------------------------
// Dropdown options
// ---------------------------------------------------------------------------

/// One selectable row of a filter dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub id: i64,
    pub name: String,
    /// Catalog color, when the dimension has one.
    pub color: Option<String>,
}

/// Collect the selectable options for a dimension across all loaded
/// projects. Duplicate ids keep their first occurrence; catalog options are
/// ordered by (`order`, `id`), assignees by name.
pub fn options(
    dimension: Dimension,
    metadata: &MetadataMap,
    projects: &[Project],
) -> Vec<FilterOption> {
    match dimension {
        Dimension::Project => projects
            .iter()
            .map(|p| FilterOption {
                id: p.id,
                name: p.name.clone(),
                color: None,
            })
            .collect(),
        Dimension::Assignee => {
            let mut seen = BTreeSet::new();
            let mut opts: Vec<FilterOption> = metadata
                .values()
                .flat_map(|meta| meta.members.iter())
                .filter(|member| seen.insert(member.id))
                .map(|member| FilterOption {
                    id: member.id,
                    name: member.full_name.clone(),
                    color: None,
                })
                .collect();
            opts.sort_by(|a, b| a.name.cmp(&b.name));
            opts
        }
        _ => {
            let mut seen = BTreeSet::new();
            let mut entries: Vec<&CatalogEntry> = metadata
                .values()
                .filter_map(|meta| meta.catalog(dimension))
                .flatten()
                .filter(|entry| seen.insert(entry.id))
                .collect();
            entries.sort_by_key(|e| (e.order, e.id));
            entries
                .into_iter()
                .map(|entry| FilterOption {
                    id: entry.id,
                    name: entry.name.clone(),
                    color: Some(entry.color.clone()),
                })
                .collect()
        }
    }
}

/// Display name of a project, falling back to `"Project {id}"` for ids not
/// in the loaded project list.
pub fn project_name(projects: &[Project], id: i64) -> String {
    projects
        .iter()
        .find(|p| p.id == id)
        .map_or_else(|| format!("Project {id}"), |p| p.name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Member, ProjectMetadata};

    fn entry(id: i64, name: &str, color: &str, order: i64) -> CatalogEntry {
        CatalogEntry {
            id,
            name: name.to_owned(),
            color: color.to_owned(),
            order,
        }
    }

    fn metadata_two_projects() -> MetadataMap {
        let mut metadata = MetadataMap::new();
        metadata.insert(
            1,
            ProjectMetadata {
                priorities: vec![entry(5, "High", "#f00", 1), entry(6, "Low", "#0f0", 2)],
                severities: vec![entry(10, "Minor", "#aaa", 1)],
                members: vec![Member {
                    id: 100,
                    full_name: "Ada Byron".to_owned(),
                }],
                ..ProjectMetadata::default()
            },
        );
        metadata.insert(
            2,
            ProjectMetadata {
                priorities: vec![entry(7, "High", "#f55", 1)],
                ..ProjectMetadata::default()
            },
        );
        metadata
    }

    fn issue_with_priority(project: i64, priority: Option<i64>) -> Issue {
        Issue {
            id: 1,
            subject: "Broken build".to_owned(),
            project,
            status: 1,
            status_name: None,
            status_color: None,
            assigned_to: None,
            assigned_to_name: None,
            modified_date: None,
            priority,
            severity: None,
            issue_type: None,
        }
    }

    #[test]
    fn resolve_finds_entry_in_own_project() {
        let metadata = metadata_two_projects();
        let issue = issue_with_priority(1, Some(5));
        let entry = resolve(&issue, Dimension::Priority, &metadata).expect("resolved");
        assert_eq!(entry.name, "High");
        assert_eq!(entry.color, "#f00");
    }

    #[test]
    fn resolve_is_scoped_by_project() {
        let metadata = metadata_two_projects();
        // Id 7 exists only in project 2's catalog.
        let issue = issue_with_priority(1, Some(7));
        assert!(resolve(&issue, Dimension::Priority, &metadata).is_none());
    }

    #[test]
    fn resolve_missing_reference_or_project_is_none() {
        let metadata = metadata_two_projects();
        assert!(resolve(&issue_with_priority(1, None), Dimension::Priority, &metadata).is_none());
        assert!(
            resolve(&issue_with_priority(99, Some(5)), Dimension::Priority, &metadata).is_none()
        );
    }

    #[test]
    fn summarize_single_shared_name() {
        let metadata = metadata_two_projects();
        let labels = ResolvedLabels::default();
        // 5 (project 1) and 7 (project 2) are both named "High".
        let value = summarize(Dimension::Priority, &[5, 7], &metadata, &labels);
        assert_eq!(value, "High");
    }

    #[test]
    fn summarize_distinct_names_is_multiple() {
        let metadata = metadata_two_projects();
        let labels = ResolvedLabels::default();
        let value = summarize(Dimension::Priority, &[5, 6], &metadata, &labels);
        assert_eq!(value, labels.multiple);
    }

    #[test]
    fn summarize_unresolved_ids_is_multiple_not_empty() {
        let metadata = metadata_two_projects();
        let labels = ResolvedLabels::default();
        let value = summarize(Dimension::Priority, &[999], &metadata, &labels);
        assert_eq!(value, labels.multiple);
    }

    #[test]
    fn summarize_empty_selection_is_empty() {
        let metadata = metadata_two_projects();
        let labels = ResolvedLabels::default();
        assert_eq!(summarize(Dimension::Priority, &[], &metadata, &labels), "");
    }

    #[test]
    fn summarize_is_order_independent() {
        let metadata = metadata_two_projects();
        let labels = ResolvedLabels::default();
        let a = summarize(Dimension::Priority, &[5, 6], &metadata, &labels);
        let b = summarize(Dimension::Priority, &[6, 5], &metadata, &labels);
        assert_eq!(a, b);
    }

    #[test]
    fn summarize_assignee_uses_members() {
        let metadata = metadata_two_projects();
        let labels = ResolvedLabels::default();
        let value = summarize(Dimension::Assignee, &[100], &metadata, &labels);
        assert_eq!(value, "Ada Byron");
    }

    #[test]
    fn options_dedup_by_id_and_sort_by_order() {
        let metadata = metadata_two_projects();
        let opts = options(Dimension::Priority, &metadata, &[]);
        let ids: Vec<i64> = opts.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![5, 7, 6]);
    }

    #[test]
    fn project_name_falls_back_to_id() {
        let projects = vec![Project {
            id: 1,
            name: "Larch".to_owned(),
            slug: "larch".to_owned(),
        }];
        assert_eq!(project_name(&projects, 1), "Larch");
        assert_eq!(project_name(&projects, 9), "Project 9");
    }
}
