use taiga_board::filters::Dimension;
use taiga_board::labels::ResolvedLabels;
use taiga_board::metadata::{options, resolve, summarize};
use taiga_board::types::{CatalogEntry, Issue, MetadataMap, ProjectMetadata};

fn entry(id: i64, name: &str, color: &str) -> CatalogEntry {
    CatalogEntry {
        id,
        name: name.to_owned(),
        color: color.to_owned(),
        order: 0,
    }
}

fn issue(project: i64, priority: Option<i64>) -> Issue {
    Issue {
        id: 1,
        subject: "Login fails on refresh".to_owned(),
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

// metadata = {1: {priorities: [{id: 5, name: "High", color: "#f00"}], ...}},
// issue {project: 1, priority: 5} → resolve = that entry.
#[test]
fn resolve_returns_matching_catalog_entry() {
    let mut metadata = MetadataMap::new();
    metadata.insert(
        1,
        ProjectMetadata {
            priorities: vec![entry(5, "High", "#f00")],
            ..ProjectMetadata::default()
        },
    );

    let resolved = resolve(&issue(1, Some(5)), Dimension::Priority, &metadata).unwrap();
    assert_eq!(resolved.id, 5);
    assert_eq!(resolved.name, "High");
    assert_eq!(resolved.color, "#f00");
}

#[test]
fn resolve_returns_none_without_reference_field() {
    let mut metadata = MetadataMap::new();
    metadata.insert(1, ProjectMetadata::default());
    assert!(resolve(&issue(1, None), Dimension::Priority, &metadata).is_none());
}

#[test]
fn resolve_returns_none_without_project_metadata() {
    let metadata = MetadataMap::new();
    assert!(resolve(&issue(1, Some(5)), Dimension::Priority, &metadata).is_none());
}

#[test]
fn resolve_returns_none_for_unknown_id() {
    let mut metadata = MetadataMap::new();
    metadata.insert(
        1,
        ProjectMetadata {
            priorities: vec![entry(5, "High", "#f00")],
            ..ProjectMetadata::default()
        },
    );
    assert!(resolve(&issue(1, Some(99)), Dimension::Priority, &metadata).is_none());
}

// Project 1 id 5 "High", project 2 id 6 "High" → one distinct name.
#[test]
fn summarize_shared_name_across_projects() {
    let labels = ResolvedLabels::default();
    let mut metadata = MetadataMap::new();
    metadata.insert(
        1,
        ProjectMetadata {
            priorities: vec![entry(5, "High", "#f00")],
            ..ProjectMetadata::default()
        },
    );
    metadata.insert(
        2,
        ProjectMetadata {
            priorities: vec![entry(6, "High", "#f60")],
            ..ProjectMetadata::default()
        },
    );

    assert_eq!(
        summarize(Dimension::Priority, &[5, 6], &metadata, &labels),
        "High"
    );
}

// Same selection, but project 2's id 6 is "Low" → the multiple placeholder.
#[test]
fn summarize_divergent_names_across_projects() {
    let labels = ResolvedLabels::default();
    let mut metadata = MetadataMap::new();
    metadata.insert(
        1,
        ProjectMetadata {
            priorities: vec![entry(5, "High", "#f00")],
            ..ProjectMetadata::default()
        },
    );
    metadata.insert(
        2,
        ProjectMetadata {
            priorities: vec![entry(6, "Low", "#0f0")],
            ..ProjectMetadata::default()
        },
    );

    assert_eq!(
        summarize(Dimension::Priority, &[5, 6], &metadata, &labels),
        labels.multiple
    );
    // Permuting the selection never changes the result.
    assert_eq!(
        summarize(Dimension::Priority, &[6, 5], &metadata, &labels),
        labels.multiple
    );
}

#[test]
fn summarize_never_returns_empty_for_nonempty_selection() {
    let labels = ResolvedLabels::default();
    let metadata = MetadataMap::new();
    let value = summarize(Dimension::Severity, &[42], &metadata, &labels);
    assert_eq!(value, labels.multiple);
    assert!(!value.is_empty());
}

#[test]
fn options_span_all_projects() {
    let mut metadata = MetadataMap::new();
    metadata.insert(
        1,
        ProjectMetadata {
            issue_types: vec![entry(1, "Bug", "#f00")],
            ..ProjectMetadata::default()
        },
    );
    metadata.insert(
        2,
        ProjectMetadata {
            issue_types: vec![entry(2, "Enhancement", "#0f0")],
            ..ProjectMetadata::default()
        },
    );

    let opts = options(Dimension::Type, &metadata, &[]);
    let names: Vec<&str> = opts.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, vec!["Bug", "Enhancement"]);
    assert!(opts.iter().all(|o| o.color.is_some()));
}
