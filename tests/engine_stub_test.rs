use std::time::Duration;

use taiga_board::engine::{Engine, Event, Request, StubEngine};
use taiga_board::filters::{Dimension, Filters};
use taiga_board::types::{CatalogEntry, Issue, MetadataMap, Project, ProjectMetadata};

fn load_fixture_issues() -> Vec<Issue> {
    let json = include_str!("fixtures/stub_issues.json");
    serde_json::from_str(json).expect("valid stub_issues.json fixture")
}

fn load_fixture_projects() -> Vec<Project> {
    let json = include_str!("fixtures/stub_projects.json");
    serde_json::from_str(json).expect("valid stub_projects.json fixture")
}

fn fixture_metadata() -> MetadataMap {
    let mut metadata = MetadataMap::new();
    metadata.insert(
        1,
        ProjectMetadata {
            priorities: vec![CatalogEntry {
                id: 5,
                name: "High".to_owned(),
                color: "#ff3333".to_owned(),
                order: 1,
            }],
            ..ProjectMetadata::default()
        },
    );
    metadata
}

#[test]
fn stub_engine_fetch_issues_returns_fixture_data() {
    let issues = load_fixture_issues();
    assert_eq!(issues.len(), 2, "fixture should have exactly two issues");

    let stub = StubEngine {
        projects: vec![],
        metadata: MetadataMap::new(),
        issues: issues.clone(),
    };

    let handle = stub.start();
    let (tx, rx) = std::sync::mpsc::channel::<Event>();

    handle.send(Request::FetchIssues {
        filters: Filters::default().apply(Dimension::Priority, vec![5], false),
        force: false,
        reply_tx: tx,
    });

    let event = rx
        .recv_timeout(Duration::from_secs(2))
        .expect("engine should reply within 2 seconds");

    match event {
        Event::IssuesFetched {
            issues: fetched_issues,
        } => {
            assert_eq!(fetched_issues.len(), issues.len());
            assert_eq!(fetched_issues[0].id, 101);
            assert_eq!(
                fetched_issues[0].subject,
                "Dashboard widgets overlap on narrow screens"
            );
            assert_eq!(fetched_issues[1].priority, Some(6));
            assert!(fetched_issues[1].severity.is_none());
        }
        _other => panic!("expected IssuesFetched, got a different event variant"),
    }
}

#[test]
fn stub_engine_fetch_projects_returns_metadata() {
    let stub = StubEngine {
        projects: load_fixture_projects(),
        metadata: fixture_metadata(),
        issues: vec![],
    };

    let handle = stub.start();
    let (tx, rx) = std::sync::mpsc::channel::<Event>();

    handle.send(Request::FetchProjects { reply_tx: tx });

    let event = rx
        .recv_timeout(Duration::from_secs(2))
        .expect("engine should reply within 2 seconds");

    match event {
        Event::ProjectsFetched { projects, metadata } => {
            assert_eq!(projects.len(), 2);
            assert_eq!(projects[0].name, "Larch");
            let meta = metadata.get(&1).expect("project 1 metadata");
            assert_eq!(meta.priorities[0].name, "High");
        }
        _other => panic!("expected ProjectsFetched, got a different event variant"),
    }
}
