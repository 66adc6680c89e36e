use tokio::sync::mpsc::UnboundedReceiver;

use super::interface::{Engine, EngineHandle, Event, Request};
use crate::types::{Issue, MetadataMap, Project};

/// A stub engine that serves pre-loaded fixture data without any network calls.
///
/// Useful for integration tests and UI demos that must not require a Taiga
/// instance.
pub struct StubEngine {
    pub projects: Vec<Project>,
    pub metadata: MetadataMap,
    pub issues: Vec<Issue>,
}

impl Engine for StubEngine {
    fn start(self) -> EngineHandle {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<Request>();
        std::thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().expect("stub tokio runtime");
            rt.block_on(self.run_loop(rx));
        });
        EngineHandle::new(tx)
    }
}

impl StubEngine {
    async fn run_loop(self, mut rx: UnboundedReceiver<Request>) {
        while let Some(req) = rx.recv().await {
            match req {
                Request::FetchProjects { reply_tx } => {
                    let _ = reply_tx.send(Event::ProjectsFetched {
                        projects: self.projects.clone(),
                        metadata: self.metadata.clone(),
                    });
                }
                Request::FetchIssues { reply_tx, .. } => {
                    let _ = reply_tx.send(Event::IssuesFetched {
                        issues: self.issues.clone(),
                    });
                }
                Request::Shutdown => break,
            }
        }
    }
}
