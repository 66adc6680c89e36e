use std::sync::mpsc::Sender;

use crate::filters::Filters;
use crate::types::{Issue, MetadataMap, Project};

/// Handle to the backend engine held by the UI layer.
///
/// Cheaply cloneable. When the last handle is dropped the sender channel
/// closes, signalling the engine to shut down.
#[derive(Clone)]
pub struct EngineHandle {
    tx: tokio::sync::mpsc::UnboundedSender<Request>,
}

impl EngineHandle {
    pub(super) fn new(tx: tokio::sync::mpsc::UnboundedSender<Request>) -> Self {
        Self { tx }
    }

    /// Send a request to the engine. Non-blocking — returns immediately.
    pub fn send(&self, req: Request) {
        // Ignore errors: if the receiver is gone the engine has already shut down.
        let _ = self.tx.send(req);
    }
}

/// Trait implemented by both `TaigaEngine` and `StubEngine`.
pub trait Engine: Send + 'static {
    fn start(self) -> EngineHandle;
}

/// All operations the UI layer can send to the engine.
pub enum Request {
    /// Fetch the configured projects and their metadata catalogs.
    FetchProjects { reply_tx: Sender<Event> },
    /// Fetch the issue list for the given filter snapshot.
    FetchIssues {
        filters: Filters,
        /// Skip the cache and fetch fresh data from the API.
        force: bool,
        reply_tx: Sender<Event>,
    },
    Shutdown,
}

/// All events the engine can push back to the UI.
pub enum Event {
    ProjectsFetched {
        projects: Vec<Project>,
        metadata: MetadataMap,
    },
    IssuesFetched {
        issues: Vec<Issue>,
    },
    /// Unified error event for all fetch failures.
    FetchError {
        context: String,
        message: String,
    },
}
