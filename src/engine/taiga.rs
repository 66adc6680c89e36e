use std::time::Duration;

use secrecy::Secret;
use tokio::sync::mpsc::UnboundedReceiver;

use super::interface::{Engine, EngineHandle, Event, Request};
use crate::taiga::client::{TaigaClient, filters_to_query};
use crate::types::{Issue, MetadataMap, Project};

/// Issue-list cache entries stay valid for this long unless a refresh is
/// forced.
const ISSUE_CACHE_TTL: Duration = Duration::from_secs(120);

/// Engine backed by a live Taiga instance.
///
/// Runs on a dedicated OS thread owning its own Tokio runtime; the UI talks
/// to it exclusively through the request channel.
pub struct TaigaEngine {
    client: TaigaClient,
    token: Secret<String>,
    project_ids: Vec<i64>,
}

impl TaigaEngine {
    pub fn new(client: TaigaClient, token: Secret<String>, project_ids: Vec<i64>) -> Self {
        Self {
            client,
            token,
            project_ids,
        }
    }
}

impl Engine for TaigaEngine {
    fn start(self) -> EngineHandle {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<Request>();
        std::thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().expect("engine tokio runtime");
            rt.block_on(self.run_loop(rx));
        });
        EngineHandle::new(tx)
    }
}

impl TaigaEngine {
    async fn run_loop(self, mut rx: UnboundedReceiver<Request>) {
        let issue_cache: moka::future::Cache<String, Vec<Issue>> = moka::future::Cache::builder()
            .max_capacity(64)
            .time_to_live(ISSUE_CACHE_TTL)
            .build();

        while let Some(req) = rx.recv().await {
            match req {
                Request::FetchProjects { reply_tx } => {
                    let mut projects: Vec<Project> = Vec::new();
                    let mut metadata = MetadataMap::new();
                    let mut failure: Option<String> = None;

                    for &project_id in &self.project_ids {
                        match self.client.get_project(&self.token, project_id).await {
                            Ok(dto) => {
                                let (project, meta) = dto.into_parts();
                                metadata.insert(project.id, meta);
                                projects.push(project);
                            }
                            Err(e) => {
                                tracing::warn!(project_id, error = %e, "project fetch failed");
                                failure = Some(e.to_string());
                            }
                        }
                    }

                    // Partial data is still useful; report the last failure
                    // alongside whatever loaded.
                    if let Some(message) = failure {
                        let _ = reply_tx.send(Event::FetchError {
                            context: "projects".to_owned(),
                            message,
                        });
                    }
                    let _ = reply_tx.send(Event::ProjectsFetched { projects, metadata });
                }
                Request::FetchIssues {
                    filters,
                    force,
                    reply_tx,
                } => {
                    let cache_key = serde_json::to_string(&filters.normalized())
                        .unwrap_or_else(|_| String::from("{}"));

                    if !force && let Some(issues) = issue_cache.get(&cache_key).await {
                        let _ = reply_tx.send(Event::IssuesFetched { issues });
                        continue;
                    }

                    let query = filters_to_query(&filters, &self.project_ids);
                    match self.client.list_issues(&self.token, &query).await {
                        Ok(dtos) => {
                            let issues: Vec<Issue> = dtos.into_iter().map(Into::into).collect();
                            issue_cache.insert(cache_key, issues.clone()).await;
                            let _ = reply_tx.send(Event::IssuesFetched { issues });
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "issue fetch failed");
                            let _ = reply_tx.send(Event::FetchError {
                                context: "issues".to_owned(),
                                message: e.to_string(),
                            });
                        }
                    }
                }
                Request::Shutdown => break,
            }
        }
    }
}
