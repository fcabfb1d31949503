// src/download/mod.rs
// =============================================================================
// This module downloads the stylesheets, scripts and images a crawl found.
//
// It runs once, after the traversal has finished:
// - Up to `max_workers` downloads are in flight at the same time
// - Each resource gets a fixed number of attempts (3 unless configured)
// - An attempt only counts if the server answers exactly 200 and the bytes
//   make it to disk
// - A resource that never succeeds is logged and reported as Failed, the
//   rest of the batch carries on
//
// Rust concepts:
// - Streams: an async iterator; buffer_unordered() polls several at once
// - Enums with data: DownloadOutcome carries different fields per variant
// =============================================================================

mod retry;

pub use retry::{Backoff, RetryPolicy};

use crate::crawl::ResourceTask;
use crate::error::{DownloadError, FetchError};
use crate::storage::{ResourceKind, Storage};
use crate::transport::Transport;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{error, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DownloadOutcome {
    Saved {
        url: String,
        kind: ResourceKind,
        path: PathBuf,
    },
    Failed {
        url: String,
        kind: ResourceKind,
        attempts: u32,
    },
}

impl DownloadOutcome {
    pub fn url(&self) -> &str {
        match self {
            DownloadOutcome::Saved { url, .. } | DownloadOutcome::Failed { url, .. } => url,
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, DownloadOutcome::Saved { .. })
    }
}

// Downloads every task and returns one outcome per task.
// Outcomes come back in completion order, not task order.
pub async fn download_all(
    transport: &dyn Transport,
    storage: &Storage,
    tasks: Vec<ResourceTask>,
    max_workers: usize,
    policy: RetryPolicy,
) -> Vec<DownloadOutcome> {
    let total = tasks.len();
    info!(total, workers = max_workers, "downloading resources");

    let outcomes: Vec<DownloadOutcome> = stream::iter(tasks)
        .map(|task| download_one(transport, storage, task, policy))
        .buffer_unordered(max_workers.max(1))
        .collect()
        .await;

    let saved = outcomes.iter().filter(|o| o.is_saved()).count();
    info!(saved, failed = total - saved, "downloads finished");

    outcomes
}

async fn download_one(
    transport: &dyn Transport,
    storage: &Storage,
    task: ResourceTask,
    policy: RetryPolicy,
) -> DownloadOutcome {
    let mut attempt = 1;

    loop {
        match try_download(transport, storage, &task).await {
            Ok(path) => {
                return DownloadOutcome::Saved {
                    url: task.url,
                    kind: task.kind,
                    path,
                };
            }
            Err(e) => {
                warn!(url = %task.url, attempt, "error downloading {}: {}", task.kind, e);
            }
        }

        match policy.delay_before_retry(attempt) {
            Some(delay) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                attempt += 1;
            }
            None => break,
        }
    }

    error!(url = %task.url, "failed after {} attempts", attempt);
    DownloadOutcome::Failed {
        url: task.url,
        kind: task.kind,
        attempts: attempt,
    }
}

async fn try_download(
    transport: &dyn Transport,
    storage: &Storage,
    task: &ResourceTask,
) -> Result<PathBuf, DownloadError> {
    let response = transport.get(&task.url).await?;

    if response.status != 200 {
        return Err(FetchError::Status(response.status).into());
    }

    Ok(storage.save(&task.url, &response.body, task.kind).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeWeb;

    fn task(url: &str, kind: ResourceKind) -> ResourceTask {
        ResourceTask {
            url: url.to_string(),
            kind,
        }
    }

    #[tokio::test]
    async fn test_always_failing_resource_is_tried_three_times() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path());
        let url = "https://example.com/broken.css";
        let web = FakeWeb::new().respond(url, 500, b"oops");

        let outcomes = download_all(
            &web,
            &storage,
            vec![task(url, ResourceKind::Stylesheet)],
            2,
            RetryPolicy::default(),
        )
        .await;

        assert_eq!(web.hits(url), 3);
        assert_eq!(
            outcomes,
            vec![DownloadOutcome::Failed {
                url: url.to_string(),
                kind: ResourceKind::Stylesheet,
                attempts: 3,
            }]
        );
        // Nothing was written, not even the kind directory
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_other_tasks() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path());
        let web = FakeWeb::new()
            .respond("https://example.com/a.js", 200, b"a()")
            .respond("https://example.com/b.png", 404, b"")
            .respond("https://example.com/c.css", 200, b"body{}");

        let outcomes = download_all(
            &web,
            &storage,
            vec![
                task("https://example.com/a.js", ResourceKind::Script),
                task("https://example.com/b.png", ResourceKind::Image),
                task("https://example.com/c.css", ResourceKind::Stylesheet),
            ],
            2,
            RetryPolicy::default(),
        )
        .await;

        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes.iter().filter(|o| o.is_saved()).count(), 2);
        assert_eq!(web.hits("https://example.com/a.js"), 1);
        assert_eq!(web.hits("https://example.com/b.png"), 3);
        assert!(dir.path().join("js/example.com_a.js").exists());
        assert!(dir.path().join("css/example.com_c.css").exists());
    }

    #[tokio::test]
    async fn test_success_on_retry() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path());
        let url = "https://example.com/logo.gif";
        let web = FakeWeb::new().respond(url, 200, b"GIF89a").fail_first(url, 2);

        let outcomes = download_all(
            &web,
            &storage,
            vec![task(url, ResourceKind::Image)],
            1,
            RetryPolicy::default(),
        )
        .await;

        assert_eq!(web.hits(url), 3);
        let expected = dir.path().join("images/example.com_logo.gif");
        assert_eq!(
            outcomes,
            vec![DownloadOutcome::Saved {
                url: url.to_string(),
                kind: ResourceKind::Image,
                path: expected.clone(),
            }]
        );
        assert_eq!(std::fs::read(expected).unwrap(), b"GIF89a");
    }

    #[tokio::test]
    async fn test_configured_attempts_are_honoured() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path());
        let url = "https://example.com/x.js";
        let web = FakeWeb::new().respond(url, 502, b"");

        let outcomes = download_all(
            &web,
            &storage,
            vec![task(url, ResourceKind::Script)],
            1,
            RetryPolicy::new(5),
        )
        .await;

        assert_eq!(web.hits(url), 5);
        assert!(matches!(
            outcomes[0],
            DownloadOutcome::Failed { attempts: 5, .. }
        ));
    }

    #[tokio::test]
    async fn test_non_200_success_codes_are_failures() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path());
        let url = "https://example.com/empty.css";
        let web = FakeWeb::new().respond(url, 204, b"");

        let outcomes = download_all(
            &web,
            &storage,
            vec![task(url, ResourceKind::Stylesheet)],
            1,
            RetryPolicy::default(),
        )
        .await;

        assert!(!outcomes[0].is_saved());
        assert_eq!(web.hits(url), 3);
    }

    #[tokio::test]
    async fn test_worker_pool_is_bounded() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path());
        let mut web = FakeWeb::new();
        let mut tasks = Vec::new();
        for i in 0..8 {
            let url = format!("https://example.com/{}.js", i);
            web = web.respond(&url, 200, b"x");
            tasks.push(task(&url, ResourceKind::Script));
        }

        let outcomes = download_all(&web, &storage, tasks, 3, RetryPolicy::default()).await;

        assert_eq!(outcomes.len(), 8);
        assert!(web.peak_in_flight() <= 3);
    }
}
