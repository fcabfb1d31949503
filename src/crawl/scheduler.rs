// src/crawl/scheduler.rs
// =============================================================================
// This module drives a crawl from the seed URL to the final link list.
//
// How it works:
// 1. Start with the seed URL in the frontier
// 2. Take up to `max_concurrency` URLs off the front of the queue
// 3. Fetch and parse all of them at the same time, and wait for every one
//    of them to finish (one "level")
// 4. Feed the new links back into the frontier and the result list
// 5. Repeat `max_depth` times, or until the queue runs dry
// 6. If resource downloading is on, download everything collected on the way
//
// The fetches of one level never touch the frontier themselves. They hand
// their links back, and only this loop, between levels, updates the queue,
// the seen set and the results. That keeps the bookkeeping lock-free.
//
// Rust concepts:
// - join_all: run several futures concurrently and wait for all of them
// - Arc<dyn Transport>: shared ownership of "any transport"
// =============================================================================

use super::extract::{extract, Extracted, ResourceTask};
use super::fetch::fetch_page;
use super::frontier::Frontier;
use crate::config::CrawlJob;
use crate::download::{download_all, DownloadOutcome, RetryPolicy};
use crate::storage::{ResourceKind, Storage};
use crate::transport::Transport;
use futures::future::join_all;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, info};

// Where a crawl run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlPhase {
    Idle,
    Running { level: usize },
    Downloading,
    Done,
}

// What a finished crawl hands back to the caller
#[derive(Debug, Default, Clone, Serialize)]
pub struct CrawlResult {
    /// Every discovered link, in discovery order, without duplicates
    pub links: Vec<String>,
    /// Pages that were fetched successfully
    pub pages_fetched: usize,
    /// Pages whose fetch failed (they contribute no links)
    pub pages_failed: usize,
    /// One entry per resource, empty when downloading is off
    pub downloads: Vec<DownloadOutcome>,
}

pub struct Crawler {
    job: CrawlJob,
    transport: Arc<dyn Transport>,
    storage: Storage,
}

impl Crawler {
    pub fn new(job: CrawlJob, transport: Arc<dyn Transport>) -> Self {
        let storage = Storage::new(job.output_dir());
        Self {
            job,
            transport,
            storage,
        }
    }

    pub fn job(&self) -> &CrawlJob {
        &self.job
    }

    // Runs the whole crawl, download phase included.
    // Never fails: broken pages and resources only show up as gaps in the result.
    pub async fn run(&self) -> CrawlResult {
        let mut phase = CrawlPhase::Idle;
        let mut frontier = Frontier::new(self.job.seed_url());
        let mut result = CrawlResult::default();

        // Resources from all pages, in the order pages reported them
        let mut resources: Vec<ResourceTask> = Vec::new();
        let mut queued_resources: HashSet<ResourceTask> = HashSet::new();

        info!(
            seed = self.job.seed_url(),
            depth = self.job.max_depth(),
            concurrency = self.job.max_concurrency(),
            "starting crawl"
        );

        for level in 0..self.job.max_depth() {
            if frontier.is_empty() {
                debug!(level, "frontier exhausted");
                break;
            }
            self.enter(&mut phase, CrawlPhase::Running { level });

            let batch = frontier.next_batch(self.job.max_concurrency());

            // Barrier: the next level is only formed once all of these are done
            let pages = join_all(batch.iter().map(|url| self.visit(url))).await;

            let mut fetched = 0;
            let mut new_links = 0;
            for page in pages {
                let page = match page {
                    Some(page) => page,
                    None => {
                        result.pages_failed += 1;
                        continue;
                    }
                };
                result.pages_fetched += 1;
                fetched += 1;

                for link in page.links {
                    if frontier.push(link.clone()) {
                        result.links.push(link);
                        new_links += 1;
                    }
                }

                for task in page.resources {
                    if queued_resources.insert(task.clone()) {
                        resources.push(task);
                    }
                }
            }

            info!(
                level,
                dispatched = batch.len(),
                fetched,
                new_links,
                pending = frontier.pending(),
                "level complete"
            );
        }

        if self.job.download_resources() {
            self.enter(&mut phase, CrawlPhase::Downloading);
            result.downloads = download_all(
                self.transport.as_ref(),
                &self.storage,
                resources,
                self.job.max_concurrency(),
                RetryPolicy::new(self.job.max_attempts()),
            )
            .await;
        }

        self.enter(&mut phase, CrawlPhase::Done);
        info!(
            links = result.links.len(),
            pages = result.pages_fetched,
            failed = result.pages_failed,
            "crawl finished"
        );

        result
    }

    // Fetches one page and extracts what it links to.
    // None means the page could not be fetched; the reason is already logged.
    async fn visit(&self, url: &str) -> Option<Extracted> {
        let html = fetch_page(self.transport.as_ref(), url).await?;
        let want_resources = self.job.download_resources();

        if want_resources {
            if let Err(e) = self.storage.save(url, html.as_bytes(), ResourceKind::Html).await {
                error!(url, "error saving page: {}", e);
            }
        }

        Some(extract(&html, url, want_resources))
    }

    fn enter(&self, phase: &mut CrawlPhase, next: CrawlPhase) {
        debug!(from = ?phase, to = ?next, "crawl phase");
        *phase = next;
    }
}
