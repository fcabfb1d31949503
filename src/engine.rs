// src/engine.rs
// =============================================================================
// Entry points for front-ends.
//
// crawl() is for callers that already run inside tokio (like our CLI).
// run_crawl() is for everyone else: it starts its own runtime and blocks
// until the whole run, download phase included, is over.
// =============================================================================

use crate::config::CrawlJob;
use crate::crawl::{CrawlResult, Crawler};
use crate::error::CrawlError;
use crate::transport::HttpTransport;
use std::sync::Arc;

// Crawls over real HTTP. Only fails if the HTTP client can't be built.
pub async fn crawl(job: &CrawlJob) -> Result<CrawlResult, CrawlError> {
    let transport = Arc::new(HttpTransport::new()?);
    let crawler = Crawler::new(job.clone(), transport);
    Ok(crawler.run().await)
}

// Blocking version of crawl(). Must not be called from inside a tokio runtime.
pub fn run_crawl(job: &CrawlJob) -> Result<CrawlResult, CrawlError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(crawl(job))
}
