// src/lib.rs
// =============================================================================
// link-harvester: a bounded-depth, concurrency-limited web crawler.
//
// Given a seed URL it follows hyperlinks for a fixed number of hops and
// returns every link it discovered. Optionally it also saves each visited
// page and downloads the stylesheets, scripts and images those pages use.
//
// Module map:
// - config:    CrawlJob, the immutable parameters of one run
// - crawl:     normalizer, page fetcher, extractor, frontier, scheduler
// - download:  resource downloader with its retry policy
// - storage:   deterministic URL -> file path mapping and atomic writes
// - transport: the HTTP seam (reqwest in production)
// - engine:    the entry points front-ends call
// - logging:   tracing subscriber setup for the binary
// =============================================================================

pub mod config;
pub mod crawl;
pub mod download;
pub mod engine;
pub mod error;
pub mod logging;
pub mod storage;
pub mod transport;

#[cfg(test)]
mod testing;

pub use config::CrawlJob;
pub use crawl::{CrawlResult, Crawler};
pub use download::DownloadOutcome;
pub use engine::{crawl, run_crawl};
pub use error::CrawlError;
pub use storage::ResourceKind;
