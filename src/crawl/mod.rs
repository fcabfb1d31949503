// src/crawl/mod.rs
// =============================================================================
// This module handles the traversal part of a crawl.
//
// Features:
// - Breadth-first crawling from a seed URL, one level at a time
// - Up to `max_concurrency` pages fetched concurrently per level
// - Every URL fetched at most once, even in cyclic link graphs
// - Optional collection of stylesheets, scripts and images for download
// =============================================================================

mod extract;
mod fetch;
mod frontier;
mod normalize;
mod scheduler;

pub use extract::{extract, Extracted, ResourceTask};
pub use fetch::fetch_page;
pub use frontier::Frontier;
pub use normalize::normalize_url;
pub use scheduler::{CrawlPhase, CrawlResult, Crawler};
