// src/config.rs
// =============================================================================
// The parameters of one crawl run.
//
// A CrawlJob is built once, validated once, and then only read. The engine
// never looks at any other switch while it runs, so a front-end can't flip
// "download resources" halfway through a traversal.
// =============================================================================

use crate::crawl::normalize_url;
use crate::error::ConfigError;
use std::path::{Path, PathBuf};
use url::Url;

// The original tool always tried a resource three times
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

// Where saved pages and resources end up, relative to the working directory
pub const DEFAULT_OUTPUT_DIR: &str = "downloads";

#[derive(Debug, Clone)]
pub struct CrawlJob {
    seed_url: String,
    max_depth: usize,
    max_concurrency: usize,
    download_resources: bool,
    max_attempts: u32,
    output_dir: PathBuf,
}

impl CrawlJob {
    // Creates a job with the default retry count and output directory.
    // The seed gets an https:// prefix if it has no scheme and is stored in
    // the same canonical form the extractor produces for links.
    pub fn new(
        seed_url: &str,
        max_depth: usize,
        max_concurrency: usize,
        download_resources: bool,
    ) -> Result<Self, ConfigError> {
        if max_concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }

        Ok(Self {
            seed_url: canonical_seed(seed_url),
            max_depth,
            max_concurrency,
            download_resources,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        })
    }

    // Number of attempts per resource download (first try included)
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Result<Self, ConfigError> {
        if max_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        self.max_attempts = max_attempts;
        Ok(self)
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn seed_url(&self) -> &str {
        &self.seed_url
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    pub fn download_resources(&self) -> bool {
        self.download_resources
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

// "example.com" -> "https://example.com/", so a home link matches the seed.
// A seed that doesn't parse is kept as typed; its fetch will fail and be logged.
fn canonical_seed(raw: &str) -> String {
    let normalized = normalize_url(raw);
    match Url::parse(&normalized) {
        Ok(mut url) => {
            url.set_fragment(None);
            url.to_string()
        }
        Err(_) => normalized,
    }
}
