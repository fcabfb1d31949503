// src/error.rs
// =============================================================================
// Error types for the crawl engine.
//
// Most of these never reach the caller: a failed page or a failed download
// is logged and the crawl keeps going. Only CrawlError can come out of the
// engine entry points, and only for problems that stop a run from starting.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

// A single GET that did not produce a usable response
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, timeout, TLS or body read failure
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered, but not with the status we needed
    #[error("HTTP {0}")]
    Status(u16),
}

// Writing fetched content under the download root
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("cannot derive a file name from '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("URL has no host: {0}")]
    MissingHost(String),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// One failed download attempt, either on the wire or on disk
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

// Invalid crawl parameters, rejected before the engine starts
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("concurrency must be at least 1")]
    ZeroConcurrency,

    #[error("retry count must be at least 1")]
    ZeroAttempts,
}

// Everything that can stop a crawl before it begins
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("invalid crawl configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}
