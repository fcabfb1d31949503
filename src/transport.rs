// src/transport.rs
// =============================================================================
// The one place the crawler touches the network.
//
// Both the page fetcher and the resource downloader issue plain GETs through
// the Transport trait. Production code uses HttpTransport (reqwest); tests
// plug in an in-memory web instead.
//
// Rust concepts:
// - Traits: an interface several types can implement
// - async-trait: lets a trait have async methods and still be used as dyn
// =============================================================================

use crate::error::FetchError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

// Every request gets this long before it counts as failed
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("link-harvester/", env!("CARGO_PKG_VERSION"));

// What came back from a GET: the status code and the raw body bytes.
// Deciding whether the status is good enough is up to the caller,
// because pages and resources have different rules.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<RawResponse, FetchError>;
}

// reqwest-backed transport
//
// The Client is created once and reused for every request so that
// connections to the same host are pooled.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(RawResponse { status, body })
    }
}
