// src/testing.rs
// In-memory web used by the unit tests in place of HttpTransport.

use crate::error::FetchError;
use crate::transport::{RawResponse, Transport};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub(crate) struct FakeWeb {
    responses: HashMap<String, RawResponse>,
    failures_left: Mutex<HashMap<String, usize>>,
    hits: Mutex<HashMap<String, usize>>,
    order: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl FakeWeb {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    // Serves `html` with status 200 at `url`
    pub(crate) fn page(self, url: &str, html: &str) -> Self {
        self.respond(url, 200, html.as_bytes())
    }

    // A page whose body is nothing but anchors to `targets`
    pub(crate) fn links(self, url: &str, targets: &[&str]) -> Self {
        let body: String = targets
            .iter()
            .map(|t| format!(r#"<a href="{}">link</a>"#, t))
            .collect();
        self.page(url, &format!("<html><body>{}</body></html>", body))
    }

    pub(crate) fn respond(mut self, url: &str, status: u16, body: &[u8]) -> Self {
        self.responses.insert(
            url.to_string(),
            RawResponse {
                status,
                body: body.to_vec(),
            },
        );
        self
    }

    // The first `times` requests for `url` answer 500, later ones get the
    // configured response
    pub(crate) fn fail_first(self, url: &str, times: usize) -> Self {
        self.failures_left
            .lock()
            .unwrap()
            .insert(url.to_string(), times);
        self
    }

    pub(crate) fn hits(&self, url: &str) -> usize {
        self.hits.lock().unwrap().get(url).copied().unwrap_or(0)
    }

    pub(crate) fn total_hits(&self) -> usize {
        self.hits.lock().unwrap().values().sum()
    }

    pub(crate) fn order(&self) -> Vec<String> {
        self.order.lock().unwrap().clone()
    }

    pub(crate) fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for FakeWeb {
    async fn get(&self, url: &str) -> Result<RawResponse, FetchError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        *self.hits.lock().unwrap().entry(url.to_string()).or_insert(0) += 1;
        self.order.lock().unwrap().push(url.to_string());

        // Give sibling requests a chance to start before this one finishes
        for _ in 0..3 {
            tokio::task::yield_now().await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if let Some(left) = self.failures_left.lock().unwrap().get_mut(url) {
            if *left > 0 {
                *left -= 1;
                return Ok(RawResponse {
                    status: 500,
                    body: Vec::new(),
                });
            }
        }

        Ok(self.responses.get(url).cloned().unwrap_or(RawResponse {
            status: 404,
            body: Vec::new(),
        }))
    }
}
