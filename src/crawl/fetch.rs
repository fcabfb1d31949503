// src/crawl/fetch.rs
// =============================================================================
// Fetches the HTML of one page.
//
// A page that can't be fetched is not an error for the crawl as a whole: we
// log what went wrong and hand back None, and the scheduler simply gets no
// links from that page. One dead server must never stop the traversal.
// =============================================================================

use crate::error::FetchError;
use crate::transport::Transport;
use tracing::{debug, error};

// Returns the page body for any 2xx answer, None for everything else
pub async fn fetch_page(transport: &dyn Transport, url: &str) -> Option<String> {
    match try_fetch(transport, url).await {
        Ok(html) => {
            debug!(url, bytes = html.len(), "fetched page");
            Some(html)
        }
        Err(e) => {
            error!(url, "error fetching page: {}", e);
            None
        }
    }
}

async fn try_fetch(transport: &dyn Transport, url: &str) -> Result<String, FetchError> {
    let response = transport.get(url).await?;

    if !(200..300).contains(&response.status) {
        return Err(FetchError::Status(response.status));
    }

    // Pages in odd encodings still yield their links, invalid bytes become U+FFFD
    Ok(String::from_utf8_lossy(&response.body).into_owned())
}
