// src/crawl/extract.rs
// =============================================================================
// This module pulls hyperlinks and page resources out of HTML.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever, so broken markup is repaired, never rejected
//
// We also use the `url` crate to resolve relative URLs against the page's
// own address, the same way a browser does.
// =============================================================================

use crate::storage::ResourceKind;
use scraper::{Html, Selector};
use serde::Serialize;
use url::Url;

// A stylesheet, script or image found on a page, waiting to be downloaded
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResourceTask {
    pub url: String,
    pub kind: ResourceKind,
}

// Everything one page contributed to the crawl
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Extracted {
    /// Absolute http(s) targets of <a href>, in document order
    pub links: Vec<String>,
    /// Stylesheets, then scripts, then images, each in document order
    pub resources: Vec<ResourceTask>,
}

// Parses `html` and returns its outbound links, plus its resources when
// `want_resources` is set.
//
// Example:
//   html = "<a href='/docs'>Docs</a>"
//   base_url = "https://example.com/page"
//   links = ["https://example.com/docs"]
pub fn extract(html: &str, base_url: &str, want_resources: bool) -> Extracted {
    let mut extracted = Extracted::default();

    // Without a valid base there's nothing to resolve relative links against
    let base = match Url::parse(base_url) {
        Ok(url) => url,
        Err(_) => return extracted,
    };

    let document = Html::parse_document(html);

    extracted.links = collect(&document, &base, "a[href]", "href");

    if want_resources {
        let groups = [
            (ResourceKind::Stylesheet, r#"link[rel~="stylesheet"][href]"#, "href"),
            (ResourceKind::Script, "script[src]", "src"),
            (ResourceKind::Image, "img[src]", "src"),
        ];

        for (kind, css, attr) in groups {
            extracted.resources.extend(
                collect(&document, &base, css, attr)
                    .into_iter()
                    .map(|url| ResourceTask { url, kind }),
            );
        }
    }

    extracted
}

// Resolves `attr` of every element matching `css`
fn collect(document: &Html, base: &Url, css: &str, attr: &str) -> Vec<String> {
    // The selectors passed in are fixed strings in this file
    let selector = Selector::parse(css).expect("built-in selector is valid");

    document
        .select(&selector)
        .filter_map(|element| element.value().attr(attr))
        .filter_map(|value| resolve_url(base, value))
        .collect()
}

// Resolves a possibly-relative reference to an absolute http(s) URL
//
// Examples:
//   base = "https://example.com/page"
//   href = "/docs"              -> Some("https://example.com/docs")
//   href = "../other"           -> Some("https://example.com/other")
//   href = "#top"               -> None (same page)
//   href = "mailto:a@b.c"       -> None (not HTTP)
fn resolve_url(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();

    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("javascript:")
        || href.starts_with("data:")
    {
        return None;
    }

    let mut url = base.join(href).ok()?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }

    // page#intro and page#usage are the same document
    url.set_fragment(None);
    Some(url.to_string())
}
