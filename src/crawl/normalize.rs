// src/crawl/normalize.rs

// Makes sure a user-typed address carries a scheme.
//
// "example.com" becomes "https://example.com"; anything that already starts
// with http:// or https:// is returned as-is (after trimming whitespace).
// Never fails, it only ever prepends.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    let lower = trimmed.to_ascii_lowercase();

    if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}
