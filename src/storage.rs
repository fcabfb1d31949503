// src/storage.rs
// =============================================================================
// Writes fetched pages and resources to disk.
//
// Layout under the download root (default "downloads/"):
//
//   html/<host>_<path>.html
//   css/<host>_<path>.css
//   js/<host>_<path>.js
//   images/<host>_<path>.<png|jpg|...>
//
// The file name is a pure function of the URL and the kind, so crawling the
// same site twice rewrites the same files instead of piling up copies.
// =============================================================================

use crate::error::StorageError;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;
use url::Url;

// Image names that already end in one of these are left alone
const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "svg", "webp", "ico", "bmp", "avif",
];

// Distinguishes temporary files of concurrent writers
static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// A crawled page itself
    Html,
    /// <link rel="stylesheet" href=...>
    Stylesheet,
    /// <script src=...>
    Script,
    /// <img src=...>
    Image,
}

impl ResourceKind {
    // Sub-directory of the download root
    pub fn dir(self) -> &'static str {
        match self {
            ResourceKind::Html => "html",
            ResourceKind::Stylesheet => "css",
            ResourceKind::Script => "js",
            ResourceKind::Image => "images",
        }
    }

    // Appended when the derived name doesn't already carry a fitting extension
    fn default_extension(self) -> &'static str {
        match self {
            ResourceKind::Html => "html",
            ResourceKind::Stylesheet => "css",
            ResourceKind::Script => "js",
            ResourceKind::Image => "img",
        }
    }

    fn has_extension(self, name: &str) -> bool {
        let extension = match name.rsplit_once('.') {
            Some((_, ext)) => ext.to_ascii_lowercase(),
            None => return false,
        };

        match self {
            ResourceKind::Image => IMAGE_EXTENSIONS.contains(&extension.as_str()),
            other => extension == other.default_extension(),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir())
    }
}

#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    // Where `url` of the given kind is stored. Touches no files.
    //
    // Examples (root = "downloads"):
    //   https://example.com/           html  -> downloads/html/example.com_.html
    //   https://example.com/css/a.css  css   -> downloads/css/example.com_css_a.css
    //   http://localhost:8080/app      js    -> downloads/js/localhost_8080_app.js
    pub fn path_for(&self, url: &str, kind: ResourceKind) -> Result<PathBuf, StorageError> {
        let parsed = Url::parse(url).map_err(|source| StorageError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let host = parsed
            .host_str()
            .ok_or_else(|| StorageError::MissingHost(url.to_string()))?;

        let mut name = host.to_string();
        if let Some(port) = parsed.port() {
            name.push('_');
            name.push_str(&port.to_string());
        }
        name.push_str(&parsed.path().replace('/', "_"));

        if !kind.has_extension(&name) {
            name.push('.');
            name.push_str(kind.default_extension());
        }

        Ok(self.root.join(kind.dir()).join(name))
    }

    // Writes `content` to the path derived from `url` and `kind`, creating
    // directories as needed. An existing file is replaced in one step: the
    // bytes go to a temporary sibling first and are then renamed over it.
    pub async fn save(
        &self,
        url: &str,
        content: &[u8],
        kind: ResourceKind,
    ) -> Result<PathBuf, StorageError> {
        let path = self.path_for(url, kind)?;

        let dir = self.root.join(kind.dir());
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| StorageError::Io {
                path: dir.clone(),
                source,
            })?;

        let temp = temp_sibling(&path);
        tokio::fs::write(&temp, content)
            .await
            .map_err(|source| StorageError::Io {
                path: temp.clone(),
                source,
            })?;

        if let Err(source) = tokio::fs::rename(&temp, &path).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(StorageError::Io { path, source });
        }

        info!(url, path = %path.display(), "saved {}", kind);
        Ok(path)
    }
}

fn temp_sibling(path: &Path) -> PathBuf {
    let n = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(format!(".{}-{}.part", std::process::id(), n));
    path.with_file_name(name)
}
