//! Load the catalog document from a URL or a local file.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::models::Catalog;
use crate::paths::expand_tilde;
use crate::store::CatalogStore;

fn build_http_client() -> Result<reqwest::blocking::Client, reqwest::Error> {
    reqwest::blocking::Client::builder()
        .user_agent(concat!("catview/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(Duration::from_secs(15))
        .timeout(Duration::from_secs(30))
        .build()
}

/// Whether `source` names a remote document rather than a file.
pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Fetch and parse the catalog from `source` (an `http(s)://` URL or a path).
pub fn load_catalog(source: &str) -> Result<CatalogStore, FetchError> {
    let source = source.trim();
    if is_remote(source) {
        let client = build_http_client().map_err(FetchError::HttpClient)?;
        let catalog = fetch_remote(&client, source).map_err(|e| FetchError::FetchFailed {
            url: source.to_string(),
            cause: e,
        })?;
        return Ok(CatalogStore::new(catalog));
    }

    let path = expand_tilde(source);
    tracing::debug!(path = %path.display(), "reading catalog file");
    let content = std::fs::read_to_string(&path).map_err(|e| FetchError::ReadFailed {
        path: path.clone(),
        cause: e,
    })?;
    CatalogStore::load(&content).map_err(|e| FetchError::ParseFailed { path, cause: e })
}

fn fetch_remote(client: &reqwest::blocking::Client, url: &str) -> Result<Catalog, reqwest::Error> {
    tracing::debug!(url, "fetching catalog");
    let resp = client.get(url).send()?.error_for_status()?;
    resp.json()
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP client error")]
    HttpClient(#[source] reqwest::Error),
    #[error("Failed to fetch {url}")]
    FetchFailed {
        url: String,
        #[source]
        cause: reqwest::Error,
    },
    #[error("Failed to read {}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        cause: std::io::Error,
    },
    #[error("Failed to parse {}", path.display())]
    ParseFailed {
        path: PathBuf,
        #[source]
        cause: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn loads_catalog_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"packs": [{{"name": "demo"}}], "mcp_servers": [{{"name": "x", "pack": "demo", "tier": "Community"}}]}}"#
        )
        .unwrap();

        let store = load_catalog(file.path().to_str().unwrap()).unwrap();
        assert_eq!(store.packs().len(), 1);
        assert_eq!(store.community_servers().len(), 1);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("data.json");
        let err = load_catalog(missing.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, FetchError::ReadFailed { .. }), "{err:?}");
    }

    #[test]
    fn non_json_body_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "<!doctype html><p>not found</p>").unwrap();
        let err = load_catalog(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, FetchError::ParseFailed { .. }), "{err:?}");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn remote_sources_are_detected() {
        assert!(is_remote("https://example.com/data.json"));
        assert!(is_remote("http://localhost:8000/data.json"));
        assert!(!is_remote("docs/data.json"));
        assert!(!is_remote("~/catalog.json"));
    }
}
