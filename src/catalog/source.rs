//! Async catalog fetch
//!
//! The catalog is fetched exactly once, before the controller starts.
//! A source is either a local file or an HTTP(S) endpoint serving the
//! same JSON/TOML document.

use crate::catalog::loader::{parse_catalog, CatalogFormat};
use crate::catalog::ScenarioCatalog;
use crate::core::error::{MissionError, Result};
use reqwest::Client;
use std::path::PathBuf;

/// Where the catalog lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Url(String),
}

impl CatalogSource {
    /// Detect the source kind from a command-line location
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            CatalogSource::Url(location.to_string())
        } else {
            CatalogSource::File(PathBuf::from(location))
        }
    }

    fn format(&self) -> CatalogFormat {
        match self {
            CatalogSource::File(path) => CatalogFormat::detect(&path.to_string_lossy()),
            CatalogSource::Url(url) => CatalogFormat::detect(url),
        }
    }

    /// Fetch and parse the catalog
    ///
    /// Any failure is a `CatalogLoadFailure`. There is no fallback catalog.
    pub async fn fetch(&self) -> Result<ScenarioCatalog> {
        let content = match self {
            CatalogSource::File(path) => tokio::fs::read_to_string(path).await.map_err(|e| {
                MissionError::CatalogLoadFailure(format!("Failed to read {:?}: {}", path, e))
            })?,
            CatalogSource::Url(url) => fetch_remote(url).await?,
        };
        parse_catalog(&content, self.format())
    }
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::File(path) => write!(f, "{}", path.display()),
            CatalogSource::Url(url) => f.write_str(url),
        }
    }
}

async fn fetch_remote(url: &str) -> Result<String> {
    let response = Client::new()
        .get(url)
        .header("accept", "application/json, application/toml")
        .send()
        .await
        .map_err(|e| MissionError::CatalogLoadFailure(e.to_string()))?;

    if !response.status().is_success() {
        return Err(MissionError::CatalogLoadFailure(format!(
            "HTTP error! status: {}",
            response.status().as_u16()
        )));
    }

    response
        .text()
        .await
        .map_err(|e| MissionError::CatalogLoadFailure(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answer a single HTTP request with `status_line` and `body`
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        format!("http://{}/missions.json", addr)
    }

    #[tokio::test]
    async fn test_fetch_http_error_status() {
        let url = serve_once("HTTP/1.1 404 Not Found", "").await;
        let result = CatalogSource::parse(&url).fetch().await;

        match result {
            Err(MissionError::CatalogLoadFailure(msg)) => {
                assert!(msg.contains("status: 404"), "unexpected message: {msg}");
            }
            other => panic!("expected CatalogLoadFailure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_http_catalog() {
        let url = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"START":{"title":"Remote","options":[{"text":"go","nextScenario":"END"}]}}"#,
        )
        .await;

        let catalog = CatalogSource::parse(&url).fetch().await.unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains("START"));
    }

    #[test]
    fn test_parse_source_kind() {
        assert_eq!(
            CatalogSource::parse("https://example.org/missions.json"),
            CatalogSource::Url("https://example.org/missions.json".into())
        );
        assert_eq!(
            CatalogSource::parse("data/missions.json"),
            CatalogSource::File(PathBuf::from("data/missions.json"))
        );
    }

    #[test]
    fn test_format_follows_suffix() {
        assert_eq!(CatalogSource::parse("a/b.toml").format(), CatalogFormat::Toml);
        assert_eq!(
            CatalogSource::parse("http://host/missions").format(),
            CatalogFormat::Json
        );
    }

    #[tokio::test]
    async fn test_fetch_missing_file_fails() {
        let source = CatalogSource::parse("no/such/dir/missions.json");
        let result = source.fetch().await;
        assert!(matches!(result, Err(MissionError::CatalogLoadFailure(_))));
    }
}
