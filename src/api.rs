//! File server REST API client.
//!
//! Talks to the four read-only endpoints of the file server:
//! - `GET {base}/list` - file metadata as a JSON array
//! - `GET {base}/content/{fileName}` - text body
//! - `GET {base}/view/{fileName}` - binary body for inline preview
//! - `GET {base}/download/{fileName}` - binary body for save-to-disk
//!
//! Every call re-fetches; there is no caching and no retry policy.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Failure of a single request: network error, non-2xx status or a body
/// that could not be decoded. Kept `Clone` so results can travel inside
/// UI messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("server returned HTTP {0}")]
    Status(u16),
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            TransportError::Status(status.as_u16())
        } else if err.is_decode() {
            TransportError::Decode(err.to_string())
        } else {
            TransportError::Request(err.to_string())
        }
    }
}

/// Metadata for one server-held file, as returned by `/list`.
/// The server is the authoritative copy; this is a read-only snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub file_name: String,
    /// Extension without the dot, e.g. "txt" or "PDF". Case-insensitive.
    pub file_type: String,
    #[serde(default)]
    pub file_size: u64,
    /// Server-side path, descriptive only.
    #[serde(default)]
    pub file_path: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DirectoryClient {
    client: Client,
    base_url: String,
}

impl DirectoryClient {
    /// Create a client for the given base URL, e.g.
    /// `http://localhost:8080/api/web/files`.
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        let parsed = Url::parse(base_url)
            .map_err(|e| TransportError::Request(format!("invalid server URL: {}", e)))?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(TransportError::Request(format!(
                "unsupported URL scheme: {}",
                parsed.scheme()
            )));
        }

        let client = Client::builder()
            .build()
            .map_err(|e| TransportError::Request(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch metadata for all files on the server.
    pub async fn list_files(&self) -> Result<Vec<FileRecord>, TransportError> {
        let url = format!("{}/list", self.base_url);
        log::info!("API: list -> {}", url);

        let response = self.client.get(&url).send().await?;
        response.error_for_status_ref()?;

        let files = response
            .json::<Vec<FileRecord>>()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))?;

        log::debug!("API: list returned {} records", files.len());
        Ok(files)
    }

    /// Fetch the decoded text content of a file (`.txt`, `.loc`).
    pub async fn fetch_text_content(&self, file_name: &str) -> Result<String, TransportError> {
        let url = self.endpoint("content", file_name);
        log::info!("API: content -> {}", url);

        let response = self.client.get(&url).send().await?;
        response.error_for_status_ref()?;

        let text = response
            .text()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))?;
        Ok(text)
    }

    /// Fetch raw bytes for inline preview (images, PDFs, anything else).
    pub async fn fetch_view_bytes(&self, file_name: &str) -> Result<Vec<u8>, TransportError> {
        let url = self.endpoint("view", file_name);
        log::info!("API: view -> {}", url);

        self.fetch_bytes(&url).await
    }

    /// Fetch raw bytes bound for save-to-disk. Same contract as
    /// [`fetch_view_bytes`](DirectoryClient::fetch_view_bytes), separate
    /// endpoint on the server.
    pub async fn fetch_download_bytes(&self, file_name: &str) -> Result<Vec<u8>, TransportError> {
        let url = self.endpoint("download", file_name);
        log::info!("API: download -> {}", url);

        self.fetch_bytes(&url).await
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        let response = self.client.get(url).send().await?;
        response.error_for_status_ref()?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    fn endpoint(&self, operation: &str, file_name: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            operation,
            urlencoding::encode(file_name)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deserializes_wire_format() {
        let json = r#"{
            "fileName": "report.pdf",
            "fileType": "pdf",
            "fileSize": 102400,
            "filePath": "/srv/files/report.pdf"
        }"#;

        let record: FileRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.file_name, "report.pdf");
        assert_eq!(record.file_type, "pdf");
        assert_eq!(record.file_size, 102400);
        assert_eq!(record.file_path.as_deref(), Some("/srv/files/report.pdf"));
    }

    #[test]
    fn test_record_tolerates_missing_optional_fields() {
        let json = r#"{"fileName": "notes.txt", "fileType": "txt"}"#;
        let record: FileRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.file_size, 0);
        assert_eq!(record.file_path, None);
    }

    #[test]
    fn test_endpoint_encodes_file_names() {
        let client = DirectoryClient::new("http://localhost:8080/api/web/files").unwrap();
        assert_eq!(
            client.endpoint("content", "my notes.txt"),
            "http://localhost:8080/api/web/files/content/my%20notes.txt"
        );
        assert_eq!(
            client.endpoint("view", "photo.png"),
            "http://localhost:8080/api/web/files/view/photo.png"
        );
    }

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client = DirectoryClient::new("http://localhost:8080/api/web/files/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/api/web/files");
    }

    #[test]
    fn test_rejects_invalid_urls() {
        assert!(DirectoryClient::new("not a url").is_err());
        assert!(DirectoryClient::new("ftp://host/files").is_err());
    }
}
