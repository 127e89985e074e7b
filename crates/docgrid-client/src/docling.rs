//! Docling sidecar converter
//!
//! The conversion service is a small HTTP sidecar exposing `POST /convert`:
//! a multipart upload under the `file` field, answered with
//! `{"markdown": ...}` on success or `{"detail": ...}` with a 5xx status on
//! failure.

use async_trait::async_trait;
use docgrid_domain::traits::DocumentConverter;
use docgrid_domain::{ConversionFailure, Document};
use serde::Deserialize;
use std::time::Duration;
use tracing::info;

/// Default converter sidecar endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000";

/// Conversion can run OCR on large PDFs; give it room
const CONVERT_TIMEOUT_SECS: u64 = 600;

/// Client for the docling conversion sidecar
pub struct DoclingConverter {
    endpoint: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct ConvertResponse {
    markdown: String,
}

#[derive(Deserialize)]
struct ConvertError {
    detail: String,
}

impl DoclingConverter {
    /// Create a converter against an explicit endpoint
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Create a converter against `http://localhost:8000`
    pub fn local() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl Default for DoclingConverter {
    fn default() -> Self {
        Self::local()
    }
}

#[async_trait]
impl DocumentConverter for DoclingConverter {
    async fn convert(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Document, ConversionFailure> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/convert", self.endpoint))
            .timeout(Duration::from_secs(CONVERT_TIMEOUT_SECS))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ConversionFailure::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ConvertError>()
                .await
                .map(|e| e.detail)
                .unwrap_or_else(|_| "unreadable error body".to_string());
            return Err(ConversionFailure::Service {
                status: status.as_u16(),
                detail,
            });
        }

        let converted: ConvertResponse = response
            .json()
            .await
            .map_err(|e| ConversionFailure::Corrupt(e.to_string()))?;

        info!(
            file = file_name,
            chars = converted.markdown.len(),
            "document converted"
        );

        Ok(Document::new(
            file_name,
            converted.markdown,
            content_type_for(file_name),
        ))
    }
}

/// Best-effort content type from the file extension
pub fn content_type_for(file_name: &str) -> String {
    let ext = file_name.rsplit('.').next().unwrap_or_default();
    match ext.to_ascii_lowercase().as_str() {
        "pdf" => "application/pdf",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "md" => "text/markdown",
        "txt" => "text/plain",
        "html" | "htm" => "text/html",
        _ => "application/octet-stream",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_for_known_extensions() {
        assert_eq!(content_type_for("a.pdf"), "application/pdf");
        assert_eq!(content_type_for("notes.MD"), "text/markdown");
        assert_eq!(content_type_for("page.htm"), "text/html");
    }

    #[test]
    fn test_content_type_for_unknown_is_octet_stream() {
        assert_eq!(content_type_for("weird.xyz"), "application/octet-stream");
        assert_eq!(content_type_for("no-extension"), "application/octet-stream");
    }
}
