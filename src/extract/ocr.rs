use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::errors::{BotError, Result};

/// Client for the external OCR HTTP service.
///
/// The service takes a base64 document and answers with the recognized
/// lines joined by newlines. Documents are submitted under a random name
/// so retries never collide on the service side.
pub struct OcrClient {
    client: Client,
    api_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetectTextResponse {
    text: String,
}

impl OcrClient {
    pub fn new(client: Client, api_url: String, api_key: Option<String>) -> Self {
        Self {
            client,
            api_url,
            api_key,
        }
    }

    /// Submit a document and return the extracted text (possibly empty).
    pub async fn extract_text(
        &self,
        data: &[u8],
        file_name: &str,
        content_type: &str,
    ) -> Result<String> {
        let document_name = format!("{}-{}", Uuid::new_v4(), file_name);
        debug!(
            "Submitting {} ({} bytes) to OCR service",
            document_name,
            data.len()
        );

        let body = serde_json::json!({
            "name": document_name,
            "content_type": content_type,
            "document": BASE64.encode(data),
        });

        let mut request = self
            .client
            .post(format!("{}/detect-text", self.api_url))
            .json(&body);
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {}", key));
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(BotError::ocr(format!(
                "OCR service failed with status {}: {}",
                status, error_text
            )));
        }

        let detected: DetectTextResponse = response
            .json()
            .await
            .map_err(|e| BotError::ocr(format!("Failed to parse OCR response: {}", e)))?;

        Ok(detected.text)
    }
}
