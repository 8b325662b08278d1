use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::Client;
use serde::Deserialize;

use crate::domain::model::StudentRecord;
use crate::domain::ports::RecordExtractor;
use crate::utils::error::{IngestError, Result};

/// HTTP adapter for the external roster-photo extraction service.
///
/// The service receives `{"image": "<base64>"}` and answers with
/// `{"students": [...]}` in the staged-record shape, or `{"error": "..."}`.
/// The service's message is surfaced verbatim; there is no retry at this
/// layer, and any timeout belongs to the HTTP client, not the pipeline.
pub struct VisionExtractor {
    client: Client,
    endpoint: Option<String>,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VisionResponse {
    #[serde(default)]
    students: Vec<StudentRecord>,
    #[serde(default)]
    error: Option<String>,
}

impl VisionExtractor {
    pub fn new(
        endpoint: Option<String>,
        api_key: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build()?,
            endpoint,
            api_key,
        })
    }
}

#[async_trait::async_trait]
impl RecordExtractor for VisionExtractor {
    async fn extract_records(&self, image: &[u8]) -> Result<Vec<StudentRecord>> {
        let endpoint = self
            .endpoint
            .as_deref()
            .ok_or_else(|| IngestError::MissingConfig {
                field: "vision endpoint".to_string(),
            })?;

        tracing::debug!("Sending {} image bytes to {}", image.len(), endpoint);
        let mut request = self
            .client
            .post(endpoint)
            .json(&serde_json::json!({ "image": STANDARD.encode(image) }));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let message = response.text().await.unwrap_or_default();
            return Err(IngestError::VisionService {
                message: if message.trim().is_empty() {
                    format!("service returned {}", status)
                } else {
                    message
                },
            });
        }

        let body: VisionResponse = response.json().await?;
        if let Some(message) = body.error {
            return Err(IngestError::VisionService { message });
        }
        if body.students.is_empty() {
            return Err(IngestError::VisionService {
                message: "no students recognized in the photo".to_string(),
            });
        }

        tracing::debug!("Extraction service returned {} records", body.students.len());
        Ok(body.students)
    }
}
