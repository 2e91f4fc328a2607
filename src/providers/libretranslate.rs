use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{Provider, error_body, http_client};
use crate::errors::ProviderError;
use crate::language_utils::LanguageCode;

/// Public LibreTranslate instance
pub const DEFAULT_ENDPOINT: &str = "https://libretranslate.de/translate";

/// LibreTranslate client, the secondary translation provider
#[derive(Debug)]
pub struct LibreTranslate {
    /// HTTP client for API requests
    client: Client,
    /// API endpoint URL
    endpoint: String,
    /// API key, required by some instances
    api_key: Option<String>,
}

/// LibreTranslate request body
#[derive(Debug, Serialize)]
pub struct LibreTranslateRequest<'a> {
    pub q: &'a str,
    pub source: &'a str,
    pub target: &'a str,
    pub format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<&'a str>,
}

/// LibreTranslate response
#[derive(Debug, Deserialize)]
pub struct LibreTranslateResponse {
    #[serde(rename = "translatedText", default)]
    pub translated_text: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl LibreTranslate {
    /// Create a new LibreTranslate client
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let endpoint = endpoint.into();
        Self {
            client: http_client(timeout),
            endpoint: if endpoint.is_empty() { DEFAULT_ENDPOINT.to_string() } else { endpoint },
            api_key: None,
        }
    }

    /// Send an API key with every request
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.trim().is_empty());
        self
    }

    /// Build the JSON body for one request
    pub fn build_request<'a>(
        &'a self,
        text: &'a str,
        source: &'a str,
        target: &'a str,
    ) -> LibreTranslateRequest<'a> {
        LibreTranslateRequest {
            q: text,
            source,
            target,
            format: "text",
            api_key: self.api_key.as_deref(),
        }
    }
}

#[async_trait]
impl Provider for LibreTranslate {
    fn name(&self) -> &str {
        "libretranslate"
    }

    async fn translate(
        &self,
        text: &str,
        source: LanguageCode,
        target: LanguageCode,
    ) -> Result<String, ProviderError> {
        let request = self.build_request(text, source.as_str(), target.as_str());
        debug!("LibreTranslate request ({} chars, {}->{})", text.chars().count(), source, target);

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(ProviderError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = error_body(response).await;
            error!("LibreTranslate API error ({}): {}", status, error_text);
            return Err(ProviderError::from_status(status.as_u16(), error_text));
        }

        let body = response
            .json::<LibreTranslateResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        if let Some(message) = body.error {
            return Err(ProviderError::ApiError { status_code: status.as_u16(), message });
        }

        body.translated_text
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ProviderError::EmptyResponse("LibreTranslate returned no translatedText".to_string()))
    }
}
