use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use super::{Provider, error_body, http_client};
use crate::errors::ProviderError;
use crate::language_utils::LanguageCode;

/// Public MyMemory endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.mymemory.translated.net/get";

/// MyMemory client, the primary translation provider
#[derive(Debug)]
pub struct MyMemory {
    /// HTTP client for API requests
    client: Client,
    /// API endpoint URL
    endpoint: String,
    /// Contact email, raises the daily quota when set
    email: Option<String>,
}

/// MyMemory response envelope
#[derive(Debug, Deserialize)]
pub struct MyMemoryResponse {
    /// Translation payload
    #[serde(rename = "responseData")]
    pub response_data: Option<MyMemoryData>,

    /// Status code; the API reports it as either a number or a string
    #[serde(rename = "responseStatus", default)]
    pub response_status: Option<Value>,

    /// Human readable details for non-200 statuses
    #[serde(rename = "responseDetails", default)]
    pub response_details: Option<Value>,
}

/// Translation payload of a MyMemory response
#[derive(Debug, Deserialize)]
pub struct MyMemoryData {
    #[serde(rename = "translatedText", default)]
    pub translated_text: Option<String>,
}

impl MyMemoryResponse {
    /// Status code carried in the body, if any
    pub fn status_code(&self) -> Option<u16> {
        match self.response_status.as_ref()? {
            Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn details(&self) -> String {
        match &self.response_details {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }
}

impl MyMemory {
    /// Create a new MyMemory client
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let endpoint = endpoint.into();
        Self {
            client: http_client(timeout),
            endpoint: if endpoint.is_empty() { DEFAULT_ENDPOINT.to_string() } else { endpoint },
            email: None,
        }
    }

    /// Attach a contact email to every request
    pub fn with_email(mut self, email: Option<String>) -> Self {
        self.email = email.filter(|e| !e.trim().is_empty());
        self
    }

    /// Turn a decoded body into translated text or a normalized error
    pub fn interpret(response: MyMemoryResponse) -> Result<String, ProviderError> {
        if let Some(status) = response.status_code() {
            if status != 200 {
                return Err(ProviderError::from_status(status, response.details()));
            }
        }

        response
            .response_data
            .and_then(|data| data.translated_text)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| ProviderError::EmptyResponse("MyMemory returned no translatedText".to_string()))
    }
}

#[async_trait]
impl Provider for MyMemory {
    fn name(&self) -> &str {
        "mymemory"
    }

    async fn translate(
        &self,
        text: &str,
        source: LanguageCode,
        target: LanguageCode,
    ) -> Result<String, ProviderError> {
        let langpair = format!("{}|{}", source, target);
        let mut query: Vec<(&str, &str)> = vec![("q", text), ("langpair", langpair.as_str())];
        if let Some(email) = &self.email {
            query.push(("de", email.as_str()));
        }

        debug!("MyMemory request ({} chars, {})", text.chars().count(), langpair);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&query)
            .send()
            .await
            .map_err(ProviderError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = error_body(response).await;
            error!("MyMemory API error ({}): {}", status, error_text);
            return Err(ProviderError::from_status(status.as_u16(), error_text));
        }

        let body = response
            .json::<MyMemoryResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Self::interpret(body)
    }
}
