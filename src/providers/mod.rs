/*!
 * Provider implementations for the external services lyrics depend on.
 *
 * - MyMemory: primary machine translation (GET)
 * - LibreTranslate: secondary machine translation (POST JSON)
 * - Backend: the music API, for lyrics, streaming lookups and its own
 *   authenticated translation endpoint
 * - Mock: scripted provider for tests and offline runs
 */

use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;
use std::time::Duration;

use crate::errors::ProviderError;
use crate::language_utils::LanguageCode;

/// Common trait for all translation providers
///
/// Implementations must normalize every failure into `ProviderError`; the
/// pipeline never sees transport-specific error shapes.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Short provider name used in logs and outcomes
    fn name(&self) -> &str;

    /// Translate `text` from `source` to `target`
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The raw translated text or an error
    async fn translate(
        &self,
        text: &str,
        source: LanguageCode,
        target: LanguageCode,
    ) -> Result<String, ProviderError>;
}

/// Build an HTTP client bounded by `timeout`
pub(crate) fn http_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .build()
        .unwrap_or_default()
}

/// Read the body of a failed response for error reporting
pub(crate) async fn error_body(response: reqwest::Response) -> String {
    response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to get error response text".to_string())
}

pub mod backend;
pub mod libretranslate;
pub mod mock;
pub mod mymemory;
