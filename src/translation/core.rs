/*!
 * Core translation service implementation.
 *
 * `TranslationService` drives the lyrics pipeline: detect the source
 * language, split the text into chunks, translate each chunk through the
 * provider fallback chain, and join the results back together.
 *
 * Chunks are translated strictly one after another. The fixed delay between
 * chunks is the rate limiter, so requests are never issued concurrently.
 */

use anyhow::{Result, anyhow};
use log::{debug, error, info, warn};
use std::ops::Range;
use std::sync::Arc;
use std::time::Duration;

use crate::app_config::{Config, TranslationCommonConfig, TranslationProvider as ConfigTranslationProvider};
use crate::errors::{ProviderError, TranslationError};
use crate::language_utils::LanguageCode;
use crate::providers::Provider;
use crate::providers::backend::{BackendClient, Session};
use crate::providers::libretranslate::LibreTranslate;
use crate::providers::mymemory::MyMemory;

use super::assembly::join_chunks;
use super::chunker::{Chunk, DEFAULT_MAX_CHUNK_CHARS, split_into_chunks};
use super::detector::{KeywordDetector, LanguageDetector};

/// Placeholder shown instead of blank output when nothing could be translated
pub const TRANSLATION_UNAVAILABLE: &str = "Translation unavailable";

/// Tunables for one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Character budget per chunk
    pub max_chunk_chars: usize,
    /// Pause between consecutive chunk translations
    pub inter_chunk_delay: Duration,
    /// Pause after a rate-limited provider before trying the next one
    pub rate_limit_backoff: Duration,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            max_chunk_chars: DEFAULT_MAX_CHUNK_CHARS,
            inter_chunk_delay: Duration::from_millis(600),
            rate_limit_backoff: Duration::from_secs(2),
        }
    }
}

impl PipelineOptions {
    /// Options from the common translation settings
    pub fn from_config(common: &TranslationCommonConfig) -> Self {
        Self {
            max_chunk_chars: common.max_chunk_chars,
            inter_chunk_delay: Duration::from_millis(common.inter_chunk_delay_ms),
            rate_limit_backoff: Duration::from_millis(common.rate_limit_backoff_ms),
        }
    }

    /// Options with all delays disabled
    pub fn without_delays(mut self) -> Self {
        self.inter_chunk_delay = Duration::ZERO;
        self.rate_limit_backoff = Duration::ZERO;
        self
    }
}

/// How a single chunk was resolved
#[derive(Debug, Clone, PartialEq)]
pub enum ChunkOutcome {
    /// A provider produced a usable translation
    Translated { provider: String },
    /// Every provider failed; the original text was kept
    Original { reason: String },
}

/// Result for one chunk, in original order
#[derive(Debug, Clone)]
pub struct ChunkResult {
    /// Chunk text as submitted
    pub source_text: String,
    /// Translated text, or the source text when degraded
    pub text: String,
    /// Source lines covered by the chunk
    pub lines: Range<usize>,
    pub outcome: ChunkOutcome,
}

impl ChunkResult {
    pub fn is_translated(&self) -> bool {
        matches!(self.outcome, ChunkOutcome::Translated { .. })
    }
}

/// Overall state of a translation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationStatus {
    /// Input had no translatable text
    Empty,
    /// Source and target language are the same; input returned as is
    SameLanguage,
    /// Every chunk was translated
    Complete,
    /// Some chunks kept their original text
    Partial,
    /// No chunk could be translated
    Failed,
}

/// Output of the pipeline
#[derive(Debug, Clone)]
pub struct TranslationOutcome {
    /// Final reassembled text
    pub text: String,
    pub source_language: LanguageCode,
    pub target_language: LanguageCode,
    pub chunks: Vec<ChunkResult>,
    pub status: TranslationStatus,
}

impl TranslationOutcome {
    /// Whether some or all of the text was left untranslated
    pub fn is_degraded(&self) -> bool {
        matches!(self.status, TranslationStatus::Partial | TranslationStatus::Failed)
    }

    /// Number of chunks that kept their original text
    pub fn degraded_chunks(&self) -> usize {
        self.chunks.iter().filter(|c| !c.is_translated()).count()
    }

    /// Text to show the user; never blank on total failure
    pub fn display_text(&self) -> &str {
        match self.status {
            TranslationStatus::Failed => TRANSLATION_UNAVAILABLE,
            _ => &self.text,
        }
    }
}

/// Main translation service for lyrics translation
pub struct TranslationService {
    /// Source language detector
    detector: Box<dyn LanguageDetector>,
    /// Providers in fallback order
    providers: Vec<Arc<dyn Provider>>,
    /// Pipeline tunables
    pub options: PipelineOptions,
}

impl std::fmt::Debug for TranslationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationService")
            .field("providers", &self.provider_names())
            .field("options", &self.options)
            .finish()
    }
}

impl TranslationService {
    /// Create a translation service from the configuration
    ///
    /// The session is only used when the backend provider is in the chain.
    pub fn new(config: &Config, session: Session) -> Result<Self> {
        let translation = &config.translation;
        let mut providers: Vec<Arc<dyn Provider>> = Vec::new();

        for provider in &translation.provider_order {
            let timeout = Duration::from_secs(config.get_timeout_secs(provider));
            let endpoint = translation.get_endpoint(provider);

            let client: Arc<dyn Provider> = match provider {
                ConfigTranslationProvider::MyMemory => Arc::new(
                    MyMemory::new(endpoint, timeout).with_email(translation.get_email(provider)),
                ),
                ConfigTranslationProvider::LibreTranslate => Arc::new(
                    LibreTranslate::new(endpoint, timeout).with_api_key(translation.get_api_key(provider)),
                ),
                ConfigTranslationProvider::Backend => Arc::new(BackendClient::new(
                    &config.backend.api_base,
                    session.clone(),
                    timeout,
                )?),
            };
            providers.push(client);
        }

        if providers.is_empty() {
            return Err(anyhow!("No translation providers configured"));
        }

        Ok(Self::with_providers(providers, PipelineOptions::from_config(&translation.common)))
    }

    /// Create a service over an explicit provider chain
    pub fn with_providers(providers: Vec<Arc<dyn Provider>>, options: PipelineOptions) -> Self {
        Self {
            detector: Box::new(KeywordDetector::new()),
            providers,
            options,
        }
    }

    /// Replace the language detector
    pub fn with_detector(mut self, detector: Box<dyn LanguageDetector>) -> Self {
        self.detector = detector;
        self
    }

    /// Names of the providers in fallback order
    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    /// Detect the source language of `text`
    pub fn detect_language(&self, text: &str) -> LanguageCode {
        self.detector.detect(text)
    }

    /// Split `text` with the configured budget
    pub fn plan_chunks(&self, text: &str) -> Vec<Chunk> {
        split_into_chunks(text, self.options.max_chunk_chars)
    }

    /// Translate lyrics into `target`, detecting the source language
    pub async fn translate_lyrics(
        &self,
        text: &str,
        target: LanguageCode,
    ) -> Result<TranslationOutcome, TranslationError> {
        self.translate_with_progress(text, None, target, |_, _| {}).await
    }

    /// Translate lyrics, reporting `(done, total)` after every chunk
    ///
    /// Provider failures never surface here: chunks degrade to their
    /// original text. The only error is a rejected session, which needs a
    /// different remedy (logging in again).
    pub async fn translate_with_progress<F>(
        &self,
        text: &str,
        source: Option<LanguageCode>,
        target: LanguageCode,
        progress: F,
    ) -> Result<TranslationOutcome, TranslationError>
    where
        F: Fn(usize, usize) + Send + Sync,
    {
        let source_language = source.unwrap_or_else(|| self.detect_language(text));
        info!("Translating lyrics: {} -> {}", source_language, target);

        if source_language == target {
            info!("Lyrics are already in {}, nothing to translate", target.name());
            return Ok(TranslationOutcome {
                text: text.to_string(),
                source_language,
                target_language: target,
                chunks: Vec::new(),
                status: TranslationStatus::SameLanguage,
            });
        }

        let chunks = self.plan_chunks(text);
        if chunks.is_empty() {
            return Ok(TranslationOutcome {
                text: text.to_string(),
                source_language,
                target_language: target,
                chunks: Vec::new(),
                status: TranslationStatus::Empty,
            });
        }

        debug!("Split lyrics into {} chunk(s)", chunks.len());
        for chunk in chunks.iter().filter(|c| c.is_oversized(self.options.max_chunk_chars)) {
            warn!(
                "Line {} is {} characters, above the {} character budget; sending it whole",
                chunk.lines.start + 1,
                chunk.char_len(),
                self.options.max_chunk_chars
            );
        }

        let total = chunks.len();
        let mut results = Vec::with_capacity(total);

        for (index, chunk) in chunks.into_iter().enumerate() {
            debug!("Translating chunk {}/{}", index + 1, total);
            let result = self.translate_chunk(chunk, source_language, target).await?;
            results.push(result);
            progress(index + 1, total);

            if index + 1 < total && !self.options.inter_chunk_delay.is_zero() {
                tokio::time::sleep(self.options.inter_chunk_delay).await;
            }
        }

        let translated = results.iter().filter(|r| r.is_translated()).count();
        let status = if translated == total {
            TranslationStatus::Complete
        } else if translated == 0 {
            TranslationStatus::Failed
        } else {
            TranslationStatus::Partial
        };

        match status {
            TranslationStatus::Failed => error!("Translation failed for all {} chunk(s)", total),
            TranslationStatus::Partial => warn!("Translated {}/{} chunk(s); the rest kept the original text", translated, total),
            _ => info!("Translation completed ({} chunk(s))", total),
        }

        Ok(TranslationOutcome {
            text: join_chunks(&results),
            source_language,
            target_language: target,
            chunks: results,
            status,
        })
    }

    /// Translate one chunk through the provider chain
    ///
    /// Falls back to the next provider on any failure or unusable output and
    /// to the original text when the chain is exhausted. A provider that is
    /// not last in the chain must return text that differs from the input.
    pub async fn translate_chunk(
        &self,
        chunk: Chunk,
        source: LanguageCode,
        target: LanguageCode,
    ) -> Result<ChunkResult, TranslationError> {
        let mut last_failure = String::from("no providers configured");

        for (index, provider) in self.providers.iter().enumerate() {
            let has_fallback = index + 1 < self.providers.len();

            match provider.translate(&chunk.text, source, target).await {
                Ok(translated) => {
                    let translated = translated.trim();
                    if translated.is_empty() {
                        last_failure = format!("{} returned an empty translation", provider.name());
                    } else if has_fallback && translated == chunk.text {
                        last_failure = format!("{} returned the text unchanged", provider.name());
                    } else {
                        debug!("Chunk translated by {}", provider.name());
                        return Ok(ChunkResult {
                            text: translated.to_string(),
                            source_text: chunk.text,
                            lines: chunk.lines,
                            outcome: ChunkOutcome::Translated { provider: provider.name().to_string() },
                        });
                    }
                    warn!("{}", last_failure);
                }
                Err(ProviderError::AuthenticationRequired(message)) => {
                    error!("{} rejected the session: {}", provider.name(), message);
                    return Err(TranslationError::AuthenticationRequired(message));
                }
                Err(e) => {
                    warn!("{} failed: {}", provider.name(), e);
                    let rate_limited = e.is_rate_limited();
                    last_failure = format!("{}: {}", provider.name(), e);

                    if rate_limited && has_fallback && !self.options.rate_limit_backoff.is_zero() {
                        debug!("Backing off {:?} before the next provider", self.options.rate_limit_backoff);
                        tokio::time::sleep(self.options.rate_limit_backoff).await;
                    }
                }
            }
        }

        warn!("Keeping original text for lines {}..{}", chunk.lines.start + 1, chunk.lines.end);
        Ok(ChunkResult {
            text: chunk.text.clone(),
            source_text: chunk.text,
            lines: chunk.lines,
            outcome: ChunkOutcome::Original { reason: last_failure },
        })
    }
}
