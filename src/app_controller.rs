use anyhow::{Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::errors::{ProviderError, TranslationError};
use crate::file_utils::{self, FileManager};
use crate::language_utils::LanguageCode;
use crate::providers::backend::{BackendClient, Session};
use crate::translation::{Chunk, TranslationOutcome, TranslationService, TranslationStatus};
use crate::youtube::{VideoId, extract_video_id};

// @module: Application controller for lyrics translation

/// Where the lyrics to translate come from
#[derive(Debug, Clone)]
pub enum LyricsSource {
    /// A local text file
    File(PathBuf),
    /// Text already in memory (stdin for the CLI)
    Text(String),
    /// A song id resolved through the backend
    Song(String),
}

/// Main application controller for lyrics translation
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Session for backend calls
    session: Session,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config, session: Session) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, session })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build the translation service for the configured provider chain
    pub fn translation_service(&self) -> Result<TranslationService> {
        TranslationService::new(&self.config, self.session.clone())
    }

    /// Build a backend client bound to this controller's session
    pub fn backend(&self) -> Result<BackendClient> {
        BackendClient::new(
            &self.config.backend.api_base,
            self.session.clone(),
            Duration::from_secs(self.config.backend.timeout_secs),
        )
    }

    /// Fetch lyrics for a song from the backend
    pub async fn fetch_lyrics(&self, song_id: &str) -> Result<String, TranslationError> {
        let backend = self
            .backend()
            .map_err(|e| TranslationError::LyricsUnavailable(e.to_string()))?;

        backend.get_lyrics(song_id).await.map_err(|e| match e {
            ProviderError::AuthenticationRequired(message) => TranslationError::AuthenticationRequired(message),
            other => TranslationError::LyricsUnavailable(other.to_string()),
        })
    }

    /// Resolve a lyrics source to text
    pub async fn load_lyrics(&self, source: &LyricsSource) -> Result<String> {
        match source {
            LyricsSource::File(path) => FileManager::read_lyrics(path),
            LyricsSource::Text(text) => Ok(text.clone()),
            LyricsSource::Song(song_id) => Ok(self.fetch_lyrics(song_id).await?),
        }
    }

    /// Chunk plan for the given lyrics, using the configured budget
    pub fn plan_chunks(&self, lyrics: &str) -> Result<Vec<Chunk>> {
        Ok(self.translation_service()?.plan_chunks(lyrics))
    }

    /// Translate lyrics with a progress bar
    pub async fn translate(&self, lyrics: &str, target: LanguageCode) -> Result<TranslationOutcome> {
        let start_time = Instant::now();
        let service = self.translation_service()?;
        info!("Provider chain: {}", service.provider_names().join(" -> "));

        let progress_bar = ProgressBar::new(0);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("=>-"));

        let bar = progress_bar.clone();
        let outcome = service
            .translate_with_progress(lyrics, self.config.source_language, target, move |done, total| {
                bar.set_length(total as u64);
                bar.set_position(done as u64);
            })
            .await?;
        progress_bar.finish_and_clear();

        match outcome.status {
            TranslationStatus::Partial => warn!(
                "Lyrics partially translated: {} of {} chunk(s) kept the original text",
                outcome.degraded_chunks(),
                outcome.chunks.len()
            ),
            TranslationStatus::Failed => warn!("Translation unavailable, all providers failed"),
            _ => {}
        }

        debug!("Translation took {:?}", start_time.elapsed());
        Ok(outcome)
    }

    /// Find the YouTube video for a URL/id argument or a song id
    pub async fn resolve_video_id(&self, input: Option<&str>, song_id: Option<&str>) -> Result<Option<VideoId>> {
        if let Some(input) = input {
            return Ok(extract_video_id(input));
        }

        let song_id = song_id.ok_or_else(|| anyhow!("Either a URL or a song id is required"))?;
        let stream = self.backend()?.get_stream(song_id).await.map_err(|e| match e {
            ProviderError::AuthenticationRequired(message) => {
                anyhow::Error::from(TranslationError::AuthenticationRequired(message))
            }
            other => anyhow!("Failed to look up stream for song {}: {}", song_id, other),
        })?;

        // A stored id wins over the URL, same as the player
        Ok(stream
            .youtube_id
            .as_deref()
            .and_then(VideoId::parse)
            .or_else(|| stream.youtube_url.as_deref().and_then(extract_video_id)))
    }

    /// Render an outcome for the terminal
    pub fn render(&self, original: &str, outcome: &TranslationOutcome, side_by_side: bool) -> String {
        if side_by_side && outcome.status != TranslationStatus::Failed {
            file_utils::side_by_side(original, outcome.display_text(), 40)
        } else {
            format!("{}\n", outcome.display_text())
        }
    }
}
