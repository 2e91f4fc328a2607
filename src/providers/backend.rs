/*!
 * Client for the music backend API.
 *
 * The backend is consumed only through its request/response contract:
 * lyrics lookup, streaming lookup, and an authenticated translation
 * endpoint. The session token is passed in explicitly as a `Session`.
 */

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use super::{Provider, error_body, http_client};
use crate::errors::ProviderError;
use crate::language_utils::LanguageCode;

/// Opaque session handed out by the authentication provider
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    /// Session carrying a bearer token
    pub fn with_token(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            token: if token.trim().is_empty() { None } else { Some(token) },
        }
    }

    /// Session without credentials
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

/// Body of `POST /translate`
#[derive(Debug, Serialize)]
pub struct BackendTranslateRequest<'a> {
    pub text: &'a str,
    pub target_lang: &'a str,
    pub source_lang: &'a str,
}

/// Response of `POST /translate`
#[derive(Debug, Deserialize)]
pub struct BackendTranslateResponse {
    #[serde(alias = "translatedText", alias = "translated_lyrics", default)]
    pub translated_text: Option<String>,
}

/// Response of `GET /lyrics/{song_id}`
#[derive(Debug, Deserialize)]
pub struct LyricsResponse {
    #[serde(default)]
    pub lyrics: Option<String>,
}

/// Response of `GET /stream/{song_id}`
#[derive(Debug, Deserialize)]
pub struct StreamResponse {
    #[serde(default)]
    pub youtube_url: Option<String>,
    #[serde(default)]
    pub youtube_id: Option<String>,
}

/// Music backend client
#[derive(Debug)]
pub struct BackendClient {
    client: Client,
    base: Url,
    session: Session,
}

impl BackendClient {
    /// Create a client for the API rooted at `api_base`
    pub fn new(api_base: &str, session: Session, timeout: Duration) -> Result<Self> {
        let base = Url::parse(api_base).context(format!("Invalid backend URL: {}", api_base))?;
        if base.cannot_be_a_base() {
            return Err(anyhow!("Backend URL cannot be used as a base: {}", api_base));
        }

        Ok(Self {
            client: http_client(timeout),
            base,
            session,
        })
    }

    /// Build the URL for a path below the API base
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder, ProviderError> {
        match self.session.token() {
            Some(token) => Ok(request.bearer_auth(token)),
            None => Err(ProviderError::AuthenticationRequired("no session token".to_string())),
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, ProviderError> {
        let response = self
            .authorize(request)?
            .send()
            .await
            .map_err(ProviderError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = error_body(response).await;
            error!("Backend API error ({}): {}", status, error_text);
            if status == StatusCode::UNAUTHORIZED {
                return Err(ProviderError::AuthenticationRequired(error_text));
            }
            return Err(ProviderError::from_status(status.as_u16(), error_text));
        }
        Ok(response)
    }

    /// Fetch raw lyrics for a song
    pub async fn get_lyrics(&self, song_id: &str) -> Result<String, ProviderError> {
        let url = self.endpoint(&["lyrics", song_id]);
        debug!("Fetching lyrics from {}", url);

        let body = self
            .send(self.client.get(url))
            .await?
            .json::<LyricsResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        body.lyrics
            .filter(|l| !l.trim().is_empty())
            .ok_or_else(|| ProviderError::EmptyResponse(format!("no lyrics for song {}", song_id)))
    }

    /// Look up the YouTube URL (or bare id) the backend has for a song
    pub async fn get_stream(&self, song_id: &str) -> Result<StreamResponse, ProviderError> {
        let url = self.endpoint(&["stream", song_id]);
        debug!("Fetching stream info from {}", url);

        self.send(self.client.get(url))
            .await?
            .json::<StreamResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl Provider for BackendClient {
    fn name(&self) -> &str {
        "backend"
    }

    /// The backend detects the source language itself, so `source` is sent as "auto"
    async fn translate(
        &self,
        text: &str,
        _source: LanguageCode,
        target: LanguageCode,
    ) -> Result<String, ProviderError> {
        let request = BackendTranslateRequest {
            text,
            target_lang: target.as_str(),
            source_lang: "auto",
        };

        let body = self
            .send(self.client.post(self.endpoint(&["translate"])).json(&request))
            .await?
            .json::<BackendTranslateResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        body.translated_text
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ProviderError::EmptyResponse("backend returned no translation".to_string()))
    }
}
