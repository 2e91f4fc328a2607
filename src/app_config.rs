use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::language_utils::LanguageCode;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Language lyrics are translated into
    #[serde(default = "default_target_language")]
    pub target_language: LanguageCode,

    /// Fixed source language; detected from the lyrics when absent
    #[serde(default)]
    pub source_language: Option<LanguageCode>,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Music backend config
    #[serde(default)]
    pub backend: BackendConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: MyMemory public API
    #[default]
    MyMemory,
    // @provider: LibreTranslate instance
    LibreTranslate,
    // @provider: Music backend /translate endpoint (requires a session)
    Backend,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::MyMemory => "MyMemory",
            Self::LibreTranslate => "LibreTranslate",
            Self::Backend => "Music backend",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::MyMemory => "mymemory".to_string(),
            Self::LibreTranslate => "libretranslate".to_string(),
            Self::Backend => "backend".to_string(),
        }
    }
}

impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "mymemory" => Ok(Self::MyMemory),
            "libretranslate" => Ok(Self::LibreTranslate),
            "backend" => Ok(Self::Backend),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: API key (LibreTranslate instances that require one)
    #[serde(default)]
    pub api_key: Option<String>,

    // @field: Contact email (MyMemory quota)
    #[serde(default)]
    pub email: Option<String>,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: TranslationProvider) -> Self {
        let endpoint = match provider_type {
            TranslationProvider::MyMemory => default_mymemory_endpoint(),
            TranslationProvider::LibreTranslate => default_libretranslate_endpoint(),
            // The backend endpoint is derived from `backend.api_base`
            TranslationProvider::Backend => String::new(),
        };

        Self {
            provider_type: provider_type.to_lowercase_string(),
            endpoint,
            api_key: None,
            email: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Providers to try for each chunk, in order
    #[serde(default = "default_provider_order")]
    pub provider_order: Vec<TranslationProvider>,

    /// Available translation providers
    #[serde(default = "default_available_providers")]
    pub available_providers: Vec<ProviderConfig>,

    /// Common translation settings
    #[serde(default)]
    pub common: TranslationCommonConfig,
}

/// Common translation settings applicable to all providers
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationCommonConfig {
    /// Maximum characters per chunk sent to a provider
    #[serde(default = "default_max_chunk_chars")]
    pub max_chunk_chars: usize,

    /// Delay in milliseconds between consecutive chunk requests
    #[serde(default = "default_inter_chunk_delay_ms")]
    pub inter_chunk_delay_ms: u64,

    /// Delay in milliseconds after a rate-limited response before falling back
    #[serde(default = "default_rate_limit_backoff_ms")]
    pub rate_limit_backoff_ms: u64,
}

impl Default for TranslationCommonConfig {
    fn default() -> Self {
        Self {
            max_chunk_chars: default_max_chunk_chars(),
            inter_chunk_delay_ms: default_inter_chunk_delay_ms(),
            rate_limit_backoff_ms: default_rate_limit_backoff_ms(),
        }
    }
}

/// Music backend configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BackendConfig {
    /// Base URL of the music API
    #[serde(default = "default_backend_api_base")]
    pub api_base: String,

    /// Bearer token; usually supplied through the environment instead
    #[serde(default)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_base: default_backend_api_base(),
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_target_language() -> LanguageCode {
    LanguageCode::Es
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_chunk_chars() -> usize {
    450
}

fn default_inter_chunk_delay_ms() -> u64 {
    600 // Keeps the public MyMemory instance from throttling us
}

fn default_rate_limit_backoff_ms() -> u64 {
    2000
}

fn default_mymemory_endpoint() -> String {
    crate::providers::mymemory::DEFAULT_ENDPOINT.to_string()
}

fn default_libretranslate_endpoint() -> String {
    crate::providers::libretranslate::DEFAULT_ENDPOINT.to_string()
}

fn default_backend_api_base() -> String {
    "http://127.0.0.1:8000/api/v1/music".to_string()
}

fn default_provider_order() -> Vec<TranslationProvider> {
    vec![TranslationProvider::MyMemory, TranslationProvider::LibreTranslate]
}

fn default_available_providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig::new(TranslationProvider::MyMemory),
        ProviderConfig::new(TranslationProvider::LibreTranslate),
    ]
}

impl Config {
    /// Load a configuration file, or write and return the defaults if it is missing
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            let file = File::open(path)
                .context(format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .context(format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        log::warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .context(format!("Failed to write default config to file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let translation = &self.translation;

        if translation.provider_order.is_empty() {
            return Err(anyhow!("At least one translation provider must be configured"));
        }

        if translation.common.max_chunk_chars == 0 {
            return Err(anyhow!("max_chunk_chars must be greater than zero"));
        }

        for provider in &translation.provider_order {
            if *provider == TranslationProvider::Backend {
                url::Url::parse(&self.backend.api_base)
                    .context(format!("Invalid backend api_base: {}", self.backend.api_base))?;
            } else if translation.get_endpoint(provider).trim().is_empty() {
                return Err(anyhow!("Endpoint for {} must not be empty", provider.display_name()));
            }

            if self.get_timeout_secs(provider) == 0 {
                return Err(anyhow!("Timeout for {} must be greater than zero", provider.display_name()));
            }
        }

        Ok(())
    }

    /// Request timeout for a provider in the chain
    ///
    /// The backend is configured in its own section, the translation
    /// services in `translation.available_providers`.
    pub fn get_timeout_secs(&self, provider: &TranslationProvider) -> u64 {
        match provider {
            TranslationProvider::Backend => self.backend.timeout_secs,
            _ => self.translation.get_timeout_secs(provider),
        }
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            target_language: default_target_language(),
            source_language: None,
            translation: TranslationConfig::default(),
            backend: BackendConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl TranslationConfig {
    /// Get a specific provider configuration by type
    pub fn get_provider_config(&self, provider_type: &TranslationProvider) -> Option<&ProviderConfig> {
        let provider_str = provider_type.to_lowercase_string();
        self.available_providers.iter()
            .find(|p| p.provider_type == provider_str)
    }

    /// Get the endpoint for a provider
    pub fn get_endpoint(&self, provider: &TranslationProvider) -> String {
        if let Some(provider_config) = self.get_provider_config(provider) {
            if !provider_config.endpoint.is_empty() {
                return provider_config.endpoint.clone();
            }
        }

        ProviderConfig::new(*provider).endpoint
    }

    /// Get the API key for a provider
    pub fn get_api_key(&self, provider: &TranslationProvider) -> Option<String> {
        self.get_provider_config(provider)
            .and_then(|p| p.api_key.clone())
            .filter(|k| !k.is_empty())
    }

    /// Get the contact email for a provider
    pub fn get_email(&self, provider: &TranslationProvider) -> Option<String> {
        self.get_provider_config(provider)
            .and_then(|p| p.email.clone())
            .filter(|e| !e.is_empty())
    }

    /// Get the request timeout for a provider
    pub fn get_timeout_secs(&self, provider: &TranslationProvider) -> u64 {
        self.get_provider_config(provider)
            .map(|p| p.timeout_secs)
            .unwrap_or_else(default_timeout_secs)
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider_order: default_provider_order(),
            available_providers: default_available_providers(),
            common: TranslationCommonConfig::default(),
        }
    }
}
