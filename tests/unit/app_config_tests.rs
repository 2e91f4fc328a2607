/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use lyrictl::app_config::{Config, LogLevel, TranslationProvider};
use lyrictl::language_utils::LanguageCode;
use lyrictl::translation::PipelineOptions;
use std::time::Duration;

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.target_language, LanguageCode::Es);
    assert_eq!(config.source_language, None);
    assert_eq!(
        config.translation.provider_order,
        vec![TranslationProvider::MyMemory, TranslationProvider::LibreTranslate]
    );
    assert_eq!(config.translation.common.max_chunk_chars, 450);
    assert_eq!(config.translation.common.inter_chunk_delay_ms, 600);
    assert_eq!(config.translation.common.rate_limit_backoff_ms, 2000);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

#[test]
fn test_provider_endpoints_shouldDefaultToPublicServices() {
    let config = Config::default();
    let translation = &config.translation;

    assert!(translation.get_endpoint(&TranslationProvider::MyMemory).contains("mymemory"));
    assert!(translation.get_endpoint(&TranslationProvider::LibreTranslate).ends_with("/translate"));
    assert_eq!(translation.get_api_key(&TranslationProvider::LibreTranslate), None);
    assert_eq!(translation.get_timeout_secs(&TranslationProvider::MyMemory), 10);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    config.translation.provider_order.clear();
    assert!(config.validate().is_err());

    config.translation.provider_order = vec![TranslationProvider::Backend];
    assert!(config.validate().is_ok());

    config.backend.api_base = "not a url".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.translation.common.max_chunk_chars = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_backend_timeout_withBackendInChain_shouldComeFromBackendSection() {
    let mut config = Config::default();
    config.translation.provider_order = vec![TranslationProvider::Backend, TranslationProvider::MyMemory];
    config.backend.timeout_secs = 30;

    assert_eq!(config.get_timeout_secs(&TranslationProvider::Backend), 30);
    assert_eq!(config.get_timeout_secs(&TranslationProvider::MyMemory), 10);
    assert!(config.validate().is_ok());

    config.backend.timeout_secs = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_default_config_shouldNotListBackendAsTranslationService() {
    let config = Config::default();
    assert!(config.translation.get_provider_config(&TranslationProvider::Backend).is_none());
}

#[test]
fn test_pipeline_options_fromConfig_shouldConvertMilliseconds() {
    let mut config = Config::default();
    config.translation.common.max_chunk_chars = 400;
    config.translation.common.inter_chunk_delay_ms = 250;

    let options = PipelineOptions::from_config(&config.translation.common);
    assert_eq!(options.max_chunk_chars, 400);
    assert_eq!(options.inter_chunk_delay, Duration::from_millis(250));
    assert_eq!(options.rate_limit_backoff, Duration::from_secs(2));
}

#[test]
fn test_load_or_create_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let created = Config::load_or_create(&path)?;
    assert!(path.exists());

    let reloaded = Config::load_or_create(&path)?;
    assert_eq!(reloaded.target_language, created.target_language);
    assert_eq!(reloaded.translation.provider_order, created.translation.provider_order);
    Ok(())
}

#[test]
fn test_load_or_create_withPartialFile_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{ "target_language": "fr", "translation": { "provider_order": ["libretranslate"] } }"#,
    )?;

    let config = Config::load_or_create(&path)?;
    assert_eq!(config.target_language, LanguageCode::Fr);
    assert_eq!(config.translation.provider_order, vec![TranslationProvider::LibreTranslate]);
    assert_eq!(config.translation.common.max_chunk_chars, 450);
    assert!(!config.translation.available_providers.is_empty());
    Ok(())
}

#[test]
fn test_load_or_create_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;
    assert!(Config::load_or_create(&path).is_err());
    Ok(())
}

#[test]
fn test_translation_provider_fromStr_shouldAcceptDisplayNames() {
    assert_eq!("mymemory".parse::<TranslationProvider>().unwrap(), TranslationProvider::MyMemory);
    assert_eq!("LibreTranslate".parse::<TranslationProvider>().unwrap(), TranslationProvider::LibreTranslate);
    assert!("openai".parse::<TranslationProvider>().is_err());
}
