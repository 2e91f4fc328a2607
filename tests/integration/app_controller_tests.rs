/*!
 * Tests for the application controller
 *
 * Only code paths that stay off the network are exercised here: local
 * sources, rendering, URL parsing, and session checks that fail before a
 * request is sent.
 */

use anyhow::Result;

use lyrictl::app_config::{Config, TranslationProvider};
use lyrictl::app_controller::{Controller, LyricsSource};
use lyrictl::errors::TranslationError;
use lyrictl::language_utils::LanguageCode;
use lyrictl::providers::backend::Session;
use lyrictl::translation::{TRANSLATION_UNAVAILABLE, TranslationOutcome, TranslationStatus};

use crate::common;

fn backend_only_config() -> Config {
    let mut config = Config::default();
    config.translation.provider_order = vec![TranslationProvider::Backend];
    config
}

fn outcome(text: &str, status: TranslationStatus) -> TranslationOutcome {
    TranslationOutcome {
        text: text.to_string(),
        source_language: LanguageCode::Es,
        target_language: LanguageCode::En,
        chunks: Vec::new(),
        status,
    }
}

#[test]
fn test_with_config_withInvalidConfig_shouldFail() {
    let mut config = Config::default();
    config.translation.provider_order.clear();
    assert!(Controller::with_config(config, Session::anonymous()).is_err());
}

#[test]
fn test_load_lyrics_fromFileAndText_shouldReturnContent() -> Result<()> {
    let controller = Controller::with_config(Config::default(), Session::anonymous())?;
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "song.txt", common::SPANISH_LYRICS)?;

    let from_file = tokio_test::block_on(controller.load_lyrics(&LyricsSource::File(path)))?;
    let from_text = tokio_test::block_on(controller.load_lyrics(&LyricsSource::Text(common::ENGLISH_LYRICS.into())))?;

    assert_eq!(from_file, common::SPANISH_LYRICS);
    assert_eq!(from_text, common::ENGLISH_LYRICS);
    Ok(())
}

#[tokio::test]
async fn test_fetch_lyrics_withoutSession_shouldRequireAuthentication() -> Result<()> {
    let controller = Controller::with_config(Config::default(), Session::anonymous())?;

    let result = controller.fetch_lyrics("42").await;
    assert!(matches!(result, Err(TranslationError::AuthenticationRequired(_))));

    let error = controller.load_lyrics(&LyricsSource::Song("42".into())).await.unwrap_err();
    assert!(matches!(
        error.downcast_ref::<TranslationError>(),
        Some(TranslationError::AuthenticationRequired(_))
    ));
    Ok(())
}

#[tokio::test]
async fn test_translate_withBackendAndNoSession_shouldSurfaceAuthentication() -> Result<()> {
    let controller = Controller::with_config(backend_only_config(), Session::anonymous())?;

    let error = controller
        .translate(common::SPANISH_LYRICS, LanguageCode::En)
        .await
        .unwrap_err();
    assert!(matches!(
        error.downcast_ref::<TranslationError>(),
        Some(TranslationError::AuthenticationRequired(_))
    ));
    Ok(())
}

#[tokio::test]
async fn test_translate_withSameLanguage_shouldNotNeedAnyProvider() -> Result<()> {
    let controller = Controller::with_config(backend_only_config(), Session::anonymous())?;

    let result = controller.translate("the sun is shining", LanguageCode::En).await?;
    assert_eq!(result.status, TranslationStatus::SameLanguage);
    assert_eq!(result.text, "the sun is shining");
    Ok(())
}

#[test]
fn test_plan_chunks_shouldUseConfiguredBudget() -> Result<()> {
    let mut config = Config::default();
    config.translation.common.max_chunk_chars = 80;
    let controller = Controller::with_config(config, Session::anonymous())?;

    let chunks = controller.plan_chunks(&common::spanish_song(4))?;
    assert_eq!(chunks.len(), 4);
    assert!(chunks.iter().all(|c| c.char_len() <= 80));
    Ok(())
}

#[tokio::test]
async fn test_resolve_video_id_withUrl_shouldNotNeedBackend() -> Result<()> {
    let controller = Controller::with_config(Config::default(), Session::anonymous())?;

    let id = controller.resolve_video_id(Some("https://youtu.be/dQw4w9WgXcQ"), None).await?;
    assert_eq!(id.map(|id| id.to_string()), Some("dQw4w9WgXcQ".to_string()));

    let none = controller.resolve_video_id(Some("https://example.com/video"), None).await?;
    assert!(none.is_none());

    assert!(controller.resolve_video_id(None, None).await.is_err());
    Ok(())
}

#[tokio::test]
async fn test_resolve_video_id_withSongAndNoSession_shouldRequireAuthentication() -> Result<()> {
    let controller = Controller::with_config(Config::default(), Session::anonymous())?;

    let error = controller.resolve_video_id(None, Some("42")).await.unwrap_err();
    assert!(matches!(
        error.downcast_ref::<TranslationError>(),
        Some(TranslationError::AuthenticationRequired(_))
    ));
    Ok(())
}

#[test]
fn test_render_withFailedOutcome_shouldShowPlaceholder() -> Result<()> {
    let controller = Controller::with_config(Config::default(), Session::anonymous())?;
    let failed = outcome(common::SPANISH_LYRICS, TranslationStatus::Failed);

    assert_eq!(controller.render(common::SPANISH_LYRICS, &failed, false), format!("{}\n", TRANSLATION_UNAVAILABLE));
    assert_eq!(controller.render(common::SPANISH_LYRICS, &failed, true), format!("{}\n", TRANSLATION_UNAVAILABLE));
    Ok(())
}

#[test]
fn test_render_sideBySide_shouldPairLines() -> Result<()> {
    let controller = Controller::with_config(Config::default(), Session::anonymous())?;
    let done = outcome("Hello world\nI love you", TranslationStatus::Complete);

    let rendered = controller.render(common::SPANISH_LYRICS, &done, true);
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("Hola mundo") && lines[0].ends_with("| Hello world"));
    assert!(lines[1].starts_with("te quiero") && lines[1].ends_with("| I love you"));
    Ok(())
}
