/*!
 * # lyrictl - Lyrics translation toolkit
 *
 * A Rust library for translating song lyrics with free machine translation
 * services, plus the small pieces of player logic that go with it.
 *
 * ## Features
 *
 * - Keyword-based source language detection
 * - Line-preserving chunking for provider request limits
 * - Sequential chunk translation through a provider fallback chain:
 *   - MyMemory (primary)
 *   - LibreTranslate (secondary)
 *   - Music backend `/translate` endpoint (authenticated)
 * - Rate-limit backoff and an inter-chunk throttle
 * - Partial-translation reporting instead of silent degradation
 * - Scroll synchronization between original and translated panels
 * - YouTube video id extraction
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `translation`: The lyrics translation pipeline:
 *   - `translation::detector`: Source language detection
 *   - `translation::chunker`: Chunk planning
 *   - `translation::core`: Per-chunk translation with fallback
 *   - `translation::assembly`: Reassembly of chunk results
 * - `providers`: Clients for the translation services and the music backend
 * - `scroll_sync`: Relative scroll position synchronization
 * - `youtube`: YouTube video id extraction
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: Supported language codes
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod scroll_sync;
pub mod translation;
pub mod youtube;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, ProviderError, TranslationError};
pub use language_utils::{LanguageCode, language_codes_match};
pub use scroll_sync::{ScrollMetrics, ScrollSync};
pub use translation::{TranslationOutcome, TranslationService, TranslationStatus};
pub use youtube::{VideoId, extract_video_id};
