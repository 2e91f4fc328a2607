/*!
 * Lyrics translation pipeline.
 *
 * - `detector`: Source language detection behind a one-method trait
 * - `chunker`: Splitting lyrics into provider-sized chunks
 * - `core`: The service that translates chunks through the provider chain
 * - `assembly`: Joining chunk results back into one text
 */

// Re-export main types for easier usage
pub use self::chunker::{Chunk, split_into_chunks};
pub use self::core::{
    ChunkOutcome, ChunkResult, PipelineOptions, TranslationOutcome, TranslationService,
    TranslationStatus, TRANSLATION_UNAVAILABLE,
};
pub use self::detector::{KeywordDetector, LanguageDetector};

// Submodules
pub mod assembly;
pub mod chunker;
pub mod core;
pub mod detector;
