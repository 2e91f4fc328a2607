/*!
 * Source language detection for lyrics.
 *
 * Detection is a keyword-count heuristic, not a statistical classifier: it
 * counts whole-word hits of common words per language and leans towards
 * English when there is no signal. It sits behind `LanguageDetector` so a
 * better detector can be dropped in without touching the pipeline.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::language_utils::LanguageCode;

/// Anything that can guess the language of a text
pub trait LanguageDetector: Send + Sync {
    /// Best guess from the supported set. Never fails.
    fn detect(&self, text: &str) -> LanguageCode;
}

/// Language returned when no keyword matches at all
pub const DEFAULT_LANGUAGE: LanguageCode = LanguageCode::En;

const ENGLISH_KEYWORDS: &[&str] = &[
    "the", "and", "you", "that", "was", "for", "are", "with", "his", "they", "one", "have",
    "this", "from", "love", "heart", "baby", "when", "where", "what", "how", "like", "just",
    "know",
];

const SPANISH_KEYWORDS: &[&str] = &[
    "que", "para", "con", "por", "una", "de", "la", "el", "los", "las", "yo", "tu", "él",
    "ella", "nosotros", "amor", "corazón", "vida", "cuando", "donde", "porque", "como",
    "desde", "hasta", "hola", "mundo", "te", "quiero", "mi", "pero", "sin",
];

const PORTUGUESE_KEYWORDS: &[&str] = &[
    "que", "para", "com", "uma", "você", "seu", "ela", "mais", "quando", "onde", "porque",
    "como", "desde", "até", "amor", "não", "eu", "meu", "coração",
];

const FRENCH_KEYWORDS: &[&str] = &[
    "que", "pour", "avec", "une", "dans", "est", "pas", "vous", "amour", "coeur", "quand",
    "où", "comment", "comme", "je", "les", "mon", "toujours",
];

const GERMAN_KEYWORDS: &[&str] = &[
    "und", "ich", "nicht", "die", "der", "das", "du", "liebe", "herz", "mein", "ist", "wenn",
    "mit", "auf",
];

const ITALIAN_KEYWORDS: &[&str] = &[
    "che", "il", "non", "sono", "per", "amore", "cuore", "mio", "quando", "gli", "della",
    "sempre",
];

const DUTCH_KEYWORDS: &[&str] = &[
    "het", "een", "ik", "niet", "van", "mijn", "liefde", "hart", "wanneer", "zijn", "voor",
];

fn keywords_for(language: LanguageCode) -> &'static [&'static str] {
    match language {
        LanguageCode::En => ENGLISH_KEYWORDS,
        LanguageCode::Es => SPANISH_KEYWORDS,
        LanguageCode::Pt => PORTUGUESE_KEYWORDS,
        LanguageCode::Fr => FRENCH_KEYWORDS,
        LanguageCode::De => GERMAN_KEYWORDS,
        LanguageCode::It => ITALIAN_KEYWORDS,
        LanguageCode::Nl => DUTCH_KEYWORDS,
        LanguageCode::Ja | LanguageCode::Ko | LanguageCode::Zh => &[],
    }
}

/// One whole-word matcher per language, in declaration order
static KEYWORD_PATTERNS: Lazy<Vec<(LanguageCode, Option<Regex>)>> = Lazy::new(|| {
    LanguageCode::ALL
        .iter()
        .map(|&language| {
            let keywords = keywords_for(language);
            if keywords.is_empty() {
                return (language, None);
            }
            let alternation = keywords
                .iter()
                .map(|k| regex::escape(k))
                .collect::<Vec<_>>()
                .join("|");
            let pattern = Regex::new(&format!(r"(?i)\b(?:{})\b", alternation)).ok();
            (language, pattern)
        })
        .collect()
});

/// Keyword-count detector
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordDetector;

impl KeywordDetector {
    pub fn new() -> Self {
        Self
    }

    /// Per-language keyword hit counts, highest first.
    ///
    /// Ties keep declaration order since the sort is stable.
    pub fn scores(&self, text: &str) -> Vec<(LanguageCode, usize)> {
        let lower_text = text.to_lowercase();

        let mut scores: Vec<(LanguageCode, usize)> = KEYWORD_PATTERNS
            .iter()
            .map(|(language, pattern)| {
                let count = pattern
                    .as_ref()
                    .map(|re| re.find_iter(&lower_text).count())
                    .unwrap_or(0);
                (*language, count)
            })
            .collect();

        scores.sort_by(|a, b| b.1.cmp(&a.1));
        scores
    }
}

impl LanguageDetector for KeywordDetector {
    fn detect(&self, text: &str) -> LanguageCode {
        let scores = self.scores(text);
        debug!("Language detection scores: {:?}", scores);

        match scores.first() {
            Some(&(language, score)) if score > 0 => language,
            _ => DEFAULT_LANGUAGE,
        }
    }
}
