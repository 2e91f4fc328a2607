use anyhow::{Result, anyhow};
use isolang::Language;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language utilities for the supported lyrics languages
///
/// Only a fixed set of languages is supported. Codes are accepted in
/// ISO 639-1 (2-letter) or ISO 639-2 (3-letter, T or B) form and always
/// normalized to the 2-letter tag used by the translation providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    #[default]
    En,
    Es,
    Pt,
    Fr,
    De,
    It,
    Nl,
    Ja,
    Ko,
    Zh,
}

impl LanguageCode {
    /// All supported languages in declaration order
    pub const ALL: [LanguageCode; 10] = [
        Self::En,
        Self::Es,
        Self::Pt,
        Self::Fr,
        Self::De,
        Self::It,
        Self::Nl,
        Self::Ja,
        Self::Ko,
        Self::Zh,
    ];

    /// The 2-letter tag sent to providers
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
            Self::Pt => "pt",
            Self::Fr => "fr",
            Self::De => "de",
            Self::It => "it",
            Self::Nl => "nl",
            Self::Ja => "ja",
            Self::Ko => "ko",
            Self::Zh => "zh",
        }
    }

    /// English name of the language
    pub fn name(&self) -> &'static str {
        Language::from_639_1(self.as_str())
            .map(|lang| lang.to_name())
            .unwrap_or_else(|| self.as_str())
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageCode {
    type Err = anyhow::Error;

    fn from_str(code: &str) -> Result<Self> {
        let part1 = normalize_to_part1(code)?;
        Self::ALL
            .iter()
            .copied()
            .find(|lang| lang.as_str() == part1)
            .ok_or_else(|| anyhow!("Unsupported language: {}", code))
    }
}

/// Normalize an ISO 639-1 or ISO 639-2 code to its 2-letter form
pub fn normalize_to_part1(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    if normalized_code.len() == 2 {
        if Language::from_639_1(&normalized_code).is_some() {
            return Ok(normalized_code);
        }
    } else if normalized_code.len() == 3 {
        // ISO 639-2/B codes that differ from their 639-2/T form
        let part2t = match normalized_code.as_str() {
            "fre" => "fra",
            "ger" => "deu",
            "dut" => "nld",
            "chi" => "zho",
            other => other,
        };

        if let Some(code_639_1) = Language::from_639_3(part2t).and_then(|lang| lang.to_639_1()) {
            return Ok(code_639_1.to_string());
        }
    }

    Err(anyhow!("Invalid language code: {}", code))
}

/// Check if two language codes represent the same supported language
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (code1.parse::<LanguageCode>(), code2.parse::<LanguageCode>()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
