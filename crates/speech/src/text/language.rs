use whatlang::{Detector, Lang};

pub const DEFAULT_LANGUAGE: &str = "fr";

/// Languages that have a synthesis voice. Detection only chooses among these.
const VOICED_LANGUAGES: [Lang; 9] = [
    Lang::Fra,
    Lang::Eng,
    Lang::Spa,
    Lang::Deu,
    Lang::Ita,
    Lang::Por,
    Lang::Rus,
    Lang::Jpn,
    Lang::Cmn,
];

/// Below this many letters trigram statistics are noise.
pub const MIN_LETTERS: usize = 16;

/// Guesses weaker than this fall back to the default language.
pub const MIN_CONFIDENCE: f64 = 0.2;

/// Trigram-based language identification used to pick a synthesis voice.
///
/// Detection is advisory: short, ambiguous or unclassifiable text yields the default code.
/// The classifier is a pure function of its input, so identical text always maps to the
/// same code.
#[derive(Debug, Clone)]
pub struct LanguageDetector {
    default_language: String,
}

impl LanguageDetector {
    pub fn new(default_language: impl Into<String>) -> Self {
        Self {
            default_language: default_language.into(),
        }
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Returns the ISO 639-1 code of a voiced language (`zh-cn` for Mandarin), or the
    /// default code.
    pub fn detect(&self, text: &str) -> String {
        let letters = text.chars().filter(|c| c.is_alphabetic()).count();
        if letters < MIN_LETTERS {
            return self.default_language.clone();
        }

        let detector = Detector::with_allowlist(VOICED_LANGUAGES.to_vec());
        match detector.detect(text) {
            Some(info) if info.confidence() >= MIN_CONFIDENCE => iso_code(info.lang()).to_string(),
            _ => self.default_language.clone(),
        }
    }
}

impl Default for LanguageDetector {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE)
    }
}

fn iso_code(lang: Lang) -> &'static str {
    match lang {
        Lang::Fra => "fr",
        Lang::Eng => "en",
        Lang::Spa => "es",
        Lang::Deu => "de",
        Lang::Ita => "it",
        Lang::Por => "pt",
        Lang::Rus => "ru",
        Lang::Jpn => "ja",
        Lang::Cmn => "zh-cn",
        other => other.code(),
    }
}
