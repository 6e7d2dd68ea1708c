pub mod language;
pub mod sanitize;

pub use language::LanguageDetector;
pub use sanitize::sanitize;
