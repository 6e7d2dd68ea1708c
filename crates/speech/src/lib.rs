pub mod asr;
pub mod pipeline;
pub mod service;
pub mod text;
pub mod tts;

pub use asr::{AsrBackend, AsrRequest, TranscriptionError, TranscriptionResult};
pub use pipeline::{AudioError, NormalizedAudio, normalize};
pub use service::TranscriptionService;
pub use text::{LanguageDetector, sanitize};
pub use tts::{SpeechBackend, SpeechSynthesizer, SynthesisError};
