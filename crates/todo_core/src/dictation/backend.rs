//! Speech capture collaborator contract.
//!
//! # Responsibility
//! - Define the platform-facing speech backend trait.
//! - Categorize capture failures into user-displayable messages.
//! - Fold raw recognition result batches into dictation events.

use crate::dictation::DictationEvent;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Platform speech recognizer driven by a [`super::DictationSession`].
///
/// Implementations deliver recognition output back to the session via
/// `DictationSession::handle`.
pub trait SpeechBackend {
    fn is_supported(&self) -> bool;
    fn start(&mut self) -> Result<(), CaptureError>;
    /// Graceful stop; pending audio may still be recognized.
    fn stop(&mut self);
    /// Immediate stop; pending audio is discarded.
    fn abort(&mut self);
}

/// Categorized capture failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    Unsupported,
    NoSpeech,
    AudioCapture,
    NotAllowed,
    Network,
    ServiceNotAllowed,
    Aborted,
    StartFailed,
    /// Backend error code not covered above.
    Other(String),
}

impl CaptureError {
    /// Maps a recognizer error code (`no-speech`, `not-allowed`, ...) to a category.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "no-speech" => Self::NoSpeech,
            "audio-capture" => Self::AudioCapture,
            "not-allowed" => Self::NotAllowed,
            "network" => Self::Network,
            "service-not-allowed" => Self::ServiceNotAllowed,
            "aborted" => Self::Aborted,
            other => Self::Other(other.to_string()),
        }
    }

    /// Stable metadata-only code for logs.
    pub fn code(&self) -> &str {
        match self {
            Self::Unsupported => "unsupported",
            Self::NoSpeech => "no-speech",
            Self::AudioCapture => "audio-capture",
            Self::NotAllowed => "not-allowed",
            Self::Network => "network",
            Self::ServiceNotAllowed => "service-not-allowed",
            Self::Aborted => "aborted",
            Self::StartFailed => "start-failed",
            Self::Other(code) => code.as_str(),
        }
    }
}

impl Display for CaptureError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unsupported => write!(f, "speech recognition is not supported on this device"),
            Self::NoSpeech => write!(f, "no speech was detected, please try again"),
            Self::AudioCapture => {
                write!(f, "the microphone cannot be accessed, please check permissions")
            }
            Self::NotAllowed => write!(
                f,
                "microphone permission was denied, allow it in the system settings"
            ),
            Self::Network => write!(
                f,
                "the speech recognition service cannot be reached, check the network connection"
            ),
            Self::ServiceNotAllowed => write!(
                f,
                "the speech recognition service is unavailable, please try again later"
            ),
            Self::Aborted => write!(f, "speech recognition was aborted"),
            Self::StartFailed => write!(
                f,
                "speech recognition could not be started, please try again later"
            ),
            Self::Other(code) => write!(f, "speech recognition failed: {code}"),
        }
    }
}

impl Error for CaptureError {}

/// One recognition result as reported by a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionSegment {
    pub transcript: String,
    pub is_final: bool,
}

impl RecognitionSegment {
    pub fn interim(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
            is_final: false,
        }
    }

    pub fn final_text(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
            is_final: true,
        }
    }
}

/// Folds one result batch into a dictation event.
///
/// Final segments take precedence: when any are present their concatenation
/// becomes a `FinalResult`; otherwise interim segments become an `Update`.
/// Returns `None` when the batch carries no text.
pub fn fold_results(segments: &[RecognitionSegment]) -> Option<DictationEvent> {
    let mut final_text = String::new();
    let mut interim_text = String::new();
    for segment in segments {
        if segment.is_final {
            final_text.push_str(&segment.transcript);
        } else {
            interim_text.push_str(&segment.transcript);
        }
    }

    if !final_text.is_empty() {
        Some(DictationEvent::FinalResult(final_text))
    } else if !interim_text.is_empty() {
        Some(DictationEvent::Update(interim_text))
    } else {
        None
    }
}
