//! Dictation input state machine.
//!
//! # Responsibility
//! - Track one speech capture session as `Idle -> Listening -> (Idle | Error)`.
//! - Turn backend events into queued notices that callers poll.
//!
//! # Invariants
//! - Only `Listening` reacts to backend events; late events are dropped.
//! - `stop` and `abort` are safe in every state and no-ops outside `Listening`.
//! - Capture failures surface as notices only; they never touch task state.
//! - `Ended` is emitted on natural completion, not after `stop`/`abort`.

pub mod backend;

use backend::{fold_results, CaptureError, RecognitionSegment, SpeechBackend};
use log::{debug, info, warn};
use std::collections::VecDeque;

/// Form field receiving dictated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictationTarget {
    Title,
    Description,
}

/// Session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictationState {
    Idle,
    Listening { target: DictationTarget },
    Error(CaptureError),
}

impl DictationState {
    fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Listening { .. } => "listening",
            Self::Error(_) => "error",
        }
    }
}

/// Discrete inputs driving the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictationEvent {
    /// Interim transcript; replaces the previous interim text.
    Update(String),
    /// Terminal transcript for this capture.
    FinalResult(String),
    Error(CaptureError),
    /// Caller-requested stop.
    ManualStop,
    /// Backend finished on its own (silence, end of utterance).
    End,
}

/// Output observed by callers via [`DictationSession::poll_notices`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictationNotice {
    Started(DictationTarget),
    Interim {
        target: DictationTarget,
        text: String,
    },
    Final {
        target: DictationTarget,
        text: String,
    },
    Failed(CaptureError),
    Stopped,
    Ended,
}

/// One dictation session bound to a speech backend.
pub struct DictationSession<B: SpeechBackend> {
    backend: B,
    state: DictationState,
    transcript: String,
    notices: VecDeque<DictationNotice>,
}

impl<B: SpeechBackend> DictationSession<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: DictationState::Idle,
            transcript: String::new(),
            notices: VecDeque::new(),
        }
    }

    pub fn is_supported(&self) -> bool {
        self.backend.is_supported()
    }

    pub fn state(&self) -> &DictationState {
        &self.state
    }

    pub fn is_listening(&self) -> bool {
        matches!(self.state, DictationState::Listening { .. })
    }

    /// Latest interim or final text of the current/last capture.
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Starts capturing into `target`.
    ///
    /// Unsupported backends and start failures move to `Error` and queue a
    /// `Failed` notice instead of returning an error. Calling this while
    /// already listening is ignored.
    pub fn start(&mut self, target: DictationTarget) {
        if self.is_listening() {
            warn!("event=dictation_start module=dictation status=ignored reason=already_listening");
            return;
        }

        if !self.backend.is_supported() {
            self.fail(CaptureError::Unsupported);
            return;
        }

        if let Err(err) = self.backend.start() {
            self.fail(err);
            return;
        }

        self.transcript.clear();
        self.transition(DictationState::Listening { target });
        self.notices.push_back(DictationNotice::Started(target));
    }

    /// Graceful stop requested by the caller.
    pub fn stop(&mut self) {
        self.handle(DictationEvent::ManualStop);
    }

    /// Immediate stop; the partial transcript is discarded.
    pub fn abort(&mut self) {
        if !self.is_listening() {
            return;
        }
        self.backend.abort();
        self.transcript.clear();
        self.transition(DictationState::Idle);
        self.notices.push_back(DictationNotice::Stopped);
    }

    /// Applies one event. Returns `false` when the event was ignored.
    pub fn handle(&mut self, event: DictationEvent) -> bool {
        let DictationState::Listening { target } = self.state else {
            debug!(
                "event=dictation_event module=dictation status=ignored state={}",
                self.state.name()
            );
            return false;
        };

        match event {
            DictationEvent::Update(text) => {
                self.transcript = text.clone();
                self.notices
                    .push_back(DictationNotice::Interim { target, text });
            }
            DictationEvent::FinalResult(text) => {
                self.transcript = text.clone();
                self.backend.stop();
                self.transition(DictationState::Idle);
                self.notices.push_back(DictationNotice::Final { target, text });
                self.notices.push_back(DictationNotice::Ended);
            }
            DictationEvent::Error(err) => {
                self.backend.abort();
                self.fail(err);
            }
            DictationEvent::ManualStop => {
                self.backend.stop();
                self.transition(DictationState::Idle);
                self.notices.push_back(DictationNotice::Stopped);
            }
            DictationEvent::End => {
                self.transition(DictationState::Idle);
                self.notices.push_back(DictationNotice::Ended);
            }
        }
        true
    }

    /// Folds a backend result batch and applies the resulting event.
    pub fn handle_results(&mut self, segments: &[RecognitionSegment]) -> bool {
        match fold_results(segments) {
            Some(event) => self.handle(event),
            None => false,
        }
    }

    /// Drains queued notices in emission order.
    pub fn poll_notices(&mut self) -> Vec<DictationNotice> {
        self.notices.drain(..).collect()
    }

    fn fail(&mut self, err: CaptureError) {
        warn!(
            "event=dictation_error module=dictation status=error error_code={}",
            err.code()
        );
        self.transition(DictationState::Error(err.clone()));
        self.notices.push_back(DictationNotice::Failed(err));
    }

    fn transition(&mut self, next: DictationState) {
        info!(
            "event=dictation_transition module=dictation status=ok from={} to={}",
            self.state.name(),
            next.name()
        );
        self.state = next;
    }
}
