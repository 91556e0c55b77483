//! Form state and its transitions

/// Everything the feedback form holds for one visit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub screenshot: Option<String>,
    pub comment: String,
    pub is_sending_feedback: bool,
    pub is_capturing: bool,
    /// Set once the backend accepted the feedback; the form is done after this
    pub sent: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    CommentChanged(String),
    CaptureStarted,
    CaptureSucceeded(String),
    CaptureFailed,
    RemoveScreenshot,
    SubmitStarted,
    SubmitSucceeded,
    SubmitFailed,
}

/// Submission phase derived from the flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    Sending,
    Sent,
}

impl FormState {
    /// Apply one event. Returns false when a `CaptureStarted` or
    /// `SubmitStarted` is rejected because one is already in flight.
    pub fn apply(&mut self, event: FormEvent) -> bool {
        match event {
            FormEvent::CommentChanged(text) => self.comment = text,
            FormEvent::CaptureStarted => {
                if self.is_capturing {
                    return false;
                }
                self.is_capturing = true;
            }
            FormEvent::CaptureSucceeded(uri) => {
                self.screenshot = Some(uri);
                self.is_capturing = false;
            }
            FormEvent::CaptureFailed => self.is_capturing = false,
            FormEvent::RemoveScreenshot => self.screenshot = None,
            FormEvent::SubmitStarted => {
                if self.is_sending_feedback {
                    return false;
                }
                self.is_sending_feedback = true;
            }
            // Sending flag stays set: the parent tears the form down after a send
            FormEvent::SubmitSucceeded => self.sent = true,
            FormEvent::SubmitFailed => self.is_sending_feedback = false,
        }
        true
    }

    pub fn phase(&self) -> SubmitPhase {
        if self.sent {
            SubmitPhase::Sent
        } else if self.is_sending_feedback {
            SubmitPhase::Sending
        } else {
            SubmitPhase::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle_and_empty() {
        let state = FormState::default();
        assert_eq!(state.screenshot, None);
        assert_eq!(state.comment, "");
        assert!(!state.is_sending_feedback);
        assert!(!state.is_capturing);
        assert_eq!(state.phase(), SubmitPhase::Idle);
    }

    #[test]
    fn capture_then_remove_clears_screenshot() {
        let mut state = FormState::default();
        state.apply(FormEvent::CaptureStarted);
        state.apply(FormEvent::CaptureSucceeded("file://a.png".into()));
        state.apply(FormEvent::RemoveScreenshot);
        assert_eq!(state.screenshot, None);
        assert!(!state.is_capturing);
    }

    #[test]
    fn second_capture_replaces_first() {
        let mut state = FormState::default();
        state.apply(FormEvent::CaptureSucceeded("file://a.png".into()));
        state.apply(FormEvent::CaptureSucceeded("file://b.png".into()));
        assert_eq!(state.screenshot.as_deref(), Some("file://b.png"));
    }

    #[test]
    fn overlapping_capture_is_rejected() {
        let mut state = FormState::default();
        assert!(state.apply(FormEvent::CaptureStarted));
        assert!(!state.apply(FormEvent::CaptureStarted));
        state.apply(FormEvent::CaptureFailed);
        assert!(state.apply(FormEvent::CaptureStarted));
    }

    #[test]
    fn capture_failure_keeps_existing_screenshot() {
        let mut state = FormState::default();
        state.apply(FormEvent::CaptureSucceeded("file://a.png".into()));
        state.apply(FormEvent::CaptureStarted);
        state.apply(FormEvent::CaptureFailed);
        assert_eq!(state.screenshot.as_deref(), Some("file://a.png"));
        assert!(!state.is_capturing);
    }

    #[test]
    fn comment_tracks_last_input() {
        let mut state = FormState::default();
        for text in ["H", "He", "Hel", "Help"] {
            state.apply(FormEvent::CommentChanged(text.into()));
        }
        assert_eq!(state.comment, "Help");
    }

    #[test]
    fn submit_start_is_rejected_while_sending() {
        let mut state = FormState::default();
        assert!(state.apply(FormEvent::SubmitStarted));
        assert!(!state.apply(FormEvent::SubmitStarted));
        assert_eq!(state.phase(), SubmitPhase::Sending);
    }

    #[test]
    fn submit_failure_returns_to_idle() {
        let mut state = FormState::default();
        state.apply(FormEvent::CommentChanged("broken".into()));
        state.apply(FormEvent::SubmitStarted);
        state.apply(FormEvent::SubmitFailed);
        assert_eq!(state.phase(), SubmitPhase::Idle);
        assert_eq!(state.comment, "broken");
        assert!(state.apply(FormEvent::SubmitStarted));
    }

    #[test]
    fn submit_success_is_terminal() {
        let mut state = FormState::default();
        state.apply(FormEvent::SubmitStarted);
        state.apply(FormEvent::SubmitSucceeded);
        assert!(state.is_sending_feedback);
        assert_eq!(state.phase(), SubmitPhase::Sent);
        assert!(!state.apply(FormEvent::SubmitStarted));
    }
}
