//! Feedback form logic
//!
//! `FeedbackForm` owns the per-visit state behind an `Arc<Mutex<_>>` so the UI
//! thread can read it every frame while capture and submission run as tasks
//! on the app runtime. The lock is never held across an await.

mod state;

pub use state::{FormEvent, FormState, SubmitPhase};

use crate::error::{FeedbackError, Result};
use crate::services::Services;
use crate::types::{CaptureFormat, CaptureOptions, FeedbackPayload, FeedbackType};
use crate::utils::data_uri;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

pub type Callback = Arc<dyn Fn() + Send + Sync>;

/// Hooks supplied by whoever hosts the form
#[derive(Clone)]
pub struct FormCallbacks {
    pub on_feedback_canceled: Callback,
    pub on_feedback_sent: Callback,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// A submission was already in flight
    Ignored,
    Sent,
    Failed(FeedbackError),
}

#[derive(Clone)]
pub struct FeedbackForm {
    feedback_type: FeedbackType,
    state: Arc<Mutex<FormState>>,
    services: Services,
    callbacks: FormCallbacks,
    capture_options: CaptureOptions,
    closed: CancellationToken,
}

impl FeedbackForm {
    pub fn new(
        feedback_type: FeedbackType,
        services: Services,
        callbacks: FormCallbacks,
        capture_options: CaptureOptions,
    ) -> Self {
        debug!(feedback_type = ?feedback_type, "Feedback form opened");
        Self {
            feedback_type,
            state: Arc::new(Mutex::new(FormState::default())),
            services,
            callbacks,
            capture_options,
            closed: CancellationToken::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn feedback_type(&self) -> FeedbackType {
        self.feedback_type
    }

    pub fn snapshot(&self) -> FormState {
        self.lock().clone()
    }

    pub fn set_comment(&self, text: impl Into<String>) {
        self.lock().apply(FormEvent::CommentChanged(text.into()));
    }

    /// Capture the screen and attach it. Failures are logged and leave the
    /// current screenshot (if any) alone. Only one capture runs per form.
    pub async fn capture_screenshot(&self) -> Result<()> {
        if !self.lock().apply(FormEvent::CaptureStarted) {
            debug!("Capture ignored, one is already running");
            return Err(FeedbackError::CaptureBusy);
        }

        let result = tokio::select! {
            _ = self.closed.cancelled() => Err(FeedbackError::CaptureDropped),
            r = self.services.capture.capture(self.capture_options) => r,
        };

        match result {
            Ok(uri) => {
                debug!(uri = %uri, "Screenshot attached");
                self.lock().apply(FormEvent::CaptureSucceeded(uri));
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Screenshot capture failed");
                self.lock().apply(FormEvent::CaptureFailed);
                Err(e)
            }
        }
    }

    pub fn is_capturing(&self) -> bool {
        self.lock().is_capturing
    }

    pub fn remove_screenshot(&self) {
        self.lock().apply(FormEvent::RemoveScreenshot);
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let (comment, screenshot) = {
            let mut state = self.lock();
            if !state.apply(FormEvent::SubmitStarted) {
                debug!("Submit ignored, already sending");
                return SubmitOutcome::Ignored;
            }
            (state.comment.clone(), state.screenshot.clone())
        };

        match self.send(comment, screenshot).await {
            Ok(()) => {
                info!(feedback_type = ?self.feedback_type, "Feedback sent");
                self.lock().apply(FormEvent::SubmitSucceeded);
                // A closed form has no host left to notify
                if self.is_closed() {
                    debug!("Form closed before the send finished, skipping callback");
                } else {
                    (self.callbacks.on_feedback_sent)();
                }
                SubmitOutcome::Sent
            }
            Err(e) => {
                error!(error = %e, "Failed to send feedback");
                self.lock().apply(FormEvent::SubmitFailed);
                SubmitOutcome::Failed(e)
            }
        }
    }

    async fn send(&self, comment: String, screenshot: Option<String>) -> Result<()> {
        let screenshot = match screenshot {
            Some(reference) => {
                let encoded = self.services.files.read_base64(&reference).await?;
                let mime = CaptureFormat::from_reference(&reference).mime();
                Some(data_uri(mime, &encoded))
            }
            None => None,
        };

        let payload = FeedbackPayload {
            feedback_type: self.feedback_type,
            comment,
            screenshot,
        };
        self.services.api.submit(&payload).await
    }

    /// Back control. Fires `on_feedback_canceled` once; later calls do nothing.
    pub fn cancel(&self) {
        if self.is_closed() {
            return;
        }
        debug!("Feedback canceled");
        self.close();
        (self.callbacks.on_feedback_canceled)();
    }

    /// Detach the form from its host. A capture still waiting for a frame is
    /// abandoned and no further callbacks fire.
    pub fn close(&self) {
        self.closed.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.closed.is_cancelled()
    }
}
