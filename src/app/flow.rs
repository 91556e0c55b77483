//! Which screen the widget shows and how form callbacks move between them

use crate::form::FeedbackForm;
use tracing::debug;

pub enum Step {
    ChooseType,
    Form { id: u64, form: FeedbackForm },
    Sent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetEventKind {
    Canceled,
    Sent,
}

/// A form callback, tagged with the form that raised it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetEvent {
    pub form_id: u64,
    pub kind: WidgetEventKind,
}

pub struct Flow {
    step: Step,
    next_id: u64,
}

impl Default for Flow {
    fn default() -> Self {
        Self {
            step: Step::ChooseType,
            next_id: 1,
        }
    }
}

impl Flow {
    pub fn step(&self) -> &Step {
        &self.step
    }

    /// Id the next opened form gets. Callbacks built for it carry this id.
    pub fn next_form_id(&self) -> u64 {
        self.next_id
    }

    pub fn open(&mut self, form: FeedbackForm) -> u64 {
        self.close_current();
        let id = self.next_id;
        self.next_id += 1;
        self.step = Step::Form { id, form };
        id
    }

    /// Apply a callback event. Returns true when the screen changed; events
    /// from forms that are no longer showing are dropped.
    pub fn handle(&mut self, event: WidgetEvent) -> bool {
        let Step::Form { id, form } = &self.step else {
            debug!(event = ?event, "Widget event with no open form, ignored");
            return false;
        };
        if *id != event.form_id {
            debug!(event = ?event, current = id, "Stale widget event, ignored");
            return false;
        }

        form.close();
        self.step = match event.kind {
            WidgetEventKind::Canceled => Step::ChooseType,
            WidgetEventKind::Sent => Step::Sent,
        };
        true
    }

    /// Back to the type picker from wherever we are
    pub fn start_over(&mut self) {
        self.close_current();
        self.step = Step::ChooseType;
    }

    fn close_current(&self) {
        if let Step::Form { form, .. } = &self.step {
            form.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FeedbackError, Result};
    use crate::form::{FormCallbacks, SubmitOutcome};
    use crate::services::{FeedbackApi, FileReader, ScreenCapture, Services};
    use crate::types::{CaptureOptions, FeedbackPayload, FeedbackType};
    use async_trait::async_trait;
    use std::sync::mpsc::{self, Receiver, Sender};
    use std::sync::Arc;
    use tokio::sync::Notify;

    struct NoCapture;

    #[async_trait]
    impl ScreenCapture for NoCapture {
        async fn capture(&self, _options: CaptureOptions) -> Result<String> {
            Err(FeedbackError::Capture("no display".into()))
        }
    }

    struct NoFiles;

    #[async_trait]
    impl FileReader for NoFiles {
        async fn read_base64(&self, _reference: &str) -> Result<String> {
            Ok(String::new())
        }
    }

    /// Accepts every payload once `gate` is notified
    struct GatedApi {
        gate: Arc<Notify>,
    }

    #[async_trait]
    impl FeedbackApi for GatedApi {
        async fn submit(&self, _payload: &FeedbackPayload) -> Result<()> {
            self.gate.notified().await;
            Ok(())
        }
    }

    fn open_form(flow: &mut Flow, tx: &Sender<WidgetEvent>, api: Arc<GatedApi>) -> FeedbackForm {
        let form_id = flow.next_form_id();
        let event = |kind| {
            let tx = tx.clone();
            Arc::new(move || {
                tx.send(WidgetEvent { form_id, kind }).ok();
            }) as crate::form::Callback
        };
        let callbacks = FormCallbacks {
            on_feedback_canceled: event(WidgetEventKind::Canceled),
            on_feedback_sent: event(WidgetEventKind::Sent),
        };
        let services = Services {
            capture: Arc::new(NoCapture),
            files: Arc::new(NoFiles),
            api,
        };
        let form = FeedbackForm::new(FeedbackType::Idea, services, callbacks, CaptureOptions::default());
        assert_eq!(flow.open(form.clone()), form_id);
        form
    }

    fn drain(flow: &mut Flow, rx: &Receiver<WidgetEvent>) -> usize {
        rx.try_iter().filter(|e| flow.handle(*e)).count()
    }

    fn gated_api() -> (Arc<GatedApi>, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        (Arc::new(GatedApi { gate: gate.clone() }), gate)
    }

    #[tokio::test]
    async fn sent_callback_shows_success_screen() {
        let (tx, rx) = mpsc::channel();
        let mut flow = Flow::default();
        let (api, gate) = gated_api();
        let form = open_form(&mut flow, &tx, api);

        gate.notify_one();
        assert!(matches!(form.submit().await, SubmitOutcome::Sent));
        assert_eq!(drain(&mut flow, &rx), 1);
        assert!(matches!(flow.step(), Step::Sent));
        assert!(form.is_closed());

        flow.start_over();
        assert!(matches!(flow.step(), Step::ChooseType));
    }

    #[tokio::test]
    async fn back_returns_to_type_picker() {
        let (tx, rx) = mpsc::channel();
        let mut flow = Flow::default();
        let (api, _gate) = gated_api();
        let form = open_form(&mut flow, &tx, api);

        form.cancel();
        assert_eq!(drain(&mut flow, &rx), 1);
        assert!(matches!(flow.step(), Step::ChooseType));
    }

    #[tokio::test]
    async fn late_send_from_canceled_form_keeps_new_form_open() {
        let (tx, rx) = mpsc::channel();
        let mut flow = Flow::default();
        let (api, gate) = gated_api();

        let old = open_form(&mut flow, &tx, api.clone());
        let pending = {
            let old = old.clone();
            tokio::spawn(async move { old.submit().await })
        };
        while !old.snapshot().is_sending_feedback {
            tokio::task::yield_now().await;
        }
        old.cancel();
        drain(&mut flow, &rx);

        let fresh = open_form(&mut flow, &tx, api);
        fresh.set_comment("second visit");
        gate.notify_one();
        assert!(matches!(pending.await.unwrap(), SubmitOutcome::Sent));

        assert_eq!(drain(&mut flow, &rx), 0);
        assert!(matches!(flow.step(), Step::Form { .. }));
        assert!(!fresh.is_closed());
    }

    #[test]
    fn events_tagged_with_old_id_are_dropped() {
        let mut flow = Flow::default();
        let stale = WidgetEvent {
            form_id: 7,
            kind: WidgetEventKind::Sent,
        };
        assert!(!flow.handle(stale));
        assert!(matches!(flow.step(), Step::ChooseType));
    }

    #[tokio::test]
    async fn event_for_other_form_id_is_dropped() {
        let (tx, _rx) = mpsc::channel();
        let mut flow = Flow::default();
        let (api, _gate) = gated_api();
        open_form(&mut flow, &tx, api.clone());
        let current = open_form(&mut flow, &tx, api);

        let stale = WidgetEvent {
            form_id: 1,
            kind: WidgetEventKind::Sent,
        };
        assert!(!flow.handle(stale));
        assert!(matches!(flow.step(), Step::Form { id: 2, .. }));
        assert!(!current.is_closed());
    }

    #[tokio::test]
    async fn opening_a_new_form_closes_the_previous_one() {
        let (tx, _rx) = mpsc::channel();
        let mut flow = Flow::default();
        let (api, _gate) = gated_api();
        let first = open_form(&mut flow, &tx, api.clone());
        open_form(&mut flow, &tx, api);
        assert!(first.is_closed());
    }
}
