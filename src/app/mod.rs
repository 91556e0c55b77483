//! App module - contains the main application state and logic

mod flow;
mod thumbnails;
mod toast;
mod views;

use flow::{Flow, WidgetEvent, WidgetEventKind};
use thumbnails::ThumbnailCache;

use crate::error::FeedbackError;
use crate::form::{FeedbackForm, FormCallbacks, SubmitOutcome};
use crate::services::{FsReader, HttpFeedbackApi, ScreenshotInbox, Services, ViewportCapture};
use crate::settings::Settings;
use crate::theme;
use crate::types::FeedbackType;
use crate::utils::{get_screenshots_dir, prune_screenshots};
use eframe::egui;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use tracing::{debug, info};

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) flow: Flow,
    pub(crate) settings: Settings,
    pub(crate) data_dir: PathBuf,
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) services: Services,
    pub(crate) screenshot_inbox: ScreenshotInbox,
    pub(crate) widget_tx: Sender<WidgetEvent>,
    pub(crate) widget_rx: Receiver<WidgetEvent>,
    pub(crate) notice_tx: Sender<String>,
    pub(crate) notice_rx: Receiver<String>,
    // Form view
    pub(crate) comment_buffer: String,
    pub(crate) screenshot_texture: ThumbnailCache<egui::TextureHandle>,
    // Toast notification
    pub(crate) toast_message: Option<String>,
    pub(crate) toast_start: Option<std::time::Instant>,
    // Window
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        data_dir: PathBuf,
    ) -> std::io::Result<Self> {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Add Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        let screenshots_dir = get_screenshots_dir();
        std::fs::create_dir_all(&screenshots_dir).ok();
        prune_screenshots(&screenshots_dir, settings.keep_screenshots);

        let api_url = settings.effective_api_url();
        let screenshot_inbox = ScreenshotInbox::default();
        let services = Services {
            capture: Arc::new(ViewportCapture::new(
                cc.egui_ctx.clone(),
                screenshot_inbox.clone(),
                screenshots_dir,
            )),
            files: Arc::new(FsReader),
            api: Arc::new(HttpFeedbackApi::new(api_url.clone())),
        };
        info!(api = %api_url, "Feedback backend configured");

        let (widget_tx, widget_rx) = mpsc::channel();
        let (notice_tx, notice_rx) = mpsc::channel();

        Ok(Self {
            flow: Flow::default(),
            settings,
            data_dir,
            runtime: tokio::runtime::Runtime::new()?,
            services,
            screenshot_inbox,
            widget_tx,
            widget_rx,
            notice_tx,
            notice_rx,
            comment_buffer: String::new(),
            screenshot_texture: ThumbnailCache::default(),
            toast_message: None,
            toast_start: None,
            window_pos: None,
            window_size: None,
            needs_center: false,
        })
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            ..self.settings.clone()
        };
        settings.save(&self.data_dir);
    }

    // ========================================================================
    // WIDGET FLOW
    // ========================================================================

    pub fn open_form(&mut self, ctx: &egui::Context, feedback_type: FeedbackType) {
        let form_id = self.flow.next_form_id();
        let callbacks = FormCallbacks {
            on_feedback_canceled: self.widget_callback(ctx, form_id, WidgetEventKind::Canceled),
            on_feedback_sent: self.widget_callback(ctx, form_id, WidgetEventKind::Sent),
        };
        let form = FeedbackForm::new(
            feedback_type,
            self.services.clone(),
            callbacks,
            self.settings.capture_options(),
        );
        self.reset_form_view();
        self.flow.open(form);
    }

    fn widget_callback(&self, ctx: &egui::Context, form_id: u64, kind: WidgetEventKind) -> crate::form::Callback {
        let tx = self.widget_tx.clone();
        let ctx = ctx.clone();
        Arc::new(move || {
            tx.send(WidgetEvent { form_id, kind }).ok();
            ctx.request_repaint();
        })
    }

    /// Apply callback events raised since the last frame
    pub fn poll_widget_events(&mut self) {
        while let Ok(event) = self.widget_rx.try_recv() {
            debug!(event = ?event, "Widget event");
            if self.flow.handle(event) {
                self.reset_form_view();
            }
        }
    }

    fn reset_form_view(&mut self) {
        self.comment_buffer.clear();
        self.screenshot_texture.clear();
    }

    /// Hand screenshot frames from this frame's input to waiting captures
    pub fn forward_screenshots(&self, ctx: &egui::Context) {
        let frames: Vec<Arc<egui::ColorImage>> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|e| match e {
                    egui::Event::Screenshot { image, .. } => Some(image.clone()),
                    _ => None,
                })
                .collect()
        });
        for frame in frames {
            let delivered = self.screenshot_inbox.deliver(frame);
            debug!(delivered, "Screenshot frame received");
        }
        // Keep frames coming until the requested screenshot shows up
        if self.screenshot_inbox.is_waiting() {
            ctx.request_repaint();
        }
    }

    // ========================================================================
    // FORM ACTIONS
    // ========================================================================

    pub fn spawn_capture(&self, ctx: &egui::Context, form: &FeedbackForm) {
        if form.is_capturing() {
            return;
        }
        let form = form.clone();
        let ctx = ctx.clone();
        let notices = self.notice_tx.clone();
        let surface = self.settings.surface_errors;

        self.runtime.spawn(async move {
            if let Err(e) = form.capture_screenshot().await {
                let quiet = matches!(e, FeedbackError::CaptureDropped | FeedbackError::CaptureBusy);
                if surface && !quiet {
                    notices.send(format!("Couldn't take a screenshot: {}", e)).ok();
                }
            }
            ctx.request_repaint();
        });
    }

    pub fn spawn_submit(&self, ctx: &egui::Context, form: &FeedbackForm) {
        let form = form.clone();
        let ctx = ctx.clone();
        let notices = self.notice_tx.clone();
        let surface = self.settings.surface_errors;

        self.runtime.spawn(async move {
            if let SubmitOutcome::Failed(e) = form.submit().await {
                if surface {
                    notices.send(format!("Couldn't send feedback: {}", e)).ok();
                }
            }
            ctx.request_repaint();
        });
    }
}
