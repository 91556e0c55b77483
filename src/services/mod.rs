//! Collaborators the feedback form talks to
//!
//! Each capability sits behind a small async trait so the form logic can be
//! driven by mocks in tests and by the real window/filesystem/HTTP stack in
//! the app.

mod api;
mod capture;
mod files;

pub use api::HttpFeedbackApi;
pub use capture::{ScreenshotInbox, ViewportCapture};
pub use files::FsReader;

use crate::error::Result;
use crate::types::{CaptureOptions, FeedbackPayload};
use async_trait::async_trait;
use std::sync::Arc;

/// Grabs the current screen and returns a file reference (URI) to the image
#[async_trait]
pub trait ScreenCapture: Send + Sync {
    async fn capture(&self, options: CaptureOptions) -> Result<String>;
}

/// Reads a file reference back as a base64 string
#[async_trait]
pub trait FileReader: Send + Sync {
    async fn read_base64(&self, reference: &str) -> Result<String>;
}

/// Delivers a feedback payload to the backend
#[async_trait]
pub trait FeedbackApi: Send + Sync {
    async fn submit(&self, payload: &FeedbackPayload) -> Result<()>;
}

/// The set of collaborators handed to each form
#[derive(Clone)]
pub struct Services {
    pub capture: Arc<dyn ScreenCapture>,
    pub files: Arc<dyn FileReader>,
    pub api: Arc<dyn FeedbackApi>,
}
