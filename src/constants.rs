//! Application constants and configuration

pub const APP_NAME: &str = "Feedback Widget";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3333";
pub const FEEDBACKS_PATH: &str = "/feedbacks";

/// Overrides `api_base_url` from settings.json when set
pub const API_URL_ENV: &str = "FEEDBACK_API_URL";

pub const SCREENSHOT_QUALITY: f32 = 0.8;
pub const SCREENSHOTS_KEPT: usize = 20;

pub const COMMENT_PLACEHOLDER: &str = "Tell us in detail what is happening...";
