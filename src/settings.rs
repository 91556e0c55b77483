//! User settings stored as settings.json in the app data directory

use crate::constants::{API_URL_ENV, DEFAULT_API_BASE_URL, SCREENSHOTS_KEPT, SCREENSHOT_QUALITY};
use crate::types::{CaptureFormat, CaptureOptions};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    // Backend
    pub api_base_url: String,

    // Failures are only logged unless this is on
    pub surface_errors: bool,

    // Screenshots
    pub screenshot_format: CaptureFormat,
    pub screenshot_quality: f32,
    pub keep_screenshots: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            surface_errors: false,
            screenshot_format: CaptureFormat::Png,
            screenshot_quality: SCREENSHOT_QUALITY,
            keep_screenshots: SCREENSHOTS_KEPT,
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("settings.json");
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join("settings.json");
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }

    /// Backend URL to talk to. The environment override wins for this run
    /// only and never ends up in settings.json.
    pub fn effective_api_url(&self) -> String {
        self.api_url_with(std::env::var(API_URL_ENV).ok())
    }

    fn api_url_with(&self, env_override: Option<String>) -> String {
        match env_override {
            Some(url) if !url.trim().is_empty() => {
                debug!(url = %url, "API URL overridden from environment");
                url.trim().to_string()
            }
            _ => self.api_base_url.clone(),
        }
    }

    pub fn capture_options(&self) -> CaptureOptions {
        CaptureOptions {
            format: self.screenshot_format,
            quality: self.screenshot_quality.clamp(0.0, 1.0),
        }
    }
}
