//! Common types and data structures

use serde::{Deserialize, Serialize};

/// Feedback category, sent as `"BUG"`, `"IDEA"` or `"OTHER"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FeedbackType {
    Bug,
    Idea,
    Other,
}

/// Display metadata for a feedback type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackTypeInfo {
    pub title: &'static str,
    pub icon: &'static str,
}

impl FeedbackType {
    pub const ALL: [FeedbackType; 3] = [FeedbackType::Bug, FeedbackType::Idea, FeedbackType::Other];

    pub fn info(self) -> FeedbackTypeInfo {
        match self {
            FeedbackType::Bug => FeedbackTypeInfo {
                title: "Problem",
                icon: egui_phosphor::regular::BUG,
            },
            FeedbackType::Idea => FeedbackTypeInfo {
                title: "Idea",
                icon: egui_phosphor::regular::LIGHTBULB,
            },
            FeedbackType::Other => FeedbackTypeInfo {
                title: "Other",
                icon: egui_phosphor::regular::CHAT_CIRCLE_DOTS,
            },
        }
    }
}

/// Request body for `POST /feedbacks`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackPayload {
    #[serde(rename = "type")]
    pub feedback_type: FeedbackType,
    pub comment: String,
    /// `data:<mime>;base64,...` URI; left out entirely when nothing was captured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,
}

/// Image encoding used for captured screenshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CaptureFormat {
    #[default]
    Png,
    Jpeg,
}

impl CaptureFormat {
    pub fn extension(self) -> &'static str {
        match self {
            CaptureFormat::Png => "png",
            CaptureFormat::Jpeg => "jpg",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            CaptureFormat::Png => "image/png",
            CaptureFormat::Jpeg => "image/jpeg",
        }
    }

    /// Guess the format from a file reference's extension, defaulting to PNG
    pub fn from_reference(reference: &str) -> Self {
        let lower = reference.to_ascii_lowercase();
        if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
            CaptureFormat::Jpeg
        } else {
            CaptureFormat::Png
        }
    }
}

/// Options passed to the screen-capture collaborator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureOptions {
    pub format: CaptureFormat,
    /// 0.0..=1.0; only affects lossy formats
    pub quality: f32,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            format: CaptureFormat::Png,
            quality: crate::constants::SCREENSHOT_QUALITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn feedback_type_serializes_uppercase() {
        assert_eq!(serde_json::to_value(FeedbackType::Bug).unwrap(), json!("BUG"));
        assert_eq!(serde_json::to_value(FeedbackType::Idea).unwrap(), json!("IDEA"));
        assert_eq!(serde_json::to_value(FeedbackType::Other).unwrap(), json!("OTHER"));
    }

    #[test]
    fn payload_without_screenshot_omits_field() {
        let payload = FeedbackPayload {
            feedback_type: FeedbackType::Idea,
            comment: "dark mode please".into(),
            screenshot: None,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value, json!({ "type": "IDEA", "comment": "dark mode please" }));
        assert!(!value.to_string().contains("undefined"));
    }

    #[test]
    fn payload_with_screenshot_uses_type_key() {
        let payload = FeedbackPayload {
            feedback_type: FeedbackType::Bug,
            comment: "crash".into(),
            screenshot: Some("data:image/png;base64,AAAA".into()),
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "type": "BUG",
                "comment": "crash",
                "screenshot": "data:image/png;base64,AAAA"
            })
        );
    }

    #[test]
    fn every_type_has_a_title() {
        for ty in FeedbackType::ALL {
            assert!(!ty.info().title.is_empty());
        }
    }

    #[test]
    fn capture_format_from_reference() {
        assert_eq!(CaptureFormat::from_reference("file:///tmp/a.JPG"), CaptureFormat::Jpeg);
        assert_eq!(CaptureFormat::from_reference("file:///tmp/a.png"), CaptureFormat::Png);
        assert_eq!(CaptureFormat::from_reference("shot"), CaptureFormat::Png);
    }
}
