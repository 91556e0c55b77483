//! Error types for capture, file access and submission

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedbackError {
    #[error("Screen capture failed: {0}")]
    Capture(String),

    /// The window closed or the form went away before the frame arrived
    #[error("Screen capture was dropped before an image arrived")]
    CaptureDropped,

    #[error("A screen capture is already in progress")]
    CaptureBusy,

    #[error("Image encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server responded with {0}")]
    Status(reqwest::StatusCode),

    #[error("Background task failed: {0}")]
    Join(String),
}

impl From<tokio::task::JoinError> for FeedbackError {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::Join(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FeedbackError>;
