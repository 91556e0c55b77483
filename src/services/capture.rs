//! Window screenshots via eframe's viewport screenshot command
//!
//! `ViewportCapture::capture` asks egui for a screenshot and parks a oneshot
//! sender in the shared `ScreenshotInbox`. The app's update loop hands every
//! `egui::Event::Screenshot` it sees to the inbox, which wakes the waiting
//! captures. The frame is then encoded and written under the cache dir.

use super::ScreenCapture;
use crate::error::{FeedbackError, Result};
use crate::types::{CaptureFormat, CaptureOptions};
use crate::utils::file_uri;
use async_trait::async_trait;
use eframe::egui;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::oneshot;
use tracing::{debug, info};

type Waiter = oneshot::Sender<Arc<egui::ColorImage>>;

/// Captures waiting for the next screenshot event
#[derive(Clone, Default)]
pub struct ScreenshotInbox {
    waiting: Arc<Mutex<Vec<Waiter>>>,
}

impl ScreenshotInbox {
    fn register(&self) -> oneshot::Receiver<Arc<egui::ColorImage>> {
        let (tx, rx) = oneshot::channel();
        self.waiting
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        rx
    }

    /// Hand a finished frame to every pending capture. Returns how many received it.
    pub fn deliver(&self, image: Arc<egui::ColorImage>) -> usize {
        let waiters: Vec<Waiter> = self
            .waiting
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect();
        waiters
            .into_iter()
            .filter(|tx| !tx.is_closed())
            .map(|tx| tx.send(image.clone()).is_ok())
            .filter(|sent| *sent)
            .count()
    }

    pub fn is_waiting(&self) -> bool {
        !self
            .waiting
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

pub struct ViewportCapture {
    ctx: egui::Context,
    inbox: ScreenshotInbox,
    output_dir: PathBuf,
}

impl ViewportCapture {
    pub fn new(ctx: egui::Context, inbox: ScreenshotInbox, output_dir: PathBuf) -> Self {
        Self {
            ctx,
            inbox,
            output_dir,
        }
    }
}

#[async_trait]
impl ScreenCapture for ViewportCapture {
    async fn capture(&self, options: CaptureOptions) -> Result<String> {
        let rx = self.inbox.register();
        self.ctx
            .send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
        self.ctx.request_repaint();
        debug!(format = ?options.format, quality = options.quality, "Screenshot requested");

        let image = rx.await.map_err(|_| FeedbackError::CaptureDropped)?;
        let dir = self.output_dir.clone();
        let path =
            tokio::task::spawn_blocking(move || write_screenshot(&image, options, &dir)).await??;

        info!(path = %path.display(), "Screenshot saved");
        Ok(file_uri(&path))
    }
}

/// Encode an egui frame into the requested image format
pub fn encode_image(image: &egui::ColorImage, options: CaptureOptions) -> Result<Vec<u8>> {
    let [w, h] = image.size;
    if w == 0 || h == 0 {
        return Err(FeedbackError::Capture("empty frame".into()));
    }
    let (w, h) = (w as u32, h as u32);
    let rgba: Vec<u8> = image
        .pixels
        .iter()
        .flat_map(|p| p.to_srgba_unmultiplied())
        .collect();

    let mut out = Vec::new();
    match options.format {
        // Lossless; quality has no effect
        CaptureFormat::Png => {
            PngEncoder::new_with_quality(&mut out, CompressionType::Default, FilterType::Adaptive)
                .write_image(&rgba, w, h, ExtendedColorType::Rgba8)?;
        }
        CaptureFormat::Jpeg => {
            let buffer = image::RgbaImage::from_raw(w, h, rgba)
                .ok_or_else(|| FeedbackError::Capture("pixel buffer size mismatch".into()))?;
            let rgb = image::DynamicImage::ImageRgba8(buffer).to_rgb8();
            let quality = (options.quality.clamp(0.0, 1.0) * 100.0).round().max(1.0) as u8;
            JpegEncoder::new_with_quality(&mut out, quality)
                .write_image(rgb.as_raw(), w, h, ExtendedColorType::Rgb8)?;
        }
    }
    Ok(out)
}

fn write_screenshot(
    image: &egui::ColorImage,
    options: CaptureOptions,
    dir: &Path,
) -> Result<PathBuf> {
    let bytes = encode_image(image, options)?;
    std::fs::create_dir_all(dir)?;
    let name = format!(
        "screenshot-{}.{}",
        chrono::Local::now().format("%Y%m%d-%H%M%S-%3f"),
        options.format.extension()
    );
    let path = dir.join(name);
    std::fs::write(&path, bytes)?;
    Ok(path)
}
