//! Screenshot thumbnail for the form footer

use super::App;
use crate::utils::path_from_uri;
use eframe::egui;
use tracing::warn;

/// Remembers the last reference and what loading it gave, failures included,
/// so a broken file is tried once rather than every frame.
pub struct ThumbnailCache<T> {
    entry: Option<(String, Option<T>)>,
}

impl<T> Default for ThumbnailCache<T> {
    fn default() -> Self {
        Self { entry: None }
    }
}

impl<T: Clone> ThumbnailCache<T> {
    pub fn get_or_load(&mut self, reference: Option<&str>, load: impl FnOnce(&str) -> Option<T>) -> Option<T> {
        let Some(reference) = reference else {
            self.entry = None;
            return None;
        };
        match &self.entry {
            Some((cached, value)) if cached == reference => value.clone(),
            _ => {
                let value = load(reference);
                self.entry = Some((reference.to_string(), value.clone()));
                value
            }
        }
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }
}

impl App {
    /// Texture for the attached screenshot, reloaded when the reference changes
    pub fn screenshot_thumbnail(
        &mut self,
        ctx: &egui::Context,
        reference: Option<&str>,
    ) -> Option<egui::TextureHandle> {
        self.screenshot_texture.get_or_load(reference, |reference| {
            let img = match image::open(path_from_uri(reference)) {
                Ok(img) => img,
                Err(e) => {
                    warn!(error = %e, reference, "Failed to load screenshot thumbnail");
                    return None;
                }
            };
            let rgba = img.thumbnail(160, 160).to_rgba8();
            let size = [rgba.width() as usize, rgba.height() as usize];
            let pixels = rgba.into_raw();
            Some(ctx.load_texture(
                "screenshot_thumbnail",
                egui::ColorImage::from_rgba_unmultiplied(size, &pixels),
                egui::TextureOptions::LINEAR,
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn failed_load_is_not_retried_for_same_reference() {
        let mut cache = ThumbnailCache::<u32>::default();
        let calls = Cell::new(0);
        let failing = |_: &str| {
            calls.set(calls.get() + 1);
            None
        };

        for _ in 0..5 {
            assert_eq!(cache.get_or_load(Some("file://broken.png"), failing), None);
        }
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn new_reference_triggers_a_fresh_load() {
        let mut cache = ThumbnailCache::default();
        let calls = Cell::new(0);
        let load = |r: &str| {
            calls.set(calls.get() + 1);
            Some(r.len())
        };

        assert_eq!(cache.get_or_load(Some("file://a.png"), load), Some(12));
        assert_eq!(cache.get_or_load(Some("file://a.png"), load), Some(12));
        assert_eq!(cache.get_or_load(Some("file://bb.png"), load), Some(13));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn removing_the_screenshot_forgets_the_entry() {
        let mut cache = ThumbnailCache::default();
        let calls = Cell::new(0);
        let load = |_: &str| {
            calls.set(calls.get() + 1);
            Some(1u8)
        };

        cache.get_or_load(Some("file://a.png"), load);
        assert_eq!(cache.get_or_load(None, load), None);
        cache.get_or_load(Some("file://a.png"), load);
        assert_eq!(calls.get(), 2);

        cache.clear();
        cache.get_or_load(Some("file://a.png"), load);
        assert_eq!(calls.get(), 3);
    }
}
