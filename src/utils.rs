//! Utility functions

use crate::constants::APP_NAME;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

// Chat bubble, square viewBox, used for window/taskbar icons
pub const ICON_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 256 256"><rect width="256" height="256" rx="56" fill="#09090b"/><path fill="#2dd4bf" d="M128 40C74.98 40 32 77.61 32 124c0 22.3 9.94 42.57 26.16 57.61L48 216l42.9-16.09A108.6 108.6 0 0 0 128 208c53.02 0 96-37.61 96-84S181.02 40 128 40Z"/><circle cx="88" cy="124" r="12" fill="#09090b"/><circle cx="128" cy="124" r="12" fill="#09090b"/><circle cx="168" cy="124" r="12" fill="#09090b"/></svg>"##;

/// Rasterize the icon SVG to a square image (for window/taskbar icons).
pub fn rasterize_icon(size: u32) -> Option<(Vec<u8>, u32, u32)> {
    let tree = resvg::usvg::Tree::from_str(ICON_SVG, &resvg::usvg::Options::default()).ok()?;
    let scale = size as f32 / tree.size().width();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size, size)?;
    resvg::render(
        &tree,
        resvg::usvg::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Some((premul_to_straight(&pixmap), size, size))
}

fn premul_to_straight(pixmap: &resvg::tiny_skia::Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let a = p.alpha();
            if a == 0 {
                [0, 0, 0, 0]
            } else {
                let r = (p.red() as u16 * 255 / a as u16) as u8;
                let g = (p.green() as u16 * 255 / a as u16) as u8;
                let b = (p.blue() as u16 * 255 / a as u16) as u8;
                [r, g, b, a]
            }
        })
        .collect()
}

/// Get the app data directory path
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Where captured screenshots are written
pub fn get_screenshots_dir() -> PathBuf {
    get_data_dir().join("cache").join("screenshots")
}

pub fn file_uri(path: &Path) -> String {
    format!("file://{}", path.display())
}

/// Accepts `file://` URIs as well as plain paths
pub fn path_from_uri(reference: &str) -> PathBuf {
    PathBuf::from(reference.strip_prefix("file://").unwrap_or(reference))
}

/// Build a `data:` URI from a mime type and base64 payload
pub fn data_uri(mime: &str, base64: &str) -> String {
    format!("data:{};base64,{}", mime, base64)
}

/// Delete all but the newest `keep` screenshots. Returns how many were removed.
pub fn prune_screenshots(dir: &Path, keep: usize) -> usize {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return 0,
    };

    let mut shots: Vec<(std::time::SystemTime, PathBuf)> = entries
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_name()
                .to_str()
                .is_some_and(|n| n.starts_with("screenshot-"))
        })
        .filter_map(|e| {
            let modified = e.metadata().ok()?.modified().ok()?;
            Some((modified, e.path()))
        })
        .collect();

    if shots.len() <= keep {
        return 0;
    }

    // Newest first; names embed the timestamp so they break ties
    shots.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| b.1.cmp(&a.1)));

    let mut removed = 0;
    for (_, path) in shots.into_iter().skip(keep) {
        match std::fs::remove_file(&path) {
            Ok(()) => removed += 1,
            Err(e) => warn!(error = %e, path = %path.display(), "Failed to remove old screenshot"),
        }
    }
    debug!(removed, "Pruned screenshot cache");
    removed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uri_round_trips_path() {
        let path = Path::new("/tmp/shots/screenshot-1.png");
        assert_eq!(file_uri(path), "file:///tmp/shots/screenshot-1.png");
        assert_eq!(path_from_uri(&file_uri(path)), path);
        assert_eq!(path_from_uri("/plain/path.png"), Path::new("/plain/path.png"));
    }

    #[test]
    fn data_uri_format() {
        assert_eq!(data_uri("image/png", "AAAA"), "data:image/png;base64,AAAA");
    }

    #[test]
    fn prune_keeps_newest_and_ignores_other_files() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..5 {
            std::fs::write(dir.path().join(format!("screenshot-{}.png", i)), b"x").unwrap();
        }
        std::fs::write(dir.path().join("notes.txt"), b"keep me").unwrap();

        assert_eq!(prune_screenshots(dir.path(), 2), 3);

        let shots = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with("screenshot-"))
            .count();
        assert_eq!(shots, 2);
        assert!(dir.path().join("notes.txt").exists());
    }

    #[test]
    fn prune_missing_dir_is_noop() {
        assert_eq!(prune_screenshots(Path::new("/definitely/not/here"), 1), 0);
    }

    #[test]
    fn icon_rasterizes_square() {
        let (pixels, w, h) = rasterize_icon(32).unwrap();
        assert_eq!((w, h), (32, 32));
        assert_eq!(pixels.len(), 32 * 32 * 4);
    }
}
