//! Decoding the background image.

use crate::error::{OverlayError, Result};
use eframe::egui;
use image::RgbaImage;
use std::path::{Path, PathBuf};

pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "tiff"];

pub struct LoadedImage {
    pub path: PathBuf,
    pub pixels: RgbaImage,
}

impl LoadedImage {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width() as f32, self.height() as f32)
    }

    pub fn to_color_image(&self) -> egui::ColorImage {
        let size = [self.width() as usize, self.height() as usize];
        egui::ColorImage::from_rgba_unmultiplied(size, self.pixels.as_flat_samples().as_slice())
    }
}

pub fn load(path: &Path) -> Result<LoadedImage> {
    let decoded = image::open(path).map_err(|source| OverlayError::ImageDecode {
        path: path.to_path_buf(),
        source,
    })?;
    let pixels = decoded.to_rgba8();
    log::info!(
        "loaded {} ({}x{})",
        path.display(),
        pixels.width(),
        pixels.height()
    );
    Ok(LoadedImage {
        path: path.to_path_buf(),
        pixels,
    })
}

/// Ask the user for an image file. `None` when the dialog is dismissed.
pub fn pick_file() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .add_filter("Images", IMAGE_EXTENSIONS)
        .pick_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.png");
        RgbaImage::from_pixel(8, 4, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.size(), (8.0, 4.0));
        assert_eq!(loaded.to_color_image().size, [8, 4]);
    }

    #[test]
    fn test_load_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        assert!(matches!(load(&path), Err(OverlayError::ImageDecode { .. })));
        assert!(load(&dir.path().join("missing.png")).is_err());
    }
}
