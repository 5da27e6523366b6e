use crate::model::{Color4, ShapeDefaults, MIN_SIZE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const SETTINGS_FILE: &str = "site_overlay.json";

/// User settings stored next to the executable. Missing fields fall back to
/// their defaults, so older files keep loading.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window_width: f32,
    pub window_height: f32,
    pub rect_width: f32,
    pub rect_height: f32,
    pub fill: Color4,
    pub stroke: Color4,
    pub stroke_width: f32,
    /// `backgroundColor` written into every exported entry.
    pub export_background: String,
    pub min_zoom: f32,
    pub max_zoom: f32,
}

impl Default for Settings {
    fn default() -> Self {
        let shape = ShapeDefaults::default();
        Self {
            window_width: 1200.0,
            window_height: 800.0,
            rect_width: shape.width,
            rect_height: shape.height,
            fill: shape.fill,
            stroke: shape.stroke,
            stroke_width: shape.stroke_width,
            export_background: Color4::BLACK.to_hex(),
            min_zoom: 0.1,
            max_zoom: 10.0,
        }
    }
}

impl Settings {
    pub fn default_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
            .join(SETTINGS_FILE)
    }

    pub fn load() -> Self {
        Self::load_from(&Self::default_path())
    }

    pub fn load_from(path: &Path) -> Self {
        let data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(_) => {
                log::debug!("no settings at {}, using defaults", path.display());
                return Self::default();
            }
        };
        match serde_json::from_str(&data) {
            Ok(settings) => {
                log::info!("loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("ignoring invalid settings {}: {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn shape_defaults(&self) -> ShapeDefaults {
        ShapeDefaults {
            width: self.rect_width.max(MIN_SIZE),
            height: self.rect_height.max(MIN_SIZE),
            fill: self.fill,
            stroke: self.stroke,
            stroke_width: self.stroke_width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("absent.json"));
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.export_background, "#000000");
        assert_eq!(settings.shape_defaults(), ShapeDefaults::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, r##"{ "rect_width": 40.0, "export_background": "#112233" }"##).unwrap();
        let settings = Settings::load_from(&path);
        assert_eq!(settings.rect_width, 40.0);
        assert_eq!(settings.export_background, "#112233");
        assert_eq!(settings.rect_height, 50.0);
        assert_eq!(settings.shape_defaults().width, 40.0);
    }

    #[test]
    fn test_tiny_rect_size_is_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, r#"{ "rect_width": 0.0, "rect_height": -4.0 }"#).unwrap();
        let defaults = Settings::load_from(&path).shape_defaults();
        assert_eq!(defaults.width, MIN_SIZE);
        assert_eq!(defaults.height, MIN_SIZE);
    }

    #[test]
    fn test_invalid_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, "not json").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
    }
}
