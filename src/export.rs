//! JSON export of the overlay, in collection order.

use crate::error::{OverlayError, Result};
use crate::model::{Rectangle, ShapeCollection};
use serde::Serialize;
use std::path::Path;

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportStyle {
    pub top: String,
    pub left: String,
    pub rotate: String,
    pub height: String,
    pub width: String,
    pub background_color: String,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportEntry {
    pub style: ExportStyle,
    pub available: bool,
    pub unit: i64,
    /// 1-based position in the collection, independent of `unit`.
    pub square_num: usize,
}

impl ExportEntry {
    fn from_rect(rect: &Rectangle, index: usize, background: &str) -> Self {
        Self {
            style: ExportStyle {
                top: format!("{}px", rect.y),
                left: format!("{}px", rect.x),
                rotate: format!("{}deg", rect.rotation),
                height: format!("{}px", rect.height),
                width: format!("{}px", rect.width),
                background_color: background.to_owned(),
            },
            available: false,
            unit: rect.unit,
            square_num: index + 1,
        }
    }
}

pub fn entries(shapes: &ShapeCollection, background: &str) -> Vec<ExportEntry> {
    shapes
        .iter()
        .enumerate()
        .map(|(i, r)| ExportEntry::from_rect(r, i, background))
        .collect()
}

/// Pretty-printed JSON array with two-space indentation.
pub fn to_json(shapes: &ShapeCollection, background: &str) -> Result<String> {
    Ok(serde_json::to_string_pretty(&entries(shapes, background))?)
}

pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text)?;
    log::info!("copied {} bytes of export data to clipboard", text.len());
    Ok(())
}

pub fn write_file(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text).map_err(|source| OverlayError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("exported to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ShapeDefaults;

    fn collection() -> ShapeCollection {
        let defaults = ShapeDefaults::default();
        let mut shapes = ShapeCollection::new();
        let mut r1 = Rectangle::new(12.5, 40.0, 3, &defaults);
        r1.rotation = -15.0;
        shapes.add(r1);
        shapes.add(Rectangle::new(0.0, 0.0, 1, &defaults));
        shapes
    }

    #[test]
    fn test_square_num_follows_collection_order() {
        let out = entries(&collection(), "#000000");
        assert_eq!(out.len(), 2);
        assert_eq!((out[0].unit, out[0].square_num), (3, 1));
        assert_eq!((out[1].unit, out[1].square_num), (1, 2));
    }

    #[test]
    fn test_style_strings() {
        let out = entries(&collection(), "#000000");
        let style = &out[0].style;
        assert_eq!(style.top, "40px");
        assert_eq!(style.left, "12.5px");
        assert_eq!(style.rotate, "-15deg");
        assert_eq!(style.height, "50px");
        assert_eq!(style.width, "100px");
        assert_eq!(style.background_color, "#000000");
        assert!(!out[0].available);
    }

    #[test]
    fn test_json_shape() {
        let json = to_json(&collection(), "#000000").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let first = &value[0];
        assert_eq!(first["style"]["backgroundColor"], "#000000");
        assert_eq!(first["style"]["top"], "40px");
        assert_eq!(first["available"], false);
        assert_eq!(first["unit"], 3);
        assert_eq!(first["squareNum"], 1);
        assert_eq!(value[1]["squareNum"], 2);
        assert!(json.contains("\n  {"));
    }

    #[test]
    fn test_empty_collection() {
        let json = to_json(&ShapeCollection::new(), "#000000").unwrap();
        assert_eq!(json, "[]");
    }

    #[test]
    fn test_write_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overlay.json");
        write_file(&path, "[]").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");

        let missing = dir.path().join("nope").join("overlay.json");
        assert!(matches!(write_file(&missing, "[]"), Err(OverlayError::Io { .. })));
    }
}
