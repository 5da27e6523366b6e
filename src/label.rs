//! Helpers for the unit label editor overlay.

use crate::model::Rectangle;
use eframe::egui;

/// Gap between the rectangle's bottom edge and the editor field.
pub const LABEL_GAP: f32 = 10.0;

/// Parse an edited label the way lot numbers are usually typed: leading
/// whitespace, an optional sign, then digits. Anything after the digits is
/// ignored (`"12 lots"` is 12, `"4.5"` is 4). A zero result, no digits at all,
/// or a number that does not fit in `i64` yields `None`, so the unit is kept.
pub fn parse_unit(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let sign_len = usize::from(text.starts_with(['+', '-']));
    let digits_len = text[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }
    let unit: i64 = text[..sign_len + digits_len].parse().ok()?;
    (unit != 0).then_some(unit)
}

/// Image-space point where the editor field is placed: below and to the
/// right of the rectangle's unrotated box.
pub fn anchor(rect: &Rectangle) -> egui::Pos2 {
    egui::pos2(rect.x + rect.width, rect.y + rect.height + LABEL_GAP)
}
