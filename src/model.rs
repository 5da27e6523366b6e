use eframe::egui;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Colors ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color4 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color4 {
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_egui(self) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(
            (self.r * 255.0) as u8,
            (self.g * 255.0) as u8,
            (self.b * 255.0) as u8,
            (self.a * 255.0) as u8,
        )
    }

    /// `#rrggbb`, alpha dropped.
    pub fn to_hex(self) -> String {
        let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", c(self.r), c(self.g), c(self.b))
    }
}

// ── Rectangle ───────────────────────────────────────────────────────────────

pub type RectId = Uuid;

/// Rectangles may never be resized below this many pixels in either axis.
pub const MIN_SIZE: f32 = 5.0;

/// Presentation and size used for freshly created rectangles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeDefaults {
    pub width: f32,
    pub height: f32,
    pub fill: Color4,
    pub stroke: Color4,
    pub stroke_width: f32,
}

impl Default for ShapeDefaults {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 50.0,
            fill: Color4::rgba(0.0, 0.0, 0.0, 0.5),
            stroke: Color4::BLACK,
            stroke_width: 2.0,
        }
    }
}

/// A labeled region over the image.
///
/// `(x, y)` is the top-left corner before rotation and also the pivot the
/// rotation (degrees, clockwise) is applied around.
#[derive(Clone, Debug, PartialEq)]
pub struct Rectangle {
    pub id: RectId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub rotation: f32,
    pub fill: Color4,
    pub stroke: Color4,
    pub stroke_width: f32,
    pub unit: i64,
}

impl Rectangle {
    pub fn new(x: f32, y: f32, unit: i64, defaults: &ShapeDefaults) -> Self {
        Self {
            id: Uuid::new_v4(),
            x,
            y,
            width: defaults.width,
            height: defaults.height,
            rotation: 0.0,
            fill: defaults.fill,
            stroke: defaults.stroke,
            stroke_width: defaults.stroke_width,
            unit,
        }
    }

    /// Map a point from the rectangle's own frame (origin at top-left,
    /// axes along its edges) to image space.
    pub fn local_to_image(&self, local: egui::Vec2) -> egui::Pos2 {
        let (sin, cos) = self.rotation.to_radians().sin_cos();
        egui::pos2(
            self.x + local.x * cos - local.y * sin,
            self.y + local.x * sin + local.y * cos,
        )
    }

    pub fn image_to_local(&self, p: egui::Pos2) -> egui::Vec2 {
        let (sin, cos) = self.rotation.to_radians().sin_cos();
        let dx = p.x - self.x;
        let dy = p.y - self.y;
        egui::vec2(dx * cos + dy * sin, -dx * sin + dy * cos)
    }

    /// Corners in image space: top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [egui::Pos2; 4] {
        [
            self.local_to_image(egui::vec2(0.0, 0.0)),
            self.local_to_image(egui::vec2(self.width, 0.0)),
            self.local_to_image(egui::vec2(self.width, self.height)),
            self.local_to_image(egui::vec2(0.0, self.height)),
        ]
    }

    pub fn center(&self) -> egui::Pos2 {
        self.local_to_image(egui::vec2(self.width * 0.5, self.height * 0.5))
    }

    pub fn contains(&self, p: egui::Pos2) -> bool {
        let local = self.image_to_local(p);
        local.x >= 0.0 && local.x <= self.width && local.y >= 0.0 && local.y <= self.height
    }
}

// ── Shape Collection ────────────────────────────────────────────────────────

/// Rectangles in creation order. Order drives default unit numbering and the
/// `squareNum` of the export.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShapeCollection {
    rects: Vec<Rectangle>,
}

impl ShapeCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, rect: Rectangle) {
        self.rects.push(rect);
    }

    /// Replace the rectangle with `id` in place. The stored id is kept even if
    /// `new_attrs` carries another one. Returns `false` when nothing matched.
    pub fn update(&mut self, id: RectId, new_attrs: Rectangle) -> bool {
        match self.rects.iter_mut().find(|r| r.id == id) {
            Some(slot) => {
                *slot = Rectangle { id, ..new_attrs };
                true
            }
            None => {
                log::debug!("update ignored, no rectangle {id}");
                false
            }
        }
    }

    pub fn remove(&mut self, id: RectId) -> Option<Rectangle> {
        let index = self.rects.iter().position(|r| r.id == id)?;
        Some(self.rects.remove(index))
    }

    pub fn find(&self, id: RectId) -> Option<&Rectangle> {
        self.rects.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rectangle> {
        self.rects.iter()
    }

    /// Unit assigned to the next created rectangle.
    pub fn next_unit(&self) -> i64 {
        self.rects.len() as i64 + 1
    }

    /// Top-most rectangle under `p` (later rectangles are drawn on top).
    pub fn hit_test(&self, p: egui::Pos2) -> Option<RectId> {
        self.rects.iter().rev().find(|r| r.contains(p)).map(|r| r.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn rect_at(x: f32, y: f32, unit: i64) -> Rectangle {
        Rectangle::new(x, y, unit, &ShapeDefaults::default())
    }

    #[test]
    fn test_add_preserves_order() {
        let mut shapes = ShapeCollection::new();
        let a = rect_at(0.0, 0.0, 1);
        let b = rect_at(10.0, 10.0, 2);
        shapes.add(a.clone());
        shapes.add(b.clone());
        let ids: Vec<_> = shapes.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
        assert_eq!(shapes.next_unit(), 3);
    }

    #[test]
    fn test_update_in_place_keeps_id() {
        let mut shapes = ShapeCollection::new();
        let a = rect_at(0.0, 0.0, 1);
        let b = rect_at(10.0, 10.0, 2);
        shapes.add(a.clone());
        shapes.add(b.clone());

        let mut moved = rect_at(42.0, 7.0, 9);
        moved.width = 30.0;
        assert!(shapes.update(a.id, moved));

        let first = shapes.iter().next().unwrap();
        assert_eq!(first.id, a.id);
        assert_eq!(first.x, 42.0);
        assert_eq!(first.unit, 9);
        assert_eq!(first.width, 30.0);
        assert_eq!(shapes.iter().nth(1).unwrap().id, b.id);
    }

    #[test]
    fn test_missing_ids_are_noops() {
        let mut shapes = ShapeCollection::new();
        shapes.add(rect_at(0.0, 0.0, 1));
        let before = shapes.clone();
        let stranger = rect_at(1.0, 1.0, 5);

        assert!(!shapes.update(stranger.id, stranger.clone()));
        assert!(shapes.remove(stranger.id).is_none());
        assert!(shapes.find(stranger.id).is_none());
        assert_eq!(shapes, before);
    }

    #[test]
    fn test_ids_stay_unique() {
        let mut shapes = ShapeCollection::new();
        let mut removed = Vec::new();
        for i in 0..20 {
            let r = rect_at(i as f32, 0.0, shapes.next_unit());
            if i % 3 == 0 {
                removed.push(r.id);
            }
            shapes.add(r);
        }
        for id in removed {
            shapes.remove(id);
        }
        let ids: HashSet<_> = shapes.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), shapes.len());
    }

    #[test]
    fn test_rotated_hit_test() {
        let mut r = rect_at(100.0, 100.0, 1);
        r.rotation = 90.0;
        // Rotated 90° clockwise about the top-left, the box now extends
        // leftwards from x=100 and downwards to y=200.
        assert!(r.contains(egui::pos2(75.0, 150.0)));
        assert!(!r.contains(egui::pos2(150.0, 110.0)));

        let c = r.center();
        assert!((c.x - 75.0).abs() < 1e-3);
        assert!((c.y - 150.0).abs() < 1e-3);
    }

    #[test]
    fn test_hit_test_prefers_topmost() {
        let mut shapes = ShapeCollection::new();
        let below = rect_at(0.0, 0.0, 1);
        let above = rect_at(50.0, 20.0, 2);
        shapes.add(below.clone());
        shapes.add(above.clone());
        assert_eq!(shapes.hit_test(egui::pos2(60.0, 30.0)), Some(above.id));
        assert_eq!(shapes.hit_test(egui::pos2(10.0, 10.0)), Some(below.id));
        assert_eq!(shapes.hit_test(egui::pos2(500.0, 500.0)), None);
    }

    #[test]
    fn test_color_hex() {
        assert_eq!(Color4::BLACK.to_hex(), "#000000");
        assert_eq!(Color4::rgba(1.0, 0.5, 0.0, 0.2).to_hex(), "#ff8000");
    }
}
