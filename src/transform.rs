//! Manipulation handles and the pure geometry behind move, resize and rotate.
//!
//! While a handle is dragged the rectangle is represented by a [`LiveTransform`]:
//! the committed record plus an accumulated position, scale and rotation. Only
//! when the drag ends is the raw [`TransformDelta`] folded back into a new
//! record by [`commit_transform`], so the stored width/height always carry
//! scale 1 and later edits do not compound.

use crate::model::{Rectangle, MIN_SIZE};
use eframe::egui;

/// Distance from the top edge to the rotation handle, in image pixels.
pub const ROTATE_HANDLE_OFFSET: f32 = 25.0;

/// Rotation snapping step when snapping is requested.
pub const ROTATION_SNAP_DEG: f32 = 15.0;

// ── Handles ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandleKind {
    Corner(Corner),
    Rotate,
}

#[derive(Clone, Copy, Debug)]
pub struct Handle {
    /// Image-space position.
    pub position: egui::Pos2,
    pub kind: HandleKind,
}

impl Handle {
    pub fn hit_test(&self, p: egui::Pos2, tolerance: f32) -> bool {
        (p - self.position).length_sq() <= tolerance * tolerance
    }
}

/// Four corner handles plus a rotation handle above the top-center, all
/// following the rectangle's rotation.
pub fn handles(rect: &Rectangle) -> Vec<Handle> {
    let [tl, tr, br, bl] = rect.corners();
    vec![
        Handle { position: tl, kind: HandleKind::Corner(Corner::TopLeft) },
        Handle { position: tr, kind: HandleKind::Corner(Corner::TopRight) },
        Handle { position: br, kind: HandleKind::Corner(Corner::BottomRight) },
        Handle { position: bl, kind: HandleKind::Corner(Corner::BottomLeft) },
        Handle {
            position: rect.local_to_image(egui::vec2(rect.width * 0.5, -ROTATE_HANDLE_OFFSET)),
            kind: HandleKind::Rotate,
        },
    ]
}

pub fn hit_test_handles(rect: &Rectangle, p: egui::Pos2, tolerance: f32) -> Option<HandleKind> {
    handles(rect)
        .into_iter()
        .find(|h| h.hit_test(p, tolerance))
        .map(|h| h.kind)
}

// ── Boxes and deltas ────────────────────────────────────────────────────────

/// A rotated box as proposed during a live manipulation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxFrame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub rotation: f32,
}

/// Accept `proposed` unless it is smaller than [`MIN_SIZE`] in either axis,
/// in which case the previous frame is kept.
pub fn bound_box(previous: BoxFrame, proposed: BoxFrame) -> BoxFrame {
    if proposed.width < MIN_SIZE || proposed.height < MIN_SIZE {
        previous
    } else {
        proposed
    }
}

/// What the live node reports when a handle drag ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformDelta {
    pub x: f32,
    pub y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub rotation: f32,
}

/// Fold a finished handle drag into a new record. Width and height are
/// floored at [`MIN_SIZE`] whatever the scale.
pub fn commit_transform(old: &Rectangle, delta: &TransformDelta) -> Rectangle {
    Rectangle {
        x: delta.x,
        y: delta.y,
        width: (old.width * delta.scale_x).max(MIN_SIZE),
        height: (old.height * delta.scale_y).max(MIN_SIZE),
        rotation: delta.rotation,
        ..old.clone()
    }
}

/// A body drag only moves the rectangle.
pub fn commit_move(old: &Rectangle, x: f32, y: f32) -> Rectangle {
    Rectangle { x, y, ..old.clone() }
}

// ── Live node ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct LiveTransform {
    base: Rectangle,
    x: f32,
    y: f32,
    scale_x: f32,
    scale_y: f32,
    rotation: f32,
}

impl LiveTransform {
    pub fn new(base: Rectangle) -> Self {
        Self {
            x: base.x,
            y: base.y,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: base.rotation,
            base,
        }
    }

    pub fn id(&self) -> crate::model::RectId {
        self.base.id
    }

    fn frame(&self) -> BoxFrame {
        BoxFrame {
            x: self.x,
            y: self.y,
            width: self.base.width * self.scale_x,
            height: self.base.height * self.scale_y,
            rotation: self.rotation,
        }
    }

    fn set_frame(&mut self, frame: BoxFrame) {
        self.x = frame.x;
        self.y = frame.y;
        self.scale_x = frame.width / self.base.width;
        self.scale_y = frame.height / self.base.height;
        self.rotation = frame.rotation;
    }

    /// The rectangle as currently shown on screen.
    pub fn current(&self) -> Rectangle {
        let f = self.frame();
        Rectangle {
            x: f.x,
            y: f.y,
            width: f.width,
            height: f.height,
            rotation: f.rotation,
            ..self.base.clone()
        }
    }

    /// Drag `corner` to `pointer` (image space); the opposite corner stays put.
    pub fn resize(&mut self, corner: Corner, pointer: egui::Pos2) {
        let cur = self.current();
        let p = cur.image_to_local(pointer);
        let (w, h) = (cur.width, cur.height);
        let (x0, y0, x1, y1) = match corner {
            Corner::TopLeft => (p.x, p.y, w, h),
            Corner::TopRight => (0.0, p.y, p.x, h),
            Corner::BottomRight => (0.0, 0.0, p.x, p.y),
            Corner::BottomLeft => (p.x, 0.0, w, p.y),
        };
        let origin = cur.local_to_image(egui::vec2(x0, y0));
        let proposed = BoxFrame {
            x: origin.x,
            y: origin.y,
            width: x1 - x0,
            height: y1 - y0,
            rotation: cur.rotation,
        };
        let previous = self.frame();
        let next = bound_box(previous, proposed);
        if next != previous {
            self.set_frame(next);
        }
    }

    /// Rotate about the box center so the rotation handle points at `pointer`.
    pub fn rotate(&mut self, pointer: egui::Pos2, snap: bool) {
        let cur = self.current();
        let center = cur.center();
        let d = pointer - center;
        let mut angle = d.y.atan2(d.x).to_degrees() + 90.0;
        if snap {
            angle = (angle / ROTATION_SNAP_DEG).round() * ROTATION_SNAP_DEG;
        }
        let half = egui::vec2(cur.width * 0.5, cur.height * 0.5);
        let (sin, cos) = angle.to_radians().sin_cos();
        let origin = center - egui::vec2(half.x * cos - half.y * sin, half.x * sin + half.y * cos);
        self.set_frame(BoxFrame {
            x: origin.x,
            y: origin.y,
            width: cur.width,
            height: cur.height,
            rotation: angle,
        });
    }

    pub fn delta(&self) -> TransformDelta {
        TransformDelta {
            x: self.x,
            y: self.y,
            scale_x: self.scale_x,
            scale_y: self.scale_y,
            rotation: self.rotation,
        }
    }
}
