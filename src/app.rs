use crate::config::Settings;
use crate::editor::{Command, EditorState, GeometryChange, Selection};
use crate::export;
use crate::image_source::{self, LoadedImage};
use crate::label;
use crate::model::{RectId, Rectangle};
use crate::transform::{self, HandleKind, LiveTransform};
use eframe::egui;
use std::path::{Path, PathBuf};

/// Handle radius in screen pixels.
const HANDLE_RADIUS: f32 = 5.0;
/// Handle hit tolerance in screen pixels.
const HANDLE_HIT_TOLERANCE: f32 = 10.0;

const SELECTION_COLOR: egui::Color32 = egui::Color32::from_rgb(0, 120, 255);

// ── Interaction State ───────────────────────────────────────────────────────

#[derive(Clone, Debug)]
enum DragState {
    None,
    /// Body drag; `grab` is the pointer offset from the top-left.
    Moving {
        id: RectId,
        grab: egui::Vec2,
        live: Rectangle,
    },
    Transforming {
        handle: HandleKind,
        node: LiveTransform,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum NoticeKind {
    Info,
    Error,
}

#[derive(Clone, Debug)]
struct Notice {
    kind: NoticeKind,
    text: String,
}

#[derive(Clone, Copy, Debug, Default)]
struct Shortcuts {
    copy: bool,
    paste: bool,
    delete: bool,
}

// ── App ─────────────────────────────────────────────────────────────────────

pub struct OverlayApp {
    settings: Settings,
    image: Option<LoadedImage>,
    texture: Option<egui::TextureHandle>,
    image_size: (f32, f32),

    editor: EditorState,
    drag: DragState,
    notice: Option<Notice>,
    label_focus_requested: bool,

    // pan & zoom
    pan: egui::Vec2,
    zoom: f32,
    panning: bool,
}

impl OverlayApp {
    pub fn new(settings: Settings, image_path: Option<PathBuf>) -> Self {
        let editor = EditorState::new(settings.shape_defaults());
        let mut app = Self {
            settings,
            image: None,
            texture: None,
            image_size: (800.0, 600.0),
            editor,
            drag: DragState::None,
            notice: None,
            label_focus_requested: false,
            pan: egui::Vec2::ZERO,
            zoom: 1.0,
            panning: false,
        };
        if let Some(path) = image_path {
            app.open_image(&path);
        }
        app
    }

    fn dispatch(&mut self, command: Command) {
        let state = std::mem::take(&mut self.editor);
        self.editor = state.apply(command);
    }

    fn info(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            kind: NoticeKind::Info,
            text: text.into(),
        });
    }

    fn error(&mut self, text: impl Into<String>) {
        let text = text.into();
        log::error!("{text}");
        self.notice = Some(Notice {
            kind: NoticeKind::Error,
            text,
        });
    }

    /// Replace the background image. On failure the previous image and all
    /// rectangles are left as they were.
    fn open_image(&mut self, path: &Path) {
        match image_source::load(path) {
            Ok(img) => {
                self.image_size = img.size();
                self.image = Some(img);
                self.texture = None;
                self.pan = egui::Vec2::ZERO;
                self.zoom = 1.0;
                self.drag = DragState::None;
            }
            Err(e) => self.error(e.to_string()),
        }
    }

    fn export_to_clipboard(&mut self) {
        let result = export::to_json(&self.editor.shapes, &self.settings.export_background)
            .and_then(|json| export::copy_to_clipboard(&json));
        match result {
            Ok(()) => self.info("Data copied to clipboard!"),
            Err(e) => self.error(format!("Export failed: {e}")),
        }
    }

    fn save_export(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name("overlay.json")
            .save_file()
        else {
            return;
        };
        let result = export::to_json(&self.editor.shapes, &self.settings.export_background)
            .and_then(|json| export::write_file(&path, &json));
        match result {
            Ok(()) => self.info(format!("Saved {}", path.display())),
            Err(e) => self.error(format!("Export failed: {e}")),
        }
    }

    /// Convert image-space coords to screen-space
    fn image_to_screen(&self, canvas_rect: egui::Rect, img_pos: egui::Pos2) -> egui::Pos2 {
        let center = canvas_rect.center();
        center
            + self.pan
            + (img_pos.to_vec2() - egui::vec2(self.image_size.0, self.image_size.1) * 0.5)
                * self.zoom
    }

    /// Convert screen-space coords to image-space
    fn screen_to_image(&self, canvas_rect: egui::Rect, screen_pos: egui::Pos2) -> egui::Pos2 {
        let center = canvas_rect.center();
        let rel = screen_pos - center - self.pan;
        egui::pos2(
            rel.x / self.zoom + self.image_size.0 * 0.5,
            rel.y / self.zoom + self.image_size.1 * 0.5,
        )
    }

    fn image_rect_on_screen(&self, canvas_rect: egui::Rect) -> egui::Rect {
        let top_left = self.image_to_screen(canvas_rect, egui::Pos2::ZERO);
        let bot_right = self.image_to_screen(
            canvas_rect,
            egui::pos2(self.image_size.0, self.image_size.1),
        );
        egui::Rect::from_min_max(top_left, bot_right)
    }

    fn ensure_texture(&mut self, ctx: &egui::Context) {
        if self.texture.is_some() {
            return;
        }
        if let Some(ref img) = self.image {
            self.texture = Some(ctx.load_texture(
                "site-image",
                img.to_color_image(),
                egui::TextureOptions::LINEAR,
            ));
        }
    }

    /// The rectangle as it should appear right now, including an in-flight drag.
    fn displayed(&self, rect: &Rectangle) -> Rectangle {
        match &self.drag {
            DragState::Moving { id, live, .. } if *id == rect.id => live.clone(),
            DragState::Transforming { node, .. } if node.id() == rect.id => node.current(),
            _ => rect.clone(),
        }
    }

    fn draw_rectangles(&self, painter: &egui::Painter, canvas_rect: egui::Rect) {
        let selected = self.editor.selection.id();
        for stored in self.editor.shapes.iter() {
            let rect = self.displayed(stored);
            let points: Vec<egui::Pos2> = rect
                .corners()
                .iter()
                .map(|&p| self.image_to_screen(canvas_rect, p))
                .collect();
            painter.add(egui::Shape::convex_polygon(
                points.clone(),
                rect.fill.to_egui(),
                egui::Stroke::new(rect.stroke_width * self.zoom, rect.stroke.to_egui()),
            ));
            painter.text(
                self.image_to_screen(canvas_rect, rect.center()),
                egui::Align2::CENTER_CENTER,
                rect.unit.to_string(),
                egui::FontId::proportional((14.0 * self.zoom).max(8.0)),
                egui::Color32::WHITE,
            );
            if selected == Some(rect.id) {
                painter.add(egui::Shape::closed_line(
                    points,
                    egui::Stroke::new(1.5, SELECTION_COLOR),
                ));
                self.draw_handles(painter, canvas_rect, &rect);
            }
        }
    }

    fn draw_handles(&self, painter: &egui::Painter, canvas_rect: egui::Rect, rect: &Rectangle) {
        let top_mid = self.image_to_screen(
            canvas_rect,
            rect.local_to_image(egui::vec2(rect.width * 0.5, 0.0)),
        );
        for handle in transform::handles(rect) {
            let pos = self.image_to_screen(canvas_rect, handle.position);
            if handle.kind == HandleKind::Rotate {
                painter.line_segment([top_mid, pos], egui::Stroke::new(1.0, SELECTION_COLOR));
            }
            painter.circle_filled(pos, HANDLE_RADIUS, egui::Color32::WHITE);
            painter.circle_stroke(pos, HANDLE_RADIUS, egui::Stroke::new(1.5, SELECTION_COLOR));
        }
    }

    fn handle_at(&self, img_pos: egui::Pos2) -> Option<(Rectangle, HandleKind)> {
        let rect = self.editor.selected()?;
        let kind = transform::hit_test_handles(rect, img_pos, HANDLE_HIT_TOLERANCE / self.zoom)?;
        Some((rect.clone(), kind))
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let shortcuts = ctx.input(|i| shortcuts_from_events(&i.events));
        for command in shortcut_commands(shortcuts, self.editor.is_editing()) {
            self.dispatch(command);
        }
    }

    fn show_label_editor(&mut self, ctx: &egui::Context, canvas_rect: egui::Rect) {
        if !matches!(self.editor.selection, Selection::Editing(_)) {
            self.label_focus_requested = false;
            return;
        }
        let Some(rect) = self.editor.selected() else {
            return;
        };
        let pos = self.image_to_screen(canvas_rect, label::anchor(rect));
        let mut buffer = self.editor.label_buffer.clone();
        let mut focus_requested = self.label_focus_requested;
        let mut commands = Vec::new();

        egui::Area::new(egui::Id::new("unit_label_editor"))
            .fixed_pos(pos)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                let te = ui.add(egui::TextEdit::singleline(&mut buffer).desired_width(100.0));
                if !focus_requested {
                    te.request_focus();
                    focus_requested = true;
                }
                if te.changed() {
                    commands.push(Command::EditLabel(buffer.clone()));
                }
                let escape = ui.input(|i| i.key_pressed(egui::Key::Escape));
                commands.extend(label_key_command(escape, te.lost_focus()));
            });

        self.label_focus_requested = focus_requested;
        for command in commands {
            self.dispatch(command);
        }
    }

    fn handle_viewport(&mut self, ctx: &egui::Context, response: &egui::Response, canvas_rect: egui::Rect) {
        // Handle pan (middle mouse button)
        let middle_down = ctx.input(|i| i.pointer.middle_down());
        if middle_down {
            let delta = ctx.input(|i| i.pointer.delta());
            self.pan += delta;
            self.panning = true;
        } else {
            self.panning = false;
        }

        // Handle zoom (scroll wheel)
        let scroll_delta = ctx.input(|i| i.smooth_scroll_delta.y);
        if scroll_delta != 0.0 && response.hovered() {
            let zoom_factor = 1.0 + scroll_delta * 0.002;
            let new_zoom =
                (self.zoom * zoom_factor).clamp(self.settings.min_zoom, self.settings.max_zoom);
            if let Some(cursor) = response.hover_pos() {
                let center = canvas_rect.center();
                let cursor_rel = cursor - center - self.pan;
                self.pan -= cursor_rel * (new_zoom / self.zoom - 1.0);
            }
            self.zoom = new_zoom;
        }
    }

    fn handle_pointer(&mut self, ctx: &egui::Context, response: &egui::Response, canvas_rect: egui::Rect) {
        if self.panning {
            return;
        }
        let primary = egui::PointerButton::Primary;

        if response.clicked_by(primary) {
            if let Some(pos) = response.interact_pointer_pos() {
                let img_pos = self.screen_to_image(canvas_rect, pos);
                let hit = self.editor.shapes.hit_test(img_pos);
                let on_handle = self.handle_at(img_pos).is_some();
                let double = response.double_clicked_by(primary);
                for command in click_commands(hit, on_handle, double, img_pos) {
                    self.dispatch(command);
                }
            }
        }

        if response.drag_started_by(primary) {
            let origin = ctx
                .input(|i| i.pointer.press_origin())
                .or(response.interact_pointer_pos());
            if let Some(pos) = origin {
                let img_pos = self.screen_to_image(canvas_rect, pos);
                if let Some((rect, handle)) = self.handle_at(img_pos) {
                    self.drag = DragState::Transforming {
                        handle,
                        node: LiveTransform::new(rect),
                    };
                } else if let Some(rect) = self
                    .editor
                    .shapes
                    .hit_test(img_pos)
                    .and_then(|id| self.editor.shapes.find(id))
                {
                    self.drag = DragState::Moving {
                        id: rect.id,
                        grab: img_pos - egui::pos2(rect.x, rect.y),
                        live: rect.clone(),
                    };
                }
            }
        }

        if response.dragged_by(primary) {
            if let Some(pos) = response.interact_pointer_pos() {
                let img_pos = self.screen_to_image(canvas_rect, pos);
                let snap = ctx.input(|i| i.modifiers.shift);
                match &mut self.drag {
                    DragState::Moving { grab, live, .. } => {
                        let top_left = img_pos - *grab;
                        live.x = top_left.x;
                        live.y = top_left.y;
                    }
                    DragState::Transforming { handle, node } => match *handle {
                        HandleKind::Corner(corner) => node.resize(corner, img_pos),
                        HandleKind::Rotate => node.rotate(img_pos, snap),
                    },
                    DragState::None => {}
                }
            }
        }

        if response.drag_stopped_by(primary) {
            match std::mem::replace(&mut self.drag, DragState::None) {
                DragState::Moving { id, live, .. } => self.dispatch(Command::UpdateGeometry {
                    id,
                    change: GeometryChange::Moved {
                        x: live.x,
                        y: live.y,
                    },
                }),
                DragState::Transforming { node, .. } => self.dispatch(Command::UpdateGeometry {
                    id: node.id(),
                    change: GeometryChange::Transformed(node.delta()),
                }),
                DragState::None => {}
            }
        }

        if let Some(pos) = response.hover_pos() {
            let img_pos = self.screen_to_image(canvas_rect, pos);
            let icon = match (&self.drag, self.handle_at(img_pos)) {
                (DragState::Moving { .. }, _) => egui::CursorIcon::Grabbing,
                (DragState::Transforming { .. }, _) | (_, Some(_)) => egui::CursorIcon::Crosshair,
                _ if self.editor.shapes.hit_test(img_pos).is_some() => egui::CursorIcon::Grab,
                _ => egui::CursorIcon::Default,
            };
            ctx.set_cursor_icon(icon);
        }
    }

    fn show_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = &self.notice else {
            return;
        };
        let title = match notice.kind {
            NoticeKind::Info => "Info",
            NoticeKind::Error => "Error",
        };
        let mut dismissed = false;
        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_TOP, [0.0, 40.0])
            .show(ctx, |ui| {
                ui.label(notice.text.as_str());
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.notice = None;
        }
    }
}

// ── Gesture mapping ─────────────────────────────────────────────────────────

fn shortcuts_from_events(events: &[egui::Event]) -> Shortcuts {
    let mut s = Shortcuts::default();
    for event in events {
        match event {
            egui::Event::Copy => s.copy = true,
            egui::Event::Paste(_) => s.paste = true,
            egui::Event::Key {
                key,
                pressed: true,
                modifiers,
                ..
            } => match key {
                egui::Key::C if modifiers.command => s.copy = true,
                egui::Key::V if modifiers.command => s.paste = true,
                egui::Key::Delete | egui::Key::Backspace => s.delete = true,
                _ => {}
            },
            _ => {}
        }
    }
    s
}

/// Label text may contain anything while the editor is open, so shortcuts
/// produce nothing then.
fn shortcut_commands(shortcuts: Shortcuts, editing: bool) -> Vec<Command> {
    if editing {
        return Vec::new();
    }
    let mut commands = Vec::new();
    if shortcuts.copy {
        commands.push(Command::CopySelection);
    }
    if shortcuts.paste {
        commands.push(Command::PasteClipboard);
    }
    if shortcuts.delete {
        commands.push(Command::DeleteSelection);
    }
    commands
}

/// Escape also takes focus away from the field; it must win over the commit.
fn label_key_command(escape_pressed: bool, lost_focus: bool) -> Option<Command> {
    if escape_pressed {
        Some(Command::CancelLabel)
    } else if lost_focus {
        Some(Command::CommitLabel)
    } else {
        None
    }
}

/// Toolbar fallback for the clipboard shortcuts: label, command, enabled.
fn clipboard_buttons(editor: &EditorState) -> [(&'static str, Command, bool); 3] {
    let idle = !editor.is_editing();
    let selected = editor.selected().is_some();
    [
        ("Copy", Command::CopySelection, idle && selected),
        ("Paste", Command::PasteClipboard, idle && editor.clipboard.is_some()),
        ("Delete", Command::DeleteSelection, idle && selected),
    ]
}

fn click_commands(
    hit: Option<RectId>,
    on_handle: bool,
    double_click: bool,
    img_pos: egui::Pos2,
) -> Vec<Command> {
    match hit {
        Some(id) => vec![Command::ClickRectangle(id)],
        None if on_handle => Vec::new(),
        None if double_click => vec![
            Command::ClickCanvas,
            Command::CreateRectangle {
                x: img_pos.x,
                y: img_pos.y,
            },
        ],
        None => vec![Command::ClickCanvas],
    }
}

// ── eframe App impl ────────────────────────────────────────────────────────

impl eframe::App for OverlayApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_texture(ctx);

        let dropped = ctx.input(|i| i.raw.dropped_files.iter().find_map(|f| f.path.clone()));
        if let Some(path) = dropped {
            self.open_image(&path);
        }

        self.handle_shortcuts(ctx);

        // Top toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Land Site Overlay Tool");
                ui.separator();
                if ui.button("Open Image…").clicked() {
                    if let Some(path) = image_source::pick_file() {
                        self.open_image(&path);
                    }
                }
                ui.separator();
                // Same commands as the shortcuts; Ctrl+V never arrives while
                // the system clipboard holds no text.
                for (label, command, enabled) in clipboard_buttons(&self.editor) {
                    if ui.add_enabled(enabled, egui::Button::new(label)).clicked() {
                        self.dispatch(command);
                    }
                }
                ui.separator();
                if ui.button("Export Data").clicked() {
                    self.export_to_clipboard();
                }
                if ui.button("Save Export…").clicked() {
                    self.save_export();
                }
                ui.separator();
                if let Some(img) = &self.image {
                    ui.label(format!(
                        "{} ({}×{})",
                        img.path.file_name().unwrap_or_default().to_string_lossy(),
                        img.width(),
                        img.height()
                    ));
                }
                if self.editor.shapes.is_empty() {
                    ui.label("Double-click the image to add a unit");
                } else {
                    ui.label(format!("Units: {}", self.editor.shapes.len()));
                }
                if let Some(rect) = self.editor.selected() {
                    ui.label(format!("Selected: {}", rect.unit));
                }
                ui.separator();
                ui.label(format!("Zoom: {:.0}%", self.zoom * 100.0));
            });
        });

        // Canvas
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.image.is_none() {
                ui.centered_and_justified(|ui| {
                    ui.label("Open or drop an image to start.");
                });
                return;
            }

            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
            let canvas_rect = response.rect;

            painter.rect_filled(canvas_rect, 0.0, egui::Color32::from_gray(40));

            if let Some(ref tex) = self.texture {
                let img_rect = self.image_rect_on_screen(canvas_rect);
                painter.image(
                    tex.id(),
                    img_rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }

            // Blur of the label field commits before the click that caused it.
            self.show_label_editor(ctx, canvas_rect);
            self.handle_viewport(ctx, &response, canvas_rect);
            self.handle_pointer(ctx, &response, canvas_rect);
            self.draw_rectangles(&painter, canvas_rect);
        });

        self.show_notice(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::EditorState;

    fn key(key: egui::Key, modifiers: egui::Modifiers) -> egui::Event {
        egui::Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers,
        }
    }

    #[test]
    fn test_shortcuts_from_clipboard_events() {
        let s = shortcuts_from_events(&[egui::Event::Copy]);
        assert!(s.copy && !s.paste && !s.delete);
        let s = shortcuts_from_events(&[egui::Event::Paste("anything".into())]);
        assert!(s.paste && !s.copy);
    }

    #[test]
    fn test_shortcuts_from_keys() {
        let s = shortcuts_from_events(&[key(egui::Key::Backspace, egui::Modifiers::NONE)]);
        assert!(s.delete);
        let s = shortcuts_from_events(&[key(egui::Key::Delete, egui::Modifiers::NONE)]);
        assert!(s.delete);
        let s = shortcuts_from_events(&[
            key(egui::Key::C, egui::Modifiers::COMMAND),
            key(egui::Key::V, egui::Modifiers::COMMAND),
        ]);
        assert!(s.copy && s.paste);

        // Plain letters are not shortcuts.
        let s = shortcuts_from_events(&[
            key(egui::Key::C, egui::Modifiers::NONE),
            key(egui::Key::V, egui::Modifiers::NONE),
        ]);
        assert!(!s.copy && !s.paste && !s.delete);
    }

    #[test]
    fn test_copy_and_key_event_paste_once() {
        let events = [
            egui::Event::Paste("x".into()),
            key(egui::Key::V, egui::Modifiers::COMMAND),
        ];
        let commands = shortcut_commands(shortcuts_from_events(&events), false);
        assert_eq!(commands, vec![Command::PasteClipboard]);
    }

    #[test]
    fn test_shortcuts_suppressed_while_editing() {
        let all = Shortcuts {
            copy: true,
            paste: true,
            delete: true,
        };
        assert!(shortcut_commands(all, true).is_empty());
        assert_eq!(
            shortcut_commands(all, false),
            vec![
                Command::CopySelection,
                Command::PasteClipboard,
                Command::DeleteSelection
            ]
        );
    }

    #[test]
    fn test_escape_wins_over_lost_focus() {
        assert_eq!(label_key_command(true, true), Some(Command::CancelLabel));
        assert_eq!(label_key_command(true, false), Some(Command::CancelLabel));
        assert_eq!(label_key_command(false, true), Some(Command::CommitLabel));
        assert_eq!(label_key_command(false, false), None);
    }

    #[test]
    fn test_double_click_creates_only_on_empty_canvas() {
        let pos = egui::pos2(30.0, 40.0);
        let id = uuid::Uuid::new_v4();

        assert_eq!(
            click_commands(None, false, true, pos),
            vec![
                Command::ClickCanvas,
                Command::CreateRectangle { x: 30.0, y: 40.0 }
            ]
        );
        assert_eq!(
            click_commands(Some(id), false, true, pos),
            vec![Command::ClickRectangle(id)]
        );
        assert!(click_commands(None, true, true, pos).is_empty());
        assert_eq!(click_commands(None, false, false, pos), vec![Command::ClickCanvas]);
    }

    #[test]
    fn test_two_clicks_on_rectangle_open_label_editor() {
        let state = EditorState::default().apply(Command::CreateRectangle { x: 0.0, y: 0.0 });
        let id = state.selection.id().unwrap();
        let state = click_commands(None, false, false, egui::pos2(500.0, 500.0))
            .into_iter()
            .chain(click_commands(Some(id), false, false, egui::pos2(10.0, 10.0)))
            .chain(click_commands(Some(id), false, true, egui::pos2(10.0, 10.0)))
            .fold(state, EditorState::apply);
        assert_eq!(state.selection, Selection::Editing(id));
        assert_eq!(state.shapes.len(), 1);
    }

    #[test]
    fn test_clipboard_buttons_work_without_system_clipboard() {
        let enabled = |state: &EditorState| clipboard_buttons(state).map(|(_, _, on)| on);

        let state = EditorState::default();
        assert_eq!(enabled(&state), [false, false, false]);

        let state = state.apply(Command::CreateRectangle { x: 0.0, y: 0.0 });
        assert_eq!(enabled(&state), [true, false, true]);

        // Pressing the buttons in order copies, pastes, then deletes the paste.
        let mut state = state;
        for (_, command, on) in clipboard_buttons(&state) {
            let is_copy = command == Command::CopySelection;
            assert!(on || command == Command::PasteClipboard);
            state = state.apply(command);
            if is_copy {
                assert_eq!(enabled(&state), [true, true, true]);
            }
        }
        assert_eq!(state.shapes.len(), 1);
        assert_eq!(state.selection, Selection::None);

        let id = state.shapes.iter().next().unwrap().id;
        let state = state
            .apply(Command::ClickRectangle(id))
            .apply(Command::ClickRectangle(id));
        assert!(state.is_editing());
        assert_eq!(enabled(&state), [false, false, false]);
    }
}
