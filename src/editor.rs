//! Editor state and the command reducer.
//!
//! Every user gesture is turned into one [`Command`]; [`EditorState::apply`]
//! consumes the current state and returns the next. Nothing here depends on a
//! running UI.

use crate::label;
use crate::model::{RectId, Rectangle, ShapeCollection, ShapeDefaults};
use crate::transform::{self, TransformDelta};
use uuid::Uuid;

/// Offset applied to each pasted copy so it never hides its source.
pub const PASTE_OFFSET: f32 = 10.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    Selected(RectId),
    /// Selected with the label editor open.
    Editing(RectId),
}

impl Selection {
    pub fn id(&self) -> Option<RectId> {
        match *self {
            Selection::None => None,
            Selection::Selected(id) | Selection::Editing(id) => Some(id),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Selection::Editing(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GeometryChange {
    /// Body drag finished at a new top-left.
    Moved { x: f32, y: f32 },
    /// Handle drag finished; raw read-back of the live node.
    Transformed(TransformDelta),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    CreateRectangle { x: f32, y: f32 },
    ClickCanvas,
    ClickRectangle(RectId),
    UpdateGeometry { id: RectId, change: GeometryChange },
    EditLabel(String),
    CommitLabel,
    CancelLabel,
    CopySelection,
    PasteClipboard,
    DeleteSelection,
}

#[derive(Clone, Debug, Default)]
pub struct EditorState {
    pub shapes: ShapeCollection,
    pub selection: Selection,
    pub clipboard: Option<Rectangle>,
    pub label_buffer: String,
    pub defaults: ShapeDefaults,
}

impl EditorState {
    pub fn new(defaults: ShapeDefaults) -> Self {
        Self {
            defaults,
            ..Self::default()
        }
    }

    pub fn selected(&self) -> Option<&Rectangle> {
        self.selection.id().and_then(|id| self.shapes.find(id))
    }

    pub fn is_editing(&self) -> bool {
        self.selection.is_editing()
    }

    pub fn apply(mut self, command: Command) -> Self {
        log::debug!("apply {command:?}");
        match command {
            Command::CreateRectangle { x, y } => {
                let rect = Rectangle::new(x, y, self.shapes.next_unit(), &self.defaults);
                self.selection = Selection::Selected(rect.id);
                self.shapes.add(rect);
                self.label_buffer.clear();
            }
            Command::ClickCanvas => {
                self.selection = Selection::None;
                self.label_buffer.clear();
            }
            Command::ClickRectangle(id) => {
                if self.selection.id() == Some(id) {
                    if let Some(rect) = self.shapes.find(id) {
                        if !self.selection.is_editing() {
                            self.label_buffer = rect.unit.to_string();
                        }
                        self.selection = Selection::Editing(id);
                    }
                } else if self.shapes.find(id).is_some() {
                    self.selection = Selection::Selected(id);
                    self.label_buffer.clear();
                }
            }
            Command::UpdateGeometry { id, change } => {
                if let Some(old) = self.shapes.find(id) {
                    let next = match change {
                        GeometryChange::Moved { x, y } => transform::commit_move(old, x, y),
                        GeometryChange::Transformed(delta) => {
                            transform::commit_transform(old, &delta)
                        }
                    };
                    self.shapes.update(id, next);
                }
            }
            Command::EditLabel(text) => {
                if self.selection.is_editing() {
                    self.label_buffer = text;
                }
            }
            Command::CommitLabel => {
                if let Selection::Editing(id) = self.selection {
                    match (label::parse_unit(&self.label_buffer), self.shapes.find(id)) {
                        (Some(unit), Some(rect)) => {
                            let next = Rectangle { unit, ..rect.clone() };
                            self.shapes.update(id, next);
                        }
                        (None, _) => {
                            log::debug!("label {:?} is not a number, unit kept", self.label_buffer)
                        }
                        (_, None) => {}
                    }
                    self.selection = Selection::Selected(id);
                    self.label_buffer.clear();
                }
            }
            Command::CancelLabel => {
                if let Selection::Editing(id) = self.selection {
                    self.selection = Selection::Selected(id);
                    self.label_buffer.clear();
                }
            }
            Command::CopySelection => {
                if let Selection::Selected(id) = self.selection {
                    if let Some(rect) = self.shapes.find(id) {
                        self.clipboard = Some(rect.clone());
                    }
                }
            }
            Command::PasteClipboard => {
                if !self.selection.is_editing() {
                    if let Some(snapshot) = self.clipboard.take() {
                        let pasted = Rectangle {
                            id: Uuid::new_v4(),
                            x: snapshot.x + PASTE_OFFSET,
                            y: snapshot.y + PASTE_OFFSET,
                            unit: snapshot.unit.saturating_add(1),
                            ..snapshot
                        };
                        self.selection = Selection::Selected(pasted.id);
                        self.clipboard = Some(pasted.clone());
                        self.shapes.add(pasted);
                    }
                }
            }
            Command::DeleteSelection => {
                if let Selection::Selected(id) = self.selection {
                    self.shapes.remove(id);
                    self.selection = Selection::None;
                }
            }
        }
        self
    }
}
