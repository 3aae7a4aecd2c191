//! The editable canvas: a drawing, the current selection and the view onto it.
//!
//! [`Canvas`] is the document the application's edit history operates on.
//! Its snapshots ([`AppState`]) nest the drawing snapshot together with the
//! auxiliary selection and view fields.
//!
//! ## Module Structure
//!
//! - [`state`] - `AppState`, the serialized canvas
//! - [`view`] - `DrawingView` and its geometry types

pub mod state;
pub mod view;

use std::collections::HashSet;

use crate::document::{Document, DocumentError};
use crate::drawing::{DotBracketError, Drawing};

pub use state::AppState;
pub use view::{BoundingBox, DrawingView, Point, ViewState};

#[derive(Debug, Clone, Default)]
pub struct Canvas {
    drawing: Drawing,
    /// Unique, in the order the bases were selected
    selected_base_ids: Vec<String>,
    view: DrawingView,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    /// Selected ids whose base has since been removed through this handle are
    /// dropped from snapshots.
    pub fn drawing_mut(&mut self) -> &mut Drawing {
        &mut self.drawing
    }

    pub fn view(&self) -> &DrawingView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut DrawingView {
        &mut self.view
    }

    /// Ids of the selected bases that still exist, in selection order
    pub fn selected_base_ids(&self) -> impl Iterator<Item = &str> {
        self.selected_base_ids
            .iter()
            .map(String::as_str)
            .filter(|id| self.drawing.contains(id))
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_base_ids.iter().any(|selected| selected == id) && self.drawing.contains(id)
    }

    /// Select a base. Returns false if there is no such base.
    pub fn select(&mut self, id: &str) -> bool {
        if !self.drawing.contains(id) {
            return false;
        }
        if !self.selected_base_ids.iter().any(|selected| selected == id) {
            self.selected_base_ids.push(id.to_string());
        }
        true
    }

    pub fn deselect(&mut self, id: &str) -> bool {
        let before = self.selected_base_ids.len();
        self.selected_base_ids.retain(|selected| selected != id);
        self.selected_base_ids.len() != before
    }

    pub fn select_all(&mut self) {
        self.selected_base_ids = self
            .drawing
            .bases()
            .iter()
            .map(|base| base.id.clone())
            .collect();
    }

    pub fn clear_selection(&mut self) {
        self.selected_base_ids.clear();
    }

    /// Move every selected base by (`dx`, `dy`)
    pub fn shift_selection(&mut self, dx: f64, dy: f64) -> usize {
        let Self {
            drawing,
            selected_base_ids,
            ..
        } = self;
        drawing.shift(selected_base_ids.iter().map(String::as_str), dx, dy)
    }

    pub fn remove_base(&mut self, id: &str) -> bool {
        self.deselect(id);
        self.drawing.remove_base(id).is_some()
    }

    pub fn draw_dot_bracket(
        &mut self,
        sequence: &str,
        dot_bracket: &str,
    ) -> Result<Vec<String>, DotBracketError> {
        self.drawing.draw_dot_bracket(sequence, dot_bracket)
    }

    /// Fit the view to the drawing's content. Does nothing for an empty drawing.
    pub fn fit_view_to_content(&mut self, viewport_width: f64, viewport_height: f64) {
        if let Some(content) = self.drawing.content_bbox() {
            self.view
                .fit_to_content(content, viewport_width, viewport_height);
        }
    }
}

impl Document for Canvas {
    type State = AppState;

    fn serialize(&self) -> Result<AppState, DocumentError> {
        let drawing = self.drawing.serialize()?;
        Ok(AppState {
            drawing,
            selected_base_ids: Some(self.selected_base_ids().map(str::to_string).collect()),
            drawing_view: Some(self.view.serialized()),
        })
    }

    /// A missing selection clears the current one; a missing view leaves the view as is.
    /// Selected ids keep their order and must be unique.
    fn restore(&mut self, state: &AppState) -> Result<(), DocumentError> {
        state.drawing.validate()?;
        let selected = match &state.selected_base_ids {
            Some(ids) => {
                let mut seen = HashSet::with_capacity(ids.len());
                for id in ids {
                    if !state.drawing.contains(id) {
                        return Err(DocumentError::UnknownId(id.clone()));
                    }
                    if !seen.insert(id.as_str()) {
                        return Err(DocumentError::DuplicateId(id.clone()));
                    }
                }
                ids.clone()
            }
            None => Vec::new(),
        };

        self.drawing.apply(&state.drawing);
        self.selected_base_ids = selected;
        if let Some(view) = &state.drawing_view {
            self.view.restore(view);
        }
        Ok(())
    }
}
