//! Serialized state of a whole canvas.

use serde::{Deserialize, Serialize};

use crate::drawing::DrawingState;

use super::view::ViewState;

/// Snapshot of everything the user edits on a canvas: the drawing, which
/// bases are selected and where the view is centered.
///
/// This is both the undo/redo snapshot and the content of saved `.rnacanvas`
/// files. The auxiliary fields are optional so that files written without
/// them still load.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub drawing: DrawingState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_base_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drawing_view: Option<ViewState>,
}
