//! The user's view onto the drawing: where it is centered and how far it is zoomed.

use serde::{Deserialize, Serialize};

use crate::constants::FIT_TO_CONTENT_MARGIN;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis-aligned box in drawing coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Serialized form of a [`DrawingView`]. Only the center point is kept,
/// the zoom level is not part of the editable content.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub center_point: Point,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawingView {
    /// Center of the visible area, in drawing coordinates
    pub center_point: Point,
    pub scaling: f64,
}

impl Default for DrawingView {
    fn default() -> Self {
        Self {
            center_point: Point::default(),
            scaling: 1.0,
        }
    }
}

impl DrawingView {
    pub fn serialized(&self) -> ViewState {
        ViewState {
            center_point: self.center_point,
        }
    }

    /// Apply a previous state. A non-finite center point is ignored.
    pub fn restore(&mut self, state: &ViewState) {
        if state.center_point.is_finite() {
            self.center_point = state.center_point;
        }
    }

    /// Zoom and center so that `content` fills most of a viewport of the given size
    pub fn fit_to_content(&mut self, content: BoundingBox, viewport_width: f64, viewport_height: f64) {
        let scaling = FIT_TO_CONTENT_MARGIN
            * (viewport_width / content.width).min(viewport_height / content.height);

        // Zero-sized content (a single base) would zoom in infinitely
        if scaling.is_finite() && scaling > 0.0 {
            self.scaling = scaling;
        }
        self.center_point = content.center();
    }
}
