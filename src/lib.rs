//! Edit history core of the RNAcanvas structure drawing editor.
//!
//! The editor snapshots its canvas (drawing, selection and view) before every
//! edit; the [`history`] module keeps those snapshots on bounded undo and redo
//! stacks and restores them on request. [`plugin::HistoryPlugin`] wires the
//! history into a Bevy app.
//!
//! A host application starts by holding on to the guard returned by
//! [`logging::init`], then adds [`config::ConfigPlugin`] followed by
//! [`HistoryPlugin`], which picks its capacity up from the loaded config.

pub mod canvas;
pub mod config;
pub mod constants;
pub mod document;
pub mod drawing;
pub mod history;
pub mod logging;
pub mod paths;
pub mod persistence;
pub mod plugin;

pub use canvas::{AppState, Canvas};
pub use document::{Document, DocumentError};
pub use history::{Checkpoint, EditHistoryController, HistoryError, HistoryStack};
pub use plugin::{CanvasHistory, HistoryPlugin};
