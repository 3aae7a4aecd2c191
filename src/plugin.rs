//! Bevy integration for the canvas edit history.
//!
//! Any system (a key binding, a toolbar button, a drag-start handler) requests
//! history operations by writing [`PushUndoRequest`], [`UndoRequest`] or
//! [`RedoRequest`]. Requests are applied in that order each frame and every
//! processed batch is followed by a [`HistoryChanged`] message.

use std::num::NonZeroUsize;
use std::ops::{Deref, DerefMut};

use bevy::prelude::*;
use tracing::{debug, warn};

use crate::canvas::Canvas;
use crate::config::{AppConfig, AppConfigData};
use crate::constants::DEFAULT_HISTORY_CAPACITY;
use crate::history::{EditHistoryController, HistoryError};

/// Resource holding the canvas together with its undo/redo history
#[derive(Resource)]
pub struct CanvasHistory(pub EditHistoryController<Canvas>);

impl CanvasHistory {
    pub fn new(canvas: Canvas, capacity: NonZeroUsize) -> Self {
        Self(EditHistoryController::new(canvas, capacity))
    }

    pub fn status(&self) -> HistoryChanged {
        HistoryChanged {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        }
    }
}

impl Deref for CanvasHistory {
    type Target = EditHistoryController<Canvas>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for CanvasHistory {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Snapshot the canvas before an edit
#[derive(Message, Debug, Clone, Copy)]
pub struct PushUndoRequest;

#[derive(Message, Debug, Clone, Copy)]
pub struct UndoRequest;

#[derive(Message, Debug, Clone, Copy)]
pub struct RedoRequest;

/// Written after history requests were processed, for toolbars to update
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryChanged {
    pub can_undo: bool,
    pub can_redo: bool,
}

/// Resource tracking the last failed history operation for display to the user
#[derive(Resource, Debug, Default)]
pub struct HistoryErrorMessage {
    pub message: Option<String>,
}

impl HistoryErrorMessage {
    fn record(&mut self, operation: &str, result: Result<(), HistoryError>) {
        match result {
            Ok(()) => self.message = None,
            Err(e) => {
                warn!("{} failed: {}", operation, e);
                self.message = Some(format!("{} failed: {}", operation, e));
            }
        }
    }
}

/// System to snapshot the canvas onto the undo stack
fn push_undo_system(
    mut requests: MessageReader<PushUndoRequest>,
    mut history: ResMut<CanvasHistory>,
    mut last_error: ResMut<HistoryErrorMessage>,
    mut changed: MessageWriter<HistoryChanged>,
) {
    for _ in requests.read() {
        let result = history.push_undo_stack();
        last_error.record("Undo snapshot", result);
    }
    changed.write(history.status());
}

/// System to undo the last edit
fn undo_system(
    mut requests: MessageReader<UndoRequest>,
    mut history: ResMut<CanvasHistory>,
    mut last_error: ResMut<HistoryErrorMessage>,
    mut changed: MessageWriter<HistoryChanged>,
) {
    for _ in requests.read() {
        if !history.can_undo() {
            debug!("Nothing to undo");
            continue;
        }
        let result = history.undo();
        last_error.record("Undo", result);
    }
    changed.write(history.status());
}

/// System to redo the last undone edit
fn redo_system(
    mut requests: MessageReader<RedoRequest>,
    mut history: ResMut<CanvasHistory>,
    mut last_error: ResMut<HistoryErrorMessage>,
    mut changed: MessageWriter<HistoryChanged>,
) {
    for _ in requests.read() {
        if !history.can_redo() {
            debug!("Nothing to redo");
            continue;
        }
        let result = history.redo();
        last_error.record("Redo", result);
    }
    changed.write(history.status());
}

/// Registers [`CanvasHistory`] (with an empty canvas, unless one was inserted
/// beforehand) and the history request systems.
///
/// Without an explicit capacity the [`AppConfig`] resource is consulted, if
/// present, and the default capacity used otherwise.
#[derive(Default)]
pub struct HistoryPlugin {
    pub capacity: Option<NonZeroUsize>,
}

impl HistoryPlugin {
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            capacity: Some(capacity),
        }
    }
}

impl From<&AppConfigData> for HistoryPlugin {
    fn from(data: &AppConfigData) -> Self {
        Self::with_capacity(data.history_capacity())
    }
}

impl Plugin for HistoryPlugin {
    fn build(&self, app: &mut App) {
        let capacity = self.capacity.unwrap_or_else(|| {
            app.world()
                .get_resource::<AppConfig>()
                .map(|config| config.data.history_capacity())
                .unwrap_or(DEFAULT_HISTORY_CAPACITY)
        });

        if !app.world().contains_resource::<CanvasHistory>() {
            app.insert_resource(CanvasHistory::new(Canvas::new(), capacity));
        }

        app.init_resource::<HistoryErrorMessage>()
            .add_message::<PushUndoRequest>()
            .add_message::<UndoRequest>()
            .add_message::<RedoRequest>()
            .add_message::<HistoryChanged>()
            .add_systems(
                Update,
                (
                    push_undo_system.run_if(on_message::<PushUndoRequest>),
                    undo_system.run_if(on_message::<UndoRequest>),
                    redo_system.run_if(on_message::<RedoRequest>),
                )
                    .chain(),
            );
    }
}
