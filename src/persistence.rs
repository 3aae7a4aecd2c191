//! Saving and opening `.rnacanvas` files.
//!
//! A saved file is the pretty-printed JSON of an [`AppState`], offered to the
//! user as `text/plain`.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{error, info};

use crate::canvas::AppState;
use crate::constants::FILE_EXTENSION;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to access file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse canvas file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Text content of a saved file
pub fn to_file_contents(state: &AppState) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string_pretty(state)?)
}

pub fn from_file_contents(contents: &str) -> Result<AppState, PersistenceError> {
    Ok(serde_json::from_str(contents)?)
}

/// File name for a saved canvas, e.g. `hairpin` -> `hairpin.rnacanvas`
pub fn file_name(stem: &str) -> PathBuf {
    Path::new(stem).with_extension(FILE_EXTENSION)
}

/// Whether `path` looks like a saved canvas file
pub fn is_canvas_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(FILE_EXTENSION))
}

pub fn save(path: &Path, state: &AppState) -> Result<(), PersistenceError> {
    let json = to_file_contents(state)?;
    if let Err(e) = std::fs::write(path, json) {
        error!("Failed to write canvas file {:?}: {}", path, e);
        return Err(e.into());
    }
    info!("Saved canvas to {:?}", path);
    Ok(())
}

pub fn load(path: &Path) -> Result<AppState, PersistenceError> {
    let json = std::fs::read_to_string(path).inspect_err(|e| {
        error!("Failed to read canvas file {:?}: {}", path, e);
    })?;
    let state = from_file_contents(&json).inspect_err(|e| {
        error!("Failed to parse canvas file {:?}: {}", path, e);
    })?;
    info!("Loaded canvas from {:?}", path);
    Ok(state)
}
