//! Where the config file and session logs live.
//!
//! Debug builds and `cargo run` keep both in the working directory, so a
//! development checkout never reads or overwrites the installed settings.

use std::path::PathBuf;

use crate::constants::CONFIG_FILE_NAME;

const APP_DIR_NAME: &str = "rnacanvas";

pub fn is_dev_mode() -> bool {
    std::env::var("CARGO").is_ok() || cfg!(debug_assertions)
}

/// Resolve `base` (a user directory from `dirs`) to this application's
/// subdirectory, or the working directory in dev mode
fn app_dir(base: Option<PathBuf>) -> Option<PathBuf> {
    if is_dev_mode() {
        Some(PathBuf::from("."))
    } else {
        base.map(|dir| dir.join(APP_DIR_NAME))
    }
}

/// `config.json`, e.g. `~/.config/rnacanvas/config.json` on Linux
pub fn config_file() -> PathBuf {
    app_dir(dirs::config_dir())
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}

/// Session logs, under the local data directory (`~/.local/share/rnacanvas/logs` on Linux)
pub fn logs_dir() -> PathBuf {
    app_dir(dirs::data_local_dir())
        .map(|dir| dir.join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}
