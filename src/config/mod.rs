use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::constants::DEFAULT_HISTORY_CAPACITY;

/// Application configuration persisted to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfigData {
    /// Maximum number of undo (and redo) steps kept
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    /// Last saved or opened canvas file (remembered for quick access, not auto-loaded)
    #[serde(default)]
    pub last_file_path: Option<PathBuf>,
}

fn default_history_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY.get()
}

impl Default for AppConfigData {
    fn default() -> Self {
        Self {
            history_capacity: default_history_capacity(),
            last_file_path: None,
        }
    }
}

impl AppConfigData {
    /// Configured capacity, falling back to the default when set to zero
    pub fn history_capacity(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.history_capacity).unwrap_or_else(|| {
            warn!(
                "History capacity of 0 is invalid, using {}",
                DEFAULT_HISTORY_CAPACITY
            );
            DEFAULT_HISTORY_CAPACITY
        })
    }
}

/// Runtime configuration resource
#[derive(Resource, Debug, Clone)]
pub struct AppConfig {
    /// The persisted configuration data
    pub data: AppConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved
    pub dirty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: AppConfigData::default(),
            config_path: crate::paths::config_file(),
            dirty: false,
        }
    }
}

impl AppConfig {
    /// Remember the last saved or opened file
    pub fn set_last_file_path(&mut self, path: PathBuf) {
        if self.data.last_file_path.as_ref() != Some(&path) {
            self.data.last_file_path = Some(path);
            self.dirty = true;
        }
    }
}

/// Resource to notify the user when config was reset to defaults
#[derive(Resource, Debug, Default)]
pub struct ConfigResetNotification {
    /// Whether to show the notification
    pub show: bool,
    /// The reason for the reset (parse error, read error, etc.)
    pub reason: Option<String>,
}

/// Result of loading config from disk
#[derive(Debug)]
pub struct LoadConfigResult {
    pub config: AppConfig,
    /// Error message if config was reset to defaults due to an error
    pub reset_reason: Option<String>,
}

/// Load configuration from disk. A missing file yields defaults silently,
/// an unreadable or corrupted one yields defaults plus a reset reason.
pub fn load_config(config_path: &Path) -> LoadConfigResult {
    let (data, reset_reason) = if config_path.exists() {
        match std::fs::read_to_string(config_path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(data) => {
                    info!("Loaded config from {:?}", config_path);
                    (data, None)
                }
                Err(e) => {
                    warn!("Failed to parse config file: {}", e);
                    (
                        AppConfigData::default(),
                        Some(format!("Configuration file was corrupted: {}", e)),
                    )
                }
            },
            Err(e) => {
                warn!("Failed to read config file: {}", e);
                (
                    AppConfigData::default(),
                    Some(format!("Could not read configuration file: {}", e)),
                )
            }
        }
    } else {
        info!("No config file found, using defaults");
        (AppConfigData::default(), None)
    };

    LoadConfigResult {
        config: AppConfig {
            data,
            config_path: config_path.to_path_buf(),
            dirty: false,
        },
        reset_reason,
    }
}

/// Save configuration to disk
pub fn save_config(config: &AppConfig) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(&config.data).map_err(|e| {
        error!("Failed to serialize config: {}", e);
        std::io::Error::other(e)
    })?;

    if let Some(parent) = config.config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).inspect_err(|e| {
            error!("Failed to create config directory {:?}: {}", parent, e);
        })?;
    }

    if let Err(e) = std::fs::write(&config.config_path, json) {
        error!("Failed to save config: {}", e);
        return Err(e);
    }
    info!("Config saved to {:?}", config.config_path);
    Ok(())
}

/// Message to trigger config save
#[derive(Message)]
pub struct SaveConfigRequest;

/// Message to update the last file path in config
#[derive(Message)]
pub struct UpdateLastFilePathRequest {
    pub path: PathBuf,
}

/// System to save config when requested
fn save_config_system(mut events: MessageReader<SaveConfigRequest>, mut config: ResMut<AppConfig>) {
    for _ in events.read() {
        if config.dirty && save_config(&config).is_ok() {
            config.dirty = false;
        }
    }
}

/// System to update last file path
fn update_last_file_path_system(
    mut events: MessageReader<UpdateLastFilePathRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        config.set_last_file_path(event.path.clone());
        save_events.write(SaveConfigRequest);
    }
}

/// Loads the config file while the app is being built, so that plugins added
/// afterwards (such as the history plugin) can read it.
pub struct ConfigPlugin {
    pub config_path: PathBuf,
}

impl Default for ConfigPlugin {
    fn default() -> Self {
        Self {
            config_path: crate::paths::config_file(),
        }
    }
}

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        let result = load_config(&self.config_path);
        let notification = ConfigResetNotification {
            show: result.reset_reason.is_some(),
            reason: result.reset_reason,
        };

        app.insert_resource(result.config)
            .insert_resource(notification)
            .add_message::<SaveConfigRequest>()
            .add_message::<UpdateLastFilePathRequest>()
            .add_systems(
                Update,
                (
                    update_last_file_path_system.run_if(on_message::<UpdateLastFilePathRequest>),
                    save_config_system.run_if(on_message::<SaveConfigRequest>),
                )
                    .chain(),
            );
    }
}
