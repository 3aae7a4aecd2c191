//! Centralized constants used across the crate.
//!
//! Magic numbers and fixed names that are used in multiple places or would
//! benefit from being named.

use std::num::NonZeroUsize;

/// Number of snapshots kept per history stack unless configured otherwise
pub const DEFAULT_HISTORY_CAPACITY: NonZeroUsize = match NonZeroUsize::new(100) {
    Some(capacity) => capacity,
    None => panic!("default history capacity must be positive"),
};

/// Extension of saved canvas files (without the leading dot)
pub const FILE_EXTENSION: &str = "rnacanvas";

/// MIME type saved canvas files are offered with
pub const MIME_TYPE: &str = "text/plain";

/// Fraction of the viewport the content occupies after fitting the view to it.
/// Leaves some visible space around the drawing.
pub const FIT_TO_CONTENT_MARGIN: f64 = 0.9;

/// Distance between consecutive bases placed by the dot-bracket drawer
pub const BASE_SPACING: f64 = 10.0;

/// Name of the log file inside the logs directory
pub const LOG_FILE_NAME: &str = "rnacanvas.log";

/// Name of the config file inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.json";
