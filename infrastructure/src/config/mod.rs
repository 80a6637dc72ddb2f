//! Configuration file loading for strategy-canvas
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `STRATEGY_CANVAS_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./strategy-canvas.toml` or `./.strategy-canvas.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/strategy-canvas/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileLoggingConfig, FileOutputConfig, FileOutputFormat,
    FileProviderConfig, FileQuestionnaireConfig,
};
pub use loader::ConfigLoader;
