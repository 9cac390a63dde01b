use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub console: ConsoleConfig,

    #[serde(default)]
    pub plugins: Vec<PluginConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default)]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "plugcon_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: false,
            level: default_logging_level(),
            directory: None,
        }
    }
}

/// Where aggregated plugin output goes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// "stdout", "stderr", or a file path (appended to).
    #[serde(default = "default_console_target")]
    pub target: String,

    /// Apply configured plugin colors to tags.
    #[serde(default = "default_console_color")]
    pub color: bool,

    /// Emit a debug event with a payload preview for every write.
    #[serde(default)]
    pub audit: bool,

    /// Bytes of each plugin's stderr kept for the run summary.
    #[serde(default = "default_capture_bytes")]
    pub capture_bytes: usize,
}

fn default_console_target() -> String {
    "stdout".to_string()
}

fn default_console_color() -> bool {
    true
}

fn default_capture_bytes() -> usize {
    4096
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            target: default_console_target(),
            color: default_console_color(),
            audit: false,
            capture_bytes: default_capture_bytes(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    pub name: String,

    pub command: String,

    #[serde(default)]
    pub args: Vec<String>,

    #[serde(default)]
    pub env: HashMap<String, String>,

    /// Tag color name, e.g. "cyan" or "dark_yellow".
    #[serde(default)]
    pub color: Option<String>,
}
