//! Embedder-facing configuration for sessions and scrollback.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::grid::DEFAULT_MAX_SCROLLBACK;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub terminal: TerminalConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Shell command line to spawn. Defaults to `$SHELL`, falling back to `sh`.
    pub shell: Option<String>,
    /// Scrollback lines retained per grid.
    pub scrollback: usize,
    /// Initial working directory for new sessions.
    pub working_directory: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            terminal: TerminalConfig::default(),
        }
    }
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            shell: None,
            scrollback: DEFAULT_MAX_SCROLLBACK,
            working_directory: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file. A missing file yields defaults;
    /// a malformed file is reported as an error.
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        let config = toml::from_str(&raw)?;
        Ok(config)
    }
}
