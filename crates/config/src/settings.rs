// Grid settings
// Loaded from ~/.config/gridedit/settings.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    // Grid behavior
    /// Wrapped display for every column (rows must be resized by hand).
    #[serde(rename = "grid.wordWrap")]
    pub word_wrap: bool,

    /// Rows grow to fit wrapped content while editing.
    #[serde(rename = "grid.autoWrapRows")]
    pub auto_wrap_rows: bool,

    /// The table scrolls inside its own container.
    #[serde(rename = "grid.tableOverflow")]
    pub table_overflow: bool,

    #[serde(rename = "grid.fullscreen")]
    pub fullscreen: bool,

    #[serde(rename = "grid.defaultRowHeight")]
    pub default_row_height: f32,

    #[serde(rename = "grid.defaultColumnWidth")]
    pub default_column_width: f32,

    // Editor
    #[serde(rename = "editor.calendarFormat")]
    pub calendar_format: String,

    /// Separator for multi-select dropdown values in the stored cell.
    #[serde(rename = "editor.multipleDelimiter")]
    pub multiple_delimiter: String,

    // History
    #[serde(rename = "history.maxEntries")]
    pub history_max_entries: usize,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            // Grid
            word_wrap: false,
            auto_wrap_rows: false,
            table_overflow: false,
            fullscreen: false,
            default_row_height: 24.0,
            default_column_width: 100.0,
            // Editor
            calendar_format: String::from("YYYY-MM-DD"),
            multiple_delimiter: String::from(";"),
            // History
            history_max_entries: 100,
        }
    }
}

impl GridSettings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gridedit");
        config_dir.join("settings.json")
    }

    /// Load settings from the default location, falling back to defaults
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    /// Load settings from a specific file. Lines starting with `//` are comments.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(&strip_comments(contents))
            .map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Save current settings to disk
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io(e.to_string()))?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        fs::write(path, json).map_err(|e| ConfigError::Io(e.to_string()))
    }

    /// Delimiter for multi-select values. An empty setting falls back to `;`.
    pub fn delimiter(&self) -> &str {
        if self.multiple_delimiter.is_empty() {
            ";"
        } else {
            &self.multiple_delimiter
        }
    }

    /// Pickers anchor relative to the table instead of the screen.
    pub fn anchored_pickers(&self) -> bool {
        self.table_overflow || self.fullscreen
    }
}

pub(crate) fn strip_comments(contents: &str) -> String {
    contents
        .lines()
        .filter(|line| !line.trim().starts_with("//"))
        .collect::<Vec<_>>()
        .join("\n")
}
