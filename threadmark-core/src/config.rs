use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::error::{ExportError, Result};
use crate::vocab::ExportVocabulary;

/// User configuration, loaded from ~/.threadmark/config.toml.
///
/// Every field has a default so the exporter works with no config file at
/// all. A file that exists but does not parse is a hard error, not a silent
/// fallback.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreadmarkConfig {
    /// Name shown in the document header. Omitted, the header stays generic.
    pub display_name: Option<String>,
    /// Default directory for exported markdown files.
    pub output_dir: Option<PathBuf>,
    /// Overrides for the export's tag vocabulary.
    pub vocabulary: ExportVocabulary,
}

impl ThreadmarkConfig {
    /// Load config, falling back to defaults when no file exists.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path())
    }

    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        toml::from_str(&content).map_err(|e| {
            ExportError::config(format!("failed to parse {}: {e}", path.display()))
        })
    }

    /// Config file path: ~/.threadmark/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".threadmark/config.toml")
    }

    /// Write the config back out, creating ~/.threadmark/ if needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(Self::config_path())
    }

    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_str = toml::to_string_pretty(self)
            .map_err(|e| ExportError::config(format!("failed to serialize config: {e}")))?;
        fs::write(&path, toml_str)?;

        Ok(())
    }
}
