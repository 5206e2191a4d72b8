//! Codec configuration, persisted as JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{HuffmanError, Result};

/// Largest code table a container may declare unless configured otherwise.
pub const DEFAULT_MAX_CODE_TABLE_BYTES: u32 = 16 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HuffmanConfig {
    /// Keep whitespace characters when analysing and encoding text.
    pub include_whitespace: bool,
    /// Containers declaring a larger code table are rejected on read.
    pub max_code_table_bytes: u32,
}

impl Default for HuffmanConfig {
    fn default() -> Self {
        Self {
            include_whitespace: true,
            max_code_table_bytes: DEFAULT_MAX_CODE_TABLE_BYTES,
        }
    }
}

impl HuffmanConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_code_table_bytes == 0 {
            return Err(HuffmanError::Configuration(
                "max_code_table_bytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Applies the text filtering this configuration asks for.
    pub fn preprocess<'a>(&self, text: &'a str) -> impl Iterator<Item = char> + 'a {
        let keep_whitespace = self.include_whitespace;
        text.chars().filter(move |c| keep_whitespace || !c.is_whitespace())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self).map_err(|e| {
            HuffmanError::Configuration(format!("failed to serialize config: {e}"))
        })?;
        std::fs::write(path, serialized).map_err(|e| {
            HuffmanError::Configuration(format!("failed to write config file: {e}"))
        })?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            HuffmanError::Configuration(format!("failed to read config file: {e}"))
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            HuffmanError::Configuration(format!("failed to parse config file: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }
}
