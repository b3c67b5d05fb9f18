use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColumnMapping {
    pub id_column: usize,
    pub user_id_column: usize,
    pub name_column: usize,
    pub amount_column: usize,
    pub date_column: usize,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            id_column: 0,
            user_id_column: 1,
            name_column: 2,
            amount_column: 3,
            date_column: 4,
        }
    }
}

/// Input layout plus extra always-recurring vendors. Every field has a
/// default, so an empty file describes an `id,user_id,name,amount,date`
/// CSV with a header row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScanConfig {
    pub delimiter: String,
    pub has_header: bool,
    pub columns: ColumnMapping,
    pub recurring_vendors: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            delimiter: ",".to_string(),
            has_header: true,
            columns: ColumnMapping::default(),
            recurring_vendors: Vec::new(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

impl ScanConfig {
    pub fn from_toml(toml_content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter.as_bytes().first().copied().unwrap_or(b',')
    }
}
