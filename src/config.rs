//! Sheet configuration: which spreadsheet, which key, which columns

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{SheetError, SheetResult};
use crate::types::{ColumnLetter, PlayerRecord};

/// Everything needed to open a [`ProfileSheet`](crate::sheet::ProfileSheet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SheetConfig {
    /// Spreadsheet key from the sheet URL (`/spreadsheets/d/<key>/edit`).
    pub sheet_key: String,
    /// Path to the service-account JSON key.
    pub credentials: PathBuf,
    /// Column holding Steam profile links.
    pub link_column: ColumnLetter,
    /// Column receiving game-ban counts.
    pub ban_column: ColumnLetter,
}

/// Partially specified config, as read from a file or given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialSheetConfig {
    pub sheet_key: Option<String>,
    pub credentials: Option<PathBuf>,
    pub link_column: Option<ColumnLetter>,
    pub ban_column: Option<ColumnLetter>,
}

impl PartialSheetConfig {
    pub fn from_file(path: &Path) -> SheetResult<Self> {
        let content = fs::read_to_string(path)?;
        let mut partial: Self = serde_yaml::from_str(&content)?;

        // Relative key paths are relative to the config file, not the cwd
        if let (Some(creds), Some(dir)) = (partial.credentials.as_mut(), path.parent()) {
            if creds.is_relative() {
                *creds = dir.join(&*creds);
            }
        }

        Ok(partial)
    }

    /// Fields set in `other` win.
    pub fn merge(self, other: PartialSheetConfig) -> Self {
        Self {
            sheet_key: other.sheet_key.or(self.sheet_key),
            credentials: other.credentials.or(self.credentials),
            link_column: other.link_column.or(self.link_column),
            ban_column: other.ban_column.or(self.ban_column),
        }
    }

    pub fn build(self) -> SheetResult<SheetConfig> {
        let missing = |field: &str| {
            SheetError::Config(format!("missing required setting `{}`", field))
        };

        let sheet_key = self.sheet_key.ok_or_else(|| missing("sheet_key"))?;
        if sheet_key.trim().is_empty() {
            return Err(missing("sheet_key"));
        }

        Ok(SheetConfig {
            sheet_key,
            credentials: self.credentials.ok_or_else(|| missing("credentials"))?,
            link_column: self.link_column.ok_or_else(|| missing("link_column"))?,
            ban_column: self.ban_column.ok_or_else(|| missing("ban_column"))?,
        })
    }
}

/// Load player records from a YAML (or JSON) list of `{steam_id, game_bans}`.
pub fn load_records(path: &Path) -> SheetResult<Vec<PlayerRecord>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&content)?)
}
