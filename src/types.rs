use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{SheetError, SheetResult};

//==============================================================================
// Sheet Layout
//==============================================================================

/// Rows 1..=HEADER_ROWS hold headers and metadata; player data starts below.
pub const HEADER_ROWS: u32 = 5;

/// First row carrying a player.
pub const FIRST_DATA_ROW: u32 = HEADER_ROWS + 1;

/// Number of digits in a Steam id (SteamID64).
pub const STEAM_ID_LEN: usize = 17;

/// Highest column the Sheets grid supports ("ZZZ").
pub const MAX_COLUMN: u32 = 26 + 26 * 26 + 26 * 26 * 26;

//==============================================================================
// Player Records
//==============================================================================

/// A player as supplied by the caller: Steam id plus current game-ban count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub steam_id: u64,
    pub game_bans: u32,
}

impl PlayerRecord {
    pub fn new(steam_id: u64, game_bans: u32) -> Self {
        Self {
            steam_id,
            game_bans,
        }
    }
}

//==============================================================================
// Column Addressing
//==============================================================================

/// A validated A1-style column designator, 1-indexed (`A` = 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColumnLetter(u32);

impl ColumnLetter {
    /// Build from a 1-based column index.
    pub fn from_index(index: u32) -> SheetResult<Self> {
        if index == 0 || index > MAX_COLUMN {
            return Err(SheetError::Range(format!(
                "column index {} is outside 1..={}",
                index, MAX_COLUMN
            )));
        }
        Ok(Self(index))
    }

    /// 1-based column index.
    pub fn index(self) -> u32 {
        self.0
    }

    /// Column letters (1→A, 26→Z, 27→AA, etc.)
    pub fn letters(self) -> String {
        let mut result = String::new();
        let mut num = self.0 - 1;

        loop {
            let remainder = num % 26;
            result.insert(0, (b'A' + remainder as u8) as char);
            if num < 26 {
                break;
            }
            num = num / 26 - 1;
        }

        result
    }
}

impl FromStr for ColumnLetter {
    type Err = SheetError;

    fn from_str(s: &str) -> SheetResult<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.len() > 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(SheetError::Range(format!(
                "invalid column designator {:?}: expected 1-3 letters A-ZZZ",
                s
            )));
        }

        let index = trimmed
            .bytes()
            .map(|b| (b.to_ascii_uppercase() - b'A') as u32 + 1)
            .fold(0u32, |acc, digit| acc * 26 + digit);

        Self::from_index(index)
    }
}

impl TryFrom<String> for ColumnLetter {
    type Error = SheetError;

    fn try_from(value: String) -> SheetResult<Self> {
        value.parse()
    }
}

impl From<ColumnLetter> for String {
    fn from(column: ColumnLetter) -> Self {
        column.letters()
    }
}

impl fmt::Display for ColumnLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.letters())
    }
}

/// A single-column block of rows, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub column: ColumnLetter,
    pub start_row: u32,
    pub end_row: u32,
}

impl CellRange {
    pub fn new(column: ColumnLetter, start_row: u32, end_row: u32) -> SheetResult<Self> {
        if start_row == 0 || end_row < start_row {
            return Err(SheetError::Range(format!(
                "invalid row bounds {}{}:{}{}",
                column, start_row, column, end_row
            )));
        }
        Ok(Self {
            column,
            start_row,
            end_row,
        })
    }

    /// Data rows of `column` holding `count` players, starting at FIRST_DATA_ROW.
    pub fn data_rows(column: ColumnLetter, count: usize) -> SheetResult<Self> {
        let count = u32::try_from(count)
            .map_err(|_| SheetError::Range(format!("{} rows exceed the sheet grid", count)))?;
        Self::new(column, FIRST_DATA_ROW, HEADER_ROWS + count)
    }

    /// Number of cells in the range (never zero).
    pub fn row_count(&self) -> usize {
        (self.end_row - self.start_row + 1) as usize
    }

    /// Rows covered by the range, in order.
    pub fn rows(&self) -> impl Iterator<Item = u32> {
        self.start_row..=self.end_row
    }

    /// A1 notation, optionally qualified with a tab title (`'Sheet 1'!B6:B9`).
    pub fn to_a1(&self, sheet_title: Option<&str>) -> String {
        let range = format!(
            "{col}{}:{col}{}",
            self.start_row,
            self.end_row,
            col = self.column
        );
        match sheet_title {
            Some(title) => format!("{}!{}", quote_sheet_title(title), range),
            None => range,
        }
    }
}

/// One pending cell write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellUpdate {
    pub row: u32,
    pub column: ColumnLetter,
    pub value: String,
}

impl CellUpdate {
    pub fn new(row: u32, column: ColumnLetter, value: impl Into<String>) -> Self {
        Self {
            row,
            column,
            value: value.into(),
        }
    }

    pub fn to_a1(&self, sheet_title: Option<&str>) -> String {
        let cell = format!("{}{}", self.column, self.row);
        match sheet_title {
            Some(title) => format!("{}!{}", quote_sheet_title(title), cell),
            None => cell,
        }
    }
}

/// Tab titles are always quoted; embedded quotes are doubled.
pub fn quote_sheet_title(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

//==============================================================================
// Remote Responses
//==============================================================================

/// Confirmation returned by the service for a batch write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateResponse {
    pub spreadsheet_id: String,
    pub total_updated_rows: u32,
    pub total_updated_columns: u32,
    pub total_updated_cells: u32,
    pub total_updated_sheets: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn col(s: &str) -> ColumnLetter {
        s.parse().unwrap()
    }

    #[test]
    fn test_layout_constants() {
        assert_eq!(HEADER_ROWS, 5);
        assert_eq!(FIRST_DATA_ROW, 6);
        assert_eq!(MAX_COLUMN, 18278);
    }

    #[test]
    fn test_column_letter_parse() {
        assert_eq!(col("A").index(), 1);
        assert_eq!(col("b").index(), 2);
        assert_eq!(col("Z").index(), 26);
        assert_eq!(col("AA").index(), 27);
        assert_eq!(col(" az ").index(), 52);
        assert_eq!(col("ZZZ").index(), MAX_COLUMN);
    }

    #[test]
    fn test_column_letter_round_trip_display() {
        assert_eq!(col("c").to_string(), "C");
        assert_eq!(ColumnLetter::from_index(27).unwrap().letters(), "AA");
        assert_eq!(ColumnLetter::from_index(52).unwrap().letters(), "AZ");
        assert_eq!(ColumnLetter::from_index(53).unwrap().letters(), "BA");
        assert_eq!(ColumnLetter::from_index(703).unwrap().letters(), "AAA");
    }

    #[test]
    fn test_column_letter_rejects_out_of_range() {
        for bad in ["", "1", "A1", "AAAA", "é", "-"] {
            let err = bad.parse::<ColumnLetter>().unwrap_err();
            assert!(matches!(err, SheetError::Range(_)), "{bad:?}");
        }
        assert!(ColumnLetter::from_index(0).is_err());
        assert!(ColumnLetter::from_index(MAX_COLUMN + 1).is_err());
    }

    #[test]
    fn test_column_letter_deserialize() {
        let c: ColumnLetter = serde_yaml::from_str("\"d\"").unwrap();
        assert_eq!(c, col("D"));
        assert!(serde_yaml::from_str::<ColumnLetter>("\"D4\"").is_err());
    }

    #[test]
    fn test_data_rows_range() {
        let range = CellRange::data_rows(col("C"), 3).unwrap();
        assert_eq!(range.start_row, 6);
        assert_eq!(range.end_row, 8);
        assert_eq!(range.row_count(), 3);
        assert_eq!(range.rows().collect::<Vec<_>>(), vec![6, 7, 8]);
        assert_eq!(range.to_a1(None), "C6:C8");
    }

    #[test]
    fn test_data_rows_empty_is_rejected() {
        assert!(CellRange::data_rows(col("C"), 0).is_err());
    }

    #[test]
    fn test_a1_with_sheet_title() {
        let range = CellRange::new(col("B"), 6, 9).unwrap();
        assert_eq!(range.to_a1(Some("Sheet1")), "'Sheet1'!B6:B9");
        assert_eq!(range.to_a1(Some("Bob's bans")), "'Bob''s bans'!B6:B9");
        let cell = CellUpdate::new(7, col("E"), "3");
        assert_eq!(cell.to_a1(Some("Sheet1")), "'Sheet1'!E7");
        assert_eq!(cell.to_a1(None), "E7");
    }

    #[test]
    fn test_player_record_from_yaml() {
        let records: Vec<PlayerRecord> =
            serde_yaml::from_str("- steam_id: 76561198000000001\n  game_bans: 2\n").unwrap();
        assert_eq!(records, vec![PlayerRecord::new(76561198000000001, 2)]);
    }

    #[test]
    fn test_update_response_from_api_json() {
        let json = r#"{"spreadsheetId":"abc","totalUpdatedRows":2,"totalUpdatedColumns":1,"totalUpdatedCells":2,"totalUpdatedSheets":1,"responses":[]}"#;
        let resp: UpdateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.spreadsheet_id, "abc");
        assert_eq!(resp.total_updated_cells, 2);
    }
}
