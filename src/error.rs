use thiserror::Error;

pub type SheetResult<T> = Result<T, SheetError>;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Spreadsheet not found: {0}")]
    NotFound(String),

    #[error("Range error: {0}")]
    Range(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Row {row}: no 17-digit Steam id in profile link {value:?}")]
    Extraction { row: u32, value: String },

    #[error("Steam id {steam_id} has no matching profile link in the sheet")]
    Alignment { steam_id: u64 },

    #[error("Steam id {steam_id} appears in more than one record")]
    DuplicateRecord { steam_id: u64 },

    #[error("Sheets API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl SheetError {
    /// Map a non-success HTTP status from the Sheets API onto the taxonomy.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => SheetError::Authentication(message),
            404 => SheetError::NotFound(message),
            _ => SheetError::Api { status, message },
        }
    }

    /// True for errors raised while aligning records, before any remote write.
    pub fn is_alignment_failure(&self) -> bool {
        matches!(
            self,
            SheetError::Extraction { .. }
                | SheetError::Alignment { .. }
                | SheetError::DuplicateRecord { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_auth() {
        assert!(matches!(
            SheetError::from_status(401, "bad token"),
            SheetError::Authentication(_)
        ));
        assert!(matches!(
            SheetError::from_status(403, "forbidden"),
            SheetError::Authentication(_)
        ));
    }

    #[test]
    fn test_from_status_not_found() {
        let err = SheetError::from_status(404, "Requested entity was not found.");
        assert_eq!(
            err.to_string(),
            "Spreadsheet not found: Requested entity was not found."
        );
    }

    #[test]
    fn test_from_status_other() {
        let err = SheetError::from_status(429, "Quota exceeded");
        match err {
            SheetError::Api { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "Quota exceeded");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_extraction_message_names_row() {
        let err = SheetError::Extraction {
            row: 7,
            value: "https://example.com/profile/abc".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Row 7"));
        assert!(msg.contains("example.com"));
        assert!(err.is_alignment_failure());
    }

    #[test]
    fn test_alignment_message_names_id() {
        let err = SheetError::Alignment {
            steam_id: 76561198000000000,
        };
        assert!(err.to_string().contains("76561198000000000"));
        assert!(err.is_alignment_failure());
        assert!(!SheetError::Range("x".into()).is_alignment_failure());
    }
}
