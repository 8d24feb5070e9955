//! Steam Ban Sheet - write game-ban counts into a Google Sheet
//!
//! A roster sheet keeps one Steam profile link per row, below five header
//! rows. This library reads those links, pulls the 17-digit Steam id out of
//! each, and writes every player's game-ban count into a second column on the
//! same row, matching players by id rather than by input order.
//!
//! # Example
//!
//! ```no_run
//! use steam_ban_sheet::config::SheetConfig;
//! use steam_ban_sheet::{PlayerRecord, ProfileSheet};
//!
//! let config = SheetConfig {
//!     sheet_key: "1AbCdEf".to_string(),
//!     credentials: "service-account.json".into(),
//!     link_column: "B".parse()?,
//!     ban_column: "E".parse()?,
//! };
//! let sheet = ProfileSheet::open(&config)?;
//!
//! let players = vec![
//!     PlayerRecord::new(76561198000000002, 3),
//!     PlayerRecord::new(76561198000000001, 0),
//! ];
//! let response = sheet.update_profiles(&players)?;
//! println!("Updated {} cells", response.total_updated_cells);
//! # Ok::<(), steam_ban_sheet::SheetError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod google;
pub mod service;
pub mod sheet;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod types;

// Re-export commonly used types
pub use error::{SheetError, SheetResult};
pub use service::SheetService;
pub use sheet::ProfileSheet;
pub use types::{CellRange, CellUpdate, ColumnLetter, PlayerRecord, UpdateResponse};
