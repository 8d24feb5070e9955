//! ProfileSheet: the profile-link column in, the game-ban column out

use std::collections::{HashMap, HashSet};

use tracing::{debug, info, warn};

use crate::config::SheetConfig;
use crate::error::{SheetError, SheetResult};
use crate::extract::extract_steam_ids;
use crate::google::{GoogleSheetsClient, ServiceAccountKey};
use crate::service::SheetService;
use crate::types::{
    CellRange, CellUpdate, ColumnLetter, PlayerRecord, UpdateResponse, FIRST_DATA_ROW, HEADER_ROWS,
};

/// Handle on the first tab of one spreadsheet, with its two player columns.
pub struct ProfileSheet<S = GoogleSheetsClient> {
    service: S,
    link_column: ColumnLetter,
    ban_column: ColumnLetter,
}

impl ProfileSheet<GoogleSheetsClient> {
    /// Authenticate with the configured service-account key and bind to the
    /// first tab of `config.sheet_key`.
    pub fn open(config: &SheetConfig) -> SheetResult<Self> {
        let key = ServiceAccountKey::from_file(&config.credentials)?;
        let client = GoogleSheetsClient::open(&config.sheet_key, key)?;
        Ok(Self::with_service(
            client,
            config.link_column,
            config.ban_column,
        ))
    }
}

impl<S: SheetService> ProfileSheet<S> {
    pub fn with_service(service: S, link_column: ColumnLetter, ban_column: ColumnLetter) -> Self {
        Self {
            service,
            link_column,
            ban_column,
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn link_column(&self) -> ColumnLetter {
        self.link_column
    }

    pub fn ban_column(&self) -> ColumnLetter {
        self.ban_column
    }

    /// Raw profile-link cells from FIRST_DATA_ROW down to the last populated
    /// row of the link column, in row order.
    pub fn get_profile_links(&self) -> SheetResult<Vec<String>> {
        let populated = self.service.col_values(self.link_column)?.len();
        if populated <= HEADER_ROWS as usize {
            debug!(column = %self.link_column, "no profile links below the header rows");
            return Ok(Vec::new());
        }

        let range = CellRange::data_rows(self.link_column, populated - HEADER_ROWS as usize)?;
        debug!(range = %range.to_a1(None), "reading profile links");
        self.service.range_values(&range)
    }

    /// Steam ids of the linked profiles, one per data row.
    pub fn profile_ids(&self) -> SheetResult<Vec<u64>> {
        extract_steam_ids(&self.get_profile_links()?)
    }

    /// Read and align without writing: the cell writes `update_profiles`
    /// would submit for `records`.
    pub fn plan_updates(&self, records: &[PlayerRecord]) -> SheetResult<Vec<CellUpdate>> {
        let ids = self.profile_ids()?;
        align_records(&ids, records, self.ban_column)
    }

    /// Write each record's game-ban count into the row holding its profile link.
    ///
    /// All reads and alignment happen before the single batch write, so an
    /// extraction or alignment failure leaves the sheet untouched.
    pub fn update_profiles(&self, records: &[PlayerRecord]) -> SheetResult<UpdateResponse> {
        let updates = self.plan_updates(records)?;
        info!(
            column = %self.ban_column,
            cells = updates.len(),
            "submitting game-ban batch"
        );
        self.service.update_cells(&updates)
    }
}

/// Pair every extracted id (row FIRST_DATA_ROW + i) with the record carrying
/// that id and produce the ban-column writes in row order.
///
/// A record whose id is not among `ids` is an error, as is an id appearing in
/// two records. Rows whose id has no record are left out of the batch.
pub fn align_records(
    ids: &[u64],
    records: &[PlayerRecord],
    ban_column: ColumnLetter,
) -> SheetResult<Vec<CellUpdate>> {
    let known: HashSet<u64> = ids.iter().copied().collect();
    let mut by_id: HashMap<u64, &PlayerRecord> = HashMap::with_capacity(records.len());

    for record in records {
        if !known.contains(&record.steam_id) {
            return Err(SheetError::Alignment {
                steam_id: record.steam_id,
            });
        }
        if by_id.insert(record.steam_id, record).is_some() {
            return Err(SheetError::DuplicateRecord {
                steam_id: record.steam_id,
            });
        }
    }

    let mut updates = Vec::with_capacity(ids.len());
    for (steam_id, row) in ids.iter().zip(FIRST_DATA_ROW..) {
        match by_id.get(steam_id) {
            Some(record) => {
                updates.push(CellUpdate::new(row, ban_column, record.game_bans.to_string()))
            }
            None => warn!(row, steam_id, "no record for profile; leaving ban cell as is"),
        }
    }

    Ok(updates)
}
