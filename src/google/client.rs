//! Blocking Sheets API v4 client bound to one spreadsheet's first tab

use chrono::{DateTime, Utc};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::Url;
use serde::Deserialize;
use serde_json::{json, Value};
use std::cell::RefCell;
use std::time::Duration;
use tracing::{debug, info};

use super::auth::{AccessToken, ServiceAccountKey};
use crate::error::{SheetError, SheetResult};
use crate::service::SheetService;
use crate::types::{quote_sheet_title, CellRange, CellUpdate, ColumnLetter, UpdateResponse};

pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

/// `ValueRange` as returned by `values.get`.
#[derive(Debug, Default, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    error: GoogleError,
}

#[derive(Debug, Deserialize)]
struct GoogleError {
    message: String,
}

/// Sheets API client for the first tab of one spreadsheet.
///
/// Caches its bearer token, so it is meant for one thread at a time.
pub struct GoogleSheetsClient {
    http: Client,
    key: ServiceAccountKey,
    token: RefCell<Option<AccessToken>>,
    spreadsheet_id: String,
    sheet_title: String,
}

impl GoogleSheetsClient {
    /// Authenticate and resolve the first tab of `spreadsheet_id`.
    pub fn open(spreadsheet_id: &str, key: ServiceAccountKey) -> SheetResult<Self> {
        let http = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .user_agent(concat!("steam-ban-sheet/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let mut client = Self {
            http,
            key,
            token: RefCell::new(None),
            spreadsheet_id: spreadsheet_id.to_string(),
            sheet_title: String::new(),
        };

        let url = client.endpoint(&[])?;
        let (status, body) = client.send_raw(
            client
                .http
                .get(url)
                .query(&[("fields", "properties.title,sheets.properties")]),
        )?;
        client.sheet_title = resolve_first_tab(status, body, spreadsheet_id)?;
        info!(
            spreadsheet = %client.spreadsheet_id,
            sheet = %client.sheet_title,
            "opened spreadsheet"
        );

        Ok(client)
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    /// Title of the tab every read and write goes to.
    pub fn sheet_title(&self) -> &str {
        &self.sheet_title
    }

    fn endpoint(&self, tail: &[&str]) -> SheetResult<Url> {
        let mut url = Url::parse(SHEETS_API_BASE)
            .map_err(|e| SheetError::Config(format!("invalid API base {}: {}", SHEETS_API_BASE, e)))?;
        url.path_segments_mut()
            .map_err(|_| SheetError::Config(format!("invalid API base {}", SHEETS_API_BASE)))?
            .push(&self.spreadsheet_id)
            .extend(tail);
        Ok(url)
    }

    fn bearer(&self) -> SheetResult<String> {
        let mut cached = self.token.borrow_mut();
        if let Some(bearer) = fresh_bearer(cached.as_ref(), Utc::now()) {
            return Ok(bearer);
        }
        let token = self.key.fetch_token(&self.http)?;
        let bearer = token.token.clone();
        *cached = Some(token);
        Ok(bearer)
    }

    fn send_raw(&self, request: RequestBuilder) -> SheetResult<(u16, String)> {
        let response = request.bearer_auth(self.bearer()?).send()?;
        let status = response.status().as_u16();
        Ok((status, response.text()?))
    }

    /// Send with auth; non-2xx statuses become `SheetError`s.
    fn send(&self, request: RequestBuilder) -> SheetResult<String> {
        let (status, body) = self.send_raw(request)?;
        check_status(status, body)
    }

    fn get_values(&self, a1: &str) -> SheetResult<ValueRange> {
        debug!(range = a1, "values.get");
        let url = self.endpoint(&["values", a1])?;
        let body = self.send(self.http.get(url).query(&[("majorDimension", "COLUMNS")]))?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl SheetService for GoogleSheetsClient {
    fn col_values(&self, column: ColumnLetter) -> SheetResult<Vec<String>> {
        let a1 = format!("{}!{col}:{col}", quote_sheet_title(&self.sheet_title), col = column);
        Ok(first_column(self.get_values(&a1)?))
    }

    fn range_values(&self, range: &CellRange) -> SheetResult<Vec<String>> {
        let values = self.get_values(&range.to_a1(Some(self.sheet_title.as_str())))?;
        Ok(padded_column(values, range))
    }

    fn update_cells(&self, cells: &[CellUpdate]) -> SheetResult<UpdateResponse> {
        if cells.is_empty() {
            debug!("empty batch, nothing sent");
            return Ok(UpdateResponse {
                spreadsheet_id: self.spreadsheet_id.clone(),
                ..UpdateResponse::default()
            });
        }

        let url = self.endpoint(&["values:batchUpdate"])?;
        let body = self.send(
            self.http
                .post(url)
                .json(&batch_update_body(&self.sheet_title, cells)),
        )?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Cached token's bearer string, unless it is missing or about to expire.
fn fresh_bearer(cached: Option<&AccessToken>, now: DateTime<Utc>) -> Option<String> {
    cached
        .filter(|token| token.is_fresh(now))
        .map(|token| token.token.clone())
}

fn check_status(status: u16, body: String) -> SheetResult<String> {
    if (200..300).contains(&status) {
        Ok(body)
    } else {
        Err(api_error(status, &body))
    }
}

/// Metadata response to the title of the first tab.
fn resolve_first_tab(status: u16, body: String, spreadsheet_id: &str) -> SheetResult<String> {
    let body = check_status(status, body)?;
    first_sheet_title(&body, spreadsheet_id)
}

fn first_sheet_title(body: &str, spreadsheet_id: &str) -> SheetResult<String> {
    let meta: SpreadsheetMeta = serde_json::from_str(body)?;
    meta.sheets
        .into_iter()
        .next()
        .map(|sheet| sheet.properties.title)
        .ok_or_else(|| SheetError::NotFound(format!("spreadsheet {} has no tabs", spreadsheet_id)))
}

/// Column-major values collapse to the single requested column.
fn first_column(range: ValueRange) -> Vec<String> {
    range
        .values
        .into_iter()
        .next()
        .unwrap_or_default()
        .iter()
        .map(cell_text)
        .collect()
}

/// The API drops trailing blanks; pad back out to one value per row.
fn padded_column(values: ValueRange, range: &CellRange) -> Vec<String> {
    let mut column = first_column(values);
    column.resize(range.row_count(), String::new());
    column
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn batch_update_body(sheet_title: &str, cells: &[CellUpdate]) -> Value {
    let data: Vec<Value> = cells
        .iter()
        .map(|cell| {
            json!({
                "range": cell.to_a1(Some(sheet_title)),
                "majorDimension": "ROWS",
                "values": [[cell.value]],
            })
        })
        .collect();

    json!({
        "valueInputOption": "USER_ENTERED",
        "data": data,
    })
}

fn api_error(status: u16, body: &str) -> SheetError {
    let message = serde_json::from_str::<GoogleErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.trim().to_string());
    SheetError::from_status(status, message)
}
