//! Steam id extraction from profile-link cells

use regex::Regex;
use std::sync::OnceLock;

use crate::error::{SheetError, SheetResult};
use crate::types::{FIRST_DATA_ROW, STEAM_ID_LEN};

fn steam_id_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"[0-9]{{{}}}", STEAM_ID_LEN)).expect("Steam id pattern is valid")
    })
}

/// First run of 17 consecutive ASCII digits in `link`, if any.
///
/// Longer digit runs yield their first 17 digits, matching how the sheet has
/// always been read.
pub fn extract_steam_id(link: &str) -> Option<u64> {
    steam_id_pattern()
        .find(link)
        .and_then(|m| m.as_str().parse().ok())
}

/// Extract one Steam id per link, preserving order.
///
/// `links[0]` is taken to be sheet row FIRST_DATA_ROW; the first link without
/// an id aborts the whole extraction.
pub fn extract_steam_ids<S: AsRef<str>>(links: &[S]) -> SheetResult<Vec<u64>> {
    links
        .iter()
        .zip(FIRST_DATA_ROW..)
        .map(|(link, row)| {
            let link = link.as_ref();
            extract_steam_id(link).ok_or_else(|| SheetError::Extraction {
                row,
                value: link.to_string(),
            })
        })
        .collect()
}
