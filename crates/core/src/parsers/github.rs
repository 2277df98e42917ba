use serde::Deserialize;
use thiserror::Error;

use crate::model::{RawRecord, RecordId};
use crate::parsers::ParsedRecords;

#[derive(Debug, Error)]
pub enum GithubParseError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One pull request as it appears in a GitHub `pulls` list response.
/// Only the fields the layout needs; everything else is ignored.
#[derive(Debug, Clone, Deserialize)]
struct RawPull {
    number: Option<u64>,
    title: Option<String>,
    draft: Option<bool>,
    labels: Option<Vec<RawLabel>>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawLabel {
    name: Option<String>,
}

/// Parse a GitHub pull-request list JSON export.
///
/// The document must be a JSON array; anything else is a parse error.
/// Individual pulls missing a required field become rejections without
/// aborting the rest. Label order is preserved as GitHub returned it.
pub fn parse_pulls(data: &[u8]) -> Result<ParsedRecords, GithubParseError> {
    let pulls: Vec<RawPull> = serde_json::from_slice(data)?;

    let mut parsed = ParsedRecords::default();
    for (position, pull) in pulls.into_iter().enumerate() {
        let raw = RawRecord {
            id: pull.number.map(RecordId::Number),
            title: pull.title,
            draft: pull.draft,
            labels: pull
                .labels
                .map(|labels| labels.into_iter().filter_map(|l| l.name).collect()),
        };
        match raw.validate(position) {
            Ok(record) => parsed.records.push(record),
            Err(err) => parsed.rejected.push(err),
        }
    }
    Ok(parsed)
}
