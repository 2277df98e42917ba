use thiserror::Error;

use crate::model::RawRecord;
use crate::parsers::ParsedRecords;

#[derive(Debug, Error)]
pub enum RecordsParseError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse the crate's own record format: a JSON array of records with
/// `identifier`, `title`, `is_draft`, and `labels` as plain strings.
///
/// This is the round-trip format used to cache layout inputs; records
/// missing required fields are rejected individually, the same as any
/// other source.
pub fn parse_records(data: &[u8]) -> Result<ParsedRecords, RecordsParseError> {
    let raw: Vec<RawRecord> = serde_json::from_slice(data)?;

    let mut parsed = ParsedRecords::default();
    for (position, record) in raw.into_iter().enumerate() {
        match record.validate(position) {
            Ok(record) => parsed.records.push(record),
            Err(err) => parsed.rejected.push(err),
        }
    }
    Ok(parsed)
}
