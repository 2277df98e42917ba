pub mod github;
pub mod records;

use thiserror::Error;

use crate::model::{Record, RecordError};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("github: {0}")]
    Github(#[from] github::GithubParseError),
    #[error("records: {0}")]
    Records(#[from] records::RecordsParseError),
    #[error("unable to detect input format")]
    UnknownFormat,
}

/// The outcome of parsing one input document: the records that passed
/// validation plus the per-record rejections, in input order.
#[derive(Debug, Default)]
pub struct ParsedRecords {
    pub records: Vec<Record>,
    pub rejected: Vec<RecordError>,
}

/// Auto-detect the input format and parse it.
///
/// Both supported formats are JSON arrays. GitHub pull lists identify
/// themselves by the `number` field on their elements; the crate's own
/// record format uses `identifier`. An empty array parses as an empty
/// record set.
pub fn parse_auto(data: &[u8]) -> Result<ParsedRecords, ParseError> {
    let value: serde_json::Value =
        serde_json::from_slice(data).map_err(|_| ParseError::UnknownFormat)?;
    let Some(elements) = value.as_array() else {
        return Err(ParseError::UnknownFormat);
    };

    if elements.iter().any(|e| e.get("number").is_some()) {
        return Ok(github::parse_pulls(data)?);
    }
    if elements.is_empty() || elements.iter().any(|e| e.get("identifier").is_some()) {
        return Ok(records::parse_records(data)?);
    }
    Err(ParseError::UnknownFormat)
}

/// Keep only records carrying the given gate label — the ingest step that
/// narrows a full change-request listing down to the queue's subject
/// matter before layout.
pub fn retain_labeled(records: &mut Vec<Record>, gate: &str) {
    records.retain(|record| record.has_label(gate));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecordId;

    fn record(id: u64, labels: &[&str]) -> Record {
        Record {
            id: RecordId::Number(id),
            title: String::new(),
            draft: false,
            labels: labels.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn detects_github_pull_lists() {
        let data = br#"[{"number": 9, "title": "t", "labels": [{"name": "Alpha"}]}]"#;
        let parsed = parse_auto(data).unwrap();
        assert_eq!(parsed.records[0].id, RecordId::Number(9));
        assert_eq!(parsed.records[0].labels, ["Alpha"]);
    }

    #[test]
    fn detects_native_records() {
        let data = br#"[{"identifier": "CR-1", "title": "t", "labels": ["Alpha"]}]"#;
        let parsed = parse_auto(data).unwrap();
        assert_eq!(parsed.records[0].id, RecordId::Text("CR-1".into()));
    }

    #[test]
    fn empty_array_parses_as_no_records() {
        let parsed = parse_auto(b"[]").unwrap();
        assert!(parsed.records.is_empty());
    }

    #[test]
    fn unknown_shapes_are_rejected() {
        assert!(matches!(
            parse_auto(br#"{"not": "an array"}"#),
            Err(ParseError::UnknownFormat)
        ));
        assert!(matches!(
            parse_auto(br#"[{"something": "else"}]"#),
            Err(ParseError::UnknownFormat)
        ));
        assert!(matches!(
            parse_auto(b"plain text"),
            Err(ParseError::UnknownFormat)
        ));
    }

    #[test]
    fn retain_labeled_keeps_only_gated_records() {
        let mut records = vec![
            record(1, &["Map Edit", "Alpha"]),
            record(2, &["Alpha"]),
            record(3, &["Map Edit"]),
        ];
        retain_labeled(&mut records, "Map Edit");
        let ids: Vec<&RecordId> = records.iter().map(|r| &r.id).collect();
        assert_eq!(ids, [&RecordId::Number(1), &RecordId::Number(3)]);
    }
}
