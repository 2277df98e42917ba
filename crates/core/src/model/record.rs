use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The public identifier of a change request — an integer for numbered
/// sources (pull requests), free text otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(u64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => n.fmt(f),
            RecordId::Text(s) => s.fmt(f),
        }
    }
}

impl From<u64> for RecordId {
    fn from(n: u64) -> Self {
        RecordId::Number(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Text(s.to_string())
    }
}

/// A validated change-request record, immutable once read.
///
/// Label order is significant: when a record's labels match more than one
/// configured lane, the first match decides which lane is "first" during
/// layout. Providers must preserve the original order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "identifier")]
    pub id: RecordId,
    pub title: String,
    #[serde(rename = "is_draft", default)]
    pub draft: bool,
    #[serde(default)]
    pub labels: Vec<String>,
}

impl Record {
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}

/// A record as deserialized, before validation. Every field is optional;
/// `validate` turns it into a `Record` or a rejection naming the missing
/// field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "identifier")]
    pub id: Option<RecordId>,
    pub title: Option<String>,
    #[serde(rename = "is_draft")]
    pub draft: Option<bool>,
    pub labels: Option<Vec<String>>,
}

/// A record rejected before layout. Rejections never abort the rest of
/// the input; callers collect them alongside the validated records.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("record {id} is missing required field `{field}`")]
    MissingField { id: RecordId, field: &'static str },
    #[error("record at position {position} has no identifier")]
    MissingId { position: usize },
}

impl RawRecord {
    /// Validate into a `Record`. `position` is the record's ordinal in the
    /// input, used to identify records that lack an identifier.
    ///
    /// `identifier` and `title` are required; a missing draft flag means
    /// not-a-draft and missing labels mean no labels.
    pub fn validate(self, position: usize) -> Result<Record, RecordError> {
        let Some(id) = self.id else {
            return Err(RecordError::MissingId { position });
        };
        let Some(title) = self.title else {
            return Err(RecordError::MissingField { id, field: "title" });
        };
        Ok(Record {
            id,
            title,
            draft: self.draft.unwrap_or(false),
            labels: self.labels.unwrap_or_default(),
        })
    }
}
