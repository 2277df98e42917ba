use mergemap_protocol::Palette;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::queue::Status;

/// Marker strings that classify a record's queue status.
///
/// A label containing `marker` is a directive label. The one equal to
/// `skip` is the skip directive; any other directive label is a leader
/// directive. Matching is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directives {
    pub marker: String,
    pub skip: String,
}

impl Default for Directives {
    fn default() -> Self {
        Self {
            marker: "[queue]".to_string(),
            skip: "[queue] --skip--".to_string(),
        }
    }
}

impl Directives {
    /// Derive a status from a record's labels. A skip directive wins over
    /// any leader directive regardless of label order; without directive
    /// labels the record is waiting.
    pub fn classify(&self, labels: &[String]) -> Status {
        let mut status = Status::Waiting;
        for label in labels {
            if !label.contains(&self.marker) {
                continue;
            }
            if *label == self.skip {
                return Status::Skipped;
            }
            status = Status::Leader;
        }
        status
    }
}

/// A rejected lane configuration. Raised once, by the constructor, before
/// any record is processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LaneSetError {
    #[error("no configured lanes")]
    Empty,
    #[error("duplicate configured lane `{0}`")]
    DuplicateLane(String),
    #[error("configured lane `{0}` collides with a reserved lane name")]
    ReservedCollision(String),
    #[error("reserved lane names must differ, both are `{0}`")]
    ReservedNamesEqual(String),
}

/// The ordered lane configuration for one layout run: the configured lane
/// names, the two reserved lanes, the directive markers, and the palette.
///
/// Construction validates everything up front, so `compute_layout` itself
/// has no failure path. Column ordinals for the graph view: the
/// unassigned lane is column 0, configured lanes follow in configuration
/// order, the multi lane is last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneSet {
    configured: Vec<String>,
    multi: String,
    unassigned: String,
    directives: Directives,
    palette: Palette,
}

impl LaneSet {
    /// Reserved lane for records whose labels match more than one
    /// configured lane.
    pub const DEFAULT_MULTI: &'static str = "Multiple";
    /// Reserved lane for records matching no configured lane.
    pub const DEFAULT_UNASSIGNED: &'static str = "General";

    /// Build a lane set with the default reserved names, directives, and
    /// palette.
    pub fn new<I, S>(configured: I) -> Result<Self, LaneSetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_reserved(
            configured,
            Self::DEFAULT_MULTI.to_string(),
            Self::DEFAULT_UNASSIGNED.to_string(),
        )
    }

    /// Build a lane set with explicit reserved lane names.
    pub fn with_reserved<I, S>(
        configured: I,
        multi: String,
        unassigned: String,
    ) -> Result<Self, LaneSetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let configured: Vec<String> = configured.into_iter().map(Into::into).collect();
        if configured.is_empty() {
            return Err(LaneSetError::Empty);
        }
        if multi == unassigned {
            return Err(LaneSetError::ReservedNamesEqual(multi));
        }
        for (i, lane) in configured.iter().enumerate() {
            if *lane == multi || *lane == unassigned {
                return Err(LaneSetError::ReservedCollision(lane.clone()));
            }
            if configured[..i].contains(lane) {
                return Err(LaneSetError::DuplicateLane(lane.clone()));
            }
        }
        Ok(Self {
            configured,
            multi,
            unassigned,
            directives: Directives::default(),
            palette: Palette::default(),
        })
    }

    /// Replace the directive markers.
    pub fn with_directives(mut self, directives: Directives) -> Self {
        self.directives = directives;
        self
    }

    /// Replace the palette.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn configured(&self) -> &[String] {
        &self.configured
    }

    pub fn multi_lane(&self) -> &str {
        &self.multi
    }

    pub fn unassigned_lane(&self) -> &str {
        &self.unassigned
    }

    pub fn directives(&self) -> &Directives {
        &self.directives
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Position of a label in the configured lane list, if it names one.
    pub fn configured_index(&self, label: &str) -> Option<usize> {
        self.configured.iter().position(|lane| lane == label)
    }

    /// All lane names in column order: unassigned, configured, multi.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.unassigned.as_str())
            .chain(self.configured.iter().map(String::as_str))
            .chain(std::iter::once(self.multi.as_str()))
    }

    /// Total lane count including both reserved lanes.
    pub fn lane_count(&self) -> usize {
        self.configured.len() + 2
    }
}
