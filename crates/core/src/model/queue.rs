use mergemap_protocol::Color;
use serde::{Deserialize, Serialize};

use crate::model::record::RecordId;

/// Queue status of a placed item, derived from directive labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Leader,
    Skipped,
    Waiting,
}

/// One record after layout: its lane, row, status, color, and the items
/// it must be drawn after. Immutable once emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedItem {
    /// Sequence position in the input; stable node identity for edges.
    pub index: usize,
    #[serde(rename = "identifier")]
    pub id: RecordId,
    pub title: String,
    #[serde(rename = "is_draft")]
    pub draft: bool,
    /// The lane the item settled in — exactly one, even if its labels
    /// touched several.
    pub lane: String,
    /// Row within the lane; 1 is the first occupant, larger is lower.
    pub height: u32,
    pub status: Status,
    pub is_multi: bool,
    pub color: Color,
    /// Indices of the immediately-preceding occupants this item depends
    /// on, deduplicated, in discovery order.
    #[serde(rename = "dependency_targets")]
    pub depends_on: Vec<usize>,
}

/// One occupancy entry: an item index and the height it holds in a lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancyEntry {
    pub index: usize,
    pub height: u32,
}

/// The ordered record of which items settled in one lane and at what
/// height.
///
/// Insertion order is preserved; `latest` is the entry with the maximum
/// numeric index, found by true numeric comparison rather than by
/// position, so the query stays correct even if entries were ever
/// recorded out of order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Occupancy {
    entries: Vec<OccupancyEntry>,
}

impl Occupancy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[OccupancyEntry] {
        &self.entries
    }

    pub fn contains(&self, index: usize) -> bool {
        self.entries.iter().any(|e| e.index == index)
    }

    pub fn height_of(&self, index: usize) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.index == index)
            .map(|e| e.height)
    }

    /// Record an item's height, updating in place if the index is already
    /// present.
    pub fn record(&mut self, index: usize, height: u32) {
        match self.entries.iter_mut().find(|e| e.index == index) {
            Some(entry) => entry.height = height,
            None => self.entries.push(OccupancyEntry { index, height }),
        }
    }

    /// The most recently inserted occupant: the entry with the maximum
    /// numeric index.
    pub fn latest(&self) -> Option<OccupancyEntry> {
        self.entries.iter().max_by_key(|e| e.index).copied()
    }
}

/// One lane's name paired with its occupancy, in column order within
/// `Layout::lanes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneQueue {
    pub name: String,
    pub occupancy: Occupancy,
}

/// The complete output of one layout run: every placed item in input
/// order plus the per-lane occupancy index, both serializable so
/// downstream exports never rerun layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub items: Vec<PlacedItem>,
    /// All lanes in column order: unassigned, configured, multi.
    pub lanes: Vec<LaneQueue>,
}

impl Layout {
    pub fn item(&self, index: usize) -> Option<&PlacedItem> {
        self.items.get(index)
    }

    /// A lane's occupancy by name.
    pub fn queue(&self, lane: &str) -> Option<&Occupancy> {
        self.lanes
            .iter()
            .find(|q| q.name == lane)
            .map(|q| &q.occupancy)
    }

    /// A lane's column ordinal in the graph view.
    pub fn column(&self, lane: &str) -> Option<usize> {
        self.lanes.iter().position(|q| q.name == lane)
    }
}
