use serde::{Deserialize, Serialize};

use crate::model::{Layout, RecordId};

/// One occupant of a lane, in the order it settled there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// The index the item held during layout.
    pub index: usize,
    #[serde(rename = "identifier")]
    pub id: RecordId,
    pub title: String,
}

/// A lane's queue in human-readable form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneRoster {
    pub lane: String,
    pub entries: Vec<RosterEntry>,
}

/// Rebuild every lane's queue as identifiers and titles, straight from
/// the layout output — the occupancy mapping says who sits where, the
/// item sequence supplies the public identity. Nothing is recomputed.
pub fn lane_rosters(layout: &Layout) -> Vec<LaneRoster> {
    layout
        .lanes
        .iter()
        .map(|lane| LaneRoster {
            lane: lane.name.clone(),
            entries: lane
                .occupancy
                .entries()
                .iter()
                .filter_map(|entry| {
                    layout.item(entry.index).map(|item| RosterEntry {
                        index: entry.index,
                        id: item.id.clone(),
                        title: item.title.clone(),
                    })
                })
                .collect(),
        })
        .collect()
}
