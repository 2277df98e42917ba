pub mod lane;
pub mod queue;
pub mod record;

pub use lane::{Directives, LaneSet, LaneSetError};
pub use queue::{LaneQueue, Layout, Occupancy, OccupancyEntry, PlacedItem, Status};
pub use record::{RawRecord, Record, RecordError, RecordId};
