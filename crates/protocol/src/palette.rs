use serde::{Deserialize, Serialize};

use crate::color::Color;

/// The status color vocabulary shared between the layout engine and
/// renderers.
///
/// Travels as a value inside the layout configuration rather than as
/// process-wide state, so concurrent layout runs (and parallel tests)
/// can use different palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Items waiting in a queue with no directive label.
    pub waiting: Color,
    /// Items carrying the skip directive.
    pub skipped: Color,
    /// Items carrying a leader directive.
    pub leader: Color,
    /// Plain drafts; also the blend target for drafts with a directive.
    pub draft: Color,
    /// Lane header nodes in the graph view.
    pub lane_header: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            waiting: Color::rgb(0x3c, 0xbd, 0x55),
            skipped: Color::rgb(0xdb, 0x36, 0x32),
            leader: Color::rgb(0xd6, 0xbc, 0x2d),
            draft: Color::rgb(0x80, 0x80, 0x80),
            lane_header: Color::rgb(0x87, 0xce, 0xeb),
        }
    }
}
