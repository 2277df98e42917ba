use serde::{Deserialize, Serialize};

use crate::color::Color;

/// A 2-D position in scene coordinates. Columns grow rightward; rows grow
/// upward, so queue items sit at negative `y` below their lane header.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// What a graph node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// A placed queue item; its id equals the item's layout index.
    Item,
    /// A lane title pinned at the top of its column.
    LaneHeader,
}

/// One node of the queue graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Node identity. Item nodes occupy `0..item_count` and match their
    /// layout index; lane header ids follow.
    pub id: usize,
    /// Display label, possibly pre-wrapped with `\n` separators.
    pub label: String,
    pub pos: Point,
    pub fill: Color,
    pub kind: NodeKind,
}

/// A directed dependency edge, drawn from the later item to the earlier
/// item it must render below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: usize,
    pub to: usize,
}

/// The complete drawable description of one layout run.
///
/// The core emits a `GraphScene`; renderers consume it without knowing
/// anything about the layout rules, and it serializes so a scene can be
/// cached and re-rendered without rerunning layout.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphScene {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphScene {
    /// Look up a node by id.
    pub fn node(&self, id: usize) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Scene extents as (min, max) corners, or `None` for an empty scene.
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let first = self.nodes.first()?;
        let mut min = first.pos;
        let mut max = first.pos;
        for node in &self.nodes {
            min.x = min.x.min(node.pos.x);
            min.y = min.y.min(node.pos.y);
            max.x = max.x.max(node.pos.x);
            max.y = max.y.max(node.pos.y);
        }
        Some((min, max))
    }
}
