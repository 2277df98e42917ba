pub mod color;
pub mod palette;
pub mod scene;

pub use color::Color;
pub use palette::Palette;
pub use scene::{GraphEdge, GraphNode, GraphScene, NodeKind, Point};
