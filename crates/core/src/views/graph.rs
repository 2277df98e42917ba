use mergemap_protocol::{GraphEdge, GraphNode, GraphScene, NodeKind, Palette, Point};

use crate::model::Layout;

/// Titles wrap at this many columns before rendering.
const LABEL_WRAP_COLS: usize = 20;

/// Project a layout into a drawable graph scene.
///
/// One node per placed item at (lane column, −height) filled with the
/// item's color, one header node per lane at row 0, and one directed
/// edge per dependency target, drawn from the later item to the earlier
/// one. Item node ids equal their layout indices; header ids follow.
/// Pure projection — nothing here re-derives lanes or heights.
pub fn graph_scene(layout: &Layout, palette: &Palette) -> GraphScene {
    let mut nodes = Vec::with_capacity(layout.items.len() + layout.lanes.len());

    for item in &layout.items {
        let column = layout.column(&item.lane).unwrap_or(0);
        nodes.push(GraphNode {
            id: item.index,
            label: wrap_label(&item.title, LABEL_WRAP_COLS),
            pos: Point::new(column as f64, -f64::from(item.height)),
            fill: item.color,
            kind: NodeKind::Item,
        });
    }

    for (column, lane) in layout.lanes.iter().enumerate() {
        nodes.push(GraphNode {
            id: layout.items.len() + column,
            label: lane.name.clone(),
            pos: Point::new(column as f64, 0.0),
            fill: palette.lane_header,
            kind: NodeKind::LaneHeader,
        });
    }

    let mut edges = Vec::new();
    for item in &layout.items {
        for &target in &item.depends_on {
            edges.push(GraphEdge {
                from: item.index,
                to: target,
            });
        }
    }

    GraphScene { nodes, edges }
}

/// Greedy word wrap: lines never exceed `width` columns unless a single
/// word does.
fn wrap_label(text: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_cols = 0;

    for word in text.split_whitespace() {
        let word_cols = word.chars().count();
        if current_cols == 0 {
            current.push_str(word);
            current_cols = word_cols;
        } else if current_cols + 1 + word_cols <= width {
            current.push(' ');
            current.push_str(word);
            current_cols += 1 + word_cols;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_cols = word_cols;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines.join("\n")
}
