use std::io::stdout;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use mergemap_protocol::{GraphNode, GraphScene, NodeKind};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Block,
};

/// Horizontal cells per lane column.
const COL_WIDTH: u16 = 24;
/// Vertical cells per queue row.
const ROW_HEIGHT: u16 = 2;

/// A node's unscrolled cell position: lane columns left to right, the
/// header row at the top, heights growing downward.
fn cell_of(node: &GraphNode) -> (u16, u16) {
    let col = (node.pos.x.max(0.0) as u16).saturating_mul(COL_WIDTH);
    let row = ((-node.pos.y).max(0.0) as u16).saturating_mul(ROW_HEIGHT);
    (col, row)
}

fn put_str(buf: &mut Buffer, area: Rect, x: u16, y: u16, text: &str, style: Style) {
    if y >= area.height {
        return;
    }
    for (i, ch) in text.chars().enumerate() {
        let cx = x.saturating_add(i as u16);
        if cx >= area.width {
            break;
        }
        buf[(area.x + cx, area.y + y)].set_char(ch).set_style(style);
    }
}

/// Draw the queue graph into an alternate-screen terminal and block
/// until the user quits. Arrow keys scroll; `q` or Esc quits.
pub fn render_tui(scene: &GraphScene) -> Result<()> {
    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(out);
    let mut terminal = Terminal::new(backend)?;

    let mut scroll_x: u16 = 0;
    let mut scroll_y: u16 = 0;
    let item_count = scene
        .nodes
        .iter()
        .filter(|n| n.kind == NodeKind::Item)
        .count();

    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            let header_area = Rect::new(0, 0, area.width, 1);
            let header = Block::default()
                .title(format!(
                    " mergemap — {item_count} items | arrows scroll | q quit "
                ))
                .style(Style::default().fg(Color::White).bg(Color::DarkGray));
            frame.render_widget(header, header_area);

            let content = Rect::new(0, 1, area.width, area.height.saturating_sub(1));
            let buf = frame.buffer_mut();

            // Same-lane dependency ties first, so node labels draw over
            // them. Cross-lane edges stay implicit in the row order.
            for edge in &scene.edges {
                let (Some(from), Some(to)) = (scene.node(edge.from), scene.node(edge.to)) else {
                    continue;
                };
                let (fx, fy) = cell_of(from);
                let (tx, ty) = cell_of(to);
                if fx != tx {
                    continue;
                }
                let (top, bottom) = if fy < ty { (fy, ty) } else { (ty, fy) };
                for row in (top + 1)..bottom {
                    let Some(y) = (row).checked_sub(scroll_y) else {
                        continue;
                    };
                    let Some(x) = fx.checked_sub(scroll_x) else {
                        continue;
                    };
                    put_str(buf, content, x, y, "│", Style::default().fg(Color::DarkGray));
                }
            }

            for node in &scene.nodes {
                let (nx, ny) = cell_of(node);
                let (Some(x), Some(y)) = (nx.checked_sub(scroll_x), ny.checked_sub(scroll_y))
                else {
                    continue;
                };
                let label = node.label.lines().next().unwrap_or("");
                let width = (COL_WIDTH - 2) as usize;
                let text: String = label.chars().take(width).collect();
                let fill = Color::Rgb(node.fill.r, node.fill.g, node.fill.b);
                match node.kind {
                    NodeKind::Item => {
                        let style = Style::default().fg(fill);
                        put_str(buf, content, x, y, &format!("■ {text}"), style);
                    }
                    NodeKind::LaneHeader => {
                        let style = Style::default()
                            .fg(fill)
                            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
                        put_str(buf, content, x, y, &text, style);
                    }
                }
            }
        })?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Left => scroll_x = scroll_x.saturating_sub(COL_WIDTH),
                    KeyCode::Right => scroll_x = scroll_x.saturating_add(COL_WIDTH),
                    KeyCode::Up => scroll_y = scroll_y.saturating_sub(ROW_HEIGHT),
                    KeyCode::Down => scroll_y = scroll_y.saturating_add(ROW_HEIGHT),
                    _ => {}
                }
            }
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
