mod renderer;

use anyhow::{Context, Result};
use mergemap_core::layout::compute_layout;
use mergemap_core::model::LaneSet;
use mergemap_core::parsers::parse_auto;
use mergemap_core::views::graph::graph_scene;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: mergemap <records.json> <lane> [lane ...]");
        std::process::exit(1);
    }

    let path = &args[1];
    let data = std::fs::read(path).with_context(|| format!("reading {path}"))?;
    let lanes = LaneSet::new(args[2..].iter().cloned())?;

    let parsed = parse_auto(&data).with_context(|| format!("parsing {path}"))?;
    for rejection in &parsed.rejected {
        eprintln!("skipping: {rejection}");
    }

    let layout = compute_layout(&parsed.records, &lanes);
    let scene = graph_scene(&layout, lanes.palette());

    renderer::render_tui(&scene)?;
    Ok(())
}
