//! The layout engine: one forward pass over the record sequence, no
//! backtracking, no I/O. Each run owns its occupancy maps and discards
//! them into the returned [`Layout`]; identical input always produces
//! identical output.

use mergemap_protocol::{Color, Palette};

use crate::model::{LaneQueue, LaneSet, Layout, Occupancy, PlacedItem, Record, Status};

/// Assign every record a lane, a height, a status, a color, and its
/// dependency targets.
///
/// Records are processed in input order. A record's labels are scanned in
/// their listed order: the first configured-lane match decides the
/// primary lane, a second match moves the item to the multi lane, and
/// every matched lane contributes a height lower bound and (when
/// occupied) a dependency edge to its latest occupant. Records matching
/// no configured lane stack up in the unassigned lane.
///
/// Heights within a lane are strictly increasing: an item's row is the
/// maximum of all its lower bounds, never the last one computed.
pub fn compute_layout(records: &[Record], lanes: &LaneSet) -> Layout {
    let configured = lanes.configured().len();
    let multi_slot = configured;
    let unassigned_slot = configured + 1;
    let mut queues = vec![Occupancy::new(); configured + 2];

    let mut items = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let status = lanes.directives().classify(&record.labels);
        let mut height: u32 = 0;
        let mut lane: Option<usize> = None;
        let mut is_multi = false;
        let mut depends_on: Vec<usize> = Vec::new();

        for label in &record.labels {
            let Some(slot) = lanes.configured_index(label) else {
                continue;
            };

            if lane.is_none() {
                lane = Some(slot);
            } else {
                if !is_multi {
                    // Entering the multi lane: never render above its
                    // latest existing occupant.
                    height = raised(&queues[multi_slot], height);
                    is_multi = true;
                }
                lane = Some(multi_slot);
            }

            if let Some(latest) = queues[slot].latest() {
                height = height.max(latest.height + 1);
                if !depends_on.contains(&latest.index) {
                    depends_on.push(latest.index);
                }
            } else if height == 0 {
                height = 1;
            }
            queues[slot].record(index, height);
        }

        let lane_name = match lane {
            Some(slot) if slot == multi_slot => {
                queues[multi_slot].record(index, height);
                settle(&mut queues, index, height);
                lanes.multi_lane().to_string()
            }
            Some(slot) => lanes.configured()[slot].clone(),
            None => {
                height = queues[unassigned_slot].len() as u32 + 1;
                queues[unassigned_slot].record(index, height);
                lanes.unassigned_lane().to_string()
            }
        };

        items.push(PlacedItem {
            index,
            id: record.id.clone(),
            title: record.title.clone(),
            draft: record.draft,
            lane: lane_name,
            height,
            status,
            is_multi,
            color: color_for(status, record.draft, lanes.palette()),
            depends_on,
        });
    }

    // Hand the occupancies out in column order.
    let mut lane_queues = Vec::with_capacity(queues.len());
    lane_queues.push(LaneQueue {
        name: lanes.unassigned_lane().to_string(),
        occupancy: std::mem::take(&mut queues[unassigned_slot]),
    });
    for (slot, name) in lanes.configured().iter().enumerate() {
        lane_queues.push(LaneQueue {
            name: name.clone(),
            occupancy: std::mem::take(&mut queues[slot]),
        });
    }
    lane_queues.push(LaneQueue {
        name: lanes.multi_lane().to_string(),
        occupancy: std::mem::take(&mut queues[multi_slot]),
    });

    Layout {
        items,
        lanes: lane_queues,
    }
}

/// Lower bound for a candidate height joining a lane: one row below the
/// lane's latest occupant, or the candidate unchanged when the lane is
/// empty.
fn raised(queue: &Occupancy, candidate: u32) -> u32 {
    match queue.latest() {
        Some(latest) => candidate.max(latest.height + 1),
        None => candidate,
    }
}

/// Mirror a multi-lane item's final height into every occupancy that
/// already holds its index, keeping all of its lane entries in lock-step
/// so later arrivals see a consistent latest height whichever lane they
/// query.
fn settle(queues: &mut [Occupancy], index: usize, height: u32) {
    for queue in queues.iter_mut() {
        if queue.contains(index) {
            queue.record(index, height);
        }
    }
}

/// Status and draft state decide the color. Drafts with no directive get
/// the plain draft gray directly; drafts with a directive blend their
/// base color toward gray — unless that base already equals the gray, in
/// which case it is never double-grayed.
fn color_for(status: Status, draft: bool, palette: &Palette) -> Color {
    let base = match status {
        Status::Waiting if draft => palette.draft,
        Status::Waiting => palette.waiting,
        Status::Skipped => palette.skipped,
        Status::Leader => palette.leader,
    };
    if draft && base != palette.draft {
        base.blend(palette.draft)
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecordId;

    fn record(id: u64, labels: &[&str]) -> Record {
        Record {
            id: RecordId::Number(id),
            title: format!("change {id}"),
            draft: false,
            labels: labels.iter().map(ToString::to_string).collect(),
        }
    }

    fn draft(id: u64, labels: &[&str]) -> Record {
        Record {
            draft: true,
            ..record(id, labels)
        }
    }

    fn lanes() -> LaneSet {
        LaneSet::new(["Alpha", "Beta", "Gamma"]).unwrap()
    }

    #[test]
    fn indices_are_input_positions() {
        let records = vec![
            record(10, &["Alpha"]),
            record(11, &[]),
            record(12, &["Beta"]),
        ];
        let layout = compute_layout(&records, &lanes());
        let indices: Vec<usize> = layout.items.iter().map(|i| i.index).collect();
        assert_eq!(indices, [0, 1, 2]);
    }

    #[test]
    fn first_occupant_of_a_lane_sits_at_height_one() {
        let layout = compute_layout(&[record(1, &["Alpha"])], &lanes());
        let item = &layout.items[0];
        assert_eq!(item.lane, "Alpha");
        assert_eq!(item.height, 1);
        assert!(item.depends_on.is_empty());
        assert!(!item.is_multi);
    }

    #[test]
    fn chain_in_one_lane_stacks_and_links() {
        let records = vec![
            record(1, &["Alpha"]),
            record(2, &["Alpha"]),
            record(3, &["Alpha"]),
        ];
        let layout = compute_layout(&records, &lanes());
        let heights: Vec<u32> = layout.items.iter().map(|i| i.height).collect();
        assert_eq!(heights, [1, 2, 3]);
        assert_eq!(layout.items[1].depends_on, [0]);
        assert_eq!(layout.items[2].depends_on, [1]);
    }

    // R0 [Alpha], R1 [Alpha, Beta], R2 [Beta]: the multi item's settle
    // step updates Beta's occupancy, so R2 lands below it.
    #[test]
    fn multi_settle_is_visible_from_every_touched_lane() {
        let records = vec![
            record(1, &["Alpha"]),
            record(2, &["Alpha", "Beta"]),
            record(3, &["Beta"]),
        ];
        let layout = compute_layout(&records, &lanes());

        let r0 = &layout.items[0];
        assert_eq!((r0.lane.as_str(), r0.height), ("Alpha", 1));

        let r1 = &layout.items[1];
        assert_eq!((r1.lane.as_str(), r1.height), ("Multiple", 2));
        assert!(r1.is_multi);
        assert_eq!(r1.depends_on, [0]);

        let r2 = &layout.items[2];
        assert_eq!((r2.lane.as_str(), r2.height), ("Beta", 3));
        assert_eq!(r2.depends_on, [1]);

        // The multi item's height agrees in every occupancy it touched.
        for lane in ["Alpha", "Beta", "Multiple"] {
            assert_eq!(layout.queue(lane).unwrap().height_of(1), Some(2), "{lane}");
        }
    }

    #[test]
    fn multi_items_chain_through_a_shared_lane() {
        let records = vec![
            record(1, &["Alpha", "Beta"]),
            record(2, &["Gamma", "Alpha"]),
        ];
        let layout = compute_layout(&records, &lanes());
        assert_eq!(layout.items[0].height, 1);
        // Second multi item: Gamma is empty, but the multi lane's latest
        // occupant (height 1) and Alpha's (height 1) both push it to 2.
        let second = &layout.items[1];
        assert_eq!(second.lane, "Multiple");
        assert_eq!(second.height, 2);
        assert_eq!(second.depends_on, [0]);
    }

    #[test]
    fn multi_raise_applies_even_without_shared_lanes() {
        let lanes = LaneSet::new(["Alpha", "Beta", "Gamma", "Delta"]).unwrap();
        let records = vec![
            record(1, &["Alpha", "Beta"]),
            record(2, &["Gamma", "Delta"]),
        ];
        let layout = compute_layout(&records, &lanes);
        // The second multi item shares no lane with the first, so it has
        // no dependency edge, but it still lands below it.
        let second = &layout.items[1];
        assert_eq!(second.lane, "Multiple");
        assert_eq!(second.height, 2);
        assert!(second.depends_on.is_empty());
    }

    #[test]
    fn dependency_targets_deduplicate() {
        let records = vec![
            record(1, &["Alpha", "Beta"]),
            record(2, &["Alpha", "Beta"]),
        ];
        let layout = compute_layout(&records, &lanes());
        // Both of the second item's labels point at item 0; it is
        // recorded once.
        assert_eq!(layout.items[1].depends_on, [0]);
    }

    #[test]
    fn unlabeled_records_stack_in_the_unassigned_lane() {
        let records = vec![
            record(1, &[]),
            record(2, &["Alpha"]),
            record(3, &["plumbing"]),
            record(4, &[]),
        ];
        let layout = compute_layout(&records, &lanes());
        let general: Vec<(usize, u32)> = layout
            .items
            .iter()
            .filter(|i| i.lane == "General")
            .map(|i| (i.index, i.height))
            .collect();
        // Dense 1..k heights in arrival order, independent of other lanes.
        assert_eq!(general, [(0, 1), (2, 2), (3, 3)]);
        for item in &layout.items {
            if item.lane == "General" {
                assert!(item.depends_on.is_empty());
            }
        }
        assert_eq!(layout.queue("General").unwrap().len(), 3);
    }

    #[test]
    fn per_lane_heights_strictly_increase_with_index() {
        let records = vec![
            record(1, &["Alpha"]),
            record(2, &["Beta"]),
            record(3, &["Alpha", "Beta"]),
            record(4, &["Alpha"]),
            record(5, &["Beta", "Gamma"]),
            record(6, &["Gamma"]),
        ];
        let layout = compute_layout(&records, &lanes());
        for lane in &layout.lanes {
            let entries = lane.occupancy.entries();
            for pair in entries.windows(2) {
                assert!(pair[0].index < pair[1].index);
                assert!(
                    pair[0].height < pair[1].height,
                    "heights not increasing in {}",
                    lane.name
                );
            }
        }
        // Each later occupant of a lane depends on its immediate
        // predecessor there.
        for lane in &layout.lanes {
            if lane.name == "General" {
                continue;
            }
            for pair in lane.occupancy.entries().windows(2) {
                let later = &layout.items[pair[1].index];
                assert!(
                    later.depends_on.contains(&pair[0].index),
                    "{} missing edge {} -> {}",
                    lane.name,
                    pair[1].index,
                    pair[0].index
                );
            }
        }
    }

    #[test]
    fn layout_is_deterministic() {
        let records = vec![
            record(1, &["Alpha"]),
            draft(2, &["Alpha", "Beta", "[queue] --skip--"]),
            record(3, &[]),
            record(4, &["Beta", "[queue] lead"]),
        ];
        let lanes = lanes();
        let a = compute_layout(&records, &lanes);
        let b = compute_layout(&records, &lanes);
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn status_and_lane_membership_are_independent() {
        let records = vec![record(1, &["Alpha", "[queue] --skip--"])];
        let layout = compute_layout(&records, &lanes());
        let item = &layout.items[0];
        assert_eq!(item.status, Status::Skipped);
        assert_eq!(item.lane, "Alpha");
        assert_eq!(item.height, 1);
    }

    #[test]
    fn colors_follow_status() {
        let palette = Palette::default();
        let records = vec![
            record(1, &["Alpha"]),
            record(2, &["Alpha", "[queue] lead"]),
            record(3, &["[queue] --skip--"]),
        ];
        let layout = compute_layout(&records, &lanes());
        assert_eq!(layout.items[0].color, palette.waiting);
        assert_eq!(layout.items[1].color, palette.leader);
        assert_eq!(layout.items[2].color, palette.skipped);
    }

    #[test]
    fn plain_draft_is_exact_gray_never_blended() {
        let palette = Palette::default();
        let layout = compute_layout(&[draft(1, &["Alpha"])], &lanes());
        assert_eq!(layout.items[0].color, palette.draft);
    }

    #[test]
    fn draft_with_directive_blends_toward_gray() {
        let palette = Palette::default();
        let records = vec![
            draft(1, &["Alpha", "[queue] --skip--"]),
            draft(2, &["Alpha", "[queue] lead"]),
        ];
        let layout = compute_layout(&records, &lanes());
        assert_eq!(layout.items[0].color, palette.skipped.blend(palette.draft));
        assert_eq!(layout.items[1].color, palette.leader.blend(palette.draft));
        // Concrete bytes, so serialized output never drifts.
        assert_eq!(layout.items[0].color.to_hex(), "#ad5b59");
    }

    #[test]
    fn gray_base_short_circuits_the_blend() {
        // A palette whose skip color is the draft gray: the color is used
        // directly instead of being blended toward itself.
        let palette = Palette {
            skipped: Palette::default().draft,
            ..Palette::default()
        };
        let lanes = lanes().with_palette(palette);
        let layout = compute_layout(&[draft(1, &["[queue] --skip--"])], &lanes);
        assert_eq!(layout.items[0].color, palette.draft);
    }

    #[test]
    fn lanes_come_out_in_column_order() {
        let layout = compute_layout(&[], &lanes());
        let names: Vec<&str> = layout.lanes.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["General", "Alpha", "Beta", "Gamma", "Multiple"]);
        assert_eq!(layout.column("General"), Some(0));
        assert_eq!(layout.column("Multiple"), Some(4));
    }

    #[test]
    fn raised_and_settle_helpers() {
        let mut queue = Occupancy::new();
        assert_eq!(raised(&queue, 0), 0);
        queue.record(3, 4);
        assert_eq!(raised(&queue, 0), 5);
        assert_eq!(raised(&queue, 7), 7);

        let mut queues = vec![Occupancy::new(), Occupancy::new(), Occupancy::new()];
        queues[0].record(5, 2);
        queues[2].record(5, 3);
        queues[2].record(6, 4);
        settle(&mut queues, 5, 9);
        assert_eq!(queues[0].height_of(5), Some(9));
        assert!(queues[1].is_empty());
        assert_eq!(queues[2].height_of(5), Some(9));
        // Other occupants untouched.
        assert_eq!(queues[2].height_of(6), Some(4));
    }
}
