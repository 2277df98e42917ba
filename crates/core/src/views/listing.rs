use crate::model::{LaneSet, Record};

/// Format records as a terminal listing, one line per record: identifier,
/// the initials of the configured lanes it belongs to, a draft marker,
/// and the title, followed by a total count. Pure string construction —
/// callers decide where it goes.
pub fn listing(records: &[Record], lanes: &LaneSet) -> String {
    let pad = 4 + lanes.configured().len();
    let mut out = String::new();

    for record in records {
        let initials: String = record
            .labels
            .iter()
            .filter(|label| lanes.configured_index(label).is_some())
            .filter_map(|label| label.chars().next())
            .collect();

        let mut tags = format!(" ({initials}) ");
        while tags.chars().count() < pad {
            tags.push(' ');
        }
        if record.draft {
            tags.push_str("*D*");
        }
        while tags.chars().count() < pad + 3 {
            tags.push(' ');
        }

        out.push_str(&format!("{}{tags}: {}\n", record.id, record.title));
    }

    out.push_str(&format!("total queued records: {}\n", records.len()));
    out
}
