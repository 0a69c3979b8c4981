use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Table};

use crate::data::utils::{format_optional, NONE_SENTINEL};
use crate::metrics::best_trial::Metric;
use crate::sweep::SweepOutcome;

/// One table per sweep: the selected row of every point.
pub fn summary_table(outcome: &SweepOutcome) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);

    let mut header = vec![Cell::new(&outcome.name), Cell::new("mode"), Cell::new("std")];
    header.extend(Metric::ALL.iter().map(|m| Cell::new(m.slug())));
    table.set_header(header);

    for p in &outcome.points {
        let mut row = vec![Cell::new(&p.point.value)];
        match &p.best {
            Some(best) => {
                row.push(Cell::new(best.metric_mode.to_string()));
                row.push(Cell::new(format_optional(best.std_dev)));
                row.extend(
                    Metric::ALL
                        .iter()
                        .map(|&m| Cell::new(format!("{:.4}", best.scores.get(m)))),
                );
            }
            None => row.extend((0..2 + Metric::ALL.len()).map(|_| Cell::new(NONE_SENTINEL))),
        }
        table.add_row(row);
    }
    table
}
