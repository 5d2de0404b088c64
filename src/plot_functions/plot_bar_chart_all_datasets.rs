// src/plot_functions/plot_bar_chart_all_datasets.rs

use std::error::Error;

use crate::constants::{COLOR_SALMON, COLOR_SKYBLUE, FIGSIZE_BAR_GRID};
use crate::data_input::records::{datasets_in_order, lookup, models_in_order};
use crate::figures::RenderContext;
use crate::model_names::display_name;
use crate::plot_framework::{
    draw_panel_grid, BarPanel, LegendEntry, LegendGlyph, LegendGroup, LegendPanel,
    LegendPosition, Marker, Panel,
};

const GRID_COLUMNS: usize = 3;

/// Grouped Accuracy/UCS bars, one panel per dataset, with the shared legend
/// in the cell after the last dataset.
pub fn plot_bar_chart_all_datasets(ctx: &RenderContext) -> Result<(), Box<dyn Error>> {
    let output_file = ctx.output("bar_chart_all_datasets.png");
    let datasets = datasets_in_order(&ctx.records);
    let models = models_in_order(&ctx.records);
    let labels: Vec<String> = models.iter().map(|m| display_name(m)).collect();

    let n_cells = datasets.len() + 1;
    let rows = n_cells.div_ceil(GRID_COLUMNS);

    draw_panel_grid(
        &output_file,
        None,
        (rows, GRID_COLUMNS),
        FIGSIZE_BAR_GRID,
        ctx.dpi,
        |index| {
            if index == datasets.len() {
                let entries = vec![
                    LegendEntry::new("Accuracy", COLOR_SKYBLUE, LegendGlyph::Marker(Marker::Square)),
                    LegendEntry::new("UCS", COLOR_SALMON, LegendGlyph::Marker(Marker::Square)),
                ];
                return Some(Panel::Legend(LegendPanel::new(
                    "",
                    vec![LegendGroup::new("Bars", entries)],
                )));
            }
            let dataset = datasets.get(index)?;

            // Models missing from a dataset keep their slot with a zero bar.
            let (accs, ucss): (Vec<f64>, Vec<f64>) = models
                .iter()
                .map(|m| lookup(&ctx.records, dataset, m).map_or((0.0, 0.0), |r| (r.acc, r.ucs)))
                .unzip();

            Some(Panel::Bar(
                BarPanel::new(dataset, "", "", labels.clone())
                    .group("Accuracy", COLOR_SKYBLUE, accs)
                    .group("UCS", COLOR_SALMON, ucss)
                    .bar_width(0.35)
                    .y_range((0.0, 1.0))
                    .legend(LegendPosition::Hidden)
                    .stagger_labels(),
            ))
        },
    )
}

// src/plot_functions/plot_bar_chart_all_datasets.rs
