// src/plot_functions/plot_param_legend.rs

use plotters::style::colors::BLACK;

use std::error::Error;

use crate::constants::{DATASET_COLORS, FIGSIZE_SMALL};
use crate::data_input::records::{datasets_in_order, models_in_order, MetricRecord};
use crate::figures::RenderContext;
use crate::plot_framework::{
    calculate_log_range, calculate_range, draw_single_panel, radius_from_area, LegendEntry,
    LegendGlyph, LegendGroup, Marker, Panel, PointFill, ScatterPanel, ScatterPoint,
};
use crate::plot_functions::plot_dataset_scaling::min_max;

/// Marker area of every point, in square points.
const POINT_AREA: f64 = 60.0;

/// Every record in one chart: colour per dataset, marker per model.
fn param_legend_panel(
    records: &[MetricRecord],
    metric: fn(&MetricRecord) -> f64,
    y_label: &str,
) -> ScatterPanel {
    let datasets = datasets_in_order(records);
    let models = models_in_order(records);
    let color_of = |dataset: &str| {
        let i = datasets.iter().position(|d| d.as_str() == dataset).unwrap_or(0);
        DATASET_COLORS[i % DATASET_COLORS.len()]
    };
    let marker_of = |model: &str| {
        let i = models.iter().position(|m| m.as_str() == model).unwrap_or(0);
        Marker::CYCLE[i % Marker::CYCLE.len()]
    };

    let (x_min, x_max) = min_max(records.iter().map(|r| r.param_count));
    let (y_min, y_max) = min_max(records.iter().map(metric));

    let points = records.iter().map(|r| {
        ScatterPoint::new(r.param_count, metric(r), PointFill::Solid(color_of(&r.dataset)))
            .marker(marker_of(&r.model))
            .size(radius_from_area(POINT_AREA))
    });

    let dataset_entries = datasets
        .iter()
        .map(|d| LegendEntry::new(d, color_of(d), LegendGlyph::Marker(Marker::Circle)))
        .collect();
    let model_entries = models
        .iter()
        .map(|m| LegendEntry::new(m, BLACK, LegendGlyph::Marker(marker_of(m))))
        .collect();

    ScatterPanel::new(
        &format!("Param vs. {y_label}"),
        "Parameter Count (log scale)",
        y_label,
        calculate_log_range(x_min, x_max),
        calculate_range(y_min, y_max),
    )
    .log_x()
    .points(points)
    .legend_group(LegendGroup::new("Datasets", dataset_entries))
    .legend_group(LegendGroup::new("Models", model_entries))
}

pub fn plot_param_legend(ctx: &RenderContext) -> Result<(), Box<dyn Error>> {
    let acc_panel = param_legend_panel(&ctx.records, |r| r.acc, "Accuracy (C)");
    draw_single_panel(
        &ctx.output("param_vs_acc_legend.png"),
        FIGSIZE_SMALL,
        ctx.dpi,
        Panel::Scatter(acc_panel),
    )?;

    let ucs_label = format!("UCS (alpha={})", ctx.alpha);
    let ucs_panel = param_legend_panel(&ctx.records, |r| r.ucs, &ucs_label);
    draw_single_panel(
        &ctx.output("param_vs_ucs_legend.png"),
        FIGSIZE_SMALL,
        ctx.dpi,
        Panel::Scatter(ucs_panel),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_input::builtin::benchmark_records;

    #[test]
    fn test_one_point_per_record_and_two_legends() {
        let records = benchmark_records();
        let panel = param_legend_panel(&records, |r| r.acc, "Accuracy (C)");
        assert_eq!(panel.points.len(), 45);
        assert_eq!(panel.legend_groups.len(), 2);
        assert_eq!(panel.legend_groups[0].entries.len(), 5);
        assert_eq!(panel.legend_groups[1].entries.len(), 9);
        assert_eq!(panel.title, "Param vs. Accuracy (C)");
    }

    #[test]
    fn test_models_get_distinct_markers() {
        let records = benchmark_records();
        let panel = param_legend_panel(&records, |r| r.ucs, "UCS");
        let glyphs: Vec<_> = panel.legend_groups[1].entries.iter().map(|e| e.glyph).collect();
        for (i, g) in glyphs.iter().enumerate() {
            assert!(!glyphs[i + 1..].contains(g));
        }
    }
}

// src/plot_functions/plot_param_legend.rs
