// src/plot_functions/plot_dataset_scaling.rs

use plotters::style::RGBColor;
use tracing::info;

use std::error::Error;

use crate::constants::{COLOR_BASIC_RED, FIGSIZE_DEFAULT, TAB10};
use crate::data_input::records::{datasets_in_order, filter_by_dataset, sort_by_params, MetricRecord};
use crate::figures::RenderContext;
use crate::model_names::dataset_file_stems;
use crate::plot_framework::{
    calculate_log_range, calculate_range, draw_single_panel, Annotation, LegendPosition,
    LinePanel, Marker, Panel, PlotSeries,
};

/// Log-x line of one metric against parameter count. Points with a
/// non-empty name get it as a label.
pub(crate) fn metric_scaling_panel(
    title: &str,
    x_label: &str,
    y_label: &str,
    points: &[(f64, f64, &str)],
    color: RGBColor,
    marker: Marker,
) -> LinePanel {
    let (x_min, x_max) = min_max(points.iter().map(|p| p.0));
    let (y_min, y_max) = min_max(points.iter().map(|p| p.1));

    let data: Vec<(f64, f64)> = points.iter().map(|&(x, y, _)| (x, y)).collect();
    let mut panel = LinePanel::new(
        title,
        x_label,
        y_label,
        calculate_log_range(x_min, x_max),
        calculate_range(y_min, y_max),
    )
    .log_x()
    .series(PlotSeries::new(data, "", color).marker(marker))
    .legend(LegendPosition::Hidden);
    for &(x, y, name) in points.iter().filter(|p| !p.2.is_empty()) {
        panel = panel.annotate(Annotation::label(name, (x, y), (5, -5)));
    }
    panel
}

pub(crate) fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

fn dataset_points<'a>(records: &'a [MetricRecord], dataset: &str) -> Vec<&'a MetricRecord> {
    let mut subset = filter_by_dataset(records, dataset);
    sort_by_params(&mut subset);
    subset
}

/// Accuracy and UCS against parameter count, two figures per dataset under
/// the results directory.
pub fn plot_dataset_scaling(ctx: &RenderContext) -> Result<(), Box<dyn Error>> {
    let datasets = datasets_in_order(&ctx.records);
    for (dataset, stem) in datasets.iter().zip(dataset_file_stems(&datasets)) {
        let subset = dataset_points(&ctx.records, dataset);
        if subset.is_empty() {
            continue;
        }

        let acc_points: Vec<(f64, f64, &str)> = subset
            .iter()
            .map(|r| (r.param_count, r.acc, r.model.as_str()))
            .collect();
        let acc_panel = metric_scaling_panel(
            &format!("{dataset}: Accuracy vs. Model Size"),
            "Parameter Count (log scale)",
            "Accuracy (C)",
            &acc_points,
            TAB10[0],
            Marker::Circle,
        );
        let out_acc = ctx.results_output(&format!("{stem}_acc.png"));
        draw_single_panel(&out_acc, FIGSIZE_DEFAULT, ctx.dpi, Panel::Line(acc_panel))?;

        let ucs_points: Vec<(f64, f64, &str)> = subset
            .iter()
            .map(|r| (r.param_count, r.ucs, r.model.as_str()))
            .collect();
        let ucs_panel = metric_scaling_panel(
            &format!("{dataset}: UCS vs. Model Size"),
            "Parameter Count (log scale)",
            &format!("UCS (alpha={})", ctx.alpha),
            &ucs_points,
            COLOR_BASIC_RED,
            Marker::Square,
        );
        let out_ucs = ctx.results_output(&format!("{stem}_ucs.png"));
        draw_single_panel(&out_ucs, FIGSIZE_DEFAULT, ctx.dpi, Panel::Line(ucs_panel))?;

        info!(dataset = %dataset, acc = %out_acc.display(), ucs = %out_ucs.display(), "saved dataset plots");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_input::builtin::benchmark_records;

    #[test]
    fn test_dataset_points_sorted_by_params() {
        let records = benchmark_records();
        let subset = dataset_points(&records, "halu_dialogue");
        assert_eq!(subset.len(), 9);
        assert!(subset.windows(2).all(|w| w[0].param_count <= w[1].param_count));
    }

    #[test]
    fn test_metric_panel_labels_every_point() {
        let points = [(82.0, 0.1, "A"), (7000.0, 0.3, "B")];
        let panel = metric_scaling_panel("t", "x", "y", &points, TAB10[0], Marker::Circle);
        assert_eq!(panel.annotations.len(), 2);
        assert!(panel.x_range.0 > 0.0 && panel.x_range.0 < 82.0);
    }

    #[test]
    fn test_min_max_skips_nan() {
        assert_eq!(min_max([1.0, f64::NAN, -2.0].into_iter()), (-2.0, 1.0));
    }
}

// src/plot_functions/plot_dataset_scaling.rs
