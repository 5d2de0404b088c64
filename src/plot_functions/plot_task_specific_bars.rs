// src/plot_functions/plot_task_specific_bars.rs

use plotters::style::RGBColor;

use std::error::Error;

use crate::constants::{
    COLOR_GRAY, COLOR_MATERIAL_AMBER, COLOR_MATERIAL_BLUE, COLOR_MATERIAL_DEEP_ORANGE,
    COLOR_MATERIAL_GREEN, COLOR_MATERIAL_PURPLE, COLOR_MATERIAL_RED, FIGSIZE_MEDIUM,
    FIGSIZE_ROW_OF_FIVE,
};
use crate::data_analysis::fitting::polyfit_quadratic;
use crate::data_input::builtin::{
    TaskScores, APPENDIX_MODEL_NAMES, APPENDIX_SIZES_B, TASK_BAR_SCORES,
};
use crate::figures::RenderContext;
use crate::plot_framework::{
    calculate_range, draw_panel_grid, draw_single_panel, BarPanel, LegendPosition, LineStyle,
    LinePanel, Marker, Panel, PlotSeries,
};
use crate::plot_functions::plot_dataset_scaling::min_max;

const TREND_COLORS: [RGBColor; 5] = [
    COLOR_MATERIAL_BLUE,
    COLOR_MATERIAL_GREEN,
    COLOR_MATERIAL_AMBER,
    COLOR_MATERIAL_PURPLE,
    COLOR_MATERIAL_DEEP_ORANGE,
];

/// Quadratic fit of accuracy against model index, sampled at each index.
fn accuracy_trend(task: &TaskScores) -> Option<Vec<(f64, f64)>> {
    let xs: Vec<f64> = (0..task.accuracy.len()).map(|i| i as f64).collect();
    let fit = polyfit_quadratic(&xs, &task.accuracy)?;
    Some(xs.iter().map(|&x| (x, fit.eval(x))).collect())
}

fn task_bar_panel(task: &TaskScores, first: bool) -> BarPanel {
    let categories = APPENDIX_MODEL_NAMES.iter().map(|m| m.to_string()).collect();

    let mut panel = BarPanel::new(task.title, "", if first { "Score" } else { "" }, categories)
        .group("Accuracy", COLOR_MATERIAL_BLUE, task.accuracy.to_vec())
        .group("UCS", COLOR_MATERIAL_RED, task.companion.to_vec())
        .opacity(0.8)
        .bar_width(0.35)
        .value_labels()
        .stagger_labels()
        .legend(if first {
            LegendPosition::UpperLeft
        } else {
            LegendPosition::Hidden
        });
    let top = panel.max_value().unwrap_or(1.0);
    panel = panel.y_range((0.0, top * 1.2));
    if let Some(trend) = accuracy_trend(task) {
        panel = panel.overlay(PlotSeries::new(trend, "", COLOR_GRAY).line(LineStyle::Dashed));
    }
    panel
}

fn trends_panel() -> LinePanel {
    let log_sizes: Vec<f64> = APPENDIX_SIZES_B.iter().map(|s| s.log10()).collect();
    let (x_min, x_max) = min_max(log_sizes.iter().copied());
    let (y_min, y_max) = min_max(TASK_BAR_SCORES.iter().flat_map(|t| t.accuracy));

    let mut panel = LinePanel::new(
        "Scaling Trends Across Tasks",
        "Log Model Size (B params)",
        "Accuracy",
        calculate_range(x_min, x_max),
        calculate_range(y_min, y_max),
    )
    .legend(LegendPosition::UpperLeft);
    for (task, color) in TASK_BAR_SCORES.iter().zip(TREND_COLORS) {
        let data = log_sizes.iter().copied().zip(task.accuracy).collect();
        panel = panel.series(PlotSeries::new(data, task.name, color).marker(Marker::Circle));
    }
    panel
}

/// Accuracy and UCS bars per benchmark with a quadratic accuracy trend,
/// and accuracy of every benchmark against log model size.
pub fn plot_task_specific_bars(ctx: &RenderContext) -> Result<(), Box<dyn Error>> {
    let mut panels: Vec<Option<Panel>> = TASK_BAR_SCORES
        .iter()
        .enumerate()
        .map(|(i, task)| Some(Panel::Bar(task_bar_panel(task, i == 0))))
        .collect();
    draw_panel_grid(
        &ctx.output("task_specific_bars.png"),
        Some("Task-specific Performance Comparison: Accuracy vs UCS"),
        (1, TASK_BAR_SCORES.len()),
        FIGSIZE_ROW_OF_FIVE,
        ctx.dpi,
        |index| panels.get_mut(index).and_then(Option::take),
    )?;

    draw_single_panel(
        &ctx.output("task_trends.png"),
        FIGSIZE_MEDIUM,
        ctx.dpi,
        Panel::Line(trends_panel()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_follows_accuracy() {
        let trend = accuracy_trend(&TASK_BAR_SCORES[0]).unwrap();
        assert_eq!(trend.len(), 9);
        let first = trend[0].1;
        let last = trend[8].1;
        assert!((first - 0.10).abs() < 0.05);
        assert!((last - 0.37).abs() < 0.05);
    }

    #[test]
    fn test_only_first_panel_has_legend_and_label() {
        let first = task_bar_panel(&TASK_BAR_SCORES[0], true);
        let other = task_bar_panel(&TASK_BAR_SCORES[1], false);
        assert_eq!(first.y_label, "Score");
        assert!(other.y_label.is_empty());
        assert_eq!(other.legend, LegendPosition::Hidden);
        assert!((first.y_range.1 - 0.37 * 1.2).abs() < 1e-12);
        assert_eq!(first.overlays.len(), 1);
        assert!(first.groups.iter().all(|g| g.opacity == 0.8));
    }

    #[test]
    fn test_trends_use_log_sizes() {
        let panel = trends_panel();
        assert_eq!(panel.series.len(), 5);
        assert!((panel.series[0].data[0].0 - 0.082f64.log10()).abs() < 1e-12);
    }
}

// src/plot_functions/plot_task_specific_bars.rs
