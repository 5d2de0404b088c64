// src/plot_functions/plot_task_breakdown.rs

use tracing::warn;

use std::error::Error;

use crate::constants::{FIGSIZE_TASK_GRID, PERFORMANCE_BAND_HALF_WIDTH, TAB10};
use crate::data_analysis::emergence::first_size_at_least;
use crate::data_input::builtin::{
    TaskScores, APPENDIX_SIZES_B, TASK_BREAKDOWN, TASK_EMERGENCE_THRESHOLDS_B, TASK_SHORT_NAMES,
};
use crate::figures::RenderContext;
use crate::plot_framework::{
    calculate_log_range, calculate_range, draw_panel_grid, radius_from_area, Annotation, Band,
    LegendPosition, LineStyle, LinePanel, Marker, Panel, PlotSeries, PointFill, ScatterPanel,
    ScatterPoint,
};
use crate::plot_functions::plot_dataset_scaling::min_max;

const ACCURACY_RANGE: (f64, f64) = (0.0, 0.5);
const UNCERTAINTY_RANGE: (f64, f64) = (0.0, 0.6);

fn task_panel(task: &TaskScores) -> LinePanel {
    let accuracy: Vec<(f64, f64)> = APPENDIX_SIZES_B.iter().copied().zip(task.accuracy).collect();
    let band = accuracy
        .iter()
        .map(|&(x, y)| (x, y - PERFORMANCE_BAND_HALF_WIDTH, y + PERFORMANCE_BAND_HALF_WIDTH))
        .collect();
    let uncertainty = APPENDIX_SIZES_B.iter().copied().zip(task.companion).collect();
    let (x_min, x_max) = min_max(APPENDIX_SIZES_B.iter().copied());

    LinePanel::new(
        task.title,
        "Model Size (B params)",
        "Accuracy",
        calculate_log_range(x_min, x_max),
        ACCURACY_RANGE,
    )
    .log_x()
    .band(Band::new(band, TAB10[0], 0.2))
    .series(
        PlotSeries::new(accuracy, "Accuracy", TAB10[0])
            .marker(Marker::Circle)
            .stroke_width(2.0),
    )
    .secondary(
        "Uncertainty",
        UNCERTAINTY_RANGE,
        vec![PlotSeries::new(uncertainty, "Uncertainty", TAB10[3])
            .marker(Marker::Square)
            .line(LineStyle::Dashed)
            .stroke_width(2.0)],
    )
    .legend(LegendPosition::UpperLeft)
}

/// Smallest appendix model at or above each task's emergence threshold.
fn emergence_points() -> Vec<(f64, &'static str)> {
    TASK_EMERGENCE_THRESHOLDS_B
        .iter()
        .zip(TASK_SHORT_NAMES)
        .filter_map(|(&threshold, task)| match first_size_at_least(&APPENDIX_SIZES_B, threshold) {
            Some(size) => Some((size, task)),
            None => {
                warn!(task, threshold, "no model reaches the emergence threshold");
                None
            }
        })
        .collect()
}

fn emergence_points_panel() -> ScatterPanel {
    let points = emergence_points();
    // Same size axis as the task panels.
    let (x_min, x_max) = min_max(APPENDIX_SIZES_B.iter().copied());
    let mut panel = ScatterPanel::new(
        "Capability Emergence Points",
        "Model Size (B params)",
        "",
        calculate_log_range(x_min, x_max),
        calculate_range(0.0, TASK_SHORT_NAMES.len().saturating_sub(1) as f64),
    )
    .log_x();
    for (i, &(size, task)) in points.iter().enumerate() {
        let y = i as f64;
        panel = panel
            .point(
                ScatterPoint::new(size, y, PointFill::Solid(TAB10[i % TAB10.len()]))
                    .size(radius_from_area(100.0)),
            )
            .annotate(Annotation::label(task, (size, y), (5, 0)));
    }
    panel
}

/// Twin-axis accuracy/uncertainty panel per task, with the emergence
/// points in the last cell.
pub fn plot_task_breakdown(ctx: &RenderContext) -> Result<(), Box<dyn Error>> {
    let mut panels: Vec<Option<Panel>> = TASK_BREAKDOWN
        .iter()
        .map(|task| Some(Panel::Line(task_panel(task))))
        .collect();
    panels.push(Some(Panel::Scatter(emergence_points_panel())));

    draw_panel_grid(
        &ctx.output("task_breakdown.png"),
        None,
        (2, 3),
        FIGSIZE_TASK_GRID,
        ctx.dpi,
        |index| panels.get_mut(index).and_then(Option::take),
    )
}


// src/plot_functions/plot_task_breakdown.rs
