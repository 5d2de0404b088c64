// src/plot_functions/plot_synthetic_emergence.rs

use std::error::Error;

use crate::constants::{FIGSIZE_SQUARE_ISH, TAB10};
use crate::data_analysis::synthetic::{synthetic_task_metrics, SyntheticTaskMetrics};
use crate::data_input::builtin::{SYNTHETIC_SCALES_M, SYNTHETIC_TASKS};
use crate::figures::RenderContext;
use crate::plot_framework::{
    calculate_log_range, draw_single_panel, LegendPosition, LinePanel, Marker, Panel, PlotSeries,
};

const X_LABEL: &str = "Parameter Count (millions)";

/// One line per task of the metric picked by `values`.
fn task_lines_panel(
    title: &str,
    y_label: &str,
    y_range: (f64, f64),
    results: &[SyntheticTaskMetrics],
    values: fn(&SyntheticTaskMetrics) -> &[f64],
    suffix: &str,
    marker: Marker,
) -> LinePanel {
    let (first, last) = (SYNTHETIC_SCALES_M[0], SYNTHETIC_SCALES_M[SYNTHETIC_SCALES_M.len() - 1]);
    let mut panel = LinePanel::new(title, X_LABEL, y_label, calculate_log_range(first, last), y_range)
        .log_x()
        .legend(LegendPosition::UpperLeft);
    for (i, metrics) in results.iter().enumerate() {
        let data = SYNTHETIC_SCALES_M
            .iter()
            .copied()
            .zip(values(metrics).iter().copied())
            .collect();
        let label = format!("{} ({suffix})", metrics.task);
        panel = panel.series(PlotSeries::new(data, &label, TAB10[i % TAB10.len()]).marker(marker));
    }
    panel
}

/// Logistic synthetic tasks: UCS, accuracy and uncertainty against scale.
pub fn plot_synthetic_emergence(ctx: &RenderContext) -> Result<(), Box<dyn Error>> {
    let mut rng = ctx.rng();
    let results: Vec<SyntheticTaskMetrics> = SYNTHETIC_TASKS
        .iter()
        .map(|task| synthetic_task_metrics(&mut rng, task, &SYNTHETIC_SCALES_M, ctx.alpha))
        .collect();

    let ucs_panel = task_lines_panel(
        "Synthetic Emergence of UCS vs. Model Scale",
        "Uncertainty-Aware Capability Score (UCS)",
        (0.0, 1.0),
        &results,
        |m| m.ucs.as_slice(),
        "UCS",
        Marker::Circle,
    );
    draw_single_panel(&ctx.output("emergence_plot.png"), FIGSIZE_SQUARE_ISH, ctx.dpi, Panel::Line(ucs_panel))?;

    let acc_panel = task_lines_panel(
        "Synthetic Accuracy vs. Model Scale",
        "Accuracy",
        (0.0, 1.05),
        &results,
        |m| m.accuracy.as_slice(),
        "Accuracy",
        Marker::TriangleUp,
    );
    draw_single_panel(&ctx.output("accuracy_plot.png"), FIGSIZE_SQUARE_ISH, ctx.dpi, Panel::Line(acc_panel))?;

    let unc_panel = task_lines_panel(
        "Synthetic Uncertainty vs. Model Scale",
        "Uncertainty",
        (0.0, 1.0),
        &results,
        |m| m.uncertainty.as_slice(),
        "Uncertainty",
        Marker::TriangleDown,
    );
    draw_single_panel(&ctx.output("uncertainty_plot.png"), FIGSIZE_SQUARE_ISH, ctx.dpi, Panel::Line(unc_panel))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_one_series_per_task() {
        let mut rng = StdRng::seed_from_u64(7);
        let results: Vec<_> = SYNTHETIC_TASKS
            .iter()
            .map(|t| synthetic_task_metrics(&mut rng, t, &SYNTHETIC_SCALES_M, 0.3))
            .collect();
        let panel = task_lines_panel("t", "y", (0.0, 1.0), &results, |m| m.ucs.as_slice(), "UCS", Marker::Circle);
        assert_eq!(panel.series.len(), SYNTHETIC_TASKS.len());
        assert_eq!(panel.series[0].label, "QA (UCS)");
        assert!(panel.series.iter().all(|s| s.data.len() == SYNTHETIC_SCALES_M.len()));
    }
}

// src/plot_functions/plot_synthetic_emergence.rs
