// src/plot_functions/plot_threshold_sensitivity.rs

use ndarray::Array2;
use rand::rngs::StdRng;

use std::error::Error;

use crate::constants::{
    COLOR_BASIC_BLUE, COLOR_BASIC_RED, COLOR_GRAY, CURVE_POINTS, FIGSIZE_EXAMPLE,
    FIGSIZE_ROW_OF_THREE, TAB10,
};
use crate::data_analysis::curves::linspace;
use crate::data_analysis::emergence::{logistic, rank_descending, size_class_fraction};
use crate::data_analysis::synthetic::{size_scores, threshold_effects};
use crate::data_input::builtin::{SENSITIVITY_MODELS, TASK_SHORT_NAMES};
use crate::figures::RenderContext;
use crate::plot_framework::{
    calculate_range, draw_panel_grid, draw_single_panel, Annotation, Band, Colormap,
    HeatmapPanel, LegendPosition, LineStyle, LinePanel, Marker, Panel, PlotSeries,
};

const SWEEP_POINTS: usize = 50;
const RANKING_THRESHOLDS: usize = 4;
const RANKING_NOISE: f64 = 0.05;

fn model_sizes() -> Vec<f64> {
    SENSITIVITY_MODELS.iter().map(|m| m.1).collect()
}

fn fraction_panel() -> LinePanel {
    let thresholds = linspace(0.1, 0.9, SWEEP_POINTS);
    let mut panel = LinePanel::new(
        "Emergence Fraction vs. Threshold",
        "Threshold",
        "Emergence Fraction",
        calculate_range(0.1, 0.9),
        calculate_range(0.0, 1.0),
    )
    .legend(LegendPosition::UpperRight);
    for (i, &(name, size)) in SENSITIVITY_MODELS.iter().enumerate() {
        let data = thresholds.iter().map(|&t| (t, size_class_fraction(size, t))).collect();
        panel = panel.series(PlotSeries::new(data, name, TAB10[i]).stroke_width(2.0));
    }
    for (text, at) in [
        ("Small\nModel\nThreshold", (0.3, 0.2)),
        ("Medium\nModel\nThreshold", (0.5, 0.4)),
        ("Large\nModel\nThreshold", (0.7, 0.6)),
    ] {
        panel = panel.annotate(Annotation::arrow(text, at, (at.0, at.1 + 0.1)));
    }
    panel
}

/// Rank of each model at each threshold, `[model, threshold]`, from noisy
/// size-driven scores.
fn rankings(rng: &mut StdRng, thresholds: usize) -> Array2<f64> {
    let sizes = model_sizes();
    let mut out = Array2::zeros((sizes.len(), thresholds));
    for mut column in out.columns_mut() {
        let ranks = rank_descending(&size_scores(rng, &sizes, RANKING_NOISE));
        for (cell, rank) in column.iter_mut().zip(ranks) {
            *cell = rank;
        }
    }
    out
}

fn ranking_panel(ranks: &Array2<f64>) -> LinePanel {
    let thresholds = linspace(0.2, 0.8, ranks.ncols());
    let mut panel = LinePanel::new(
        "Model Ranking Stability",
        "Threshold",
        "Rank",
        calculate_range(0.2, 0.8),
        calculate_range(0.0, ranks.nrows().saturating_sub(1) as f64),
    )
    .legend(LegendPosition::UpperRight);
    for (i, (&(name, _), row)) in SENSITIVITY_MODELS.iter().zip(ranks.rows()).enumerate() {
        let data = thresholds.iter().copied().zip(row.iter().copied()).collect();
        panel = panel.series(
            PlotSeries::new(data, name, TAB10[i])
                .marker(Marker::Circle)
                .stroke_width(2.0),
        );
    }
    panel
}

fn effects_panel(effects: Array2<f64>) -> HeatmapPanel {
    HeatmapPanel::new("Task-specific Threshold Effects", effects, Colormap::YlOrRd)
        .tick_labels(
            TASK_SHORT_NAMES.iter().map(|t| t.to_string()).collect(),
            SENSITIVITY_MODELS.iter().map(|m| m.0.to_string()).collect(),
        )
        .annotate()
        .colorbar("Effect Strength")
}

fn tradeoff_panel() -> LinePanel {
    let thresholds = linspace(0.1, 0.9, CURVE_POINTS);
    let performance: Vec<(f64, f64)> = thresholds
        .iter()
        .map(|&t| (t, logistic(10.0 * (t - 0.5))))
        .collect();
    let uncertainty: Vec<(f64, f64)> = performance.iter().map(|&(t, p)| (t, 1.0 - p)).collect();
    let between = performance
        .iter()
        .map(|&(t, p)| (t, p.min(1.0 - p), p.max(1.0 - p)))
        .collect();

    LinePanel::new(
        "Threshold Performance-Uncertainty Trade-off",
        "Threshold",
        "Score",
        calculate_range(0.1, 0.9),
        calculate_range(0.0, 1.0),
    )
    .band(Band::new(between, COLOR_GRAY, 0.2))
    .series(PlotSeries::new(performance, "Performance", COLOR_BASIC_BLUE).stroke_width(2.0))
    .series(
        PlotSeries::new(uncertainty, "Uncertainty", COLOR_BASIC_RED)
            .line(LineStyle::Dashed)
            .stroke_width(2.0),
    )
    .legend(LegendPosition::UpperRight)
}

/// Emergence fraction, model ranking and per-task effects across
/// thresholds, plus the performance/uncertainty trade-off.
pub fn plot_threshold_sensitivity(ctx: &RenderContext) -> Result<(), Box<dyn Error>> {
    let mut rng = ctx.rng();
    let ranks = rankings(&mut rng, RANKING_THRESHOLDS);
    let effects = threshold_effects(&mut rng, TASK_SHORT_NAMES.len(), &model_sizes());

    let mut panels = [
        Some(Panel::Line(fraction_panel())),
        Some(Panel::Line(ranking_panel(&ranks))),
        Some(Panel::Heatmap(effects_panel(effects))),
    ];
    draw_panel_grid(
        &ctx.output("threshold_sensitivity.png"),
        None,
        (1, 3),
        FIGSIZE_ROW_OF_THREE,
        ctx.dpi,
        |index| panels.get_mut(index).and_then(Option::take),
    )?;

    draw_single_panel(
        &ctx.output("threshold_detail.png"),
        FIGSIZE_EXAMPLE,
        ctx.dpi,
        Panel::Line(tradeoff_panel()),
    )
}


// src/plot_functions/plot_threshold_sensitivity.rs
