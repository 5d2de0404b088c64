// src/plot_functions/plot_uncertainty_patterns.rs

use ndarray::Array2;

use std::error::Error;

use crate::constants::{
    COLOR_BASIC_BLUE, CONFORMAL_BAND_POINTS, CONFORMAL_PATTERN_REPEATS, DETAIL_CURVE_POINTS,
    FIGSIZE_COLUMN_OF_THREE, FIGSIZE_EXAMPLE, TAB10,
};
use crate::data_analysis::curves::linspace;
use crate::data_analysis::distribution::{beta_pdf, beta_shape_for_mean};
use crate::data_analysis::synthetic::conformal_band;
use crate::data_input::builtin::{
    APPENDIX_MODELS, CONFORMAL_SET_PATTERNS, TASK_SHORT_NAMES, TASK_UNCERTAINTY,
};
use crate::figures::RenderContext;
use crate::plot_framework::{
    calculate_range, draw_panel_grid, draw_single_panel, Band, Colormap, HeatmapPanel,
    LegendPosition, LinePanel, Panel, PlotSeries, ViolinPanel,
};
use crate::plot_functions::plot_dataset_scaling::min_max;

/// Mean entropy of a model's answers by size class.
fn entropy_mean(size_b: f64) -> f64 {
    if size_b < 1.0 {
        0.7
    } else if size_b < 5.0 {
        0.5
    } else {
        0.3
    }
}

fn entropy_panel() -> LinePanel {
    let xs = linspace(0.0, 1.0, DETAIL_CURVE_POINTS);
    let curves: Vec<Vec<(f64, f64)>> = APPENDIX_MODELS
        .iter()
        .map(|&(_, size)| {
            let (a, b) = beta_shape_for_mean(entropy_mean(size));
            xs.iter().map(|&x| (x, beta_pdf(x, a, b))).collect()
        })
        .collect();
    let (_, y_max) = min_max(curves.iter().flatten().map(|p| p.1));

    let mut panel = LinePanel::new(
        "Entropy Distributions Across Model Scales",
        "Entropy",
        "Density",
        (0.0, 1.0),
        (0.0, y_max * 1.05),
    )
    .legend(LegendPosition::UpperRight);
    for (i, (&(name, _), data)) in APPENDIX_MODELS.iter().zip(curves).enumerate() {
        panel = panel.series(PlotSeries::new(data, name, TAB10[i]).stroke_width(2.0));
    }
    panel
}

/// Pattern repeated into the full conformal set-size sample.
fn set_size_sample(pattern: &[u32]) -> Vec<f64> {
    pattern
        .iter()
        .map(|&s| f64::from(s))
        .cycle()
        .take(pattern.len() * CONFORMAL_PATTERN_REPEATS)
        .collect()
}

fn set_size_panel() -> ViolinPanel {
    let mut panel = ViolinPanel::new("Conformal Set Size Distributions", "", "Set Size");
    let models = APPENDIX_MODELS.iter().zip(&CONFORMAL_SET_PATTERNS);
    for (i, (&(name, _), pattern)) in models.enumerate() {
        panel = panel.violin(name, set_size_sample(pattern), TAB10[i]);
    }
    panel
}

fn task_uncertainty_panel() -> HeatmapPanel {
    let shape = (TASK_UNCERTAINTY.len(), TASK_SHORT_NAMES.len());
    let values = Array2::from_shape_fn(shape, |(r, c)| TASK_UNCERTAINTY[r][c]);
    HeatmapPanel::new("Task-specific Uncertainty Patterns", values, Colormap::YlOrRd)
        .tick_labels(
            APPENDIX_MODELS.iter().map(|m| m.0.to_string()).collect(),
            TASK_SHORT_NAMES.iter().map(|t| t.to_string()).collect(),
        )
        .annotate()
        .colorbar("Uncertainty Score")
}

fn conformal_panel(ctx: &RenderContext) -> LinePanel {
    let band = conformal_band(&mut ctx.rng(), CONFORMAL_BAND_POINTS);
    let (y_min, y_max) = min_max(band.iter().flat_map(|p| [p.lower, p.upper]));
    LinePanel::new(
        "Example Conformal Prediction Sets",
        "",
        "",
        (0.0, 10.0),
        calculate_range(y_min, y_max),
    )
    .band(
        Band::new(band.iter().map(|p| (p.x, p.lower, p.upper)).collect(), COLOR_BASIC_BLUE, 0.2)
            .label("Conformal Set"),
    )
    .series(PlotSeries::new(
        band.iter().map(|p| (p.x, p.prediction)).collect(),
        "Predicted Value",
        COLOR_BASIC_BLUE,
    ))
    .legend(LegendPosition::UpperRight)
}

/// Entropy densities, conformal set sizes and per-task uncertainty stacked
/// in one column, plus a standalone conformal band example.
pub fn plot_uncertainty_patterns(ctx: &RenderContext) -> Result<(), Box<dyn Error>> {
    let mut panels = [
        Some(Panel::Line(entropy_panel())),
        Some(Panel::Violin(set_size_panel())),
        Some(Panel::Heatmap(task_uncertainty_panel())),
    ];
    draw_panel_grid(
        &ctx.output("uncertainty_patterns.png"),
        None,
        (3, 1),
        FIGSIZE_COLUMN_OF_THREE,
        ctx.dpi,
        |index| panels.get_mut(index).and_then(Option::take),
    )?;

    draw_single_panel(
        &ctx.output("conformal_example.png"),
        FIGSIZE_EXAMPLE,
        ctx.dpi,
        Panel::Line(conformal_panel(ctx)),
    )
}


// src/plot_functions/plot_uncertainty_patterns.rs
