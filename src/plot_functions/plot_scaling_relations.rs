// src/plot_functions/plot_scaling_relations.rs

use std::error::Error;

use crate::constants::{
    COLOR_BASIC_BLUE, COLOR_BASIC_GREEN, FIGSIZE_ROW_OF_THREE, SCALING_RELATION_MODELS,
};
use crate::data_analysis::curves::logspace;
use crate::data_analysis::synthetic::uniform_performance;
use crate::figures::RenderContext;
use crate::plot_framework::{
    calculate_log_range, calculate_range, draw_panel_grid, Axes3d, ColorScale, Colormap,
    LegendPosition, LinePanel, Marker, Panel, PlotSeries, Point3, PointFill, Scatter3dPanel,
    ScatterPanel, ScatterPoint,
};
use crate::plot_functions::plot_dataset_scaling::min_max;

/// Parameter count, performance and its inverse uncertainty per model.
struct ScalingSample {
    params: Vec<f64>,
    performance: Vec<f64>,
    uncertainty: Vec<f64>,
}

fn scaling_sample(ctx: &RenderContext) -> ScalingSample {
    let mut rng = ctx.rng();
    let params = logspace(6.0, 9.0, SCALING_RELATION_MODELS);
    let performance = uniform_performance(&mut rng, SCALING_RELATION_MODELS);
    let uncertainty = performance.iter().map(|p| 1.0 - p).collect();
    ScalingSample {
        params,
        performance,
        uncertainty,
    }
}

fn scaling_panels(sample: &ScalingSample) -> [Panel; 3] {
    let (p_min, p_max) = min_max(sample.params.iter().copied());
    let (a_min, a_max) = min_max(sample.performance.iter().copied());
    let (u_min, u_max) = min_max(sample.uncertainty.iter().copied());

    let curve = sample.params.iter().copied().zip(sample.performance.iter().copied()).collect();
    let performance = LinePanel::new(
        "Parameter Count vs. Performance",
        "Parameter Count",
        "Performance",
        calculate_log_range(p_min, p_max),
        calculate_range(a_min, a_max),
    )
    .log_x()
    .series(PlotSeries::new(curve, "", COLOR_BASIC_BLUE).marker(Marker::Circle))
    .legend(LegendPosition::Hidden);

    let pairs = sample
        .performance
        .iter()
        .zip(&sample.uncertainty)
        .map(|(&a, &u)| ScatterPoint::new(a, u, PointFill::Solid(COLOR_BASIC_GREEN)));
    let tradeoff = ScatterPanel::new(
        "Accuracy vs. Uncertainty",
        "Accuracy",
        "Uncertainty",
        calculate_range(a_min, a_max),
        calculate_range(u_min, u_max),
    )
    .points(pairs);

    let axes = Axes3d::new(
        ["Param Count", "Accuracy", "Uncertainty"],
        [
            calculate_range(p_min, p_max),
            calculate_range(a_min, a_max),
            calculate_range(u_min, u_max),
        ],
    );
    let points = sample
        .params
        .iter()
        .zip(&sample.performance)
        .zip(&sample.uncertainty)
        .map(|((&p, &a), &u)| Point3::new(p, a, u, PointFill::Mapped(u)));
    let interaction = Scatter3dPanel::new("3D Interaction: Params, Acc, Unc", axes)
        .points(points)
        .color_scale(ColorScale::new(Colormap::Viridis, (u_min, u_max), "Uncertainty"), true);

    [
        Panel::Line(performance),
        Panel::Scatter(tradeoff),
        Panel::Scatter3d(interaction),
    ]
}

/// Parameter count against performance, accuracy against uncertainty, and
/// all three in one 3D scatter.
pub fn plot_scaling_relations(ctx: &RenderContext) -> Result<(), Box<dyn Error>> {
    let sample = scaling_sample(ctx);
    let mut panels = scaling_panels(&sample).map(Some);
    draw_panel_grid(
        &ctx.output("scaling_relations.png"),
        None,
        (1, 3),
        FIGSIZE_ROW_OF_THREE,
        ctx.dpi,
        |index| panels.get_mut(index).and_then(Option::take),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uncertainty_mirrors_performance() {
        let sample = scaling_sample(&RenderContext::default());
        assert_eq!(sample.params.len(), SCALING_RELATION_MODELS);
        assert!((sample.params[0] - 1e6).abs() < 1e-3);
        assert!((sample.params[SCALING_RELATION_MODELS - 1] - 1e9).abs() < 1.0);
        for (p, u) in sample.performance.iter().zip(&sample.uncertainty) {
            assert!((0.2..0.9).contains(p));
            assert!((p + u - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_same_seed_same_sample() {
        let ctx = RenderContext::default();
        assert_eq!(scaling_sample(&ctx).performance, scaling_sample(&ctx).performance);
    }

    #[test]
    fn test_panel_kinds() {
        let sample = scaling_sample(&RenderContext::default());
        let panels = scaling_panels(&sample);
        assert!(matches!(panels[0], Panel::Line(_)));
        assert!(matches!(panels[1], Panel::Scatter(_)));
        match &panels[2] {
            Panel::Scatter3d(p) => {
                assert_eq!(p.points.len(), SCALING_RELATION_MODELS);
                assert!(p.show_colorbar);
            }
            _ => panic!("expected a 3D scatter"),
        }
    }
}

// src/plot_functions/plot_scaling_relations.rs
