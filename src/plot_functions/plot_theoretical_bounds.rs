// src/plot_functions/plot_theoretical_bounds.rs

use std::error::Error;

use crate::constants::{CURVE_POINTS, FIGSIZE_ROW_OF_THREE, FIGSIZE_TALL_3D, TAB10};
use crate::data_analysis::curves::{
    capacity_bounds, linspace, phase_surface, phase_transition, PHASE_TRANSITION_CENTER,
};
use crate::data_analysis::synthetic::add_noise;
use crate::data_input::builtin::{APPENDIX_SIZES_B, TASK_BREAKDOWN};
use crate::figures::RenderContext;
use crate::plot_framework::{
    calculate_log_range, calculate_range, draw_panel_grid, draw_single_panel, radius_from_area,
    Axes3d, Band, ColorScale, Colormap, LineStyle, LinePanel, Panel, PlotSeries, PointFill,
    ReferenceLine, ScatterPanel, ScatterPoint, SurfacePanel, View,
};
use crate::plot_functions::plot_dataset_scaling::min_max;

const SURFACE_RESOLUTION: usize = 50;

fn capacity_panel() -> LinePanel {
    let bounds: Vec<(f64, f64, f64)> = APPENDIX_SIZES_B
        .iter()
        .map(|&s| {
            let (min, observed) = capacity_bounds(s);
            (s, min, observed)
        })
        .collect();
    let minimum = bounds.iter().map(|b| (b.0, b.1)).collect();
    let observed = bounds.iter().map(|b| (b.0, b.2)).collect();
    let (x_min, x_max) = min_max(APPENDIX_SIZES_B.iter().copied());
    let (y_min, y_max) = min_max(bounds.iter().flat_map(|b| [b.1, b.2]));

    LinePanel::new(
        "Information-Theoretic Bounds",
        "Model Size (B params)",
        "Capacity",
        calculate_log_range(x_min, x_max),
        calculate_range(y_min, y_max),
    )
    .log_x()
    .band(Band::new(bounds, TAB10[0], 0.2))
    .series(PlotSeries::new(minimum, "Theoretical Minimum", TAB10[0]).stroke_width(2.5))
    .series(
        PlotSeries::new(observed, "Observed Capacity", TAB10[3])
            .line(LineStyle::Dashed)
            .stroke_width(2.5),
    )
}

fn phase_transition_panel(ctx: &RenderContext) -> LinePanel {
    let scales = linspace(0.0, 7.0, CURVE_POINTS);
    let mean: Vec<f64> = scales.iter().map(|&s| phase_transition(s)).collect();
    let noisy = add_noise(&mut ctx.rng(), &mean, 0.05);
    let band: Vec<(f64, f64, f64)> = scales
        .iter()
        .zip(&noisy)
        .map(|(&x, &y)| (x, y - 0.1, y + 0.1))
        .collect();
    let (y_min, y_max) = min_max(band.iter().flat_map(|b| [b.1, b.2]));

    LinePanel::new(
        "Phase Transition Boundary",
        "Model Scale",
        "Performance",
        calculate_range(0.0, 7.0),
        calculate_range(y_min, y_max),
    )
    .band(Band::new(band, TAB10[2], 0.3).label("Uncertainty Range"))
    .series(
        PlotSeries::new(scales.iter().copied().zip(mean).collect(), "Mean Performance", TAB10[2])
            .stroke_width(2.5),
    )
    .vline(
        ReferenceLine::new(PHASE_TRANSITION_CENTER, TAB10[3], LineStyle::Dashed)
            .label("Phase Transition"),
    )
}

fn uncertainty_scale_panel() -> ScatterPanel {
    // Point area and colour both follow accuracy.
    let reference = &TASK_BREAKDOWN[0];
    let (x_min, x_max) = min_max(APPENDIX_SIZES_B.iter().copied());
    let (u_min, u_max) = min_max(reference.companion.iter().copied());
    let (a_min, a_max) = min_max(reference.accuracy.iter().copied());

    let points = APPENDIX_SIZES_B
        .iter()
        .zip(reference.companion)
        .zip(reference.accuracy)
        .map(|((&size, unc), acc)| {
            ScatterPoint::new(size, unc, PointFill::Mapped(acc))
                .size(radius_from_area(acc * 500.0))
                .opacity(0.7)
        });
    ScatterPanel::new(
        "Uncertainty vs. Scale",
        "Model Size (B params)",
        "Uncertainty",
        calculate_log_range(x_min, x_max),
        calculate_range(u_min, u_max),
    )
    .log_x()
    .points(points)
    .color_scale(ColorScale::new(Colormap::Viridis, (a_min, a_max), "Accuracy"), true)
}

fn surface_panel() -> SurfacePanel {
    let surface = phase_surface(SURFACE_RESOLUTION, SURFACE_RESOLUTION);
    let (z_min, z_max) = min_max(surface.performance.iter().copied());
    let axes = Axes3d::new(
        ["Model Size (B params)", "Task Difficulty", "Performance"],
        [(0.0, 7.0), (0.0, 1.0), (0.0, 1.0)],
    );
    SurfacePanel::new(
        "Phase Transition Surface",
        axes,
        surface.sizes,
        surface.difficulties,
        surface.performance,
        ColorScale::new(Colormap::Viridis, (z_min, z_max), "Performance Level"),
    )
    .view(View::from_degrees(30.0, 45.0))
}

/// Capacity bounds, the noisy phase transition and uncertainty against
/// scale, plus the transition surface over size and difficulty.
pub fn plot_theoretical_bounds(ctx: &RenderContext) -> Result<(), Box<dyn Error>> {
    let mut panels = [
        Some(Panel::Line(capacity_panel())),
        Some(Panel::Line(phase_transition_panel(ctx))),
        Some(Panel::Scatter(uncertainty_scale_panel())),
    ];
    draw_panel_grid(
        &ctx.output("theoretical_bounds.png"),
        None,
        (1, 3),
        FIGSIZE_ROW_OF_THREE,
        ctx.dpi,
        |index| panels.get_mut(index).and_then(Option::take),
    )?;

    draw_single_panel(
        &ctx.output("phase_transition_surface.png"),
        FIGSIZE_TALL_3D,
        ctx.dpi,
        Panel::Surface(surface_panel()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_band_spans_both_bounds() {
        let panel = capacity_panel();
        let band = &panel.bands[0];
        assert_eq!(band.points.len(), 9);
        assert!(band.points.iter().all(|&(_, lo, hi)| hi > lo));
        assert_eq!(panel.series.len(), 2);
    }

    #[test]
    fn test_phase_transition_marked_at_center() {
        let panel = phase_transition_panel(&RenderContext::default());
        assert_eq!(panel.vlines[0].value, PHASE_TRANSITION_CENTER);
        assert_eq!(panel.bands[0].points.len(), CURVE_POINTS);
        let mean = &panel.series[0].data;
        assert!((mean[0].1 - phase_transition(0.0)).abs() < 1e-12);
    }

    #[test]
    fn test_uncertainty_points_sized_by_accuracy() {
        let panel = uncertainty_scale_panel();
        assert_eq!(panel.points.len(), 9);
        assert!(panel.points[0].size < panel.points[8].size);
        assert!(panel.show_colorbar);
    }

    #[test]
    fn test_surface_resolution() {
        let panel = surface_panel();
        assert_eq!(panel.values.dim(), (SURFACE_RESOLUTION, SURFACE_RESOLUTION));
        assert_eq!(panel.quads().len(), 49 * 49);
    }
}

// src/plot_functions/plot_theoretical_bounds.rs
