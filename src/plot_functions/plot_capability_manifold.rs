// src/plot_functions/plot_capability_manifold.rs

use tracing::debug;

use std::error::Error;

use crate::constants::{
    COLOR_BASIC_RED, FIGSIZE_MANIFOLD, MANIFOLD_GRID_RESOLUTION, MANIFOLD_MONTE_CARLO_SAMPLES,
};
use crate::data_analysis::synthetic::{
    capability_probability_grid, critical_points, level_set_voxels, CapabilityGrid,
    MANIFOLD_EPSILON, MANIFOLD_TAU,
};
use crate::figures::RenderContext;
use crate::plot_framework::{
    draw_single_panel, radius_from_area, Axes3d, ColorScale, Colormap, LegendEntry, LegendGlyph,
    LegendGroup, Marker, Panel, Point3, PointFill, Scatter3dPanel, View,
};

const SURFACE_POINT_RADIUS_PT: f64 = 1.5;
const CRITICAL_POINT_AREA: f64 = 20.0;

fn manifold_panel(grid: &CapabilityGrid) -> Scatter3dPanel {
    let level = 1.0 - MANIFOLD_EPSILON;
    let surface = level_set_voxels(grid, level);
    let critical = critical_points(grid);
    debug!(surface = surface.len(), critical = critical.len(), "manifold point counts");

    let lo = grid.axis.first().copied().unwrap_or(-5.0);
    let hi = grid.axis.last().copied().unwrap_or(5.0);
    let axes = Axes3d::new(
        [
            "Parameter Dimension 1",
            "Parameter Dimension 2",
            "Parameter Dimension 3",
        ],
        [(lo, hi); 3],
    );

    let surface_points = surface.into_iter().map(|([x, y, z], p)| {
        Point3::new(x, y, z, PointFill::Mapped(p))
            .size(SURFACE_POINT_RADIUS_PT)
            .opacity(0.8)
    });
    let critical_points = critical.into_iter().map(|[x, y, z]| {
        Point3::new(x, y, z, PointFill::Solid(COLOR_BASIC_RED))
            .size(radius_from_area(CRITICAL_POINT_AREA))
            .opacity(0.6)
    });

    Scatter3dPanel::new(
        &format!("ε-Capability Manifold (τ={MANIFOLD_TAU}, ε={MANIFOLD_EPSILON})"),
        axes,
    )
    .points(surface_points)
    .points(critical_points)
    .color_scale(
        ColorScale::new(Colormap::Viridis, (level, 1.0), "P(Capability ≥ τ)"),
        true,
    )
    .legend_group(LegendGroup::new(
        "",
        vec![LegendEntry::new(
            "Phase Transitions",
            COLOR_BASIC_RED,
            LegendGlyph::Marker(Marker::Circle),
        )],
    ))
    .view(View::from_degrees(20.0, 45.0))
}

/// Level set `P(capability >= tau) = 1 - epsilon` of the Monte Carlo grid,
/// with the steepest-gradient grid points marked.
pub fn plot_capability_manifold(ctx: &RenderContext) -> Result<(), Box<dyn Error>> {
    let mut rng = ctx.rng();
    let grid = capability_probability_grid(
        &mut rng,
        MANIFOLD_GRID_RESOLUTION,
        MANIFOLD_MONTE_CARLO_SAMPLES,
    );
    draw_single_panel(
        &ctx.output("capability_manifold.png"),
        FIGSIZE_MANIFOLD,
        ctx.dpi,
        Panel::Scatter3d(manifold_panel(&grid)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_manifold_panel_on_small_grid() {
        let mut rng = StdRng::seed_from_u64(42);
        let grid = capability_probability_grid(&mut rng, 12, 10);
        let panel = manifold_panel(&grid);
        assert!(!panel.points.is_empty());
        assert_eq!(panel.axes.ranges[0], (-5.0, 5.0));
        assert!(panel
            .points
            .iter()
            .all(|p| p.x.abs() <= 5.0 && p.y.abs() <= 5.0 && p.z.abs() <= 5.0));
        assert!(panel.title.contains("τ=0.7"));
    }
}

// src/plot_functions/plot_capability_manifold.rs
