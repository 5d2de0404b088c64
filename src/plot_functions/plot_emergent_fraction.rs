// src/plot_functions/plot_emergent_fraction.rs

use std::error::Error;

use crate::constants::{
    COLOR_FLAT_BLUE, COLOR_FLAT_GREEN, COLOR_FLAT_RED, COLOR_GRAY, CURVE_POINTS, FIGSIZE_MEDIUM,
};
use crate::data_analysis::curves::linspace;
use crate::data_analysis::emergence::emergence_curve;
use crate::figures::RenderContext;
use crate::plot_framework::{
    draw_single_panel, Annotation, LegendPosition, LinePanel, LineStyle, Panel, PlotSeries,
    ReferenceLine,
};

/// (label, steepness, centre) of each illustrated model size.
const SIZE_CURVES: [(&str, f64, f64); 3] = [
    ("Small Model (~100M)", 15.0, 0.3),
    ("Medium Model (~1B)", 12.0, 0.5),
    ("Large Model (~7B)", 10.0, 0.7),
];

const KEY_THRESHOLDS: [f64; 2] = [0.3, 0.6];

fn emergent_fraction_panel() -> LinePanel {
    let taus = linspace(0.0, 1.0, CURVE_POINTS);
    let colors = [COLOR_FLAT_BLUE, COLOR_FLAT_GREEN, COLOR_FLAT_RED];

    let mut panel = LinePanel::new(
        "Emergent Fraction vs Threshold",
        "Threshold τ",
        "Fraction of Items Exceeding Threshold",
        (0.0, 1.0),
        (-0.05, 1.05),
    )
    .legend(LegendPosition::UpperRight);
    for ((label, scale, shift), color) in SIZE_CURVES.iter().zip(colors) {
        let data = taus
            .iter()
            .map(|&t| (t, emergence_curve(t, *scale, *shift)))
            .collect();
        panel = panel.series(PlotSeries::new(data, label, color).stroke_width(2.0));
    }
    for tau in KEY_THRESHOLDS {
        panel = panel.vline(ReferenceLine::new(tau, COLOR_GRAY, LineStyle::Dashed));
    }
    panel
        .annotate(Annotation::arrow("Small models\nsaturate here", (0.3, 0.5), (0.15, 0.6)))
        .annotate(Annotation::arrow(
            "Large models\nmaintain coverage",
            (0.6, 0.5),
            (0.75, 0.6),
        ))
}

/// Sigmoid emergent-fraction curves for three model sizes.
pub fn plot_emergent_fraction(ctx: &RenderContext) -> Result<(), Box<dyn Error>> {
    draw_single_panel(
        &ctx.output("emergent_fraction.png"),
        FIGSIZE_MEDIUM,
        ctx.dpi,
        Panel::Line(emergent_fraction_panel()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curves_decrease_in_tau() {
        let panel = emergent_fraction_panel();
        assert_eq!(panel.series.len(), 3);
        for s in &panel.series {
            assert_eq!(s.data.len(), CURVE_POINTS);
            assert!(s.data.windows(2).all(|w| w[1].1 <= w[0].1));
        }
        assert_eq!(panel.vlines.len(), 2);
    }

    #[test]
    fn test_larger_models_keep_more_items() {
        let panel = emergent_fraction_panel();
        let mid = CURVE_POINTS / 2;
        assert!(panel.series[0].data[mid].1 < panel.series[2].data[mid].1);
    }
}

// src/plot_functions/plot_emergent_fraction.rs
