// src/plot_functions/plot_emergence_threshold.rs

use std::error::Error;

use crate::constants::{FIGSIZE_SMALL, TAB10};
use crate::data_analysis::curves::linspace;
use crate::data_analysis::emergence::linear_fraction_above;
use crate::data_input::builtin::THRESHOLD_SWEEP_BASES;
use crate::figures::RenderContext;
use crate::plot_framework::{draw_single_panel, LegendPosition, LinePanel, Panel, PlotSeries};

const SWEEP_STEPS: usize = 11;

fn threshold_sweep_panel() -> LinePanel {
    let thresholds = linspace(0.0, 1.0, SWEEP_STEPS);
    let mut panel = LinePanel::new(
        "Emergence Fraction vs. Tau",
        "Threshold (tau)",
        "Fraction Emergent (UCS >= tau)",
        (-0.05, 1.05),
        (-0.05, 0.7),
    )
    .legend(LegendPosition::UpperRight);
    for (i, (model, base)) in THRESHOLD_SWEEP_BASES.iter().enumerate() {
        let data = thresholds
            .iter()
            .map(|&t| (t, linear_fraction_above(*base, t)))
            .collect();
        panel = panel.series(PlotSeries::new(data, model, TAB10[i % TAB10.len()]));
    }
    panel
}

/// Fraction of items above a swept threshold for five models.
pub fn plot_emergence_threshold(ctx: &RenderContext) -> Result<(), Box<dyn Error>> {
    draw_single_panel(
        &ctx.output("emergence_fraction_vs_tau.png"),
        FIGSIZE_SMALL,
        ctx.dpi,
        Panel::Line(threshold_sweep_panel()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_floors_at_zero() {
        let panel = threshold_sweep_panel();
        assert_eq!(panel.series.len(), 5);
        for s in &panel.series {
            assert_eq!(s.data.len(), SWEEP_STEPS);
            assert!(s.data.iter().all(|p| p.1 >= 0.0));
            assert_eq!(s.data.last().map(|p| p.1), Some(0.0));
        }
    }
}

// src/plot_functions/plot_emergence_threshold.rs
