// src/plot_functions/plot_emergent_dashboard.rs

use tracing::info;

use std::error::Error;
use std::path::Path;

use crate::constants::{COLOR_BASIC_RED, FIGSIZE_SMALL_WIDE, TAB10};
use crate::data_analysis::ucs::{fraction_at_or_above, ucs_batch};
use crate::data_input::builtin::DASHBOARD_ITEMS;
use crate::error::Result;
use crate::figures::RenderContext;
use crate::plot_framework::{
    draw_single_panel, BarPanel, LegendPosition, LineStyle, Panel, ReferenceLine,
};
use crate::plot_functions::plot_dataset_scaling::min_max;

/// Per-item UCS and the fraction of items at or above the threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct EmergentSummary {
    pub alpha: f64,
    pub tau: f64,
    pub ucs: Vec<f64>,
    pub fraction: f64,
}

impl EmergentSummary {
    /// Scores `(capability, entropy)` items; fails on an invalid item.
    pub fn from_items(items: &[(f64, f64)], alpha: f64, tau: f64) -> Result<Self> {
        let ucs = ucs_batch(items, alpha)?;
        let fraction = fraction_at_or_above(&ucs, tau);
        Ok(Self {
            alpha,
            tau,
            ucs,
            fraction,
        })
    }

    /// One-line report, e.g. `Fraction Emergent (UCS >= 0.50): 40.00%`.
    pub fn headline(&self) -> String {
        format!(
            "Fraction Emergent (UCS >= {:.2}): {:.2}%",
            self.tau,
            self.fraction * 100.0
        )
    }
}

fn dashboard_panel(summary: &EmergentSummary) -> BarPanel {
    let (lo, hi) = min_max(summary.ucs.iter().copied().chain([summary.tau]));
    let categories = (0..summary.ucs.len()).map(|i| i.to_string()).collect();
    BarPanel::new(
        &format!("Emergent Capability Dashboard (alpha={})", summary.alpha),
        "Item",
        "UCS",
        categories,
    )
    .group("UCS", TAB10[0], summary.ucs.clone())
    .bar_width(0.8)
    .y_range((lo.min(0.0) * 1.15, hi.max(0.0) * 1.15 + 0.05))
    .hline(
        ReferenceLine::new(summary.tau, COLOR_BASIC_RED, LineStyle::Dashed)
            .label(&format!("tau = {:.2}", summary.tau)),
    )
    .note(&summary.headline())
    .legend(LegendPosition::UpperRight)
}

/// Bar chart of item UCS with the threshold line and emergent fraction.
pub fn draw_emergent_dashboard(
    output_file: &Path,
    summary: &EmergentSummary,
    dpi: u32,
) -> std::result::Result<(), Box<dyn Error>> {
    draw_single_panel(
        output_file,
        FIGSIZE_SMALL_WIDE,
        dpi,
        Panel::Bar(dashboard_panel(summary)),
    )?;
    info!(path = %output_file.display(), fraction = summary.fraction, "saved emergent dashboard");
    Ok(())
}

/// Dashboard for the built-in items at the configured alpha and threshold.
pub fn plot_emergent_dashboard(ctx: &RenderContext) -> std::result::Result<(), Box<dyn Error>> {
    let summary =
        EmergentSummary::from_items(&DASHBOARD_ITEMS, ctx.alpha, ctx.emergence_threshold)?;
    draw_emergent_dashboard(&ctx.output("emergent_dashboard.png"), &summary, ctx.dpi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_builtin_items_at_default_alpha() {
        let summary = EmergentSummary::from_items(&DASHBOARD_ITEMS, 0.3, 0.5).unwrap();
        assert_abs_diff_eq!(summary.ucs[0], 0.9058, epsilon = 1e-12);
        assert_eq!(summary.ucs[1], 0.0);
        assert_abs_diff_eq!(summary.ucs[3], 0.64, epsilon = 1e-12);
        assert_abs_diff_eq!(summary.fraction, 0.6, epsilon = 1e-12);
        assert_eq!(summary.headline(), "Fraction Emergent (UCS >= 0.50): 60.00%");
    }

    #[test]
    fn test_high_threshold_leaves_nothing_emergent() {
        let summary = EmergentSummary::from_items(&DASHBOARD_ITEMS, 0.3, 2.0).unwrap();
        assert_eq!(summary.fraction, 0.0);
    }

    #[test]
    fn test_invalid_item_rejected() {
        assert!(EmergentSummary::from_items(&[(1.5, 0.1)], 0.3, 0.5).is_err());
    }

    #[test]
    fn test_panel_covers_negative_scores() {
        // alpha * entropy above one pushes UCS below zero.
        let summary = EmergentSummary::from_items(&DASHBOARD_ITEMS, 2.0, 0.5).unwrap();
        let panel = dashboard_panel(&summary);
        assert!(panel.y_range.0 < summary.ucs[3]);
        assert!(panel.y_range.1 > summary.tau);
        assert_eq!(panel.hlines.len(), 1);
    }
}

// src/plot_functions/plot_emergent_dashboard.rs
