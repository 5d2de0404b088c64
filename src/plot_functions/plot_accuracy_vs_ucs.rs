// src/plot_functions/plot_accuracy_vs_ucs.rs

use std::error::Error;

use crate::constants::{COLOR_ACCURACY, COLOR_UCS, FIGSIZE_MEDIUM};
use crate::data_input::builtin::TABLE1_MODELS;
use crate::figures::RenderContext;
use crate::plot_framework::{
    calculate_log_range, calculate_range, draw_single_panel, Annotation, LegendPosition,
    LinePanel, Marker, Panel, PlotSeries,
};

const LINE_WIDTH: f64 = 2.0;

fn accuracy_vs_ucs_panel() -> LinePanel {
    let accuracy: Vec<(f64, f64)> = TABLE1_MODELS.iter().map(|m| (m.1, m.2)).collect();
    let ucs: Vec<(f64, f64)> = TABLE1_MODELS.iter().map(|m| (m.1, m.3)).collect();

    let x_max = TABLE1_MODELS.iter().map(|m| m.1).fold(f64::MIN_POSITIVE, f64::max);
    let x_min = TABLE1_MODELS.iter().map(|m| m.1).fold(x_max, f64::min);
    let y_max = TABLE1_MODELS.iter().map(|m| m.2.max(m.3)).fold(0.0, f64::max);
    let y_min = TABLE1_MODELS.iter().map(|m| m.2.min(m.3)).fold(y_max, f64::min);

    let mut panel = LinePanel::new(
        "Accuracy vs UCS Across Model Scales",
        "Model Parameters (Billions)",
        "Score",
        calculate_log_range(x_min, x_max),
        calculate_range(y_min, y_max),
    )
    .log_x()
    .series(
        PlotSeries::new(accuracy, "Accuracy (C(M))", COLOR_ACCURACY)
            .marker(Marker::Circle)
            .stroke_width(LINE_WIDTH),
    )
    .series(
        PlotSeries::new(ucs, "UCS(M)", COLOR_UCS)
            .marker(Marker::Square)
            .stroke_width(LINE_WIDTH),
    )
    .legend(LegendPosition::UpperLeft);
    for (name, params_b, acc, _) in TABLE1_MODELS {
        panel = panel.annotate(Annotation::label(name, (params_b, acc), (5, 5)));
    }
    panel
}

/// Table 1 accuracy and UCS against model size.
pub fn plot_accuracy_vs_ucs(ctx: &RenderContext) -> Result<(), Box<dyn Error>> {
    draw_single_panel(
        &ctx.output("accuracy_vs_ucs.png"),
        FIGSIZE_MEDIUM,
        ctx.dpi,
        Panel::Line(accuracy_vs_ucs_panel()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_contents() {
        let panel = accuracy_vs_ucs_panel();
        assert_eq!(panel.series.len(), 2);
        assert_eq!(panel.annotations.len(), TABLE1_MODELS.len());
        assert!(panel.x_range.0 < 0.082 && panel.x_range.1 > 7.0);
        // Every UCS point sits at or below its accuracy point.
        for (a, u) in panel.series[0].data.iter().zip(panel.series[1].data.iter()) {
            assert!(u.1 <= a.1);
        }
    }
}

// src/plot_functions/plot_accuracy_vs_ucs.rs
