// src/plot_functions/plot_emergence_analysis.rs

use plotters::style::RGBColor;

use std::error::Error;

use crate::constants::{
    COLOR_BASIC_BLUE, COLOR_BASIC_GREEN, COLOR_BASIC_PURPLE, COLOR_BASIC_RED, COLOR_GRAY,
    DETAIL_CURVE_POINTS, FIGSIZE_MEDIUM, FIGSIZE_ROW_OF_THREE, PERFORMANCE_BAND_HALF_WIDTH,
};
use crate::data_analysis::curves::logspace;
use crate::data_analysis::emergence::{
    dialogue_step, gradual_emergence, qa_point, reading_comprehension_point, sharp_transition,
    stepwise_emergence, DIALOGUE_STEPS_B,
};
use crate::data_analysis::synthetic::add_noise;
use crate::data_input::builtin::APPENDIX_SIZES_B;
use crate::figures::RenderContext;
use crate::plot_framework::{
    calculate_log_range, calculate_range, draw_panel_grid, draw_single_panel, Annotation, Band,
    LegendPosition, LineStyle, LinePanel, Panel, PlotSeries, ReferenceLine,
};
use crate::plot_functions::plot_dataset_scaling::min_max;

/// Performance with a ±0.05 band on the left axis and a dashed red
/// uncertainty line on the right axis, over log model size.
pub(crate) fn twin_axis_panel(
    title: &str,
    sizes_b: &[f64],
    performance: &[f64],
    uncertainty: &[f64],
    color: RGBColor,
) -> LinePanel {
    let perf: Vec<(f64, f64)> = sizes_b.iter().copied().zip(performance.iter().copied()).collect();
    let band = perf
        .iter()
        .map(|&(x, y)| (x, y - PERFORMANCE_BAND_HALF_WIDTH, y + PERFORMANCE_BAND_HALF_WIDTH))
        .collect();
    let unc: Vec<(f64, f64)> = sizes_b.iter().copied().zip(uncertainty.iter().copied()).collect();

    let (x_min, x_max) = min_max(sizes_b.iter().copied());
    let (p_min, p_max) = min_max(performance.iter().copied());
    let (u_min, u_max) = min_max(uncertainty.iter().copied());

    LinePanel::new(
        title,
        "Model Size (B params)",
        "Performance",
        calculate_log_range(x_min, x_max),
        calculate_range(
            (p_min - PERFORMANCE_BAND_HALF_WIDTH).min(0.1),
            p_max + PERFORMANCE_BAND_HALF_WIDTH,
        ),
    )
    .log_x()
    .band(Band::new(band, color, 0.2))
    .series(PlotSeries::new(perf, "Performance", color).stroke_width(2.5))
    .secondary(
        "Uncertainty",
        calculate_range(u_min, u_max),
        vec![PlotSeries::new(unc, "Uncertainty", COLOR_BASIC_RED)
            .line(LineStyle::Dashed)
            .stroke_width(2.0)],
    )
    .legend(LegendPosition::UpperLeft)
}

/// Dotted grey marker line with a short caption just right of it.
fn transition_marker(panel: LinePanel, at_b: f64, caption: &str) -> LinePanel {
    panel
        .vline(ReferenceLine::new(at_b, COLOR_GRAY, LineStyle::Dotted))
        .annotate(Annotation::label(caption, (at_b * 1.1, 0.1), (0, 0)).color(COLOR_GRAY))
}

fn emergence_panels(ctx: &RenderContext) -> [LinePanel; 3] {
    let (rc_perf, rc_unc): (Vec<f64>, Vec<f64>) =
        APPENDIX_SIZES_B.iter().map(|&s| reading_comprehension_point(s)).unzip();
    let reading = transition_marker(
        twin_axis_panel(
            "Reading Comprehension\nEmergence",
            &APPENDIX_SIZES_B,
            &rc_perf,
            &rc_unc,
            COLOR_BASIC_BLUE,
        ),
        1.0,
        "Sharp\nTransition",
    );

    let (qa_perf, qa_unc): (Vec<f64>, Vec<f64>) =
        APPENDIX_SIZES_B.iter().map(|&s| qa_point(s)).unzip();
    let qa = twin_axis_panel(
        "QA Capability\nGradual Emergence",
        &APPENDIX_SIZES_B,
        &qa_perf,
        &qa_unc,
        COLOR_BASIC_GREEN,
    );

    let mut rng = ctx.rng();
    let (step_perf, step_unc): (Vec<f64>, Vec<f64>) =
        APPENDIX_SIZES_B.iter().map(|&s| dialogue_step(s)).unzip();
    let step_perf = add_noise(&mut rng, &step_perf, 0.01);
    let step_unc = add_noise(&mut rng, &step_unc, 0.01);
    let mut dialogue = twin_axis_panel(
        "Dialogue Capability\nStepwise Emergence",
        &APPENDIX_SIZES_B,
        &step_perf,
        &step_unc,
        COLOR_BASIC_PURPLE,
    );
    for step in DIALOGUE_STEPS_B {
        dialogue = transition_marker(dialogue, step, &format!("Step\n{step}B"));
    }

    [reading, qa, dialogue]
}

fn pattern_detail_panel() -> LinePanel {
    let sizes = logspace(-2.0, 1.0, DETAIL_CURVE_POINTS);
    let curve = |f: fn(f64) -> f64| sizes.iter().map(|&s| (s, f(s))).collect::<Vec<_>>();
    let (y_min, y_max) = min_max(
        sizes
            .iter()
            .flat_map(|&s| [sharp_transition(s), gradual_emergence(s), stepwise_emergence(s)]),
    );
    let (x_min, x_max) = min_max(sizes.iter().copied());
    LinePanel::new(
        "Comparison of Emergence Patterns",
        "Model Size (B params)",
        "Capability Level",
        (x_min, x_max),
        calculate_range(y_min, y_max),
    )
    .log_x()
    .series(
        PlotSeries::new(curve(sharp_transition), "Sharp Transition", COLOR_BASIC_BLUE)
            .stroke_width(2.0),
    )
    .series(
        PlotSeries::new(curve(gradual_emergence), "Gradual Emergence", COLOR_BASIC_GREEN)
            .stroke_width(2.0),
    )
    .series(
        PlotSeries::new(curve(stepwise_emergence), "Stepwise", COLOR_BASIC_PURPLE)
            .stroke_width(2.0),
    )
    .legend(LegendPosition::UpperLeft)
}

/// Sharp, gradual and stepwise emergence panels, and the three patterns
/// compared on one axis.
pub fn plot_emergence_analysis(ctx: &RenderContext) -> Result<(), Box<dyn Error>> {
    let mut panels = emergence_panels(ctx).map(|p| Some(Panel::Line(p)));
    draw_panel_grid(
        &ctx.output("emergence_analysis.png"),
        None,
        (1, 3),
        FIGSIZE_ROW_OF_THREE,
        ctx.dpi,
        |index| panels.get_mut(index).and_then(Option::take),
    )?;

    draw_single_panel(
        &ctx.output("emergence_patterns_detail.png"),
        FIGSIZE_MEDIUM,
        ctx.dpi,
        Panel::Line(pattern_detail_panel()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twin_axis_panel_layout() {
        let panel = twin_axis_panel(
            "t",
            &[0.1, 1.0, 7.0],
            &[0.2, 0.3, 0.4],
            &[0.5, 0.4, 0.3],
            COLOR_BASIC_BLUE,
        );
        assert_eq!(panel.bands.len(), 1);
        assert_eq!(panel.bands[0].points[1], (1.0, 0.25, 0.35));
        let secondary = panel.secondary.as_ref().map(|s| s.series.len());
        assert_eq!(secondary, Some(1));
    }

    #[test]
    fn test_dialogue_panel_marks_every_step() {
        let ctx = RenderContext::default();
        let [reading, qa, dialogue] = emergence_panels(&ctx);
        assert_eq!(reading.vlines.len(), 1);
        assert!(qa.vlines.is_empty());
        assert_eq!(dialogue.vlines.len(), DIALOGUE_STEPS_B.len());
        assert_eq!(dialogue.annotations[1].text, "Step\n1B");
    }

    #[test]
    fn test_detail_patterns_fit_the_axis() {
        let panel = pattern_detail_panel();
        assert_eq!(panel.series.len(), 3);
        for s in &panel.series {
            assert_eq!(s.data.len(), DETAIL_CURVE_POINTS);
            assert!(s.data.iter().all(|p| p.1 >= panel.y_range.0 && p.1 <= panel.y_range.1));
        }
        let stepwise = &panel.series[2].data;
        assert!(stepwise.iter().all(|p| (0.1..=0.5).contains(&p.1)));
    }
}

// src/plot_functions/plot_emergence_analysis.rs
