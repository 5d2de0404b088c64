// src/plot_functions/plot_calibration_analysis.rs

use rand::rngs::StdRng;
use tracing::debug;

use std::error::Error;

use crate::constants::{CALIBRATION_SAMPLE_COUNT, COLOR_GRAY, FIGSIZE_ROW_OF_THREE, TAB10};
use crate::data_analysis::calibration::{compute_calibration_metrics, sharpness, CalibrationSummary};
use crate::data_analysis::synthetic::calibration_samples;
use crate::data_input::builtin::{APPENDIX_MODELS, CALIBRATION_PROFILES, ECE_BY_TASK, TASK_SHORT_NAMES};
use crate::error::FigureError;
use crate::figures::RenderContext;
use crate::plot_framework::{
    calculate_range, draw_panel_grid, radius_from_area, Annotation, BarPanel, ColorScale,
    Colormap, LegendPosition, LineStyle, LinePanel, Marker, Panel, PlotSeries, PointFill,
    ScatterPanel, ScatterPoint,
};
use crate::plot_functions::plot_dataset_scaling::min_max;

/// Synthetic calibration result of one model.
#[derive(Debug, Clone)]
struct ModelCalibration {
    name: &'static str,
    summary: CalibrationSummary,
    sharpness: f64,
}

fn calibrate_models(rng: &mut StdRng, n_bins: usize) -> Result<Vec<ModelCalibration>, FigureError> {
    APPENDIX_MODELS
        .iter()
        .zip(CALIBRATION_PROFILES.iter())
        .map(|(&(name, _), &(shape, p))| {
            let (confidences, accuracies) =
                calibration_samples(rng, shape, p, CALIBRATION_SAMPLE_COUNT)
                    .ok_or_else(|| FigureError::invalid("beta shape", shape.0.min(shape.1), "must be positive"))?;
            let summary = compute_calibration_metrics(&confidences, &accuracies, n_bins)?;
            let sharpness = sharpness(&confidences)?;
            debug!(model = name, ece = summary.ece, sharpness, "calibration");
            Ok(ModelCalibration {
                name,
                summary,
                sharpness,
            })
        })
        .collect()
}

/// Marker area by model size class.
fn marker_area(name: &str) -> f64 {
    if name.contains("DistilGPT2") {
        100.0
    } else if name.contains("XL") {
        200.0
    } else {
        300.0
    }
}

fn reliability_panel(models: &[ModelCalibration]) -> LinePanel {
    let mut panel = LinePanel::new(
        "Reliability Diagram",
        "Confidence",
        "Accuracy",
        (-0.05, 1.05),
        (-0.05, 1.05),
    )
    .legend(LegendPosition::UpperLeft);
    for (i, m) in models.iter().enumerate() {
        panel = panel.series(
            PlotSeries::new(m.summary.reliability_points(), m.name, TAB10[i % TAB10.len()])
                .marker(Marker::Circle)
                .stroke_width(2.0),
        );
    }
    panel.series(
        PlotSeries::new(vec![(0.0, 0.0), (1.0, 1.0)], "Perfect calibration", COLOR_GRAY)
            .line(LineStyle::Dashed),
    )
}

fn ece_panel() -> BarPanel {
    let top = ECE_BY_TASK
        .iter()
        .flat_map(|row| row.iter().copied())
        .fold(0.0, f64::max);
    let categories = TASK_SHORT_NAMES.iter().map(|t| t.to_string()).collect();
    let mut panel = BarPanel::new("Expected Calibration Error", "Tasks", "ECE Score", categories)
        .bar_width(0.15)
        .y_range((0.0, top * 1.15))
        .legend(LegendPosition::UpperRight);
    for (i, (&(name, _), scores)) in APPENDIX_MODELS.iter().zip(ECE_BY_TASK.iter()).enumerate() {
        panel = panel.group(name, TAB10[i % TAB10.len()], scores.to_vec());
    }
    panel
}

fn sharpness_panel(models: &[ModelCalibration]) -> ScatterPanel {
    let (x_min, x_max) = min_max(models.iter().map(|m| m.sharpness));
    let (y_min, y_max) = min_max(models.iter().map(|m| m.summary.calibration_score()));
    let last_index = models.len().saturating_sub(1).max(1) as f64;

    let mut panel = ScatterPanel::new(
        "Sharpness vs. Calibration",
        "Sharpness (Mean Confidence)",
        "Calibration Score",
        calculate_range(x_min, x_max),
        calculate_range(y_min, y_max),
    )
    .color_scale(ColorScale::new(Colormap::Viridis, (0.0, last_index), ""), false);
    for (i, m) in models.iter().enumerate() {
        let at = (m.sharpness, m.summary.calibration_score());
        panel = panel
            .point(
                ScatterPoint::new(at.0, at.1, PointFill::Mapped(i as f64))
                    .size(radius_from_area(marker_area(m.name)))
                    .opacity(0.6),
            )
            .annotate(Annotation::label(m.name, at, (5, 5)));
    }
    panel
}

/// Reliability diagram, ECE per task and sharpness against calibration.
pub fn plot_calibration_analysis(ctx: &RenderContext) -> Result<(), Box<dyn Error>> {
    let mut rng = ctx.rng();
    let models = calibrate_models(&mut rng, ctx.calibration_bins)?;

    let mut panels = vec![
        Some(Panel::Line(reliability_panel(&models))),
        Some(Panel::Bar(ece_panel())),
        Some(Panel::Scatter(sharpness_panel(&models))),
    ];
    draw_panel_grid(
        &ctx.output("calibration_analysis.png"),
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
    use rand::SeedableRng;

    #[test]
    fn test_models_are_calibrated_deterministically() {
        let a = calibrate_models(&mut StdRng::seed_from_u64(42), 10).unwrap();
        let b = calibrate_models(&mut StdRng::seed_from_u64(42), 10).unwrap();
        assert_eq!(a.len(), 4);
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.summary, y.summary);
            assert!((0.0..=1.0).contains(&x.summary.ece));
        }
    }

    #[test]
    fn test_sharper_models_are_more_confident() {
        // Beta(2, 5) has mean 0.29, Beta(10, 2) has mean 0.83.
        let models = calibrate_models(&mut StdRng::seed_from_u64(1), 10).unwrap();
        assert!(models[0].sharpness < 0.4);
        assert!(models[3].sharpness > 0.7);
    }

    #[test]
    fn test_marker_area_by_size() {
        assert_eq!(marker_area("DistilGPT2"), 100.0);
        assert_eq!(marker_area("GPT2-XL"), 200.0);
        assert_eq!(marker_area("Qwen-7B"), 300.0);
    }

    #[test]
    fn test_ece_panel_groups() {
        let panel = ece_panel();
        assert_eq!(panel.groups.len(), 4);
        assert_eq!(panel.categories.len(), 5);
        assert!(panel.y_range.1 > 0.168);
    }
}

// src/plot_functions/plot_calibration_analysis.rs
