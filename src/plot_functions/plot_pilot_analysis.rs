// src/plot_functions/plot_pilot_analysis.rs

use std::error::Error;

use crate::constants::{
    COLOR_BASIC_BLUE, COLOR_BASIC_GREEN, COLOR_BASIC_ORANGE, COLOR_BASIC_RED, FIGSIZE_SMALL,
    FIGSIZE_SMALL_WIDE, TAB10,
};
use crate::data_input::builtin::pilot_records;
use crate::data_input::records::{filter_by_dataset, sort_by_params, MetricRecord};
use crate::figures::RenderContext;
use crate::plot_framework::{draw_single_panel, BarPanel, LegendPosition, Marker, Panel};
use crate::plot_functions::plot_dataset_scaling::metric_scaling_panel;

const PILOT_X_LABEL: &str = "Parameter Count (Millions, log scale)";

fn sorted_subset<'a>(records: &'a [MetricRecord], dataset: &str) -> Vec<&'a MetricRecord> {
    let mut subset = filter_by_dataset(records, dataset);
    sort_by_params(&mut subset);
    subset
}

fn unlabelled(subset: &[&MetricRecord], metric: fn(&MetricRecord) -> f64) -> Vec<(f64, f64, &'static str)> {
    subset.iter().map(|r| (r.param_count, metric(r), "")).collect()
}

/// Accuracy, entropy and UCS side by side per CosmosQA model, in size order.
fn cosmos_bar_panel(cosmos: &[&MetricRecord]) -> BarPanel {
    let names = cosmos.iter().map(|r| r.model.clone()).collect();
    let acc = cosmos.iter().map(|r| r.acc).collect();
    let ent: Vec<f64> = cosmos.iter().map(|r| r.ent).collect();
    let ucs = cosmos.iter().map(|r| r.ucs).collect();
    let top = ent.iter().copied().fold(1.0_f64, f64::max) * 1.1;

    BarPanel::new("Comparison of Accuracy, Entropy, and UCS", "Model (CosmosQA)", "", names)
        .group("Accuracy", COLOR_BASIC_BLUE, acc)
        .group("Entropy", COLOR_BASIC_ORANGE, ent)
        .group("UCS", COLOR_BASIC_GREEN, ucs)
        .bar_width(0.2)
        .y_range((0.0, top))
        .legend(LegendPosition::UpperLeft)
        .stagger_labels()
}

/// Plots of the pilot CosmosQA/HellaSwag run. This table is fixed and not
/// replaced by `--records`.
pub fn plot_pilot_analysis(ctx: &RenderContext) -> Result<(), Box<dyn Error>> {
    let records = pilot_records();
    let cosmos = sorted_subset(&records, "CosmosQA");
    let hellaswag = sorted_subset(&records, "HellaSwag");

    let cosmos_acc = metric_scaling_panel(
        "CosmosQA: Accuracy vs. Model Size",
        PILOT_X_LABEL,
        "Accuracy (C)",
        &unlabelled(&cosmos, |r| r.acc),
        TAB10[0],
        Marker::Circle,
    );
    draw_single_panel(
        &ctx.results_output("cosmosqa_acc_vs_params.png"),
        FIGSIZE_SMALL,
        ctx.dpi,
        Panel::Line(cosmos_acc),
    )?;

    let cosmos_ucs = metric_scaling_panel(
        "CosmosQA: UCS vs. Model Size",
        PILOT_X_LABEL,
        &format!("UCS (alpha={})", ctx.alpha),
        &unlabelled(&cosmos, |r| r.ucs),
        COLOR_BASIC_RED,
        Marker::Square,
    );
    draw_single_panel(
        &ctx.results_output("cosmosqa_ucs_vs_params.png"),
        FIGSIZE_SMALL,
        ctx.dpi,
        Panel::Line(cosmos_ucs),
    )?;

    let hellaswag_acc = metric_scaling_panel(
        "HellaSwag (CI): Accuracy vs. Model Size",
        PILOT_X_LABEL,
        "Accuracy (C)",
        &unlabelled(&hellaswag, |r| r.acc),
        COLOR_BASIC_GREEN,
        Marker::Circle,
    );
    draw_single_panel(
        &ctx.results_output("hellaswag_acc_vs_params.png"),
        FIGSIZE_SMALL,
        ctx.dpi,
        Panel::Line(hellaswag_acc),
    )?;

    draw_single_panel(
        &ctx.results_output("cosmosqa_bar_acc_ent_ucs.png"),
        FIGSIZE_SMALL_WIDE,
        ctx.dpi,
        Panel::Bar(cosmos_bar_panel(&cosmos)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosmos_bars_follow_size_order() {
        let records = pilot_records();
        let cosmos = sorted_subset(&records, "CosmosQA");
        let panel = cosmos_bar_panel(&cosmos);
        assert_eq!(panel.categories.first().map(String::as_str), Some("DistilGPT2"));
        assert_eq!(panel.categories.last().map(String::as_str), Some("GPT-4"));
        assert_eq!(panel.groups.len(), 3);
        // Entropy reaches 1.306, above the unit interval.
        assert!(panel.y_range.1 > 1.306);
    }

    #[test]
    fn test_unlabelled_points_have_no_names() {
        let records = pilot_records();
        let hellaswag = sorted_subset(&records, "HellaSwag");
        let points = unlabelled(&hellaswag, |r| r.acc);
        assert_eq!(points.len(), 2);
        assert!(points.iter().all(|p| p.2.is_empty()));
    }
}

// src/plot_functions/plot_pilot_analysis.rs
