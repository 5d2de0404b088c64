// src/figures.rs

//! Registry of every figure the crate can render.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};

use std::error::Error;
use std::path::PathBuf;

use crate::config::FigureConfig;
use crate::constants::ATTENTION_EVOLUTION_FRAMES;
use crate::data_input::builtin::benchmark_records;
use crate::data_input::records::{datasets_in_order, MetricRecord};
use crate::error::{FigureError, Result};
use crate::model_names::dataset_file_stems;
use crate::plot_functions::{
    plot_accuracy_vs_ucs, plot_attention_patterns, plot_bar_chart_all_datasets,
    plot_calibration_analysis, plot_capability_manifold, plot_dataset_scaling,
    plot_emergence_analysis, plot_emergence_threshold, plot_emergent_dashboard,
    plot_emergent_fraction, plot_param_legend, plot_pilot_analysis, plot_scaling_relations,
    plot_synthetic_emergence, plot_task_breakdown, plot_task_specific_bars,
    plot_theoretical_bounds, plot_threshold_sensitivity, plot_uncertainty_patterns,
};

/// Everything a figure needs besides its own literal data.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub output_dir: PathBuf,
    /// Subdirectory of `output_dir` for the per-dataset result figures.
    pub results_dir: PathBuf,
    pub dpi: u32,
    pub alpha: f64,
    pub seed: u64,
    pub calibration_bins: usize,
    pub emergence_threshold: f64,
    /// Benchmark table, built in or loaded from CSV.
    pub records: Vec<MetricRecord>,
}

impl RenderContext {
    pub fn new(config: &FigureConfig, records: Vec<MetricRecord>) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            results_dir: config.results_dir.clone(),
            dpi: config.dpi,
            alpha: config.alpha,
            seed: config.seed,
            calibration_bins: config.calibration_bins,
            emergence_threshold: config.emergence_threshold,
            records,
        }
    }

    /// Path of a top-level output file.
    pub fn output(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }

    /// Path of a file under the results directory.
    pub fn results_output(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(&self.results_dir).join(file_name)
    }

    /// Fresh generator seeded from the configured seed, so every figure is
    /// reproducible on its own.
    pub fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed)
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        RenderContext::new(&FigureConfig::default(), benchmark_records())
    }
}

pub type RenderFn = fn(&RenderContext) -> std::result::Result<(), Box<dyn Error>>;

/// One registered figure.
pub struct FigureEntry {
    pub id: &'static str,
    /// Files written, relative to the output directory. `{results}` stands
    /// for the results directory, `{dataset}` for each dataset's file stem
    /// and `{frame}` for each two-digit attention frame number.
    pub outputs: &'static [&'static str],
    pub description: &'static str,
    pub render: RenderFn,
}

impl std::fmt::Debug for FigureEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FigureEntry")
            .field("id", &self.id)
            .field("outputs", &self.outputs)
            .finish()
    }
}

pub const FIGURES: [FigureEntry; 19] = [
    FigureEntry {
        id: "bar-chart-all-datasets",
        outputs: &["bar_chart_all_datasets.png"],
        description: "Accuracy and UCS bars per dataset with a shared legend panel",
        render: plot_bar_chart_all_datasets::plot_bar_chart_all_datasets,
    },
    FigureEntry {
        id: "dataset-scaling",
        outputs: &["{results}/{dataset}_acc.png", "{results}/{dataset}_ucs.png"],
        description: "Accuracy and UCS against parameter count for each dataset",
        render: plot_dataset_scaling::plot_dataset_scaling,
    },
    FigureEntry {
        id: "param-legend",
        outputs: &["param_vs_acc_legend.png", "param_vs_ucs_legend.png"],
        description: "All datasets in one chart, colour per dataset and marker per model",
        render: plot_param_legend::plot_param_legend,
    },
    FigureEntry {
        id: "pilot-analysis",
        outputs: &[
            "{results}/cosmosqa_acc_vs_params.png",
            "{results}/cosmosqa_ucs_vs_params.png",
            "{results}/hellaswag_acc_vs_params.png",
            "{results}/cosmosqa_bar_acc_ent_ucs.png",
        ],
        description: "Pilot CosmosQA and HellaSwag run",
        render: plot_pilot_analysis::plot_pilot_analysis,
    },
    FigureEntry {
        id: "accuracy-vs-ucs",
        outputs: &["accuracy_vs_ucs.png"],
        description: "Table 1 accuracy and UCS against model size",
        render: plot_accuracy_vs_ucs::plot_accuracy_vs_ucs,
    },
    FigureEntry {
        id: "emergent-fraction",
        outputs: &["emergent_fraction.png"],
        description: "Emergent fraction against threshold by model size class",
        render: plot_emergent_fraction::plot_emergent_fraction,
    },
    FigureEntry {
        id: "emergence-threshold",
        outputs: &["emergence_fraction_vs_tau.png"],
        description: "Fraction of items above threshold for a tau sweep",
        render: plot_emergence_threshold::plot_emergence_threshold,
    },
    FigureEntry {
        id: "synthetic-emergence",
        outputs: &["emergence_plot.png", "accuracy_plot.png", "uncertainty_plot.png"],
        description: "Logistic synthetic tasks: UCS, accuracy and uncertainty",
        render: plot_synthetic_emergence::plot_synthetic_emergence,
    },
    FigureEntry {
        id: "capability-manifold",
        outputs: &["capability_manifold.png"],
        description: "Epsilon-capability manifold level set with critical points",
        render: plot_capability_manifold::plot_capability_manifold,
    },
    FigureEntry {
        id: "calibration-analysis",
        outputs: &["calibration_analysis.png"],
        description: "Reliability diagram, ECE by task, sharpness against calibration",
        render: plot_calibration_analysis::plot_calibration_analysis,
    },
    FigureEntry {
        id: "emergence-analysis",
        outputs: &["emergence_analysis.png", "emergence_patterns_detail.png"],
        description: "Sharp, gradual and stepwise emergence patterns",
        render: plot_emergence_analysis::plot_emergence_analysis,
    },
    FigureEntry {
        id: "task-breakdown",
        outputs: &["task_breakdown.png"],
        description: "Per-task accuracy and uncertainty with emergence points",
        render: plot_task_breakdown::plot_task_breakdown,
    },
    FigureEntry {
        id: "task-specific-bars",
        outputs: &["task_specific_bars.png", "task_trends.png"],
        description: "Per-task bars with quadratic trend, and log-size trends",
        render: plot_task_specific_bars::plot_task_specific_bars,
    },
    FigureEntry {
        id: "scaling-relations",
        outputs: &["scaling_relations.png"],
        description: "Parameter count, performance, accuracy and uncertainty relations",
        render: plot_scaling_relations::plot_scaling_relations,
    },
    FigureEntry {
        id: "theoretical-bounds",
        outputs: &["theoretical_bounds.png", "phase_transition_surface.png"],
        description: "Capacity bounds, phase transition and its surface",
        render: plot_theoretical_bounds::plot_theoretical_bounds,
    },
    FigureEntry {
        id: "uncertainty-patterns",
        outputs: &["uncertainty_patterns.png", "conformal_example.png"],
        description: "Entropy densities, conformal set sizes and task uncertainty",
        render: plot_uncertainty_patterns::plot_uncertainty_patterns,
    },
    FigureEntry {
        id: "threshold-sensitivity",
        outputs: &["threshold_sensitivity.png", "threshold_detail.png"],
        description: "Sensitivity of emergence to the threshold choice",
        render: plot_threshold_sensitivity::plot_threshold_sensitivity,
    },
    FigureEntry {
        id: "attention-patterns",
        outputs: &["attention_patterns.png", "attention_evolution_{frame}.png"],
        description: "Attention matrices before, during and after emergence",
        render: plot_attention_patterns::plot_attention_patterns,
    },
    FigureEntry {
        id: "emergent-dashboard",
        outputs: &["emergent_dashboard.png"],
        description: "Per-item UCS against the emergence threshold",
        render: plot_emergent_dashboard::plot_emergent_dashboard,
    },
];

/// Look up a figure by id.
pub fn find_figure(id: &str) -> Result<&'static FigureEntry> {
    FIGURES
        .iter()
        .find(|f| f.id == id)
        .ok_or_else(|| FigureError::UnknownFigure(id.to_string()))
}

/// Outcome of rendering a set of figures.
#[derive(Debug, Default)]
pub struct RenderSummary {
    pub rendered: Vec<&'static str>,
    pub failed: Vec<(&'static str, String)>,
}

impl RenderSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Render the figures named in `ids`, or all of them when `ids` is empty.
/// A failing figure is logged and the rest still render.
pub fn render_figures(ctx: &RenderContext, ids: &[String]) -> Result<RenderSummary> {
    let selected: Vec<&'static FigureEntry> = if ids.is_empty() {
        FIGURES.iter().collect()
    } else {
        ids.iter().map(|id| find_figure(id)).collect::<Result<_>>()?
    };

    let mut summary = RenderSummary::default();
    for figure in selected {
        info!(figure = figure.id, "rendering");
        match (figure.render)(ctx) {
            Ok(()) => summary.rendered.push(figure.id),
            Err(e) => {
                error!(figure = figure.id, error = %e, "figure failed");
                summary.failed.push((figure.id, e.to_string()));
            }
        }
    }
    info!(
        rendered = summary.rendered.len(),
        failed = summary.failed.len(),
        output_dir = %ctx.output_dir.display(),
        "render finished"
    );
    Ok(summary)
}

const RESULTS_PREFIX: &str = "{results}/";
const DATASET_PLACEHOLDER: &str = "{dataset}";
const FRAME_PLACEHOLDER: &str = "{frame}";

/// Every file `figure` writes for `ctx`, with the placeholders expanded.
pub fn output_paths(figure: &FigureEntry, ctx: &RenderContext) -> Vec<PathBuf> {
    let datasets = datasets_in_order(&ctx.records);
    let stems = dataset_file_stems(&datasets);

    let mut paths = Vec::new();
    for pattern in figure.outputs {
        let names: Vec<String> = if pattern.contains(DATASET_PLACEHOLDER) {
            stems.iter().map(|stem| pattern.replace(DATASET_PLACEHOLDER, stem)).collect()
        } else if pattern.contains(FRAME_PLACEHOLDER) {
            (0..ATTENTION_EVOLUTION_FRAMES)
                .map(|i| pattern.replace(FRAME_PLACEHOLDER, &format!("{i:02}")))
                .collect()
        } else {
            vec![pattern.to_string()]
        };
        for name in names {
            paths.push(match name.strip_prefix(RESULTS_PREFIX) {
                Some(rest) => ctx.results_output(rest),
                None => ctx.output(&name),
            });
        }
    }
    paths
}


// src/figures.rs
