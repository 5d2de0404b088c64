// src/plot_functions/mod.rs

pub mod plot_bar_chart_all_datasets;
pub mod plot_dataset_scaling;
pub mod plot_param_legend;
pub mod plot_pilot_analysis;
pub mod plot_accuracy_vs_ucs;
pub mod plot_emergent_fraction;
pub mod plot_emergence_threshold;
pub mod plot_synthetic_emergence;
pub mod plot_capability_manifold;
pub mod plot_calibration_analysis;
pub mod plot_emergence_analysis;
pub mod plot_task_breakdown;
pub mod plot_task_specific_bars;
pub mod plot_scaling_relations;
pub mod plot_theoretical_bounds;
pub mod plot_uncertainty_patterns;
pub mod plot_threshold_sensitivity;
pub mod plot_attention_patterns;
pub mod plot_emergent_dashboard;

// src/plot_functions/mod.rs
