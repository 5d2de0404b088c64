// src/data_input/builtin.rs

//! Literal measurement tables shared by the figures.
//!
//! The benchmark table is the single source for every per-model figure;
//! the smaller tables below hold values that only one figure reports.

use crate::data_input::records::MetricRecord;

/// Benchmark datasets in presentation order.
pub const BENCHMARK_DATASETS: [&str; 5] = [
    "mmlu_10k",
    "cosmosqa_10k",
    "hellaswag_10k",
    "halu_dialogue",
    "halu_summarization",
];

/// Benchmark models in presentation order, with parameter counts in millions.
pub const BENCHMARK_MODELS: [(&str, f64); 9] = [
    ("DistilGPT2", 82.0),
    ("GPT2", 124.0),
    ("gpt2-medium", 345.0),
    ("gpt2-large", 774.0),
    ("gpt2-xl", 1500.0),
    ("EleutherAI/gpt-j-6B", 6000.0),
    ("meta-llama/Llama-2-7b-hf", 7000.0),
    ("mistralai/Mistral-7B", 7000.0),
    ("Qwen/Qwen-7B", 7000.0),
];

// (acc, ent, ucs) per model, rows follow BENCHMARK_MODELS.
const MMLU: [(f64, f64, f64); 9] = [
    (0.10, 0.30, 0.09),
    (0.15, 0.32, 0.136),
    (0.20, 0.35, 0.179),
    (0.25, 0.40, 0.220),
    (0.28, 0.42, 0.245),
    (0.30, 0.45, 0.260),
    (0.34, 0.48, 0.291),
    (0.35, 0.46, 0.302),
    (0.37, 0.47, 0.319),
];

const COSMOSQA: [(f64, f64, f64); 9] = [
    (0.09, 0.31, 0.082),
    (0.10, 0.29, 0.091),
    (0.15, 0.34, 0.135),
    (0.20, 0.40, 0.176),
    (0.22, 0.43, 0.192),
    (0.28, 0.46, 0.241),
    (0.32, 0.49, 0.273),
    (0.33, 0.48, 0.282),
    (0.35, 0.47, 0.301),
];

const HELLASWAG: [(f64, f64, f64); 9] = [
    (0.05, 0.25, 0.046),
    (0.06, 0.28, 0.055),
    (0.10, 0.33, 0.090),
    (0.14, 0.38, 0.124),
    (0.18, 0.42, 0.157),
    (0.25, 0.45, 0.216),
    (0.28, 0.47, 0.240),
    (0.30, 0.45, 0.259),
    (0.32, 0.46, 0.276),
];

const HALU_DIALOGUE: [(f64, f64, f64); 9] = [
    (0.12, 0.25, 0.111),
    (0.18, 0.30, 0.164),
    (0.24, 0.35, 0.215),
    (0.30, 0.40, 0.264),
    (0.34, 0.42, 0.297),
    (0.38, 0.45, 0.329),
    (0.42, 0.48, 0.360),
    (0.44, 0.47, 0.378),
    (0.46, 0.48, 0.394),
];

const HALU_SUMMARIZATION: [(f64, f64, f64); 9] = [
    (0.05, 0.20, 0.047),
    (0.08, 0.25, 0.074),
    (0.14, 0.30, 0.127),
    (0.20, 0.35, 0.179),
    (0.25, 0.38, 0.222),
    (0.30, 0.40, 0.264),
    (0.34, 0.44, 0.295),
    (0.36, 0.42, 0.315),
    (0.38, 0.45, 0.329),
];

/// The 45-record benchmark table (9 models x 5 datasets).
pub fn benchmark_records() -> Vec<MetricRecord> {
    let tables = [MMLU, COSMOSQA, HELLASWAG, HALU_DIALOGUE, HALU_SUMMARIZATION];
    let mut records = Vec::with_capacity(BENCHMARK_DATASETS.len() * BENCHMARK_MODELS.len());
    for (dataset, table) in BENCHMARK_DATASETS.iter().zip(tables.iter()) {
        for ((model, params), &(acc, ent, ucs)) in BENCHMARK_MODELS.iter().zip(table.iter()) {
            records.push(MetricRecord::new(dataset, model, *params, acc, ent, ucs));
        }
    }
    records
}

/// Early CosmosQA/HellaSwag run, including guessed placeholder models.
pub fn pilot_records() -> Vec<MetricRecord> {
    vec![
        MetricRecord::new("CosmosQA", "DistilGPT2", 82.0, 0.089, 0.314, 0.078),
        MetricRecord::new("CosmosQA", "GPT2", 124.0, 0.026, 0.035, 0.024),
        MetricRecord::new("CosmosQA", "GPT2-Medium", 345.0, 0.058, 0.089, 0.055),
        MetricRecord::new("CosmosQA", "GPT2-Large", 774.0, 0.238, 1.306, 0.142),
        MetricRecord::new("CosmosQA", "GPT2-XL", 1500.0, 0.210, 1.297, 0.126),
        MetricRecord::new("HellaSwag", "DistilGPT2", 82.0, 0.053, 0.254, 0.050),
        MetricRecord::new("HellaSwag", "GPT2", 124.0, 0.067, 0.107, 0.063),
        MetricRecord::new("CosmosQA", "GPT-4", 100_000.0, 0.650, 1.200, 0.455),
        MetricRecord::new("CosmosQA", "GPT-5 mini", 3000.0, 0.350, 1.000, 0.245),
        MetricRecord::new("CosmosQA", "O1", 500.0, 0.100, 0.500, 0.085),
        MetricRecord::new("CosmosQA", "Deep Speek r1", 700.0, 0.180, 0.800, 0.138),
    ]
}

/// Table 1 of the paper: (display name, params in billions, accuracy, UCS).
pub const TABLE1_MODELS: [(&str, f64, f64, f64); 8] = [
    ("DistilGPT2", 0.082, 0.10, 0.09),
    ("GPT2", 0.124, 0.15, 0.14),
    ("GPT2-Med", 0.345, 0.20, 0.18),
    ("GPT2-Large", 0.774, 0.25, 0.22),
    ("GPT2-XL", 1.5, 0.28, 0.25),
    ("GPT-J-6B", 6.0, 0.30, 0.26),
    ("Llama-2-7B", 7.0, 0.34, 0.29),
    ("Qwen-7B", 7.0, 0.37, 0.32),
];

/// Short task labels used by the appendix figures.
pub const TASK_SHORT_NAMES: [&str; 5] = ["QA", "RC", "CI", "DR", "Sum"];

/// Models featured in the calibration and uncertainty appendix figures:
/// (name, params in billions).
pub const APPENDIX_MODELS: [(&str, f64); 4] = [
    ("DistilGPT2", 0.082),
    ("GPT2-XL", 1.5),
    ("Llama-2-7B", 7.0),
    ("Qwen-7B", 7.0),
];

/// Expected calibration error per appendix model and task.
pub const ECE_BY_TASK: [[f64; 5]; 4] = [
    [0.142, 0.156, 0.168, 0.145, 0.162],
    [0.092, 0.098, 0.105, 0.095, 0.102],
    [0.075, 0.080, 0.085, 0.078, 0.082],
    [0.068, 0.072, 0.078, 0.070, 0.075],
];

/// Beta shape and Bernoulli rate for the synthetic reliability samples.
pub const CALIBRATION_PROFILES: [((f64, f64), f64); 4] = [
    ((2.0, 5.0), 0.10),
    ((5.0, 3.0), 0.28),
    ((8.0, 2.0), 0.34),
    ((10.0, 2.0), 0.37),
];

/// Task-specific uncertainty per appendix model.
pub const TASK_UNCERTAINTY: [[f64; 5]; 4] = [
    [0.30, 0.31, 0.25, 0.25, 0.20],
    [0.42, 0.43, 0.42, 0.42, 0.38],
    [0.48, 0.49, 0.47, 0.48, 0.44],
    [0.47, 0.47, 0.46, 0.48, 0.45],
];

/// Conformal prediction set sizes; each pattern is repeated to form the sample.
pub const CONFORMAL_SET_PATTERNS: [[u32; 10]; 4] = [
    [1, 2, 2, 3, 3, 3, 2, 2, 3, 4],
    [1, 1, 2, 2, 2, 1, 1, 2, 2, 3],
    [1, 1, 1, 2, 1, 1, 1, 2, 1, 2],
    [1, 1, 1, 1, 2, 1, 1, 1, 1, 2],
];

/// Models of the threshold sensitivity figure: (name, params in billions).
pub const SENSITIVITY_MODELS: [(&str, f64); 5] = [
    ("DistilGPT2", 0.082),
    ("GPT2", 0.124),
    ("GPT2-XL", 1.5),
    ("Llama-2-7B", 7.0),
    ("Qwen-7B", 7.0),
];

/// Base fraction of items above threshold zero, for the linear tau sweep.
pub const THRESHOLD_SWEEP_BASES: [(&str, f64); 5] = [
    ("DistilGPT2", 0.2),
    ("GPT2", 0.3),
    ("GPT2-Medium", 0.45),
    ("GPT2-Large", 0.55),
    ("Qwen/Qwen-7B", 0.65),
];

/// Model-size thresholds (billions) marking where each task emerges.
pub const TASK_EMERGENCE_THRESHOLDS_B: [f64; 5] = [0.25, 0.22, 0.20, 0.35, 0.28];

/// Per-item (capability, entropy) sample for the emergent fraction dashboard.
pub const DASHBOARD_ITEMS: [(f64, f64); 5] = [
    (1.0, 0.314),
    (0.0, 0.200),
    (1.0, 0.500),
    (1.0, 1.200),
    (0.0, 0.050),
];

/// Sizes (billions) of the nine models in the per-task appendix figures.
pub const APPENDIX_SIZES_B: [f64; 9] = [0.082, 0.124, 0.345, 0.774, 1.5, 6.0, 7.0, 7.0, 7.0];

/// Names matching [`APPENDIX_SIZES_B`].
pub const APPENDIX_MODEL_NAMES: [&str; 9] = [
    "DistilGPT2",
    "GPT2",
    "GPT2-Medium",
    "GPT2-Large",
    "GPT2-XL",
    "GPT-J-6B",
    "Llama-2-7B",
    "Mistral-7B",
    "Qwen-7B",
];

/// Accuracy with a companion metric over the nine appendix models.
#[derive(Debug, Clone, Copy)]
pub struct TaskScores {
    pub name: &'static str,
    pub title: &'static str,
    pub accuracy: [f64; 9],
    /// Uncertainty in the breakdown figure, UCS in the bar figure.
    pub companion: [f64; 9],
}

/// Accuracy and uncertainty per task for the twin-axis breakdown.
pub const TASK_BREAKDOWN: [TaskScores; 5] = [
    TaskScores {
        name: "QA",
        title: "QA Performance",
        accuracy: [0.10, 0.15, 0.20, 0.25, 0.28, 0.30, 0.34, 0.35, 0.37],
        companion: [0.30, 0.32, 0.35, 0.40, 0.42, 0.45, 0.47, 0.46, 0.47],
    },
    TaskScores {
        name: "RC",
        title: "Reading Comprehension",
        accuracy: [0.09, 0.10, 0.15, 0.20, 0.22, 0.28, 0.32, 0.33, 0.35],
        companion: [0.31, 0.29, 0.34, 0.40, 0.43, 0.46, 0.49, 0.48, 0.47],
    },
    TaskScores {
        name: "CI",
        title: "Commonsense Inference",
        accuracy: [0.05, 0.06, 0.10, 0.14, 0.18, 0.25, 0.28, 0.30, 0.32],
        companion: [0.25, 0.28, 0.33, 0.38, 0.42, 0.45, 0.47, 0.45, 0.46],
    },
    TaskScores {
        name: "DR",
        title: "Dialogue Response",
        accuracy: [0.12, 0.18, 0.24, 0.30, 0.34, 0.38, 0.42, 0.44, 0.46],
        companion: [0.25, 0.30, 0.35, 0.40, 0.42, 0.45, 0.48, 0.47, 0.48],
    },
    TaskScores {
        name: "Sum",
        title: "Summarization",
        accuracy: [0.05, 0.08, 0.14, 0.20, 0.25, 0.30, 0.34, 0.36, 0.38],
        companion: [0.20, 0.25, 0.30, 0.35, 0.38, 0.40, 0.44, 0.42, 0.45],
    },
];

/// Accuracy and UCS per benchmark for the task-specific bar figure.
pub const TASK_BAR_SCORES: [TaskScores; 5] = [
    TaskScores {
        name: "MMLU",
        title: "(a) MMLU 10k\nGeneral Knowledge",
        accuracy: [0.10, 0.15, 0.20, 0.25, 0.28, 0.30, 0.34, 0.35, 0.37],
        companion: [0.09, 0.14, 0.18, 0.22, 0.25, 0.26, 0.29, 0.30, 0.32],
    },
    TaskScores {
        name: "CosmosQA",
        title: "(b) CosmosQA 10k\nReading Comprehension",
        accuracy: [0.09, 0.10, 0.15, 0.20, 0.22, 0.28, 0.32, 0.33, 0.35],
        companion: [0.08, 0.091, 0.14, 0.18, 0.19, 0.24, 0.27, 0.28, 0.30],
    },
    TaskScores {
        name: "HellaSwag",
        title: "(c) HellaSwag 10k\nCommonsense Inference",
        accuracy: [0.05, 0.06, 0.10, 0.14, 0.18, 0.25, 0.28, 0.30, 0.32],
        companion: [0.046, 0.06, 0.09, 0.12, 0.16, 0.22, 0.24, 0.26, 0.28],
    },
    TaskScores {
        name: "Dialogue",
        title: "(d) HaluEval\nDialogue",
        accuracy: [0.12, 0.18, 0.24, 0.30, 0.34, 0.38, 0.42, 0.44, 0.46],
        companion: [0.111, 0.16, 0.21, 0.26, 0.30, 0.33, 0.36, 0.38, 0.39],
    },
    TaskScores {
        name: "Summary",
        title: "(e) HaluEval\nSummarization",
        accuracy: [0.05, 0.08, 0.14, 0.20, 0.25, 0.30, 0.34, 0.36, 0.38],
        companion: [0.047, 0.07, 0.13, 0.18, 0.22, 0.26, 0.30, 0.32, 0.33],
    },
];

/// Logistic profile of one synthetic task.
#[derive(Debug, Clone, Copy)]
pub struct TaskProfile {
    pub name: &'static str,
    /// Transition centre in millions of parameters.
    pub x0: f64,
    pub k: f64,
    pub base_uncertainty: f64,
}

pub const SYNTHETIC_TASKS: [TaskProfile; 5] = [
    TaskProfile { name: "QA", x0: 500.0, k: 0.003, base_uncertainty: 0.40 },
    TaskProfile { name: "RC", x0: 1000.0, k: 0.002, base_uncertainty: 0.35 },
    TaskProfile { name: "CI", x0: 800.0, k: 0.0025, base_uncertainty: 0.38 },
    TaskProfile { name: "DRS", x0: 1200.0, k: 0.0018, base_uncertainty: 0.30 },
    TaskProfile { name: "DS", x0: 2000.0, k: 0.0015, base_uncertainty: 0.45 },
];

/// Parameter scales (millions) of the synthetic emergence sweep.
pub const SYNTHETIC_SCALES_M: [f64; 7] = [82.0, 124.0, 345.0, 774.0, 1500.0, 3500.0, 7000.0];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_input::records::{datasets_in_order, filter_by_dataset};

    #[test]
    fn test_benchmark_table_shape() {
        let records = benchmark_records();
        assert_eq!(records.len(), 45);
        assert_eq!(datasets_in_order(&records), BENCHMARK_DATASETS.to_vec());
        for ds in BENCHMARK_DATASETS {
            assert_eq!(filter_by_dataset(&records, ds).len(), 9);
        }
    }

    #[test]
    fn test_benchmark_values_in_range() {
        for r in benchmark_records() {
            assert!((0.0..=1.0).contains(&r.acc), "{} {}", r.dataset, r.model);
            assert!(r.ucs <= r.acc + 1e-9, "{} {}", r.dataset, r.model);
        }
    }

    #[test]
    fn test_pilot_table_datasets() {
        let records = pilot_records();
        assert_eq!(records.len(), 11);
        assert_eq!(filter_by_dataset(&records, "CosmosQA").len(), 9);
        assert_eq!(filter_by_dataset(&records, "HellaSwag").len(), 2);
    }
}

// src/data_input/builtin.rs
