// src/data_input/records.rs

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::data_input::builtin::BENCHMARK_DATASETS;

/// One (model, dataset) measurement.
///
/// `param_count` is in millions of parameters. `ucs` is the score as
/// reported alongside the measurement; use
/// [`crate::data_analysis::ucs::recompute_ucs`] to derive it for another alpha.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub dataset: String,
    pub model: String,
    pub param_count: f64,
    pub acc: f64,
    pub ent: f64,
    pub ucs: f64,
}

impl MetricRecord {
    pub fn new(dataset: &str, model: &str, param_count: f64, acc: f64, ent: f64, ucs: f64) -> Self {
        Self {
            dataset: dataset.to_string(),
            model: model.to_string(),
            param_count,
            acc,
            ent,
            ucs,
        }
    }

    /// Parameter count in billions.
    pub fn params_b(&self) -> f64 {
        self.param_count / 1000.0
    }
}

/// Records of one dataset, in input order.
pub fn filter_by_dataset<'a>(records: &'a [MetricRecord], dataset: &str) -> Vec<&'a MetricRecord> {
    records.iter().filter(|r| r.dataset == dataset).collect()
}

/// Stable sort by parameter count; equal sizes keep input order.
pub fn sort_by_params(records: &mut [&MetricRecord]) {
    records.sort_by(|a, b| {
        a.param_count
            .partial_cmp(&b.param_count)
            .unwrap_or(Ordering::Equal)
    });
}

/// Dataset names in order of first appearance.
pub fn datasets_in_order(records: &[MetricRecord]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for r in records {
        if !seen.iter().any(|d| d == &r.dataset) {
            seen.push(r.dataset.clone());
        }
    }
    seen
}

/// Dataset names with the benchmark datasets first, in benchmark order,
/// then any others in order of first appearance.
pub fn datasets_in_canonical_order(records: &[MetricRecord]) -> Vec<String> {
    let mut datasets = datasets_in_order(records);
    // Stable sort keeps first-appearance order among unknown datasets.
    datasets.sort_by_key(|d| {
        BENCHMARK_DATASETS
            .iter()
            .position(|b| b == d)
            .unwrap_or(BENCHMARK_DATASETS.len())
    });
    datasets
}

/// Model names in order of first appearance.
pub fn models_in_order(records: &[MetricRecord]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for r in records {
        if !seen.iter().any(|m| m == &r.model) {
            seen.push(r.model.clone());
        }
    }
    seen
}

/// Model names are matched case-insensitively so `GPT2-XL` finds `gpt2-xl`.
pub fn lookup<'a>(records: &'a [MetricRecord], dataset: &str, model: &str) -> Option<&'a MetricRecord> {
    records
        .iter()
        .find(|r| r.dataset == dataset && r.model.eq_ignore_ascii_case(model))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<MetricRecord> {
        vec![
            MetricRecord::new("b", "large", 7000.0, 0.3, 0.4, 0.26),
            MetricRecord::new("a", "small", 82.0, 0.1, 0.3, 0.09),
            MetricRecord::new("a", "large", 7000.0, 0.35, 0.45, 0.3),
            MetricRecord::new("a", "mid", 345.0, 0.2, 0.35, 0.18),
        ]
    }

    #[test]
    fn test_filter_and_sort() {
        let records = sample();
        let mut subset = filter_by_dataset(&records, "a");
        assert_eq!(subset.len(), 3);
        sort_by_params(&mut subset);
        let models: Vec<&str> = subset.iter().map(|r| r.model.as_str()).collect();
        assert_eq!(models, vec!["small", "mid", "large"]);
    }

    #[test]
    fn test_first_appearance_order() {
        let records = sample();
        assert_eq!(datasets_in_order(&records), vec!["b", "a"]);
        assert_eq!(models_in_order(&records), vec!["large", "small", "mid"]);
    }

    #[test]
    fn test_canonical_order_puts_benchmarks_first() {
        let records = vec![
            MetricRecord::new("extra", "m", 82.0, 0.1, 0.2, 0.09),
            MetricRecord::new("halu_dialogue", "m", 82.0, 0.1, 0.2, 0.09),
            MetricRecord::new("other", "m", 82.0, 0.1, 0.2, 0.09),
            MetricRecord::new("mmlu_10k", "m", 82.0, 0.1, 0.2, 0.09),
        ];
        assert_eq!(
            datasets_in_canonical_order(&records),
            vec!["mmlu_10k", "halu_dialogue", "extra", "other"]
        );
    }

    #[test]
    fn test_lookup_ignores_case() {
        let records = sample();
        assert!(lookup(&records, "a", "SMALL").is_some());
        assert!(lookup(&records, "b", "small").is_none());
    }

    #[test]
    fn test_params_b() {
        let r = MetricRecord::new("a", "m", 1500.0, 0.2, 0.3, 0.18);
        assert!((r.params_b() - 1.5).abs() < 1e-12);
    }
}

// src/data_input/records.rs
