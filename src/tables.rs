// src/tables.rs

//! Markdown tables printed by the `tables` command.

use std::fmt::Write;

use crate::data_input::records::{datasets_in_canonical_order, filter_by_dataset, MetricRecord};

/// Parameter count the way it was entered: `82`, not `82.0`.
pub fn format_params(params_m: f64) -> String {
    if params_m.fract() == 0.0 && params_m.abs() < 1e15 {
        format!("{params_m:.0}")
    } else {
        format!("{params_m}")
    }
}

fn ucs_header(alpha: f64) -> String {
    format!("UCS (α={alpha})")
}

/// Table of one dataset, or `None` when no record belongs to it.
pub fn format_dataset_table(dataset: &str, records: &[MetricRecord], alpha: f64) -> Option<String> {
    let subset = filter_by_dataset(records, dataset);
    if subset.is_empty() {
        return None;
    }
    let mut out = String::new();
    let _ = writeln!(out, "\n### Dataset: {dataset}\n");
    let _ = writeln!(
        out,
        "| Model       | #Params(M) | Accuracy (C) | Entropy (U) | {} |",
        ucs_header(alpha)
    );
    let _ = writeln!(out, "|------------ |-----------:|-------------:|------------:|------------:|");
    for r in subset {
        let _ = writeln!(
            out,
            "| {:<12} | {:>10} | {:>12.3} | {:>11.3} | {:>11.3} |",
            r.model,
            format_params(r.param_count),
            r.acc,
            r.ent,
            r.ucs
        );
    }
    Some(out)
}

/// Every dataset table under one heading, benchmark datasets first in their
/// usual order.
pub fn format_all_dataset_tables(records: &[MetricRecord], alpha: f64) -> String {
    let mut out = String::from("# Tables for Each Dataset\n\n");
    for dataset in datasets_in_canonical_order(records) {
        if let Some(table) = format_dataset_table(&dataset, records, alpha) {
            out.push_str(&table);
        }
    }
    out
}

/// One table with a dataset column, for mixed-source records.
pub fn format_consolidated_table(records: &[MetricRecord], alpha: f64) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n================= Consolidated Table of Results =================");
    let _ = writeln!(
        out,
        "| Model            | Dataset    | #Params(M) | Acc (C) | Ent (U) | {} |",
        ucs_header(alpha)
    );
    let _ = writeln!(out, "|------------------|------------|------------|---------|---------|------------|");
    for r in records {
        let _ = writeln!(
            out,
            "| {:<16} | {:<10} | {:>10} | {:>7.3} | {:>7.3} | {:>10.3} |",
            r.model,
            r.dataset,
            format_params(r.param_count),
            r.acc,
            r.ent,
            r.ucs
        );
    }
    let _ = writeln!(out, "================================================================");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_input::builtin::{benchmark_records, pilot_records};

    #[test]
    fn test_format_params() {
        assert_eq!(format_params(82.0), "82");
        assert_eq!(format_params(100_000.0), "100000");
        assert_eq!(format_params(1.5), "1.5");
    }

    #[test]
    fn test_dataset_table_rows() {
        let records = benchmark_records();
        let table = format_dataset_table("mmlu_10k", &records, 0.3).unwrap_or_default();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[1], "### Dataset: mmlu_10k");
        assert_eq!(
            lines[3],
            "| Model       | #Params(M) | Accuracy (C) | Entropy (U) | UCS (α=0.3) |"
        );
        assert_eq!(
            lines[5],
            "| DistilGPT2   |         82 |        0.100 |       0.300 |       0.090 |"
        );
        assert_eq!(lines.len(), 5 + 9);
    }

    #[test]
    fn test_tables_use_benchmark_order_for_shuffled_input() {
        let mut records = benchmark_records();
        records.reverse();
        records.insert(0, MetricRecord::new("custom", "m", 82.0, 0.1, 0.2, 0.094));
        let text = format_all_dataset_tables(&records, 0.3);
        let at = |ds: &str| text.find(&format!("### Dataset: {ds}\n")).unwrap_or(usize::MAX);
        assert!(at("mmlu_10k") < at("cosmosqa_10k"));
        assert!(at("halu_dialogue") < at("halu_summarization"));
        assert!(at("halu_summarization") < at("custom"));
        assert!(at("custom") < usize::MAX);
    }

    #[test]
    fn test_missing_dataset_has_no_table() {
        assert!(format_dataset_table("nope", &benchmark_records(), 0.3).is_none());
    }

    #[test]
    fn test_all_tables_follow_dataset_order() {
        let text = format_all_dataset_tables(&benchmark_records(), 0.3);
        assert!(text.starts_with("# Tables for Each Dataset\n"));
        let mmlu = text.find("mmlu_10k").unwrap_or(usize::MAX);
        let summ = text.find("halu_summarization").unwrap_or(0);
        assert!(mmlu < summ);
        assert_eq!(text.matches("### Dataset:").count(), 5);
    }

    #[test]
    fn test_consolidated_row_format() {
        let text = format_consolidated_table(&pilot_records(), 0.3);
        assert!(text.contains(
            "| GPT-4            | CosmosQA   |     100000 |   0.650 |   1.200 |      0.455 |"
        ));
    }

    #[test]
    fn test_header_follows_alpha() {
        let text = format_all_dataset_tables(&benchmark_records(), 0.5);
        assert!(text.contains("UCS (α=0.5)"));
    }
}

// src/tables.rs
