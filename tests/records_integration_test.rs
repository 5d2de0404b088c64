// tests/records_integration_test.rs

use std::io::Write;

use ucs_figures::cli::load_records;
use ucs_figures::data_input::builtin::{benchmark_records, pilot_records};
use ucs_figures::data_input::record_parser::{parse_items_csv, parse_records_csv};
use ucs_figures::error::FigureError;
use ucs_figures::tables::{format_all_dataset_tables, format_consolidated_table};

fn write_csv(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_tables_follow_dataset_order() {
        let text = format_all_dataset_tables(&benchmark_records(), 0.3);
        assert!(text.starts_with("# Tables for Each Dataset"));
        let positions: Vec<usize> = [
            "mmlu_10k",
            "cosmosqa_10k",
            "hellaswag_10k",
            "halu_dialogue",
            "halu_summarization",
        ]
        .iter()
        .map(|ds| text.find(&format!("### Dataset: {ds}")).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(text.matches("| DistilGPT2").count(), 5);
    }

    #[test]
    fn test_consolidated_pilot_table() {
        let text = format_consolidated_table(&pilot_records(), 0.3);
        assert!(text.contains("Consolidated Table of Results"));
        assert!(text.contains("| GPT-4            | CosmosQA   |     100000 |   0.650 |   1.200 |      0.455 |"));
        assert_eq!(text.lines().filter(|l| l.starts_with("| ")).count(), 12);
    }

    #[test]
    fn test_csv_round_trip_into_tables() {
        let file = write_csv(
            "dataset,model,param_count,acc,ent\n\
             toy,small,82,0.2,0.5\n\
             toy,large,7000,0.6,0.4\n",
        );
        let records = parse_records_csv(file.path(), 0.5).unwrap();
        let text = format_all_dataset_tables(&records, 0.5);
        assert!(text.contains("UCS (α=0.5)"));
        assert!(text.contains("| small        |         82 |        0.200 |       0.500 |       0.150 |"));
    }

    #[test]
    fn test_load_records_rescores_csv() {
        let file = write_csv(
            "dataset,model,param_count,acc,ent,ucs\n\
             toy,m,82,0.5,1.0,0.35\n",
        );
        let records = load_records(Some(file.path()), 0.0).unwrap();
        assert_eq!(records[0].ucs, 0.5);
    }

    #[test]
    fn test_missing_headers_reported() {
        let file = write_csv("dataset,model,acc\nd,m,0.5\n");
        match parse_records_csv(file.path(), 0.3) {
            Err(FigureError::MissingHeaders { headers, .. }) => {
                assert!(headers.contains("'param_count'"));
                assert!(headers.contains("'ent'"));
            }
            other => panic!("expected missing headers, got {other:?}"),
        }
    }

    #[test]
    fn test_items_csv() {
        let file = write_csv("capability,entropy\n0.9,0.1\nbad,0.2\n0.4,0.8\n");
        let items = parse_items_csv(file.path()).unwrap();
        assert_eq!(items, vec![(0.9, 0.1), (0.4, 0.8)]);

        let empty = write_csv("capability,entropy\n");
        assert!(matches!(parse_items_csv(empty.path()), Err(FigureError::NoValidRows(_))));
    }
}

// tests/records_integration_test.rs
