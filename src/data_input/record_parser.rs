// src/data_input/record_parser.rs

use csv::ReaderBuilder;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::data_analysis::ucs::ucs_unchecked;
use crate::data_input::records::MetricRecord;
use crate::error::{FigureError, Result};

// Column order of the record CSV. Index 5 (ucs) is optional.
const RECORD_HEADERS: [&str; 6] = ["dataset", "model", "param_count", "acc", "ent", "ucs"];
const REQUIRED_RECORD_HEADERS: usize = 5;

const ITEM_HEADERS: [&str; 2] = ["capability", "entropy"];

/// Maps each target header to its CSV column, matching case-insensitively.
/// `params_m` is accepted as an alias for `param_count`.
fn map_headers(header_record: &csv::StringRecord, targets: &[&str]) -> Vec<Option<usize>> {
    targets
        .iter()
        .map(|&target| {
            header_record.iter().position(|h| {
                let h = h.trim();
                h.eq_ignore_ascii_case(target)
                    || (target == "param_count" && h.eq_ignore_ascii_case("params_m"))
            })
        })
        .collect()
}

fn missing_headers(header_indices: &[Option<usize>], targets: &[&str], required: usize) -> Vec<String> {
    (0..required)
        .filter(|&i| header_indices[i].is_none())
        .map(|i| format!("'{}'", targets[i]))
        .collect()
}

/// Parses a record CSV (`dataset,model,param_count,acc,ent[,ucs]`).
///
/// Rows with a missing or unparseable field are skipped with a warning. When
/// the `ucs` column is absent or empty it is computed with `alpha`.
pub fn parse_records_csv(input_file_path: &Path, alpha: f64) -> Result<Vec<MetricRecord>> {
    let file = File::open(input_file_path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let header_record = reader.headers()?.clone();
    debug!(headers = ?header_record, "record CSV headers");
    let header_indices = map_headers(&header_record, &RECORD_HEADERS);

    let missing = missing_headers(&header_indices, &RECORD_HEADERS, REQUIRED_RECORD_HEADERS);
    if !missing.is_empty() {
        return Err(FigureError::MissingHeaders {
            path: input_file_path.to_path_buf(),
            headers: missing.join(", "),
        });
    }
    if header_indices[5].is_none() {
        info!("no 'ucs' column, computing UCS with alpha={alpha}");
    }

    let mut records: Vec<MetricRecord> = Vec::new();
    for (row_index, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!("skipping row {} due to CSV read error: {}", row_index + 1, e);
                continue;
            }
        };

        let text_at = |target_idx: usize| -> Option<&str> {
            header_indices[target_idx]
                .and_then(|csv_idx| record.get(csv_idx))
                .filter(|s| !s.is_empty())
        };
        let f64_at = |target_idx: usize| -> Option<f64> {
            text_at(target_idx)
                .and_then(|s| s.parse::<f64>().ok())
                .filter(|v| v.is_finite())
        };

        let (Some(dataset), Some(model)) = (text_at(0), text_at(1)) else {
            warn!("skipping row {}: missing dataset or model", row_index + 1);
            continue;
        };
        let (Some(param_count), Some(acc), Some(ent)) = (f64_at(2), f64_at(3), f64_at(4)) else {
            warn!("skipping row {}: missing or invalid numeric field", row_index + 1);
            continue;
        };
        if param_count <= 0.0 || !(0.0..=1.0).contains(&acc) || ent < 0.0 {
            warn!(
                "skipping row {}: out of range (param_count={param_count}, acc={acc}, ent={ent})",
                row_index + 1
            );
            continue;
        }
        let ucs = f64_at(5).unwrap_or_else(|| ucs_unchecked(acc, ent, alpha));

        records.push(MetricRecord::new(dataset, model, param_count, acc, ent, ucs));
    }

    if records.is_empty() {
        return Err(FigureError::NoValidRows(input_file_path.to_path_buf()));
    }
    info!(
        "read {} records from {}",
        records.len(),
        input_file_path.display()
    );
    Ok(records)
}

/// Parses per-item `capability,entropy` rows for the emergent fraction command.
pub fn parse_items_csv(input_file_path: &Path) -> Result<Vec<(f64, f64)>> {
    let file = File::open(input_file_path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let header_record = reader.headers()?.clone();
    let header_indices = map_headers(&header_record, &ITEM_HEADERS);
    let missing = missing_headers(&header_indices, &ITEM_HEADERS, ITEM_HEADERS.len());
    if !missing.is_empty() {
        return Err(FigureError::MissingHeaders {
            path: input_file_path.to_path_buf(),
            headers: missing.join(", "),
        });
    }

    let mut items = Vec::new();
    for (row_index, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!("skipping row {} due to CSV read error: {}", row_index + 1, e);
                continue;
            }
        };
        let f64_at = |target_idx: usize| -> Option<f64> {
            header_indices[target_idx]
                .and_then(|csv_idx| record.get(csv_idx))
                .and_then(|s| s.parse::<f64>().ok())
                .filter(|v| v.is_finite())
        };
        match (f64_at(0), f64_at(1)) {
            (Some(capability), Some(entropy)) => items.push((capability, entropy)),
            _ => warn!("skipping row {}: missing or invalid value", row_index + 1),
        }
    }

    if items.is_empty() {
        return Err(FigureError::NoValidRows(input_file_path.to_path_buf()));
    }
    Ok(items)
}


// src/data_input/record_parser.rs
