// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Result alias for the metric, record and config layers.
pub type Result<T> = std::result::Result<T, FigureError>;

/// Typed failures raised before anything is drawn.
///
/// Drawing code itself stays on `Box<dyn Error>` so plotters backend errors
/// propagate unchanged; these variants convert into that box via `?`.
#[derive(Error, Debug)]
pub enum FigureError {
    /// A metric value was outside its valid domain.
    #[error("invalid {name}: {value} ({reason})")]
    InvalidMetric {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Paired inputs had different lengths.
    #[error("length mismatch: {left_name} has {left} values, {right_name} has {right}")]
    LengthMismatch {
        left_name: &'static str,
        left: usize,
        right_name: &'static str,
        right: usize,
    },

    /// A computation needed at least one value.
    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    /// Bin count of zero.
    #[error("number of bins must be positive")]
    ZeroBins,

    /// CSV input was missing required columns.
    #[error("missing required headers in {path}: {headers}")]
    MissingHeaders { path: PathBuf, headers: String },

    /// CSV input had headers but no usable rows.
    #[error("no valid rows in {0}")]
    NoValidRows(PathBuf),

    /// Figure id not present in the registry.
    #[error("unknown figure id '{0}' (run `ucs-figures list`)")]
    UnknownFigure(String),

    /// Config file could not be parsed.
    #[error("config parse error in {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FigureError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidMetric {
            name,
            value,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_metric_message() {
        let err = FigureError::invalid("acc", 1.5, "must be in [0, 1]");
        assert_eq!(err.to_string(), "invalid acc: 1.5 (must be in [0, 1])");
    }

    #[test]
    fn test_unknown_figure_message_mentions_list() {
        let err = FigureError::UnknownFigure("nope".to_string());
        assert!(err.to_string().contains("ucs-figures list"));
    }
}

// src/error.rs
