// src/data_analysis/calibration.rs

//! Reliability binning and Expected Calibration Error.

use crate::error::{FigureError, Result};

/// Equal-width confidence bins over `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationBins {
    pub edges: Vec<f64>,
    pub centers: Vec<f64>,
    pub counts: Vec<usize>,
    /// Mean outcome per bin; `None` for an empty bin.
    pub mean_accuracy: Vec<Option<f64>>,
    /// Number of samples that landed in some bin.
    pub total: usize,
}

/// Reliability curve and ECE for one model.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationSummary {
    pub bins: CalibrationBins,
    pub ece: f64,
}

impl CalibrationSummary {
    /// `(center, mean accuracy)` points of non-empty bins.
    pub fn reliability_points(&self) -> Vec<(f64, f64)> {
        self.bins
            .centers
            .iter()
            .zip(self.bins.mean_accuracy.iter())
            .filter_map(|(&c, m)| m.map(|m| (c, m)))
            .collect()
    }

    /// `1 - ECE`.
    pub fn calibration_score(&self) -> f64 {
        1.0 - self.ece
    }
}

/// Bin index for a confidence. Bins are `[e_i, e_{i+1})` except the last,
/// which also holds 1.0. Out-of-range and non-finite values have no bin.
fn bin_index(confidence: f64, n_bins: usize) -> Option<usize> {
    if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
        return None;
    }
    let idx = (confidence * n_bins as f64).floor() as usize;
    Some(idx.min(n_bins - 1))
}

/// Groups `(confidence, outcome)` pairs into `n_bins` equal-width bins.
pub fn bin_calibration(confidences: &[f64], accuracies: &[f64], n_bins: usize) -> Result<CalibrationBins> {
    if n_bins == 0 {
        return Err(FigureError::ZeroBins);
    }
    if confidences.len() != accuracies.len() {
        return Err(FigureError::LengthMismatch {
            left_name: "confidences",
            left: confidences.len(),
            right_name: "accuracies",
            right: accuracies.len(),
        });
    }
    if confidences.is_empty() {
        return Err(FigureError::EmptyInput("confidences"));
    }

    let edges: Vec<f64> = (0..=n_bins).map(|i| i as f64 / n_bins as f64).collect();
    let centers: Vec<f64> = edges.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect();
    let mut counts = vec![0usize; n_bins];
    let mut sums = vec![0.0f64; n_bins];

    for (&conf, &acc) in confidences.iter().zip(accuracies.iter()) {
        if !acc.is_finite() {
            continue;
        }
        if let Some(idx) = bin_index(conf, n_bins) {
            counts[idx] += 1;
            sums[idx] += acc;
        }
    }

    let mean_accuracy = counts
        .iter()
        .zip(sums.iter())
        .map(|(&n, &s)| if n > 0 { Some(s / n as f64) } else { None })
        .collect();
    let total = counts.iter().sum();

    Ok(CalibrationBins {
        edges,
        centers,
        counts,
        mean_accuracy,
        total,
    })
}

/// `sum |mean_i - center_i| * count_i / n`, skipping empty bins.
///
/// `n` is the full sample size, so samples that fell outside `[0, 1]` dilute
/// the error rather than vanish from the denominator.
pub fn expected_calibration_error(bins: &CalibrationBins, n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    bins.centers
        .iter()
        .zip(bins.mean_accuracy.iter())
        .zip(bins.counts.iter())
        .filter_map(|((&center, mean), &count)| {
            mean.map(|m| (m - center).abs() * count as f64 / n as f64)
        })
        .sum()
}

/// Bins the samples and computes ECE in one call.
pub fn compute_calibration_metrics(
    confidences: &[f64],
    accuracies: &[f64],
    n_bins: usize,
) -> Result<CalibrationSummary> {
    let bins = bin_calibration(confidences, accuracies, n_bins)?;
    let ece = expected_calibration_error(&bins, confidences.len());
    Ok(CalibrationSummary { bins, ece })
}

/// Mean confidence.
pub fn sharpness(confidences: &[f64]) -> Result<f64> {
    if confidences.is_empty() {
        return Err(FigureError::EmptyInput("confidences"));
    }
    Ok(confidences.iter().sum::<f64>() / confidences.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_bin_edges_and_centers() {
        let bins = bin_calibration(&[0.5], &[1.0], 4).unwrap();
        assert_eq!(bins.edges, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(bins.centers, vec![0.125, 0.375, 0.625, 0.875]);
    }

    #[test]
    fn test_last_bin_is_closed() {
        let bins = bin_calibration(&[1.0, 0.0, 0.99], &[1.0, 0.0, 1.0], 10).unwrap();
        assert_eq!(bins.counts[9], 2);
        assert_eq!(bins.counts[0], 1);
        assert_eq!(bins.total, 3);
    }

    #[test]
    fn test_interior_edge_goes_to_upper_bin() {
        let bins = bin_calibration(&[0.5], &[1.0], 10).unwrap();
        assert_eq!(bins.counts[5], 1);
    }

    #[test]
    fn test_out_of_range_ignored() {
        let bins = bin_calibration(&[-0.1, 1.2, f64::NAN, 0.3], &[1.0, 1.0, 1.0, 0.0], 10).unwrap();
        assert_eq!(bins.total, 1);
        assert_eq!(bins.counts.iter().sum::<usize>(), 1);
    }

    #[test]
    fn test_perfect_calibration_has_zero_ece() {
        // Every bin's mean outcome equals its centre.
        let confidences = [0.05, 0.05, 0.95, 0.95];
        let accuracies = [0.0, 0.1, 0.9, 1.0];
        let summary = compute_calibration_metrics(&confidences, &accuracies, 10).unwrap();
        assert_abs_diff_eq!(summary.ece, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(summary.calibration_score(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ece_weighted_by_counts() {
        // Bin 0 (center 0.25): outcomes 1,1,1 -> |1-0.25| * 3/4
        // Bin 1 (center 0.75): outcome 0   -> |0-0.75| * 1/4
        let summary = compute_calibration_metrics(&[0.1, 0.2, 0.3, 0.8], &[1.0, 1.0, 1.0, 0.0], 2).unwrap();
        assert_abs_diff_eq!(summary.ece, 0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_bins_do_not_produce_nan() {
        let summary = compute_calibration_metrics(&[0.95, 0.96], &[1.0, 1.0], 10).unwrap();
        assert!(summary.ece.is_finite());
        assert_abs_diff_eq!(summary.ece, 0.05, epsilon = 1e-12);
        assert_eq!(summary.reliability_points().len(), 1);
    }

    #[test]
    fn test_ece_bounded() {
        let confidences: Vec<f64> = (0..100).map(|i| i as f64 / 99.0).collect();
        let accuracies: Vec<f64> = (0..100).map(|i| if i % 3 == 0 { 1.0 } else { 0.0 }).collect();
        let summary = compute_calibration_metrics(&confidences, &accuracies, 10).unwrap();
        assert!((0.0..=1.0).contains(&summary.ece));
    }

    #[test]
    fn test_errors() {
        assert!(matches!(bin_calibration(&[0.1], &[1.0], 0), Err(FigureError::ZeroBins)));
        assert!(matches!(
            bin_calibration(&[0.1, 0.2], &[1.0], 10),
            Err(FigureError::LengthMismatch { .. })
        ));
        assert!(matches!(bin_calibration(&[], &[], 10), Err(FigureError::EmptyInput(_))));
        assert!(sharpness(&[]).is_err());
    }

    #[test]
    fn test_sharpness() {
        assert_abs_diff_eq!(sharpness(&[0.2, 0.4, 0.9]).unwrap(), 0.5, epsilon = 1e-12);
    }
}

// src/data_analysis/calibration.rs
