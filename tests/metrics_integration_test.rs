// tests/metrics_integration_test.rs

use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use ucs_figures::data_analysis::calibration::{compute_calibration_metrics, sharpness};
use ucs_figures::data_analysis::synthetic::calibration_samples;
use ucs_figures::data_analysis::ucs::{
    fraction_at_or_above, recompute_ucs, ucs, ucs_batch, ucs_invariant_holds,
};
use ucs_figures::data_input::builtin::benchmark_records;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ucs_bounded_by_accuracy_over_grid() {
        for ai in 0..=10 {
            for ei in 0..=20 {
                let acc = ai as f64 / 10.0;
                let ent = ei as f64 / 10.0;
                for alpha in [0.0, 0.1, 0.3, 0.5] {
                    if alpha * ent > 1.0 {
                        continue;
                    }
                    let score = ucs(acc, ent, alpha).unwrap();
                    assert!((0.0..=acc + 1e-12).contains(&score), "acc={acc} ent={ent}");
                    assert!(ucs_invariant_holds(acc, ent, alpha));
                }
            }
        }
    }

    #[test]
    fn test_zero_entropy_or_alpha_keeps_accuracy() {
        assert_eq!(ucs(0.42, 0.0, 0.3).unwrap(), 0.42);
        assert_eq!(ucs(0.42, 1.7, 0.0).unwrap(), 0.42);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        assert!(ucs(1.2, 0.1, 0.3).is_err());
        assert!(ucs(0.5, -0.1, 0.3).is_err());
        assert!(ucs(0.5, 0.1, -0.3).is_err());
        assert!(ucs(f64::NAN, 0.1, 0.3).is_err());
        assert!(ucs_batch(&[(0.5, 0.2), (0.5, f64::INFINITY)], 0.3).is_err());
    }

    #[test]
    fn test_benchmark_ucs_close_to_reported() {
        let records = benchmark_records();
        let recomputed = recompute_ucs(&records, 0.3).unwrap();
        for (reported, fresh) in records.iter().zip(&recomputed) {
            // Reported scores are rounded to three decimals.
            assert_abs_diff_eq!(reported.ucs, fresh.ucs, epsilon = 0.02);
        }
    }

    #[test]
    fn test_emergent_fraction() {
        let scores = [0.1, 0.5, 0.7, 0.2];
        assert_eq!(fraction_at_or_above(&scores, 0.5), 0.5);
        assert_eq!(fraction_at_or_above(&[], 0.5), 0.0);
    }

    #[test]
    fn test_perfect_calibration_has_zero_ece() {
        // Every bin's accuracy equals its centre.
        let confidences = [0.05, 0.15, 0.25, 0.35, 0.45, 0.55, 0.65, 0.75, 0.85, 0.95];
        let summary = compute_calibration_metrics(&confidences, &confidences, 10).unwrap();
        assert_abs_diff_eq!(summary.ece, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(summary.calibration_score(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ece_and_counts_on_synthetic_samples() {
        let mut rng = StdRng::seed_from_u64(42);
        let (conf, acc) = calibration_samples(&mut rng, (8.0, 2.0), 0.8, 1000).unwrap();
        let summary = compute_calibration_metrics(&conf, &acc, 10).unwrap();
        assert!((0.0..=1.0).contains(&summary.ece));
        assert_eq!(summary.bins.counts.iter().sum::<usize>(), 1000);
        assert_eq!(summary.bins.total, 1000);
        let s = sharpness(&conf).unwrap();
        assert!(s > 0.7 && s < 0.9);
    }

    #[test]
    fn test_synthetic_samples_are_seeded() {
        let a = calibration_samples(&mut StdRng::seed_from_u64(42), (2.0, 5.0), 0.3, 50);
        let b = calibration_samples(&mut StdRng::seed_from_u64(42), (2.0, 5.0), 0.3, 50);
        assert_eq!(a, b);
    }
}

// tests/metrics_integration_test.rs
