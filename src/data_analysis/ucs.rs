// src/data_analysis/ucs.rs

//! Uncertainty-aware Capability Score: `ucs = acc * (1 - alpha * ent)`.

use crate::data_input::records::MetricRecord;
use crate::error::{FigureError, Result};

/// UCS without input validation, for synthetic curves that may leave `[0, 1]`.
#[inline]
pub fn ucs_unchecked(acc: f64, ent: f64, alpha: f64) -> f64 {
    acc * (1.0 - alpha * ent)
}

/// Validated UCS.
///
/// `acc` must lie in `[0, 1]`, `ent` and `alpha` must be non-negative and all
/// three finite. When additionally `alpha * ent <= 1` the result satisfies
/// `0 <= ucs <= acc`.
pub fn ucs(acc: f64, ent: f64, alpha: f64) -> Result<f64> {
    if !acc.is_finite() || !(0.0..=1.0).contains(&acc) {
        return Err(FigureError::invalid("acc", acc, "must be a finite value in [0, 1]"));
    }
    if !ent.is_finite() || ent < 0.0 {
        return Err(FigureError::invalid("ent", ent, "must be finite and non-negative"));
    }
    if !alpha.is_finite() || alpha < 0.0 {
        return Err(FigureError::invalid("alpha", alpha, "must be finite and non-negative"));
    }
    Ok(ucs_unchecked(acc, ent, alpha))
}

/// UCS for each `(acc, ent)` pair; fails on the first invalid pair.
pub fn ucs_batch(pairs: &[(f64, f64)], alpha: f64) -> Result<Vec<f64>> {
    pairs.iter().map(|&(acc, ent)| ucs(acc, ent, alpha)).collect()
}

/// Whether the bound `0 <= ucs <= acc` is guaranteed for these inputs.
pub fn ucs_invariant_holds(acc: f64, ent: f64, alpha: f64) -> bool {
    (0.0..=1.0).contains(&acc) && ent >= 0.0 && alpha >= 0.0 && alpha * ent <= 1.0
}

/// Fraction of values at or above `tau`; `0.0` for an empty slice.
pub fn fraction_at_or_above(values: &[f64], tau: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let above = values.iter().filter(|&&v| v >= tau).count();
    above as f64 / values.len() as f64
}

/// Copies of `records` with `ucs` recomputed for `alpha`.
pub fn recompute_ucs(records: &[MetricRecord], alpha: f64) -> Result<Vec<MetricRecord>> {
    records
        .iter()
        .map(|r| {
            let mut out = r.clone();
            out.ucs = ucs(r.acc, r.ent, alpha)?;
            Ok(out)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_formula() {
        assert_abs_diff_eq!(ucs(0.65, 1.2, 0.3).unwrap(), 0.416, epsilon = 1e-12);
        assert_abs_diff_eq!(ucs(0.10, 0.30, 0.3).unwrap(), 0.091, epsilon = 1e-12);
    }

    #[test]
    fn test_identities() {
        assert_eq!(ucs(0.4, 0.0, 0.3).unwrap(), 0.4);
        assert_eq!(ucs(0.4, 1.7, 0.0).unwrap(), 0.4);
        assert_eq!(ucs(0.0, 1.0, 0.3).unwrap(), 0.0);
    }

    #[test]
    fn test_bound_holds_on_grid() {
        for ai in 0..=20 {
            for ei in 0..=20 {
                for alpha in [0.0, 0.3, 0.5, 1.0] {
                    let acc = ai as f64 / 20.0;
                    let ent = ei as f64 / 10.0;
                    if !ucs_invariant_holds(acc, ent, alpha) {
                        continue;
                    }
                    let u = ucs(acc, ent, alpha).unwrap();
                    assert!(u >= 0.0 && u <= acc + 1e-15, "acc={acc} ent={ent} alpha={alpha} ucs={u}");
                }
            }
        }
    }

    #[test]
    fn test_rejects_invalid_inputs() {
        assert!(ucs(1.1, 0.2, 0.3).is_err());
        assert!(ucs(-0.1, 0.2, 0.3).is_err());
        assert!(ucs(0.5, -0.2, 0.3).is_err());
        assert!(ucs(0.5, 0.2, -0.3).is_err());
        assert!(ucs(f64::NAN, 0.2, 0.3).is_err());
        assert!(ucs(0.5, f64::INFINITY, 0.3).is_err());
    }

    #[test]
    fn test_bound_can_fail_when_penalty_exceeds_one() {
        // alpha * ent > 1 drives the score negative.
        assert!(!ucs_invariant_holds(0.5, 4.0, 0.3));
        assert!(ucs(0.5, 4.0, 0.3).unwrap() < 0.0);
    }

    #[test]
    fn test_batch() {
        let scores = ucs_batch(&[(1.0, 0.5), (0.5, 1.0)], 0.3).unwrap();
        assert_abs_diff_eq!(scores[0], 0.85, epsilon = 1e-12);
        assert_abs_diff_eq!(scores[1], 0.35, epsilon = 1e-12);
        assert!(ucs_batch(&[(1.0, 0.5), (2.0, 0.1)], 0.3).is_err());
    }

    #[test]
    fn test_fraction_at_or_above() {
        let values = [0.9058, 0.0, 0.85, 0.64, 0.0];
        assert_abs_diff_eq!(fraction_at_or_above(&values, 0.5), 0.6, epsilon = 1e-12);
        assert_eq!(fraction_at_or_above(&values, 0.85), 0.4);
        assert_eq!(fraction_at_or_above(&[], 0.5), 0.0);
    }

    #[test]
    fn test_recompute_ucs() {
        let records = vec![MetricRecord::new("d", "m", 82.0, 0.5, 1.0, 0.0)];
        let out = recompute_ucs(&records, 0.5).unwrap();
        assert_abs_diff_eq!(out[0].ucs, 0.25, epsilon = 1e-12);
        assert_eq!(records[0].ucs, 0.0);
    }
}

// src/data_analysis/ucs.rs
