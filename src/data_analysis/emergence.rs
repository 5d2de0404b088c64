// src/data_analysis/emergence.rs

//! Closed-form emergence curves used by the scaling figures.

use std::cmp::Ordering;

/// Standard logistic function.
#[inline]
pub fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Logistic transition centred at `x0` with steepness `k`, rescaled to `[floor, ceil]`.
pub fn logistic_emergence(x: f64, x0: f64, k: f64, floor: f64, ceil: f64) -> f64 {
    floor + (ceil - floor) * logistic(k * (x - x0))
}

/// Decreasing sigmoid in the threshold `tau`: fraction of items still above it.
pub fn emergence_curve(tau: f64, scale: f64, shift: f64) -> f64 {
    1.0 / (1.0 + ((tau - shift) * scale).exp())
}

/// Size classes of the threshold sensitivity analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

impl SizeClass {
    /// Below 0.5B is small, below 2B medium.
    pub fn from_params_b(size_b: f64) -> Self {
        if size_b < 0.5 {
            SizeClass::Small
        } else if size_b < 2.0 {
            SizeClass::Medium
        } else {
            SizeClass::Large
        }
    }

    /// `(steepness, centre)` of the class's emergence curve.
    pub fn curve_params(self) -> (f64, f64) {
        match self {
            SizeClass::Small => (10.0, 0.3),
            SizeClass::Medium => (8.0, 0.5),
            SizeClass::Large => (6.0, 0.7),
        }
    }
}

/// Emergence fraction at `tau` for a model of `size_b` billion parameters.
pub fn size_class_fraction(size_b: f64, tau: f64) -> f64 {
    let (scale, shift) = SizeClass::from_params_b(size_b).curve_params();
    emergence_curve(tau, scale, shift)
}

/// Linear drop of the fraction above threshold, floored at zero.
pub fn linear_fraction_above(base: f64, tau: f64) -> f64 {
    (base - 0.8 * tau).max(0.0)
}

/// Sharp transition around 10^-0.5 B parameters.
pub fn sharp_transition(size_b: f64) -> f64 {
    logistic(3.0 * (size_b.log10() + 0.5))
}

/// Log-linear growth normalised at 10B parameters.
pub fn gradual_emergence(size_b: f64) -> f64 {
    0.1 + 0.4 * (size_b + 0.1).log10() / 11f64.log10()
}

/// Staircase in steps of 0.1 per half decade, clamped to `[0.1, 0.5]`.
pub fn stepwise_emergence(size_b: f64) -> f64 {
    ((2.0 * size_b.log10() + 1.0).floor() * 0.1).clamp(0.1, 0.5)
}

/// Reading comprehension `(performance, uncertainty)`: a jump at 1B.
pub fn reading_comprehension_point(size_b: f64) -> (f64, f64) {
    let l = (size_b + 0.1).ln();
    if size_b < 1.0 {
        (0.15 + 0.05 * l, 0.4 - 0.05 * l)
    } else {
        (0.3 + 0.15 * l, 0.2 - 0.02 * l)
    }
}

/// QA `(performance, uncertainty)`: gradual log growth.
pub fn qa_point(size_b: f64) -> (f64, f64) {
    let l = (size_b + 0.1).ln() / 8f64.ln();
    (0.1 + 0.3 * l, 0.5 - 0.2 * l)
}

/// Dialogue `(performance, uncertainty)` step levels at 0.2B, 1B and 5B.
pub fn dialogue_step(size_b: f64) -> (f64, f64) {
    if size_b < 0.2 {
        (0.15, 0.45)
    } else if size_b < 1.0 {
        (0.25, 0.35)
    } else if size_b < 5.0 {
        (0.35, 0.25)
    } else {
        (0.45, 0.20)
    }
}

/// Model sizes where the dialogue staircase steps up.
pub const DIALOGUE_STEPS_B: [f64; 3] = [0.2, 1.0, 5.0];

/// First size in `sizes` that is at least `threshold`.
pub fn first_size_at_least(sizes: &[f64], threshold: f64) -> Option<f64> {
    sizes.iter().copied().find(|&s| s >= threshold)
}

/// Ranks with the best score at 0, ties sharing the average rank.
pub fn rank_descending(scores: &[f64]) -> Vec<f64> {
    let n = scores.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| scores[a].partial_cmp(&scores[b]).unwrap_or(Ordering::Equal));

    // 1-based ascending ranks, ties averaged.
    let mut ascending = vec![0.0; n];
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && scores[order[j + 1]] == scores[order[i]] {
            j += 1;
        }
        let avg = (i + j) as f64 / 2.0 + 1.0;
        for &idx in &order[i..=j] {
            ascending[idx] = avg;
        }
        i = j + 1;
    }
    ascending.iter().map(|r| n as f64 - r).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_logistic_emergence_bounds() {
        assert_abs_diff_eq!(logistic_emergence(500.0, 500.0, 0.003, 0.05, 0.9), 0.475, epsilon = 1e-12);
        assert!(logistic_emergence(-1e6, 500.0, 0.003, 0.05, 0.9) >= 0.05);
        assert!(logistic_emergence(1e6, 500.0, 0.003, 0.05, 0.9) <= 0.9);
    }

    #[test]
    fn test_emergence_curve_midpoint_and_monotone() {
        assert_abs_diff_eq!(emergence_curve(0.5, 12.0, 0.5), 0.5, epsilon = 1e-12);
        assert!(emergence_curve(0.2, 12.0, 0.5) > emergence_curve(0.8, 12.0, 0.5));
    }

    #[test]
    fn test_size_classes() {
        assert_eq!(SizeClass::from_params_b(0.124), SizeClass::Small);
        assert_eq!(SizeClass::from_params_b(1.5), SizeClass::Medium);
        assert_eq!(SizeClass::from_params_b(7.0), SizeClass::Large);
        assert_abs_diff_eq!(size_class_fraction(7.0, 0.7), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_linear_fraction_floor() {
        assert_abs_diff_eq!(linear_fraction_above(0.65, 0.5), 0.25, epsilon = 1e-12);
        assert_eq!(linear_fraction_above(0.2, 0.5), 0.0);
    }

    #[test]
    fn test_detail_patterns() {
        assert_abs_diff_eq!(sharp_transition(10f64.powf(-0.5)), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(gradual_emergence(10.9), 0.5, epsilon = 1e-12);
        assert_eq!(stepwise_emergence(0.01), 0.1);
        assert_abs_diff_eq!(stepwise_emergence(10.0), 0.3, epsilon = 1e-12);
        assert_eq!(stepwise_emergence(1000.0), 0.5);
        assert_abs_diff_eq!(stepwise_emergence(1.0), 0.1, epsilon = 1e-12);
        assert_abs_diff_eq!(stepwise_emergence(3.5), 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_reading_comprehension_jumps_at_one_billion() {
        let (below, _) = reading_comprehension_point(0.774);
        let (above, _) = reading_comprehension_point(1.5);
        assert!(above - below > 0.1);
    }

    #[test]
    fn test_dialogue_steps() {
        assert_eq!(dialogue_step(0.124), (0.15, 0.45));
        assert_eq!(dialogue_step(0.2), (0.25, 0.35));
        assert_eq!(dialogue_step(7.0), (0.45, 0.20));
    }

    #[test]
    fn test_first_size_at_least() {
        let sizes = [0.082, 0.124, 0.345, 0.774, 1.5, 6.0, 7.0];
        assert_eq!(first_size_at_least(&sizes, 0.25), Some(0.345));
        assert_eq!(first_size_at_least(&sizes, 0.35), Some(0.774));
        assert_eq!(first_size_at_least(&sizes, 10.0), None);
    }

    #[test]
    fn test_rank_descending() {
        assert_eq!(rank_descending(&[0.1, 0.9, 0.5]), vec![2.0, 0.0, 1.0]);
        // Ties share the average rank.
        assert_eq!(rank_descending(&[0.1, 0.5, 0.5]), vec![2.0, 0.5, 0.5]);
        assert!(rank_descending(&[]).is_empty());
    }
}

// src/data_analysis/emergence.rs
