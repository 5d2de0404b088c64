// src/data_analysis/curves.rs

use ndarray::Array2;

use crate::data_analysis::emergence::logistic;

/// `n` evenly spaced values over `[start, end]`, endpoints included.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// `n` values evenly spaced in log10 between `10^start_exp` and `10^end_exp`.
pub fn logspace(start_exp: f64, end_exp: f64, n: usize) -> Vec<f64> {
    linspace(start_exp, end_exp, n)
        .into_iter()
        .map(|e| 10f64.powf(e))
        .collect()
}

/// `(theoretical minimum, observed)` capacity for a model of `size_b` billion parameters.
pub fn capacity_bounds(size_b: f64) -> (f64, f64) {
    let bits = (size_b * 1e9).log2();
    (0.2 * bits + 0.3, 0.35 * bits + 0.4)
}

/// Scale where the phase transition is centred.
pub const PHASE_TRANSITION_CENTER: f64 = 2.0;

/// Mean performance across the phase transition.
pub fn phase_transition(scale: f64) -> f64 {
    logistic(2.0 * (scale - PHASE_TRANSITION_CENTER))
}

/// Surface `z = sigmoid(3 (x - 2y - 1))` sampled on `nx` sizes in `[0, 7]`
/// and `ny` difficulties in `[0, 1]`. Indexed `[iy, ix]`.
pub struct PhaseSurface {
    pub sizes: Vec<f64>,
    pub difficulties: Vec<f64>,
    pub performance: Array2<f64>,
}

pub fn phase_surface_value(size_b: f64, difficulty: f64) -> f64 {
    logistic(3.0 * (size_b - 2.0 * difficulty - 1.0))
}

pub fn phase_surface(nx: usize, ny: usize) -> PhaseSurface {
    let sizes = linspace(0.0, 7.0, nx);
    let difficulties = linspace(0.0, 1.0, ny);
    let performance =
        Array2::from_shape_fn((ny, nx), |(iy, ix)| phase_surface_value(sizes[ix], difficulties[iy]));
    PhaseSurface {
        sizes,
        difficulties,
        performance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_linspace() {
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(3.0, 4.0, 1), vec![3.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_logspace() {
        let v = logspace(6.0, 9.0, 4);
        assert_abs_diff_eq!(v[0], 1e6, epsilon = 1e-6);
        assert_abs_diff_eq!(v[3], 1e9, epsilon = 1e-3);
    }

    #[test]
    fn test_capacity_bounds_ordered() {
        for size in [0.082, 1.5, 7.0] {
            let (min, observed) = capacity_bounds(size);
            assert!(observed > min);
        }
        let (min, _) = capacity_bounds(1.0);
        assert_abs_diff_eq!(min, 0.2 * 1e9f64.log2() + 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_phase_transition_midpoint() {
        assert_abs_diff_eq!(phase_transition(2.0), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_phase_surface_shape_and_values() {
        let surface = phase_surface(50, 40);
        assert_eq!(surface.performance.dim(), (40, 50));
        assert_abs_diff_eq!(phase_surface_value(1.0, 0.0), 0.5, epsilon = 1e-12);
        // Performance rises with size and falls with difficulty.
        assert!(surface.performance[[0, 49]] > surface.performance[[0, 0]]);
        assert!(surface.performance[[39, 25]] < surface.performance[[0, 25]]);
    }
}

// src/data_analysis/curves.rs
