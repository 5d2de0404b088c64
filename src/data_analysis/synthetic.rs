// src/data_analysis/synthetic.rs

//! Seeded synthetic data for the illustrative figures.
//!
//! Every generator draws from a caller-supplied `StdRng`, so one seed in the
//! config reproduces every figure bit for bit.

use ndarray::{Array2, Array3};
use rand::rngs::StdRng;
use rand::Rng;
use rand_distr::{Beta, Distribution, Normal, StandardNormal};

use crate::data_analysis::curves::linspace;
use crate::data_analysis::distribution::percentile;
use crate::data_analysis::emergence::{logistic, logistic_emergence};
use crate::data_input::builtin::TaskProfile;

/// Gaussian draw with standard deviation `sigma`.
fn jitter(rng: &mut StdRng, sigma: f64) -> f64 {
    let z: f64 = rng.sample(StandardNormal);
    sigma * z
}

/// Beta-distributed confidences paired with Bernoulli(`p`) correctness.
///
/// Returns `None` when the shape parameters are not positive.
pub fn calibration_samples(
    rng: &mut StdRng,
    shape: (f64, f64),
    p: f64,
    n: usize,
) -> Option<(Vec<f64>, Vec<f64>)> {
    let beta = Beta::new(shape.0, shape.1).ok()?;
    let p = p.clamp(0.0, 1.0);
    let confidences: Vec<f64> = (0..n).map(|_| beta.sample(rng)).collect();
    let accuracies: Vec<f64> = (0..n)
        .map(|_| if rng.gen_bool(p) { 1.0 } else { 0.0 })
        .collect();
    Some((confidences, accuracies))
}

/// Per-scale accuracy, uncertainty and UCS of one synthetic task.
#[derive(Debug, Clone)]
pub struct SyntheticTaskMetrics {
    pub task: &'static str,
    pub accuracy: Vec<f64>,
    pub uncertainty: Vec<f64>,
    pub ucs: Vec<f64>,
}

/// Logistic accuracy in `[0.05, 0.90]` and uncertainty falling by up to 0.1,
/// both with `N(0, 0.01)` jitter and clipped to `[0, 1]`.
pub fn synthetic_task_metrics(
    rng: &mut StdRng,
    task: &TaskProfile,
    scales_m: &[f64],
    alpha: f64,
) -> SyntheticTaskMetrics {
    let mut accuracy = Vec::with_capacity(scales_m.len());
    let mut uncertainty = Vec::with_capacity(scales_m.len());
    for &p in scales_m {
        let acc = logistic_emergence(p, task.x0, task.k, 0.05, 0.90) + jitter(rng, 0.01);
        accuracy.push(acc.clamp(0.0, 1.0));

        let unc = task.base_uncertainty - 0.1 * logistic_emergence(p, task.x0, task.k, 0.0, 1.0)
            + jitter(rng, 0.01);
        uncertainty.push(unc.clamp(0.0, 1.0));
    }
    let ucs = accuracy
        .iter()
        .zip(uncertainty.iter())
        .map(|(a, u)| a * (1.0 - alpha * u))
        .collect();
    SyntheticTaskMetrics {
        task: task.name,
        accuracy,
        uncertainty,
        ucs,
    }
}

/// Stage of attention structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttentionPattern {
    Scattered,
    Transitional,
    Structured,
}

/// `size x size` attention weights for `pattern`, clipped to `[0, 1]`.
pub fn attention_matrix(rng: &mut StdRng, pattern: AttentionPattern, size: usize) -> Array2<f64> {
    let mut m = match pattern {
        AttentionPattern::Scattered => {
            let mut m = Array2::from_shape_fn((size, size), |_| rng.gen::<f64>() * 0.3);
            if size > 0 {
                for _ in 0..5 {
                    let i = rng.gen_range(0..size);
                    let j = rng.gen_range(0..size);
                    m[[i, j]] = rng.gen::<f64>() * 0.7 + 0.3;
                }
            }
            m
        }
        AttentionPattern::Transitional => {
            let mut m = Array2::from_shape_fn((size, size), |_| rng.gen::<f64>() * 0.2);
            for i in 0..size {
                for j in i.saturating_sub(2)..(i + 3).min(size) {
                    m[[i, j]] = rng.gen::<f64>() * 0.5 + 0.3;
                }
            }
            m
        }
        AttentionPattern::Structured => {
            let mut m = Array2::<f64>::zeros((size, size));
            for i in 0..size {
                m[[i, i]] = 0.8 + rng.gen::<f64>() * 0.2;
                if i + 1 < size {
                    m[[i, i + 1]] = 0.6 + rng.gen::<f64>() * 0.2;
                }
                if i > 0 {
                    m[[i, i - 1]] = 0.6 + rng.gen::<f64>() * 0.2;
                }
            }
            m.mapv_inplace(|v| v + rng.gen::<f64>() * 0.1);
            m
        }
    };
    m.mapv_inplace(|v| v.clamp(0.0, 1.0));
    m
}

/// Blend of a fresh scattered and a fresh structured matrix; `weight` 0 is
/// fully scattered, 1 fully structured.
pub fn attention_evolution_frame(rng: &mut StdRng, weight: f64, size: usize) -> Array2<f64> {
    let scattered = attention_matrix(rng, AttentionPattern::Scattered, size);
    let structured = attention_matrix(rng, AttentionPattern::Structured, size);
    scattered * (1.0 - weight) + structured * weight
}

/// Sharpness of the capability transition in parameter-norm space.
pub const MANIFOLD_TRANSITION_SCALE: f64 = 3.0;
/// Standard deviation of the capability noise.
pub const MANIFOLD_NOISE: f64 = 0.4;
/// Performance threshold tau.
pub const MANIFOLD_TAU: f64 = 0.7;
/// Confidence slack epsilon; the manifold is the `1 - epsilon` level set.
pub const MANIFOLD_EPSILON: f64 = 0.1;

/// Monte Carlo estimate of `P(capability >= tau)` on a cubic grid over
/// `[-5, 5]^3`. `prob` is indexed `[ix, iy, iz]` along `axis`.
#[derive(Debug, Clone)]
pub struct CapabilityGrid {
    pub axis: Vec<f64>,
    pub prob: Array3<f64>,
}

pub fn capability_probability_grid(
    rng: &mut StdRng,
    resolution: usize,
    samples: usize,
) -> CapabilityGrid {
    let axis = linspace(-5.0, 5.0, resolution);
    let samples = samples.max(1);
    let mut prob = Array3::<f64>::zeros((resolution, resolution, resolution));
    for ((ix, iy, iz), cell) in prob.indexed_iter_mut() {
        let norm = (axis[ix].powi(2) + axis[iy].powi(2) + axis[iz].powi(2)).sqrt();
        let base = logistic(MANIFOLD_TRANSITION_SCALE * (norm - 3.0));
        let hits = (0..samples)
            .filter(|_| base + jitter(rng, MANIFOLD_NOISE) >= MANIFOLD_TAU)
            .count();
        *cell = hits as f64 / samples as f64;
    }
    CapabilityGrid { axis, prob }
}

/// Central differences inside, one-sided differences on the faces.
fn axis_gradient(field: &Array3<f64>, axis: usize, idx: [usize; 3]) -> f64 {
    let n = field.shape()[axis];
    if n < 2 {
        return 0.0;
    }
    let at = |k: usize| {
        let mut p = idx;
        p[axis] = k;
        field[p]
    };
    let i = idx[axis];
    if i == 0 {
        at(1) - at(0)
    } else if i == n - 1 {
        at(n - 1) - at(n - 2)
    } else {
        (at(i + 1) - at(i - 1)) / 2.0
    }
}

/// Gradient magnitude of `field` in grid-index units.
pub fn gradient_magnitude(field: &Array3<f64>) -> Array3<f64> {
    Array3::from_shape_fn(field.dim(), |(i, j, k)| {
        let idx = [i, j, k];
        (0..3)
            .map(|a| axis_gradient(field, a, idx).powi(2))
            .sum::<f64>()
            .sqrt()
    })
}

/// Grid points whose gradient magnitude exceeds the 95th percentile.
pub fn critical_points(grid: &CapabilityGrid) -> Vec<[f64; 3]> {
    let grad = gradient_magnitude(&grid.prob);
    let values: Vec<f64> = grad.iter().copied().collect();
    let Some(cutoff) = percentile(&values, 95.0) else {
        return Vec::new();
    };
    grad.indexed_iter()
        .filter(|(_, g)| **g > cutoff)
        .map(|((i, j, k), _)| [grid.axis[i], grid.axis[j], grid.axis[k]])
        .collect()
}

/// Voxels at or above `level` with at least one face neighbour below it,
/// paired with their probability.
pub fn level_set_voxels(grid: &CapabilityGrid, level: f64) -> Vec<([f64; 3], f64)> {
    let prob = &grid.prob;
    let (nx, ny, nz) = prob.dim();
    let below = |i: isize, j: isize, k: isize| {
        if i < 0 || j < 0 || k < 0 || i >= nx as isize || j >= ny as isize || k >= nz as isize {
            return false;
        }
        prob[[i as usize, j as usize, k as usize]] < level
    };
    let mut out = Vec::new();
    for ((i, j, k), &p) in prob.indexed_iter() {
        if p < level {
            continue;
        }
        let (ii, jj, kk) = (i as isize, j as isize, k as isize);
        let on_boundary = below(ii - 1, jj, kk)
            || below(ii + 1, jj, kk)
            || below(ii, jj - 1, kk)
            || below(ii, jj + 1, kk)
            || below(ii, jj, kk - 1)
            || below(ii, jj, kk + 1);
        if on_boundary {
            out.push(([grid.axis[i], grid.axis[j], grid.axis[k]], p));
        }
    }
    out
}

/// Uniform performance in `[0.2, 0.9)` for `n` models.
pub fn uniform_performance(rng: &mut StdRng, n: usize) -> Vec<f64> {
    (0..n).map(|_| rng.gen_range(0.2..0.9)).collect()
}

/// `size / 8` plus `N(0, sigma)` noise per model.
pub fn size_scores(rng: &mut StdRng, sizes_b: &[f64], sigma: f64) -> Vec<f64> {
    sizes_b.iter().map(|s| s / 8.0 + jitter(rng, sigma)).collect()
}

/// Size-driven threshold effect per `(task, model)` with `N(0, 0.1)` task noise.
pub fn threshold_effects(rng: &mut StdRng, n_tasks: usize, sizes_b: &[f64]) -> Array2<f64> {
    let mut out = Array2::<f64>::zeros((n_tasks, sizes_b.len()));
    for mut row in out.rows_mut() {
        for (cell, s) in row.iter_mut().zip(sizes_b.iter()) {
            *cell = s / 8.0 + jitter(rng, 0.1);
        }
    }
    out
}

/// Point of the conformal prediction band example.
#[derive(Debug, Clone, Copy)]
pub struct ConformalPoint {
    pub x: f64,
    pub prediction: f64,
    pub lower: f64,
    pub upper: f64,
}

/// `0.5 sin(x) + 0.5` over `[0, 10]` with independent uniform widths up to 0.2 on each side.
pub fn conformal_band(rng: &mut StdRng, n: usize) -> Vec<ConformalPoint> {
    let xs = linspace(0.0, 10.0, n);
    let upper_widths: Vec<f64> = (0..n).map(|_| 0.2 * rng.gen::<f64>()).collect();
    let lower_widths: Vec<f64> = (0..n).map(|_| 0.2 * rng.gen::<f64>()).collect();
    xs.into_iter()
        .enumerate()
        .map(|(i, x)| {
            let prediction = 0.5 * x.sin() + 0.5;
            ConformalPoint {
                x,
                prediction,
                lower: prediction - lower_widths[i],
                upper: prediction + upper_widths[i],
            }
        })
        .collect()
}

/// Adds `N(0, sigma)` to each value.
pub fn add_noise(rng: &mut StdRng, values: &[f64], sigma: f64) -> Vec<f64> {
    match Normal::new(0.0, sigma) {
        Ok(normal) => values.iter().map(|v| v + normal.sample(rng)).collect(),
        Err(_) => values.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_input::builtin::{SYNTHETIC_SCALES_M, SYNTHETIC_TASKS};
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_calibration_samples_deterministic() {
        let a = calibration_samples(&mut rng(), (2.0, 5.0), 0.1, 200).unwrap();
        let b = calibration_samples(&mut rng(), (2.0, 5.0), 0.1, 200).unwrap();
        assert_eq!(a, b);
        assert!(a.0.iter().all(|c| (0.0..=1.0).contains(c)));
        assert!(a.1.iter().all(|&y| y == 0.0 || y == 1.0));
        assert!(calibration_samples(&mut rng(), (0.0, 1.0), 0.5, 10).is_none());
    }

    #[test]
    fn test_synthetic_task_metrics_clipped() {
        let mut r = rng();
        for task in SYNTHETIC_TASKS.iter() {
            let m = synthetic_task_metrics(&mut r, task, &SYNTHETIC_SCALES_M, 0.3);
            assert_eq!(m.accuracy.len(), SYNTHETIC_SCALES_M.len());
            for ((a, u), s) in m.accuracy.iter().zip(m.uncertainty.iter()).zip(m.ucs.iter()) {
                assert!((0.0..=1.0).contains(a));
                assert!((0.0..=1.0).contains(u));
                assert!(*s <= *a + 1e-12);
            }
        }
    }

    #[test]
    fn test_attention_patterns_in_range() {
        let mut r = rng();
        for pattern in [
            AttentionPattern::Scattered,
            AttentionPattern::Transitional,
            AttentionPattern::Structured,
        ] {
            let m = attention_matrix(&mut r, pattern, 16);
            assert_eq!(m.dim(), (16, 16));
            assert!(m.iter().all(|v| (0.0..=1.0).contains(v)));
        }
        let structured = attention_matrix(&mut r, AttentionPattern::Structured, 16);
        for i in 0..16 {
            assert!(structured[[i, i]] >= 0.8);
        }
    }

    #[test]
    fn test_gradient_of_linear_field() {
        let field = Array3::from_shape_fn((4, 4, 4), |(i, _, _)| 2.0 * i as f64);
        let g = gradient_magnitude(&field);
        assert!(g.iter().all(|v| (v - 2.0).abs() < 1e-12));
    }

    #[test]
    fn test_capability_grid_probabilities() {
        let grid = capability_probability_grid(&mut rng(), 12, 10);
        assert_eq!(grid.prob.dim(), (12, 12, 12));
        assert!(grid.prob.iter().all(|p| (0.0..=1.0).contains(p)));

        // Far from the origin capability is high, near it low.
        let (mut outer, mut n_outer, mut inner, mut n_inner) = (0.0, 0, 0.0, 0);
        for ((i, j, k), &p) in grid.prob.indexed_iter() {
            let r = (grid.axis[i].powi(2) + grid.axis[j].powi(2) + grid.axis[k].powi(2)).sqrt();
            if r > 6.0 {
                outer += p;
                n_outer += 1;
            } else if r < 1.5 {
                inner += p;
                n_inner += 1;
            }
        }
        assert!(outer / n_outer as f64 > inner / n_inner as f64);

        let voxels = level_set_voxels(&grid, 1.0 - MANIFOLD_EPSILON);
        assert!(voxels.iter().all(|(_, p)| *p >= 0.9));
    }

    #[test]
    fn test_critical_points_surround_a_spike() {
        let axis = linspace(-5.0, 5.0, 10);
        let mut prob = Array3::<f64>::zeros((10, 10, 10));
        prob[[5, 5, 5]] = 1.0;
        let grid = CapabilityGrid { axis, prob };
        // Only the six face neighbours of the spike have a non-zero gradient.
        assert_eq!(critical_points(&grid).len(), 6);
    }

    #[test]
    fn test_conformal_band_brackets_prediction() {
        let band = conformal_band(&mut rng(), 100);
        assert_eq!(band.len(), 100);
        assert!(band.iter().all(|p| p.lower <= p.prediction && p.prediction <= p.upper));
    }
}

// src/data_analysis/synthetic.rs
