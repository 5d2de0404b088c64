// src/data_analysis/distribution.rs

use ndarray::Array1;
use ndarray_stats::interpolate::Linear;
use ndarray_stats::Quantile1dExt;
use noisy_float::types::{n64, N64};

use std::f64::consts::PI;

// Lanczos approximation, g = 7, n = 9.
const LANCZOS_G: f64 = 7.0;
const LANCZOS_COEFFS: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

/// Natural log of the gamma function for `x > 0`.
pub fn ln_gamma(x: f64) -> f64 {
    if x < 0.5 {
        // Reflection formula.
        return (PI / (PI * x).sin()).ln() - ln_gamma(1.0 - x);
    }
    let x = x - 1.0;
    let mut a = LANCZOS_COEFFS[0];
    let t = x + LANCZOS_G + 0.5;
    for (i, &c) in LANCZOS_COEFFS.iter().enumerate().skip(1) {
        a += c / (x + i as f64);
    }
    0.5 * (2.0 * PI).ln() + (x + 0.5) * t.ln() - t + a.ln()
}

/// Density of Beta(a, b) at `x`; zero outside `[0, 1]`.
pub fn beta_pdf(x: f64, a: f64, b: f64) -> f64 {
    if !(0.0..=1.0).contains(&x) || a <= 0.0 || b <= 0.0 {
        return 0.0;
    }
    if (x == 0.0 && a > 1.0) || (x == 1.0 && b > 1.0) {
        return 0.0;
    }
    let ln_beta = ln_gamma(a) + ln_gamma(b) - ln_gamma(a + b);
    ((a - 1.0) * x.ln() + (b - 1.0) * (1.0 - x).ln() - ln_beta).exp()
}

/// Beta shape parameters `(10 * mu, 10 * (1 - mu))` centred on `mu`.
pub fn beta_shape_for_mean(mu: f64) -> (f64, f64) {
    (mu * 10.0, (1.0 - mu) * 10.0)
}

/// Gaussian kernel density estimate evaluated on `n_points` evenly spaced
/// over `[min, max]` of the data. Bandwidth follows Silverman's rule.
pub fn gaussian_kde(data: &[f64], n_points: usize) -> Vec<(f64, f64)> {
    if data.is_empty() || n_points < 2 {
        return Vec::new();
    }
    let n = data.len() as f64;
    let mean = data.iter().sum::<f64>() / n;
    let variance = data.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();
    let bandwidth = (1.06 * std_dev * n.powf(-0.2)).max(0.05);

    let lo = data.iter().cloned().fold(f64::INFINITY, f64::min);
    let hi = data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let step = (hi - lo) / (n_points - 1) as f64;
    let norm = 1.0 / ((2.0 * PI).sqrt() * bandwidth * n);

    (0..n_points)
        .map(|i| {
            let x = lo + step * i as f64;
            let density: f64 = data
                .iter()
                .map(|&xi| {
                    let u = (x - xi) / bandwidth;
                    (-0.5 * u * u).exp()
                })
                .sum();
            (x, density * norm)
        })
        .collect()
}

/// Percentile with linear interpolation between order statistics; non-finite
/// values are ignored.
pub fn percentile(values: &[f64], pct: f64) -> Option<f64> {
    let mut finite: Array1<N64> = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .map(n64)
        .collect();
    let q = n64((pct / 100.0).clamp(0.0, 1.0));
    finite.quantile_mut(q, &Linear).ok().map(|v| v.raw())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ln_gamma_factorials() {
        assert_relative_eq!(ln_gamma(1.0), 0.0, epsilon = 1e-10);
        assert_relative_eq!(ln_gamma(5.0), 24.0f64.ln(), epsilon = 1e-10);
        assert_relative_eq!(ln_gamma(0.5), PI.sqrt().ln(), epsilon = 1e-10);
    }

    #[test]
    fn test_beta_pdf_uniform_and_symmetric() {
        assert_relative_eq!(beta_pdf(0.3, 1.0, 1.0), 1.0, epsilon = 1e-10);
        assert_relative_eq!(beta_pdf(0.2, 5.0, 5.0), beta_pdf(0.8, 5.0, 5.0), epsilon = 1e-10);
        // Beta(2, 2) = 6 x (1 - x)
        assert_relative_eq!(beta_pdf(0.5, 2.0, 2.0), 1.5, epsilon = 1e-10);
        assert_eq!(beta_pdf(1.5, 2.0, 2.0), 0.0);
    }

    #[test]
    fn test_beta_pdf_integrates_to_one() {
        let (a, b) = beta_shape_for_mean(0.7);
        let n = 10_000;
        let integral: f64 = (0..n)
            .map(|i| beta_pdf((i as f64 + 0.5) / n as f64, a, b) / n as f64)
            .sum();
        assert_relative_eq!(integral, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_kde_peaks_near_mode() {
        let data = [1.0, 1.0, 1.0, 1.0, 2.0, 3.0];
        let kde = gaussian_kde(&data, 21);
        assert_eq!(kde.len(), 21);
        let (peak_x, _) = kde
            .iter()
            .cloned()
            .fold((0.0, f64::NEG_INFINITY), |acc, p| if p.1 > acc.1 { p } else { acc });
        assert!(peak_x < 1.5, "peak at {peak_x}");
        assert!(gaussian_kde(&[], 10).is_empty());
    }

    #[test]
    fn test_percentile() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(percentile(&values, 50.0), Some(3.0));
        assert_eq!(percentile(&values, 100.0), Some(5.0));
        assert_relative_eq!(percentile(&values, 95.0).unwrap(), 4.8, epsilon = 1e-12);
        assert_eq!(percentile(&[], 50.0), None);
        assert_eq!(percentile(&[f64::NAN, 2.0, f64::INFINITY], 50.0), Some(2.0));
    }
}

// src/data_analysis/distribution.rs
