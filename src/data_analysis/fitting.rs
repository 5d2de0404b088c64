// src/data_analysis/fitting.rs

/// Polynomial with coefficients in ascending order: `c0 + c1 x + c2 x^2 ...`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    pub coeffs: Vec<f64>,
}

impl Polynomial {
    pub fn eval(&self, x: f64) -> f64 {
        self.coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
    }
}

/// Least-squares quadratic fit via the 3x3 normal equations.
/// Returns `None` for fewer than three points or a singular system.
pub fn polyfit_quadratic(xs: &[f64], ys: &[f64]) -> Option<Polynomial> {
    if xs.len() != ys.len() || xs.len() < 3 {
        return None;
    }
    // Power sums S_k = sum x^k for k = 0..4 and T_k = sum y x^k for k = 0..2.
    let mut s = [0.0f64; 5];
    let mut t = [0.0f64; 3];
    for (&x, &y) in xs.iter().zip(ys.iter()) {
        let mut p = 1.0;
        for (k, sk) in s.iter_mut().enumerate() {
            *sk += p;
            if k < 3 {
                t[k] += y * p;
            }
            p *= x;
        }
    }

    let mut m = [
        [s[0], s[1], s[2], t[0]],
        [s[1], s[2], s[3], t[1]],
        [s[2], s[3], s[4], t[2]],
    ];

    // Gaussian elimination with partial pivoting.
    for col in 0..3 {
        let pivot = (col..3).max_by(|&a, &b| m[a][col].abs().total_cmp(&m[b][col].abs()))?;
        if m[pivot][col].abs() < 1e-12 {
            return None;
        }
        m.swap(col, pivot);
        for row in (col + 1)..3 {
            let factor = m[row][col] / m[col][col];
            for k in col..4 {
                m[row][k] -= factor * m[col][k];
            }
        }
    }
    let mut coeffs = [0.0f64; 3];
    for row in (0..3).rev() {
        let tail: f64 = ((row + 1)..3).map(|k| m[row][k] * coeffs[k]).sum();
        coeffs[row] = (m[row][3] - tail) / m[row][row];
    }
    Some(Polynomial {
        coeffs: coeffs.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_exact_quadratic_recovered() {
        let xs: Vec<f64> = (0..9).map(|i| i as f64).collect();
        let ys: Vec<f64> = xs.iter().map(|x| 0.1 + 0.05 * x - 0.002 * x * x).collect();
        let p = polyfit_quadratic(&xs, &ys).unwrap();
        assert_abs_diff_eq!(p.coeffs[0], 0.1, epsilon = 1e-9);
        assert_abs_diff_eq!(p.coeffs[1], 0.05, epsilon = 1e-9);
        assert_abs_diff_eq!(p.coeffs[2], -0.002, epsilon = 1e-9);
        assert_abs_diff_eq!(p.eval(4.0), 0.1 + 0.2 - 0.032, epsilon = 1e-9);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(polyfit_quadratic(&[1.0, 2.0], &[1.0, 2.0]).is_none());
        assert!(polyfit_quadratic(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).is_none());
        assert!(polyfit_quadratic(&[1.0, 2.0, 3.0], &[1.0, 2.0]).is_none());
    }

    #[test]
    fn test_eval_ascending_coefficients() {
        let p = Polynomial { coeffs: vec![1.0, 2.0, 3.0] };
        assert_eq!(p.eval(2.0), 17.0);
    }
}

// src/data_analysis/fitting.rs
