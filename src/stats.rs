//! Pearson correlation utilities
//!
//! Correlations across dataset columns use pairwise-complete observations:
//! each pair of columns is correlated over the genes where both have a
//! value, mirroring how spreadsheet-level analyses treat missing entries.

use ndarray::Array2;
use rayon::prelude::*;
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Pearson correlation coefficient of two equal-length samples.
/// Returns NaN for fewer than 2 observations or zero variance.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    assert_eq!(x.len(), y.len());
    let n = x.len();
    if n < 2 {
        return f64::NAN;
    }

    let mean_x = x.iter().sum::<f64>() / n as f64;
    let mean_y = y.iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for i in 0..n {
        let dx = x[i] - mean_x;
        let dy = y[i] - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    cov / (var_x * var_y).sqrt()
}

/// Two-sided p-value for a Pearson r under the null of no correlation.
/// R equivalent: cor.test()$p.value — t = r * sqrt((n-2)/(1-r^2)) with
/// n-2 degrees of freedom.
pub fn pearson_pvalue(r: f64, n: usize) -> f64 {
    if !r.is_finite() || n < 3 {
        return f64::NAN;
    }
    if (1.0 - r * r) <= 0.0 {
        // |r| == 1: the t statistic diverges
        return 0.0;
    }

    let df = (n - 2) as f64;
    let t = r * (df / (1.0 - r * r)).sqrt();
    let t_dist = StudentsT::new(0.0, 1.0, df).unwrap();
    2.0 * t_dist.cdf(-t.abs())
}

/// Pairwise-complete Pearson correlation matrix over optional-valued
/// columns. Diagonal entries are 1.0; pairs with fewer than 2 complete
/// observations yield NaN.
pub fn correlation_matrix(columns: &[Vec<Option<f64>>]) -> Array2<f64> {
    let k = columns.len();

    let pairs: Vec<(usize, usize)> = (0..k)
        .flat_map(|i| ((i + 1)..k).map(move |j| (i, j)))
        .collect();

    let correlations: Vec<((usize, usize), f64)> = pairs
        .par_iter()
        .map(|&(i, j)| {
            let (x, y): (Vec<f64>, Vec<f64>) = columns[i]
                .iter()
                .zip(&columns[j])
                .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
                .unzip();
            ((i, j), pearson(&x, &y))
        })
        .collect();

    let mut matrix = Array2::from_elem((k, k), f64::NAN);
    for i in 0..k {
        matrix[[i, i]] = 1.0;
    }
    for ((i, j), r) in correlations {
        matrix[[i, j]] = r;
        matrix[[j, i]] = r;
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pearson_perfect_linear() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [2.0, 4.0, 6.0, 8.0];
        assert!((pearson(&x, &y) - 1.0).abs() < 1e-12);

        let neg: Vec<f64> = y.iter().map(|v| -v).collect();
        assert!((pearson(&x, &neg) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_degenerate() {
        assert!(pearson(&[1.0], &[2.0]).is_nan());
        // Zero variance
        assert!(pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).is_nan());
    }

    #[test]
    fn test_pearson_pvalue_bounds() {
        // Strong correlation on a decent sample: small p
        let p = pearson_pvalue(0.95, 20);
        assert!(p > 0.0 && p < 1e-6);
        // No correlation: p = 1
        let p0 = pearson_pvalue(0.0, 20);
        assert!((p0 - 1.0).abs() < 1e-10);
        // Perfect correlation
        assert_eq!(pearson_pvalue(1.0, 10), 0.0);
    }

    #[test]
    fn test_correlation_matrix_symmetric_unit_diagonal() {
        let columns = vec![
            vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)],
            vec![Some(2.0), Some(4.1), Some(5.9), Some(8.0)],
            vec![Some(-1.0), Some(-2.0), None, Some(-4.0)],
        ];
        let m = correlation_matrix(&columns);

        for i in 0..3 {
            assert_eq!(m[[i, i]], 1.0);
            for j in 0..3 {
                let a = m[[i, j]];
                let b = m[[j, i]];
                assert!(a == b || (a.is_nan() && b.is_nan()));
            }
        }
        // Columns 0 and 2 correlate over 3 complete observations, perfectly negative
        assert!((m[[0, 2]] + 1.0).abs() < 1e-12);
        assert!(m[[0, 1]] > 0.99);
    }

    #[test]
    fn test_correlation_matrix_insufficient_overlap() {
        let columns = vec![
            vec![Some(1.0), None, Some(3.0)],
            vec![None, Some(2.0), None],
        ];
        let m = correlation_matrix(&columns);
        assert!(m[[0, 1]].is_nan());
        assert_eq!(m[[0, 0]], 1.0);
    }
}
