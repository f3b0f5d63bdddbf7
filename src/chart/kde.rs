//! Gaussian kernel density estimation for the histogram overlay.

/// Evaluate a Gaussian KDE of `values` at `points` evenly spaced positions
/// across the data extent. Bandwidth follows Scott's rule,
/// `h = sigma * n^(-1/5)`.
///
/// Returns `(x, density)` pairs; empty when fewer than two finite values are
/// present (a density of a single point is not meaningful).
pub fn gaussian_kde(values: &[f64], points: usize) -> Vec<(f64, f64)> {
    let data: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let n = data.len();
    if n < 2 || points == 0 {
        return Vec::new();
    }

    let mean = data.iter().sum::<f64>() / n as f64;
    let var = data.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let sigma = var.sqrt();
    // Constant data: fall back to a narrow kernel instead of dividing by zero.
    let h = if sigma > 0.0 {
        sigma * (n as f64).powf(-0.2)
    } else {
        1e-3
    };

    let min = data.iter().copied().fold(f64::INFINITY, f64::min);
    let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = (max - min).max(f64::EPSILON);

    let norm = 1.0 / (n as f64 * h * (2.0 * std::f64::consts::PI).sqrt());
    (0..points)
        .map(|i| {
            let x = min + span * i as f64 / (points - 1).max(1) as f64;
            let d = data
                .iter()
                .map(|v| {
                    let z = (x - v) / h;
                    (-0.5 * z * z).exp()
                })
                .sum::<f64>()
                * norm;
            (x, d)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn density_integrates_to_roughly_one() {
        // Two clusters, mirroring a bimodal score distribution.
        let mut data = Vec::new();
        for i in 0..50 {
            data.push(60.0 + (i % 9) as f64 - 4.0);
            data.push(120.0 + (i % 11) as f64 - 5.0);
        }
        let curve = gaussian_kde(&data, 200);
        assert_eq!(curve.len(), 200);
        let dx = curve[1].0 - curve[0].0;
        let integral: f64 = curve.iter().map(|(_, d)| d * dx).sum();
        // The grid only spans the data extent, so a little mass is cut off.
        assert!(integral > 0.8 && integral < 1.1, "integral = {integral}");
    }

    #[test]
    fn density_peaks_near_the_mode() {
        let data: Vec<f64> = (0..100).map(|i| 10.0 + ((i * 7) % 13) as f64 * 0.1).collect();
        let curve = gaussian_kde(&data, 101);
        let (peak_x, _) = curve
            .iter()
            .copied()
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap())
            .unwrap();
        assert!((10.0..11.3).contains(&peak_x));
    }

    #[test]
    fn degenerate_inputs_yield_empty_curves() {
        assert!(gaussian_kde(&[], 100).is_empty());
        assert!(gaussian_kde(&[1.0], 100).is_empty());
        assert!(gaussian_kde(&[f64::NAN, f64::NAN], 100).is_empty());
    }

    #[test]
    fn constant_data_does_not_divide_by_zero() {
        let curve = gaussian_kde(&[5.0; 10], 50);
        assert_eq!(curve.len(), 50);
        assert!(curve.iter().all(|(_, d)| d.is_finite()));
    }
}
