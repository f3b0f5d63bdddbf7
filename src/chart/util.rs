//! Small numeric helpers shared by the chart constructors: axis ranges,
//! locale-aware tick formatting, histogram binning, and box statistics.

use num_format::{Locale, ToFormattedString};

/// Widen a degenerate extent so plotters always gets a non-empty range.
pub fn pad_range(min: f64, max: f64) -> (f64, f64) {
    if (max - min).abs() < f64::EPSILON {
        (min - 1.0, max + 1.0)
    } else {
        (min, max)
    }
}

/// Extent of a value slice. `None` when empty or all-NaN.
pub fn value_extent(values: &[f64]) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values.iter().copied().filter(|v| v.is_finite()) {
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() { Some((min, max)) } else { None }
}

/// Map a user-provided locale tag to a `num_format::Locale`.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`,
/// `german`, `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> &'static Locale {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => &Locale::de,
        "fr" | "fr_fr" => &Locale::fr,
        "es" | "es_es" => &Locale::es,
        "it" | "it_it" => &Locale::it,
        "pt" | "pt_pt" | "pt_br" => &Locale::pt,
        "nl" | "nl_nl" => &Locale::nl,
        _ => &Locale::en,
    }
}

/// Format a value-axis tick label: thousands separators for large
/// magnitudes, magnitude-dependent precision below that.
pub fn fmt_axis_value(v: f64, locale: &Locale) -> String {
    let a = v.abs();
    if a >= 1000.0 {
        (v.round() as i64).to_formatted_string(locale)
    } else if a >= 100.0 {
        format!("{v:.0}")
    } else if a >= 10.0 {
        format!("{v:.1}")
    } else {
        format!("{v:.2}")
    }
}

/// Equal-width histogram bins over `[min, max]`: returns (edges, counts)
/// with `bins + 1` edges. Values on the upper edge land in the last bin.
pub fn histogram_bins(values: &[f64], bins: usize, min: f64, max: f64) -> (Vec<f64>, Vec<usize>) {
    let bins = bins.max(1);
    let width = (max - min) / bins as f64;
    let edges: Vec<f64> = (0..=bins).map(|i| min + width * i as f64).collect();
    let mut counts = vec![0usize; bins];
    for v in values.iter().copied().filter(|v| v.is_finite()) {
        if v < min || v > max {
            continue;
        }
        let idx = (((v - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    (edges, counts)
}

/// Five-number summary plus outliers for one box.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Most extreme data points within 1.5 IQR of the box.
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

/// Compute box statistics. Returns `None` on empty (or all-NaN) input.
///
/// Quartiles use linear interpolation between order statistics; whiskers
/// extend to the most extreme values within `q1 - 1.5*IQR` and
/// `q3 + 1.5*IQR`, everything beyond is an outlier.
pub fn box_stats(values: &[f64]) -> Option<BoxStats> {
    let mut vals: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if vals.is_empty() {
        return None;
    }
    vals.sort_by(|a, b| a.partial_cmp(b).unwrap());

    let q1 = quantile(&vals, 0.25);
    let median = quantile(&vals, 0.5);
    let q3 = quantile(&vals, 0.75);
    let iqr = q3 - q1;
    let low_fence = q1 - 1.5 * iqr;
    let high_fence = q3 + 1.5 * iqr;

    let whisker_low = vals
        .iter()
        .copied()
        .find(|v| *v >= low_fence)
        .unwrap_or(q1);
    let whisker_high = vals
        .iter()
        .rev()
        .copied()
        .find(|v| *v <= high_fence)
        .unwrap_or(q3);
    let outliers = vals
        .iter()
        .copied()
        .filter(|v| *v < low_fence || *v > high_fence)
        .collect();

    Some(BoxStats {
        q1,
        median,
        q3,
        whisker_low,
        whisker_high,
        outliers,
    })
}

/// Linear-interpolation quantile of a sorted, non-empty slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = q * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_range_widens_degenerate_extents() {
        assert_eq!(pad_range(5.0, 5.0), (4.0, 6.0));
        assert_eq!(pad_range(1.0, 2.0), (1.0, 2.0));
    }

    #[test]
    fn extent_skips_non_finite() {
        let (min, max) = value_extent(&[1.0, f64::NAN, 3.0]).unwrap();
        assert_eq!((min, max), (1.0, 3.0));
        assert!(value_extent(&[]).is_none());
    }

    #[test]
    fn axis_labels_use_locale_separators() {
        assert_eq!(fmt_axis_value(30000.0, map_locale("en")), "30,000");
        assert_eq!(fmt_axis_value(30000.0, map_locale("de")), "30.000");
        assert_eq!(fmt_axis_value(3.14159, map_locale("en")), "3.14");
        assert_eq!(fmt_axis_value(42.5, map_locale("en")), "42.5");
    }

    #[test]
    fn bins_cover_range_and_count_all_values() {
        let values = [0.0, 0.5, 1.0, 1.5, 2.0];
        let (edges, counts) = histogram_bins(&values, 2, 0.0, 2.0);
        assert_eq!(edges, vec![0.0, 1.0, 2.0]);
        // Upper edge belongs to the last bin.
        assert_eq!(counts, vec![2, 3]);
        assert_eq!(counts.iter().sum::<usize>(), values.len());
    }

    #[test]
    fn box_stats_median_and_quartiles() {
        let stats = box_stats(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(stats.median, 3.0);
        assert_eq!(stats.q1, 2.0);
        assert_eq!(stats.q3, 4.0);
        assert!(stats.outliers.is_empty());
    }

    #[test]
    fn box_stats_flags_outliers() {
        let mut vals: Vec<f64> = (0..20).map(|i| i as f64).collect();
        vals.push(1000.0);
        let stats = box_stats(&vals).unwrap();
        assert_eq!(stats.outliers, vec![1000.0]);
        assert!(stats.whisker_high <= 19.0);
    }

    #[test]
    fn box_stats_empty_is_none() {
        assert!(box_stats(&[]).is_none());
        assert!(box_stats(&[f64::NAN]).is_none());
    }
}
