//! Small numeric helpers behind the aggregate tables.

use serde::Serialize;

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator).
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

/// Quantile of pre-sorted data with linear interpolation between closest
/// ranks. `q` is in `[0, 1]`.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Pearson correlation. `None` when undefined: fewer than two pairs, or
/// either side has zero variance.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);
    let mx = mean(xs)?;
    let my = mean(ys)?;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mx;
        let dy = y - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    Some((sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0))
}

// ---------------------------------------------------------------------------
// Histogram + density
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width bins spanning `[min, max]` of the data. The last bin is
/// closed on the right. A single distinct value widens to `[v - 0.5, v + 0.5]`.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let edges: Vec<f64> = (0..=bins)
        .map(|i| if i == bins { hi } else { lo + (hi - lo) * i as f64 / bins as f64 })
        .collect();
    let width = (hi - lo) / bins as f64;

    // The estimated index can be off by one at an edge; settle it against
    // the edges themselves so each bin counts exactly `[lower, upper)`.
    let mut counts = vec![0usize; bins];
    for &v in values {
        let mut idx = (((v - lo) / width) as usize).min(bins - 1);
        if v < edges[idx] {
            idx = idx.saturating_sub(1);
        } else if idx + 1 < bins && v >= edges[idx + 1] {
            idx += 1;
        }
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: edges[i],
            upper: edges[i + 1],
            count,
        })
        .collect()
}

/// Gaussian kernel density estimate using Scott's rule for the bandwidth,
/// evaluated at `points` evenly spaced positions over `[lo, hi]`. Empty when
/// the bandwidth is undefined (fewer than two samples or zero spread).
pub fn gaussian_kde(values: &[f64], lo: f64, hi: f64, points: usize) -> Vec<(f64, f64)> {
    let Some(std) = sample_std(values) else {
        return Vec::new();
    };
    if std == 0.0 || points == 0 {
        return Vec::new();
    }
    let n = values.len() as f64;
    let bw = std * n.powf(-0.2);
    let norm = 1.0 / (n * bw * (2.0 * std::f64::consts::PI).sqrt());
    let step = if points > 1 { (hi - lo) / (points - 1) as f64 } else { 0.0 };

    (0..points)
        .map(|i| {
            let x = lo + step * i as f64;
            let density: f64 = values
                .iter()
                .map(|v| {
                    let z = (x - v) / bw;
                    (-0.5 * z * z).exp()
                })
                .sum();
            (x, density * norm)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Box-plot summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxStats {
    pub count: usize,
    pub whisker_low: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

/// Five-number summary with Tukey whiskers: each whisker reaches the most
/// extreme sample within 1.5 IQR of its quartile; anything beyond is an
/// outlier.
pub fn box_stats(values: &[f64]) -> Option<BoxStats> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let q1 = quantile_sorted(&sorted, 0.25)?;
    let median = quantile_sorted(&sorted, 0.5)?;
    let q3 = quantile_sorted(&sorted, 0.75)?;
    let iqr = q3 - q1;
    let low_fence = q1 - 1.5 * iqr;
    let high_fence = q3 + 1.5 * iqr;

    let whisker_low = sorted
        .iter()
        .copied()
        .find(|v| *v >= low_fence)
        .unwrap_or(q1);
    let whisker_high = sorted
        .iter()
        .rev()
        .copied()
        .find(|v| *v <= high_fence)
        .unwrap_or(q3);
    let outliers = sorted
        .iter()
        .copied()
        .filter(|v| *v < whisker_low || *v > whisker_high)
        .collect();

    Some(BoxStats {
        count: sorted.len(),
        whisker_low,
        q1,
        median,
        q3,
        whisker_high,
        outliers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_quantile_interpolates() {
        let data = [1.0, 2.0, 3.0, 4.0];
        assert!(approx(quantile_sorted(&data, 0.5).unwrap(), 2.5));
        assert!(approx(quantile_sorted(&data, 0.25).unwrap(), 1.75));
        assert!(approx(quantile_sorted(&data, 1.0).unwrap(), 4.0));
        assert_eq!(quantile_sorted(&[], 0.5), None);
    }

    #[test]
    fn test_pearson_perfect_and_undefined() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [2.0, 4.0, 6.0, 8.0];
        let neg = [8.0, 6.0, 4.0, 2.0];
        assert!(approx(pearson(&xs, &ys).unwrap(), 1.0));
        assert!(approx(pearson(&xs, &neg).unwrap(), -1.0));
        assert_eq!(pearson(&xs, &[5.0, 5.0, 5.0, 5.0]), None);
        assert_eq!(pearson(&[1.0], &[2.0]), None);
    }

    #[test]
    fn test_histogram_counts_every_value() {
        let values: Vec<f64> = (0..=100).map(|i| 4.0 + i as f64 * 0.06).collect();
        let bins = histogram(&values, 10);
        assert_eq!(bins.len(), 10);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
        assert!(approx(bins[0].lower, 4.0));
        assert!(approx(bins[9].upper, 10.0));
        // Max lands in the last bin, not past it.
        assert!(bins[9].count > 0);
    }

    #[test]
    fn test_histogram_values_on_edges_land_in_upper_bin() {
        let ratings = [4.0, 4.6, 5.2, 5.8, 6.4, 7.0, 7.6, 8.2, 8.8, 9.4, 10.0];
        let bins = histogram(&ratings, 10);
        let counts: Vec<usize> = bins.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 1, 1, 1, 1, 1, 1, 1, 1, 2]);

        for (i, b) in bins.iter().enumerate() {
            let inside = ratings
                .iter()
                .filter(|&&v| v >= b.lower && (v < b.upper || (i == 9 && v <= b.upper)))
                .count();
            assert_eq!(b.count, inside, "bin {i}");
        }
    }

    #[test]
    fn test_histogram_single_value_widens() {
        let bins = histogram(&[7.0, 7.0, 7.0], 10);
        assert!(approx(bins[0].lower, 6.5));
        assert!(approx(bins[9].upper, 7.5));
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 3);
        assert!(histogram(&[], 10).is_empty());
    }

    #[test]
    fn test_kde_integrates_to_about_one() {
        let values = [4.0, 5.0, 5.5, 6.0, 6.5, 7.0, 9.0];
        let curve = gaussian_kde(&values, -5.0, 20.0, 500);
        let step = curve[1].0 - curve[0].0;
        let area: f64 = curve.iter().map(|(_, y)| y * step).sum();
        assert!((area - 1.0).abs() < 0.01, "area was {area}");
        assert!(gaussian_kde(&[3.0], 0.0, 10.0, 50).is_empty());
        assert!(gaussian_kde(&[3.0, 3.0], 0.0, 10.0, 50).is_empty());
    }

    #[test]
    fn test_box_stats_flags_outliers() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 100.0];
        let b = box_stats(&values).unwrap();
        assert!(approx(b.q1, 2.25));
        assert!(approx(b.median, 3.5));
        assert!(approx(b.q3, 4.75));
        assert_eq!(b.whisker_low, 1.0);
        assert_eq!(b.whisker_high, 5.0);
        assert_eq!(b.outliers, vec![100.0]);
        assert_eq!(b.count, 6);
        assert!(box_stats(&[]).is_none());
    }
}
