//! Statistics Calculator Module
//! Descriptive statistics behind the dashboard charts: percentiles, box
//! summaries, histogram binning and kernel density estimates.

use statrs::distribution::{Continuous, Normal};
use statrs::statistics::Statistics;

/// Whisker reach in multiples of the inter-quartile range.
pub const WHISKER_IQR: f64 = 1.5;

/// Five-number summary for one boxplot box (fliers excluded).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSummary {
    pub count: usize,
    pub whisker_low: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_high: f64,
}

/// One histogram bar, `[start, end)` except the last bin which is closed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Handles statistical calculations over plain value slices.
pub struct StatsCalculator;

impl StatsCalculator {
    fn sorted(values: &[f64]) -> Vec<f64> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        sorted
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Median of the non-NaN values, `None` when there are none.
    pub fn median(values: &[f64]) -> Option<f64> {
        let sorted = Self::sorted(values);
        if sorted.is_empty() {
            None
        } else {
            Some(Self::percentile(&sorted, 50.0))
        }
    }

    /// Box summary with whiskers at the most extreme points inside 1.5 IQR.
    pub fn box_summary(values: &[f64]) -> Option<BoxSummary> {
        let sorted = Self::sorted(values);
        if sorted.is_empty() {
            return None;
        }

        let q1 = Self::percentile(&sorted, 25.0);
        let median = Self::percentile(&sorted, 50.0);
        let q3 = Self::percentile(&sorted, 75.0);
        let iqr = q3 - q1;

        let whisker_low = sorted
            .iter()
            .copied()
            .find(|&v| v >= q1 - WHISKER_IQR * iqr)
            .unwrap_or(q1);
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= q3 + WHISKER_IQR * iqr)
            .unwrap_or(q3);

        Some(BoxSummary {
            count: sorted.len(),
            whisker_low,
            q1,
            median,
            q3,
            whisker_high,
        })
    }

    /// Equal-width histogram over the data range (NumPy bin edges).
    pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
        let sorted = Self::sorted(values);
        if sorted.is_empty() || bins == 0 {
            return Vec::new();
        }

        let (mut lo, mut hi) = (sorted[0], sorted[sorted.len() - 1]);
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }
        let width = (hi - lo) / bins as f64;

        let mut counts = vec![0usize; bins];
        for v in &sorted {
            let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                start: lo + i as f64 * width,
                end: if i + 1 == bins {
                    hi
                } else {
                    lo + (i + 1) as f64 * width
                },
                count,
            })
            .collect()
    }

    /// Scott's rule bandwidth for a Gaussian kernel.
    pub fn scott_bandwidth(values: &[f64]) -> Option<f64> {
        if values.len() < 2 {
            return None;
        }
        let std = values.iter().std_dev();
        let bw = std * (values.len() as f64).powf(-0.2);
        (bw.is_finite() && bw > 0.0).then_some(bw)
    }

    /// Gaussian kernel density estimate sampled at `points` positions over
    /// the data range, scaled by `scale` (use `n * bin_width` to overlay a
    /// count histogram).
    pub fn gaussian_kde(values: &[f64], points: usize, scale: f64) -> Vec<[f64; 2]> {
        let sorted = Self::sorted(values);
        let Some(bw) = Self::scott_bandwidth(&sorted) else {
            return Vec::new();
        };
        if points < 2 {
            return Vec::new();
        }

        let kernels: Vec<Normal> = sorted
            .iter()
            .filter_map(|&v| Normal::new(v, bw).ok())
            .collect();
        if kernels.is_empty() {
            return Vec::new();
        }

        let (lo, hi) = (sorted[0], sorted[sorted.len() - 1]);
        let step = (hi - lo) / (points - 1) as f64;
        let n = kernels.len() as f64;

        (0..points)
            .map(|i| {
                let x = lo + i as f64 * step;
                let density = kernels.iter().map(|k| k.pdf(x)).sum::<f64>() / n;
                [x, density * scale]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentile_matches_numpy_linear() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(StatsCalculator::percentile(&sorted, 50.0), 2.5);
        assert_eq!(StatsCalculator::percentile(&sorted, 25.0), 1.75);
        assert_eq!(StatsCalculator::percentile(&sorted, 100.0), 4.0);
    }

    #[test]
    fn median_ignores_nan_and_handles_empty() {
        assert_eq!(StatsCalculator::median(&[3.0, f64::NAN, 1.0, 2.0]), Some(2.0));
        assert_eq!(StatsCalculator::median(&[]), None);
        assert_eq!(StatsCalculator::median(&[f64::NAN]), None);
    }

    #[test]
    fn box_summary_suppresses_fliers() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 100.0];
        let summary = StatsCalculator::box_summary(&values).unwrap();
        assert_eq!(summary.count, 6);
        assert_eq!(summary.median, 3.5);
        assert_eq!(summary.whisker_low, 1.0);
        assert_eq!(summary.whisker_high, 5.0);
        assert!(summary.q1 <= summary.median && summary.median <= summary.q3);
    }

    #[test]
    fn histogram_counts_every_value_once() {
        let values: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let bins = StatsCalculator::histogram(&values, 30);
        assert_eq!(bins.len(), 30);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 100);
        assert_eq!(bins[0].start, 0.0);
        assert_eq!(bins[29].end, 99.0);
    }

    #[test]
    fn histogram_of_constant_values_is_centered() {
        let bins = StatsCalculator::histogram(&[2.0, 2.0, 2.0], 30);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 3);
        assert_eq!(bins[0].start, 1.5);
    }

    #[test]
    fn kde_needs_spread() {
        assert!(StatsCalculator::gaussian_kde(&[1.0], 50, 1.0).is_empty());
        assert!(StatsCalculator::gaussian_kde(&[1.0, 1.0, 1.0], 50, 1.0).is_empty());

        let curve = StatsCalculator::gaussian_kde(&[1.0, 2.0, 3.0, 4.0], 50, 1.0);
        assert_eq!(curve.len(), 50);
        assert!(curve.iter().all(|p| p[1] > 0.0));
    }
}
