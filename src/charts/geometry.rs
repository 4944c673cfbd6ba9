//! Render-side geometry shared by the interactive and static renderers.

use crate::stats::{HistogramBin, StatsCalculator};

/// Qualitative colors for categorical bars and boxes, as RGB triples.
pub const CATEGORY_RGB: [(u8, u8, u8); 10] = [
    (102, 194, 165), // Teal
    (252, 141, 98),  // Orange
    (141, 160, 203), // Lavender
    (231, 138, 195), // Pink
    (166, 216, 84),  // Lime
    (255, 217, 47),  // Yellow
    (229, 196, 148), // Tan
    (179, 179, 179), // Grey
    (68, 1, 84),     // Deep purple
    (33, 145, 140),  // Viridis green
];

/// Sample count of the density overlay curve.
pub const DENSITY_POINTS: usize = 200;

/// Histogram bars plus the optional density curve, scaled to bar counts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistogramGeometry {
    pub bins: Vec<HistogramBin>,
    pub density: Vec<[f64; 2]>,
}

impl HistogramGeometry {
    pub fn from_values(values: &[f64], bins: usize, density_overlay: bool) -> Self {
        let bins = StatsCalculator::histogram(values, bins);

        let density = match bins.first() {
            Some(first) if density_overlay => {
                let scale = values.len() as f64 * first.width();
                StatsCalculator::gaussian_kde(values, DENSITY_POINTS, scale)
            }
            _ => Vec::new(),
        };

        Self { bins, density }
    }

    pub fn x_range(&self) -> (f64, f64) {
        match (self.bins.first(), self.bins.last()) {
            (Some(first), Some(last)) => (first.start, last.end),
            _ => (0.0, 1.0),
        }
    }

    /// Tallest bar or density peak, at least 1.
    pub fn y_max(&self) -> f64 {
        let bars = self.bins.iter().map(|b| b.count as f64);
        let curve = self.density.iter().map(|p| p[1]);
        bars.chain(curve).fold(1.0, f64::max)
    }
}

/// Axis extent covering every value with some headroom, `(0, 1)` if empty.
pub fn padded_range(values: impl IntoIterator<Item = f64>, pad_ratio: f64) -> (f64, f64) {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if min.is_infinite() {
        return (0.0, 1.0);
    }
    let pad = ((max - min) * pad_ratio).max(0.5);
    (min - pad, max + pad)
}

/// Category color for position `index`, cycling through the palette.
pub fn category_rgb(index: usize) -> (u8, u8, u8) {
    CATEGORY_RGB[index % CATEGORY_RGB.len()]
}

/// Category label for an integer axis position, blank between ticks.
pub fn index_label(labels: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_label_only_on_integer_ticks() {
        let labels = vec!["a".to_string(), "b".to_string()];
        assert_eq!(index_label(&labels, 1.0), "b");
        assert_eq!(index_label(&labels, 0.999_999_9), "b");
        assert_eq!(index_label(&labels, 0.5), "");
        assert_eq!(index_label(&labels, -1.0), "");
        assert_eq!(index_label(&labels, 5.0), "");
    }

    #[test]
    fn category_colors_wrap_around() {
        assert_eq!(category_rgb(0), category_rgb(CATEGORY_RGB.len()));
        assert_ne!(category_rgb(0), category_rgb(1));
    }

    #[test]
    fn density_is_scaled_to_counts() {
        let values: Vec<f64> = (0..60).map(|i| (i % 12) as f64).collect();
        let geom = HistogramGeometry::from_values(&values, 30, true);
        assert_eq!(geom.density.len(), DENSITY_POINTS);
        // Peak density of a count-scaled KDE stays near the tallest bar.
        let tallest = geom.bins.iter().map(|b| b.count).max().unwrap() as f64;
        assert!(geom.y_max() >= tallest);
        assert!(geom.density.iter().all(|p| p[1] < tallest * 3.0));
    }

    #[test]
    fn empty_histogram_has_default_extent() {
        let geom = HistogramGeometry::from_values(&[], 30, true);
        assert!(geom.bins.is_empty());
        assert!(geom.density.is_empty());
        assert_eq!(geom.x_range(), (0.0, 1.0));
        assert_eq!(geom.y_max(), 1.0);
    }

    #[test]
    fn padded_range_skips_non_finite() {
        assert_eq!(padded_range([f64::NAN], 0.1), (0.0, 1.0));
        let (lo, hi) = padded_range([0.0, 10.0, f64::NAN], 0.1);
        assert_eq!((lo, hi), (-1.0, 11.0));
    }
}
