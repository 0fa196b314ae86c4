//! Plot rendering via plotters
//!
//! Four renderers, one per analysis: annotated correlation heatmap,
//! acute-vs-chronic scatter, clustered pathway heatmap, and volcano plot.
//! All output PNG via BitMapBackend.

mod heatmap;
mod scatter;
mod volcano;

pub use heatmap::{clustered_heatmap, correlation_heatmap};
pub use scatter::scatter_plot;
pub use volcano::volcano_plot;

use plotters::style::RGBColor;

/// Diverging blue-white-red colormap over [-limit, limit], values outside
/// the range clip to the endpoints. Approximates matplotlib's coolwarm.
pub(crate) fn diverging_color(value: f64, limit: f64) -> RGBColor {
    let low = (59u8, 76u8, 192u8);
    let mid = (245u8, 245u8, 245u8);
    let high = (180u8, 4u8, 38u8);

    let t = if value.is_nan() {
        return RGBColor(200, 200, 200);
    } else {
        (value / limit).clamp(-1.0, 1.0)
    };

    let lerp = |a: u8, b: u8, f: f64| (a as f64 + (b as f64 - a as f64) * f).round() as u8;
    if t < 0.0 {
        let f = t + 1.0; // 0 at -limit, 1 at 0
        RGBColor(
            lerp(low.0, mid.0, f),
            lerp(low.1, mid.1, f),
            lerp(low.2, mid.2, f),
        )
    } else {
        RGBColor(
            lerp(mid.0, high.0, t),
            lerp(mid.1, high.1, t),
            lerp(mid.2, high.2, t),
        )
    }
}

/// Text color readable on a diverging-colormap cell
pub(crate) fn annotation_color(value: f64, limit: f64) -> RGBColor {
    if value.is_finite() && (value / limit).abs() > 0.6 {
        RGBColor(255, 255, 255)
    } else {
        RGBColor(0, 0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diverging_endpoints() {
        assert_eq!(diverging_color(0.0, 1.0), RGBColor(245, 245, 245));
        assert_eq!(diverging_color(1.0, 1.0), RGBColor(180, 4, 38));
        assert_eq!(diverging_color(-1.0, 1.0), RGBColor(59, 76, 192));
        // Out-of-range clips
        assert_eq!(diverging_color(5.0, 1.0), diverging_color(1.0, 1.0));
    }

    #[test]
    fn test_annotation_contrast() {
        assert_eq!(annotation_color(0.95, 1.0), RGBColor(255, 255, 255));
        assert_eq!(annotation_color(0.1, 1.0), RGBColor(0, 0, 0));
    }
}
