//! Acute vs chronic extreme fold-change scatter

use std::path::Path;

use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use crate::error::{MetaError, Result};

const SIZE: (u32, u32) = (1600, 1600);

/// Scatter of per-gene extreme fold changes, acute on x and chronic on y.
/// `labels` carries (gene, acute, chronic) for the annotated subset.
pub fn scatter_plot<P: AsRef<Path>>(
    path: P,
    points: &[(f64, f64)],
    labels: &[(String, f64, f64)],
) -> Result<()> {
    if points.is_empty() {
        return Err(MetaError::EmptyData {
            reason: "no genes with both acute and chronic values".to_string(),
        });
    }

    let min = points
        .iter()
        .flat_map(|&(a, c)| [a, c])
        .fold(f64::INFINITY, f64::min);
    let max = points
        .iter()
        .flat_map(|&(a, c)| [a, c])
        .fold(f64::NEG_INFINITY, f64::max);
    let lims = (min - 0.2, max + 0.2);

    let root = BitMapBackend::new(path.as_ref(), SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(MetaError::plot)?;
    let root = root.margin(20, 20, 20, 20);

    let mut chart = ChartBuilder::on(&root)
        .x_label_area_size(80)
        .y_label_area_size(100)
        .build_cartesian_2d(lims.0..lims.1, -1.0..1.0f64)
        .map_err(MetaError::plot)?;

    chart
        .configure_mesh()
        .x_desc("log2FC (Acute: Babaniyi_H1, H9, Cruceanu)")
        .y_desc("log2FC (Chronic: Dony_409b, FOK4, Krontira)")
        .axis_desc_style(("sans-serif", 28))
        .label_style(("sans-serif", 22))
        .light_line_style(RGBColor(230, 230, 230))
        .draw()
        .map_err(MetaError::plot)?;

    // Identity and zero reference lines
    let grey = RGBColor(128, 128, 128);
    chart
        .draw_series(DashedLineSeries::new(
            [(lims.0, lims.0), (lims.1, lims.1)],
            8,
            6,
            grey.stroke_width(1),
        ))
        .map_err(MetaError::plot)?;
    chart
        .draw_series(DashedLineSeries::new(
            [(lims.0, 0.0), (lims.1, 0.0)],
            6,
            5,
            grey.stroke_width(1),
        ))
        .map_err(MetaError::plot)?;
    chart
        .draw_series(DashedLineSeries::new(
            [(0.0, -1.0), (0.0, 1.0)],
            6,
            5,
            grey.stroke_width(1),
        ))
        .map_err(MetaError::plot)?;

    chart
        .draw_series(points.iter().map(|&(a, c)| {
            Circle::new((a, c), 5, BLUE.mix(0.6).filled().stroke_width(1))
        }))
        .map_err(MetaError::plot)?;

    let font = ("sans-serif", 22).into_font().color(&BLACK);
    chart
        .draw_series(labels.iter().map(|(gene, a, c)| {
            Text::new(gene.clone(), (*a, *c), font.clone())
        }))
        .map_err(MetaError::plot)?;

    root.present().map_err(MetaError::plot)?;
    Ok(())
}
