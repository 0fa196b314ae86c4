//! Volcano plot: log2 fold change vs -log10 p-value

use std::path::Path;

use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use crate::analysis::Regulation;
use crate::error::{MetaError, Result};

const SIZE: (u32, u32) = (2000, 1600);

fn class_color(regulation: Regulation) -> RGBColor {
    match regulation {
        Regulation::Up => RED,
        Regulation::Down => BLUE,
        Regulation::NotSignificant => RGBColor(128, 128, 128),
    }
}

/// Render the volcano plot. `points` carries (log2FC, display y, class)
/// with the y value already clipped to the visual range; `labels` carries
/// (gene, log2FC, display y, class) for the annotated subset.
pub fn volcano_plot<P: AsRef<Path>>(
    path: P,
    points: &[(f64, f64, Regulation)],
    labels: &[(String, f64, f64, Regulation)],
    y_range: (f64, f64),
    significance_y: f64,
) -> Result<()> {
    if points.is_empty() {
        return Err(MetaError::EmptyData {
            reason: "no records to plot".to_string(),
        });
    }

    let x_min = points.iter().map(|p| p.0).fold(f64::INFINITY, f64::min) - 0.5;
    let x_max = points.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max) + 0.5;

    let root = BitMapBackend::new(path.as_ref(), SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(MetaError::plot)?;
    let root = root.margin(20, 20, 20, 20);

    let mut chart = ChartBuilder::on(&root)
        .x_label_area_size(80)
        .y_label_area_size(100)
        .build_cartesian_2d(x_min..x_max, y_range.0..y_range.1)
        .map_err(MetaError::plot)?;

    chart
        .configure_mesh()
        .x_desc("log2 Fold Change")
        .y_desc("-log10(p-value)")
        .axis_desc_style(("sans-serif", 28))
        .label_style(("sans-serif", 22))
        .light_line_style(RGBColor(230, 230, 230))
        .draw()
        .map_err(MetaError::plot)?;

    // One series per class so the legend lists all three
    for (regulation, name) in [
        (Regulation::Up, "Up"),
        (Regulation::Down, "Down"),
        (Regulation::NotSignificant, "Not significant"),
    ] {
        let color = class_color(regulation);
        chart
            .draw_series(
                points
                    .iter()
                    .filter(|p| p.2 == regulation)
                    .map(|&(x, y, _)| Circle::new((x, y), 4, color.mix(0.6).filled())),
            )
            .map_err(MetaError::plot)?
            .label(name)
            .legend(move |(x, y)| Circle::new((x + 10, y), 5, color.filled()));
    }

    // Significance and fold-change cutoffs
    chart
        .draw_series(DashedLineSeries::new(
            [(x_min, significance_y), (x_max, significance_y)],
            6,
            5,
            BLACK.stroke_width(1),
        ))
        .map_err(MetaError::plot)?;
    for x in [1.0, -1.0] {
        chart
            .draw_series(DashedLineSeries::new(
                [(x, y_range.0), (x, y_range.1)],
                6,
                5,
                BLACK.stroke_width(1),
            ))
            .map_err(MetaError::plot)?;
    }

    chart
        .draw_series(labels.iter().map(|(gene, x, y, regulation)| {
            let style = ("sans-serif", 22)
                .into_font()
                .color(&class_color(*regulation));
            Text::new(gene.clone(), (*x, *y), style)
        }))
        .map_err(MetaError::plot)?;

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", 24))
        .draw()
        .map_err(MetaError::plot)?;

    root.present().map_err(MetaError::plot)?;
    Ok(())
}
