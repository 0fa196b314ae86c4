//! Heatmap renderers: annotated correlation matrix and clustered
//! pathway x gene matrix. Both draw their grids directly in pixel space.

use std::path::Path;

use ndarray::Array2;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;

use super::{annotation_color, diverging_color};
use crate::error::{MetaError, Result};

const CORR_SIZE: (u32, u32) = (1600, 1200);
const CLUSTER_SIZE: (u32, u32) = (3200, 2800);

/// Annotated heatmap of a dataset x dataset correlation matrix,
/// diverging colormap over [-1, 1], cell text to two decimals.
pub fn correlation_heatmap<P: AsRef<Path>>(
    path: P,
    labels: &[String],
    matrix: &Array2<f64>,
) -> Result<()> {
    let k = labels.len();
    if k == 0 {
        return Err(MetaError::EmptyData {
            reason: "no dataset columns to plot".to_string(),
        });
    }

    let root = BitMapBackend::new(path.as_ref(), CORR_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(MetaError::plot)?;

    let (width, height) = CORR_SIZE;
    let (left, top, right, bottom) = (280i32, 90i32, 180i32, 200i32);
    let grid_w = width as i32 - left - right;
    let grid_h = height as i32 - top - bottom;
    let cell = (grid_w / k as i32).min(grid_h / k as i32);

    let title_style = ("sans-serif", 36)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Top));
    root.draw(&Text::new(
        "Acute vs chronic: Pearson correlation",
        (width as i32 / 2, 20),
        title_style,
    ))
    .map_err(MetaError::plot)?;

    let annot_font = ("sans-serif", 24).into_font();
    let label_font = ("sans-serif", 24).into_font();

    for i in 0..k {
        for j in 0..k {
            let v = matrix[[i, j]];
            let x0 = left + j as i32 * cell;
            let y0 = top + i as i32 * cell;
            root.draw(&Rectangle::new(
                [(x0, y0), (x0 + cell, y0 + cell)],
                diverging_color(v, 1.0).filled(),
            ))
            .map_err(MetaError::plot)?;
            root.draw(&Rectangle::new(
                [(x0, y0), (x0 + cell, y0 + cell)],
                WHITE.stroke_width(1),
            ))
            .map_err(MetaError::plot)?;

            if v.is_finite() {
                let style = annot_font
                    .clone()
                    .color(&annotation_color(v, 1.0))
                    .pos(Pos::new(HPos::Center, VPos::Center));
                root.draw(&Text::new(
                    format!("{:.2}", v),
                    (x0 + cell / 2, y0 + cell / 2),
                    style,
                ))
                .map_err(MetaError::plot)?;
            }
        }
    }

    // Row labels on the left, column labels rotated below the grid
    for (i, label) in labels.iter().enumerate() {
        let style = label_font
            .clone()
            .color(&BLACK)
            .pos(Pos::new(HPos::Right, VPos::Center));
        root.draw(&Text::new(
            label.clone(),
            (left - 10, top + i as i32 * cell + cell / 2),
            style,
        ))
        .map_err(MetaError::plot)?;

        let style = label_font
            .clone()
            .transform(FontTransform::Rotate90)
            .color(&BLACK)
            .pos(Pos::new(HPos::Left, VPos::Center));
        root.draw(&Text::new(
            label.clone(),
            (left + i as i32 * cell + cell / 2, top + k as i32 * cell + 10),
            style,
        ))
        .map_err(MetaError::plot)?;
    }

    draw_colorbar(
        &root,
        left + k as i32 * cell + 40,
        top,
        k as i32 * cell,
        1.0,
        "r",
    )?;

    root.present().map_err(MetaError::plot)?;
    Ok(())
}

/// Clustered heatmap of pathways (rows) x genes (columns), colormap clipped
/// to [-v_lim, v_lim]. Rows and columns are expected already in dendrogram
/// leaf order. Row labels sit to the right of the grid (clustermap
/// convention), gene labels run rotated along the bottom.
pub fn clustered_heatmap<P: AsRef<Path>>(
    path: P,
    row_labels: &[String],
    col_labels: &[String],
    values: &[Vec<f64>],
    v_lim: f64,
) -> Result<()> {
    let n_rows = row_labels.len();
    let n_cols = col_labels.len();
    if n_rows == 0 || n_cols == 0 {
        return Err(MetaError::EmptyData {
            reason: "clustered heatmap has no rows or columns".to_string(),
        });
    }

    let root = BitMapBackend::new(path.as_ref(), CLUSTER_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(MetaError::plot)?;

    let (width, height) = CLUSTER_SIZE;
    let (left, top, right, bottom) = (60i32, 90i32, 1050i32, 320i32);
    let grid_w = width as i32 - left - right;
    let grid_h = height as i32 - top - bottom;
    let cell_w = grid_w / n_cols as i32;
    let cell_h = grid_h / n_rows as i32;

    for (i, row) in values.iter().enumerate() {
        for (j, &v) in row.iter().enumerate() {
            let x0 = left + j as i32 * cell_w;
            let y0 = top + i as i32 * cell_h;
            root.draw(&Rectangle::new(
                [(x0, y0), (x0 + cell_w, y0 + cell_h)],
                diverging_color(v, v_lim).filled(),
            ))
            .map_err(MetaError::plot)?;
        }
    }

    let row_font = ("sans-serif", 20).into_font();
    for (i, label) in row_labels.iter().enumerate() {
        let style = row_font
            .clone()
            .color(&BLACK)
            .pos(Pos::new(HPos::Left, VPos::Center));
        root.draw(&Text::new(
            label.clone(),
            (
                left + n_cols as i32 * cell_w + 10,
                top + i as i32 * cell_h + cell_h / 2,
            ),
            style,
        ))
        .map_err(MetaError::plot)?;
    }

    let col_font = ("sans-serif", 20).into_font();
    for (j, label) in col_labels.iter().enumerate() {
        let style = col_font
            .clone()
            .transform(FontTransform::Rotate90)
            .color(&BLACK)
            .pos(Pos::new(HPos::Left, VPos::Center));
        root.draw(&Text::new(
            label.clone(),
            (
                left + j as i32 * cell_w + cell_w / 2,
                top + n_rows as i32 * cell_h + 10,
            ),
            style,
        ))
        .map_err(MetaError::plot)?;
    }

    let axis_font = ("sans-serif", 28).into_font();
    root.draw(&Text::new(
        "Regulated genes",
        (left + grid_w / 2, height as i32 - 40),
        axis_font
            .clone()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center)),
    ))
    .map_err(MetaError::plot)?;
    root.draw(&Text::new(
        "Enriched functional pathways",
        (width as i32 / 2, 30),
        axis_font
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center)),
    ))
    .map_err(MetaError::plot)?;

    draw_colorbar(
        &root,
        width as i32 - 140,
        top,
        (n_rows as i32 * cell_h).min(600),
        v_lim,
        "log2FC",
    )?;

    root.present().map_err(MetaError::plot)?;
    Ok(())
}

/// Vertical colorbar for the diverging colormap, labeled at -limit/0/+limit
fn draw_colorbar<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    x: i32,
    y: i32,
    height: i32,
    limit: f64,
    title: &str,
) -> Result<()> {
    const BAR_WIDTH: i32 = 36;
    let steps = height.max(1);

    for s in 0..steps {
        // Top of the bar is +limit
        let v = limit - 2.0 * limit * (s as f64 / steps as f64);
        root.draw(&Rectangle::new(
            [(x, y + s), (x + BAR_WIDTH, y + s + 1)],
            diverging_color(v, limit).filled(),
        ))
        .map_err(MetaError::plot)?;
    }
    root.draw(&Rectangle::new(
        [(x, y), (x + BAR_WIDTH, y + height)],
        BLACK.stroke_width(1),
    ))
    .map_err(MetaError::plot)?;

    let font = ("sans-serif", 18).into_font();
    let ticks = [
        (limit, y),
        (0.0, y + height / 2),
        (-limit, y + height),
    ];
    for (value, ty) in ticks {
        root.draw(&Text::new(
            format!("{:.0}", value),
            (x + BAR_WIDTH + 6, ty),
            font.clone()
                .color(&BLACK)
                .pos(Pos::new(HPos::Left, VPos::Center)),
        ))
        .map_err(MetaError::plot)?;
    }
    root.draw(&Text::new(
        title.to_string(),
        (x + BAR_WIDTH / 2, y - 12),
        font.color(&BLACK).pos(Pos::new(HPos::Center, VPos::Bottom)),
    ))
    .map_err(MetaError::plot)?;

    Ok(())
}
