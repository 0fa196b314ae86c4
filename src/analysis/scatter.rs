//! Acute vs chronic extreme fold-change scatter
//!
//! Per gene, each exposure group collapses to the fold change of maximum
//! absolute magnitude among its datasets; genes with both scalars defined
//! enter the correlation and the plot. Labeling picks the most extreme
//! genes per quadrant plus the chronic extremes.

use std::fs;
use std::path::Path;

use crate::data::{WideMatrix, ACUTE_LABELS, CHRONIC_LABELS};
use crate::error::{MetaError, Result};
use crate::plot::scatter_plot;
use crate::stats::{pearson, pearson_pvalue};

const SCATTER_FILE: &str = "acute_vs_chronic_scatter.png";
const TOP_PER_QUADRANT: usize = 4;
const CHRONIC_EXTREMES: usize = 2;

/// A gene with both group scalars defined
#[derive(Debug, Clone)]
pub struct GenePoint {
    pub gene: String,
    pub acute: f64,
    pub chronic: f64,
}

/// Signed value of maximum absolute magnitude among the selected columns.
/// None when every column is missing. Ties resolve to the earliest column.
pub fn extreme_value(row: &[Option<f64>], columns: &[usize]) -> Option<f64> {
    let mut best: Option<f64> = None;
    for &c in columns {
        if let Some(v) = row[c] {
            match best {
                Some(b) if v.abs() <= b.abs() => {}
                _ => best = Some(v),
            }
        }
    }
    best
}

/// Derive per-gene (acute, chronic) points from the wide matrix, keeping
/// only genes where both scalars are defined.
pub fn derive_points(wide: &WideMatrix) -> Result<Vec<GenePoint>> {
    let group_indices = |labels: &[&str]| -> Result<Vec<usize>> {
        labels
            .iter()
            .map(|l| {
                wide.label_index(l).ok_or_else(|| MetaError::InvalidMatrix {
                    reason: format!("label '{}' missing from merged matrix", l),
                })
            })
            .collect()
    };
    let acute_cols = group_indices(ACUTE_LABELS)?;
    let chronic_cols = group_indices(CHRONIC_LABELS)?;

    let mut points = Vec::new();
    for (i, gene) in wide.genes().iter().enumerate() {
        let row = wide.row(i);
        if let (Some(acute), Some(chronic)) = (
            extreme_value(row, &acute_cols),
            extreme_value(row, &chronic_cols),
        ) {
            points.push(GenePoint {
                gene: gene.clone(),
                acute,
                chronic,
            });
        }
    }
    Ok(points)
}

/// Indices of points to label: per non-empty quadrant the `top_n` genes by
/// distance from the origin, unioned with the two highest and two lowest
/// chronic values. Zero coordinates belong to no quadrant.
pub fn select_labels(points: &[GenePoint], top_n: usize) -> Vec<usize> {
    let mut selected: Vec<usize> = Vec::new();

    let quadrants: [fn(&GenePoint) -> bool; 4] = [
        |p| p.acute > 0.0 && p.chronic > 0.0,
        |p| p.acute < 0.0 && p.chronic > 0.0,
        |p| p.acute < 0.0 && p.chronic < 0.0,
        |p| p.acute > 0.0 && p.chronic < 0.0,
    ];

    for in_quadrant in quadrants {
        let mut members: Vec<usize> = (0..points.len())
            .filter(|&i| in_quadrant(&points[i]))
            .collect();
        members.sort_by(|&a, &b| {
            let da = points[a].acute.hypot(points[a].chronic);
            let db = points[b].acute.hypot(points[b].chronic);
            db.partial_cmp(&da).unwrap_or(std::cmp::Ordering::Equal)
        });
        selected.extend(members.into_iter().take(top_n));
    }

    // Chronic extremes are always labeled, regardless of quadrant
    let mut by_chronic: Vec<usize> = (0..points.len()).collect();
    by_chronic.sort_by(|&a, &b| {
        points[b]
            .chronic
            .partial_cmp(&points[a].chronic)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    selected.extend(by_chronic.iter().take(CHRONIC_EXTREMES).copied());
    selected.extend(by_chronic.iter().rev().take(CHRONIC_EXTREMES).copied());

    // Dedupe by gene, keeping first occurrence
    let mut seen = std::collections::HashSet::new();
    selected.retain(|&i| seen.insert(points[i].gene.clone()));
    selected
}

/// Run the scatter analysis end to end
pub fn run_scatter(data_dir: &Path, out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)?;

    let (wide, _counts) = super::load_wide_matrix(data_dir)?;
    let points = derive_points(&wide)?;
    if points.is_empty() {
        return Err(MetaError::EmptyData {
            reason: "no genes with both acute and chronic values".to_string(),
        });
    }

    let acute: Vec<f64> = points.iter().map(|p| p.acute).collect();
    let chronic: Vec<f64> = points.iter().map(|p| p.chronic).collect();
    let r = pearson(&acute, &chronic);
    let p = pearson_pvalue(r, points.len());
    log::info!(
        "Pearson correlation (extreme values, {} genes): r = {:.3}, p = {:.2e}",
        points.len(),
        r,
        p
    );

    let labels: Vec<(String, f64, f64)> = select_labels(&points, TOP_PER_QUADRANT)
        .into_iter()
        .map(|i| (points[i].gene.clone(), points[i].acute, points[i].chronic))
        .collect();
    let coords: Vec<(f64, f64)> = points.iter().map(|p| (p.acute, p.chronic)).collect();

    let out_path = out_dir.join(SCATTER_FILE);
    scatter_plot(&out_path, &coords, &labels)?;
    log::info!("Scatter plot saved to {}", out_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(gene: &str, acute: f64, chronic: f64) -> GenePoint {
        GenePoint {
            gene: gene.to_string(),
            acute,
            chronic,
        }
    }

    #[test]
    fn test_extreme_value_sign_preserved() {
        let row = vec![Some(2.0), Some(-5.0), None];
        assert_eq!(extreme_value(&row, &[0, 1, 2]), Some(-5.0));
    }

    #[test]
    fn test_extreme_value_all_missing() {
        let row = vec![None, None];
        assert_eq!(extreme_value(&row, &[0, 1]), None);
    }

    #[test]
    fn test_extreme_value_tie_takes_first() {
        let row = vec![Some(3.0), Some(-3.0)];
        assert_eq!(extreme_value(&row, &[0, 1]), Some(3.0));
    }

    #[test]
    fn test_quadrant_membership() {
        let points = vec![point("POS", 3.0, 4.0), point("MIX", 3.0, -4.0)];
        let selected = select_labels(&points, 4);
        // Both genes label: one from Q1, one from Q4 (and both are chronic
        // extremes anyway)
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn test_top_n_per_quadrant_by_distance() {
        // Five genes in Q1; the closest to the origin must not be labeled
        let points = vec![
            point("FAR1", 5.0, 5.0),
            point("FAR2", 4.0, 4.0),
            point("FAR3", 3.0, 3.0),
            point("FAR4", 2.5, 2.5),
            point("NEAR", 0.1, 0.1),
            // Chronic extremes live in another quadrant so they do not
            // absorb the Q1 slots
            point("LOW1", -1.0, -9.0),
            point("LOW2", -1.0, -8.0),
        ];
        let selected = select_labels(&points, 4);
        let genes: Vec<&str> = selected.iter().map(|&i| points[i].gene.as_str()).collect();
        assert!(!genes.contains(&"NEAR"));
        assert!(genes.contains(&"FAR1"));
        // FAR1/FAR2 are the two chronic maxima, LOW1/LOW2 the minima
        assert!(genes.contains(&"LOW1"));
        assert!(genes.contains(&"LOW2"));
    }

    #[test]
    fn test_zero_coordinate_joins_no_quadrant() {
        let points = vec![point("ZERO", 0.0, 5.0), point("Q1", 1.0, 1.0)];
        let selected = select_labels(&points, 4);
        let genes: Vec<&str> = selected.iter().map(|&i| points[i].gene.as_str()).collect();
        // ZERO still labels via the chronic-extreme rule, not a quadrant
        assert!(genes.contains(&"ZERO"));
        assert!(genes.contains(&"Q1"));
    }
}
