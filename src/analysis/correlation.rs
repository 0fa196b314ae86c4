//! Cross-dataset Pearson correlation matrix and heatmap

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::io::write_matrix_csv;
use crate::plot::correlation_heatmap;
use crate::stats::correlation_matrix;

const MATRIX_FILE: &str = "acute_vs_chronic_correlation.csv";
const HEATMAP_FILE: &str = "acute_vs_chronic_heatmap.png";

/// Compute the pairwise-complete Pearson matrix across all dataset labels
/// and export it as CSV plus an annotated heatmap.
pub fn run_correlation(data_dir: &Path, out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)?;

    let (wide, _counts) = super::load_wide_matrix(data_dir)?;
    let labels = wide.labels().to_vec();

    let columns: Vec<Vec<Option<f64>>> =
        (0..labels.len()).map(|i| wide.column(i)).collect();
    let matrix = correlation_matrix(&columns);

    log::info!("Pearson correlation matrix:");
    for (i, label) in labels.iter().enumerate() {
        let row: Vec<String> = (0..labels.len())
            .map(|j| format!("{:>6.3}", matrix[[i, j]]))
            .collect();
        log::info!("  {:<12} {}", label, row.join(" "));
    }

    let matrix_path = out_dir.join(MATRIX_FILE);
    write_matrix_csv(&matrix_path, &labels, &matrix)?;
    log::info!("Correlation matrix saved to {}", matrix_path.display());

    let heatmap_path = out_dir.join(HEATMAP_FILE);
    correlation_heatmap(&heatmap_path, &labels, &matrix)?;
    log::info!("Heatmap saved to {}", heatmap_path.display());

    Ok(())
}
