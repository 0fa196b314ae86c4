//! de_meta: exploratory comparison of differential gene-expression results
//! across independent acute- and chronic-exposure datasets
//!
//! The crate loads per-dataset spreadsheets of gene-level fold-change
//! statistics, harmonizes them into a common long format, merges them into
//! a gene x dataset matrix, and produces four artifact classes: a Pearson
//! correlation matrix with heatmap, an acute-vs-chronic extreme fold-change
//! scatter, a clustered pathway heatmap, and a volcano plot.
//!
//! # Example
//!
//! ```ignore
//! use de_meta::prelude::*;
//! use std::path::Path;
//!
//! run_all(Path::new("data"), Path::new("results"))?;
//! ```

pub mod analysis;
pub mod cli;
pub mod cluster;
pub mod data;
pub mod error;
pub mod io;
pub mod plot;
pub mod stats;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::analysis::{
        run_correlation, run_pathways, run_scatter, run_volcano, Regulation,
    };
    pub use crate::data::{
        all_labels, datasets, harmonize_sheet, DatasetSpec, LongRecord, ModelFilter, WideMatrix,
    };
    pub use crate::error::{MetaError, Result};
    pub use crate::io::{read_sheet, Cell, Sheet};
    pub use crate::run_all;
    pub use crate::stats::{correlation_matrix, pearson, pearson_pvalue};
}

use std::path::Path;

use error::Result;

/// Run all four analyses in sequence against the same directories
pub fn run_all(data_dir: &Path, out_dir: &Path) -> Result<()> {
    analysis::run_correlation(data_dir, out_dir)?;
    analysis::run_scatter(data_dir, out_dir)?;
    analysis::run_pathways(data_dir, out_dir)?;
    analysis::run_volcano(data_dir, out_dir)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::data::{harmonize_sheet, DatasetSpec, LongRecord, ModelFilter, WideMatrix};
    use crate::io::{Cell, Sheet};
    use crate::stats::correlation_matrix;

    /// End-to-end over two toy sheets: overlapping and non-overlapping
    /// genes, one shared label with conflicting values.
    #[test]
    fn test_harmonize_merge_correlate() {
        let spec_a = DatasetSpec {
            tag: "a",
            file: "a.xlsx",
            gene_column: "gene",
            fc_columns: &[("fc", "A")],
            filter: ModelFilter::None,
        };
        let spec_b = DatasetSpec {
            tag: "b",
            file: "b.xlsx",
            gene_column: "gene",
            fc_columns: &[("fc", "B"), ("fc2", "A")],
            filter: ModelFilter::None,
        };

        let sheet_a = Sheet::new(
            "a.xlsx",
            vec!["gene".to_string(), "fc".to_string()],
            vec![
                vec![Cell::Text("g1".to_string()), Cell::Number(1.0)],
                vec![Cell::Text("g2".to_string()), Cell::Number(2.0)],
                vec![Cell::Text("g3".to_string()), Cell::Number(3.0)],
                vec![Cell::Text("only_a".to_string()), Cell::Number(4.0)],
            ],
        );
        // B's fc2 column also claims label "A" with conflicting values;
        // concat order makes sheet A's values win
        let sheet_b = Sheet::new(
            "b.xlsx",
            vec!["gene".to_string(), "fc".to_string(), "fc2".to_string()],
            vec![
                vec![
                    Cell::Text("g1".to_string()),
                    Cell::Number(2.0),
                    Cell::Number(99.0),
                ],
                vec![
                    Cell::Text("g2".to_string()),
                    Cell::Number(4.1),
                    Cell::Number(99.0),
                ],
                vec![
                    Cell::Text("g3".to_string()),
                    Cell::Number(5.9),
                    Cell::Number(99.0),
                ],
                vec![Cell::Text("only_b".to_string()), Cell::Number(1.0), Cell::Empty],
            ],
        );

        let mut records: Vec<LongRecord> = Vec::new();
        records.extend(harmonize_sheet(&sheet_a, &spec_a).unwrap().records);
        records.extend(harmonize_sheet(&sheet_b, &spec_b).unwrap().records);

        let labels = vec!["A".to_string(), "B".to_string()];
        let wide = WideMatrix::from_long(&records, &labels);

        assert_eq!(wide.n_genes(), 5);
        // First-seen wins: g1's A value comes from sheet A
        let g1 = wide.genes().iter().position(|g| g == "G1").unwrap();
        assert_eq!(wide.get(g1, 0), Some(1.0));

        let columns: Vec<Vec<Option<f64>>> = (0..2).map(|i| wide.column(i)).collect();
        let m = correlation_matrix(&columns);
        // A and B overlap on g1..g3 with a near-linear positive relationship
        assert!(m[[0, 1]] > 0.99);
        assert_eq!(m[[0, 0]], 1.0);
        assert!((m[[0, 1]] - m[[1, 0]]).abs() < 1e-12);
    }
}
