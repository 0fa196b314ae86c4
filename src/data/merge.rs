//! Merge of harmonized long tables into a gene x dataset wide matrix

use std::collections::BTreeMap;

use crate::data::LongRecord;

/// Wide matrix keyed by gene, one column per dataset label.
///
/// Column order is fixed at construction. Genes sort lexicographically.
/// Duplicate (gene, label) observations resolve to the first occurrence in
/// concatenation order; no averaging is performed.
#[derive(Debug, Clone)]
pub struct WideMatrix {
    labels: Vec<String>,
    genes: Vec<String>,
    /// Row-major, genes x labels
    values: Vec<Vec<Option<f64>>>,
}

impl WideMatrix {
    /// Pivot long records into a wide matrix with the given column order.
    /// Records with labels outside `labels` are ignored.
    pub fn from_long(records: &[LongRecord], labels: &[String]) -> Self {
        let label_index: BTreeMap<&str, usize> = labels
            .iter()
            .enumerate()
            .map(|(i, l)| (l.as_str(), i))
            .collect();

        let mut rows: BTreeMap<String, Vec<Option<f64>>> = BTreeMap::new();
        for rec in records {
            let Some(&col) = label_index.get(rec.dataset.as_str()) else {
                continue;
            };
            let row = rows
                .entry(rec.gene.clone())
                .or_insert_with(|| vec![None; labels.len()]);
            // First-seen value wins on collision
            if row[col].is_none() {
                row[col] = Some(rec.log_fc);
            }
        }

        let mut genes = Vec::with_capacity(rows.len());
        let mut values = Vec::with_capacity(rows.len());
        for (gene, row) in rows {
            genes.push(gene);
            values.push(row);
        }

        WideMatrix {
            labels: labels.to_vec(),
            genes,
            values,
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn genes(&self) -> &[String] {
        &self.genes
    }

    pub fn n_genes(&self) -> usize {
        self.genes.len()
    }

    /// Value at (gene row, label column)
    pub fn get(&self, gene_idx: usize, label_idx: usize) -> Option<f64> {
        self.values[gene_idx][label_idx]
    }

    /// One column as a gene-aligned vector
    pub fn column(&self, label_idx: usize) -> Vec<Option<f64>> {
        self.values.iter().map(|row| row[label_idx]).collect()
    }

    /// Column index for a label
    pub fn label_index(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Row slice for one gene
    pub fn row(&self, gene_idx: usize) -> &[Option<f64>] {
        &self.values[gene_idx]
    }
}
