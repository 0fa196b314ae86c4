//! Dataset harmonization: raw worksheet rows to long-format records
//!
//! Every source dataset arrives with its own column names and, for two of
//! them, extra cell-model rows that must be filtered out. This module turns
//! each worksheet into a uniform stream of (gene, log2FC, dataset-label)
//! records and reports how many records each label retained.

use std::collections::BTreeMap;

use crate::data::{DatasetSpec, LongRecord};
use crate::error::Result;
use crate::io::Sheet;

/// Harmonization output for one source dataset
#[derive(Debug, Clone)]
pub struct HarmonizedDataset {
    pub records: Vec<LongRecord>,
    /// Retained record count per output label, post-filter and post-coercion
    pub counts: BTreeMap<String, usize>,
}

/// Harmonize one worksheet according to its registry entry.
///
/// Steps, in order: optional `model` filter, numeric coercion of the
/// fold-change columns (non-numeric cells become missing), dropping rows
/// with no usable fold change, uppercasing and trimming the gene symbol,
/// and expansion to one record per (gene, fold-change column) pair.
pub fn harmonize_sheet(sheet: &Sheet, spec: &DatasetSpec) -> Result<HarmonizedDataset> {
    let gene_col = sheet.column_index(spec.gene_column)?;
    let fc_cols: Vec<(usize, &str)> = spec
        .fc_columns
        .iter()
        .map(|(col, label)| Ok((sheet.column_index(col)?, *label)))
        .collect::<Result<_>>()?;

    // The model filter only applies when the sheet carries the column
    let model_col = sheet.find_column("model");

    let mut records = Vec::new();
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for (_, label) in &fc_cols {
        counts.insert(label.to_string(), 0);
    }

    let mut filtered_rows = 0usize;
    for row in 0..sheet.n_rows() {
        if let Some(mc) = model_col {
            let model = sheet.cell(row, mc).as_text().unwrap_or_default();
            if !spec.filter.keeps(&model) {
                continue;
            }
        }
        filtered_rows += 1;

        let values: Vec<Option<f64>> = fc_cols
            .iter()
            .map(|(c, _)| sheet.cell(row, *c).as_number())
            .collect();
        if values.iter().all(Option::is_none) {
            continue;
        }

        let gene = match sheet.cell(row, gene_col).as_text() {
            Some(g) => g.to_uppercase(),
            None => continue,
        };

        for ((_, label), value) in fc_cols.iter().zip(&values) {
            if let Some(log_fc) = value {
                records.push(LongRecord {
                    gene: gene.clone(),
                    log_fc: *log_fc,
                    dataset: label.to_string(),
                });
                *counts.get_mut(*label).unwrap() += 1;
            }
        }
    }

    if model_col.is_some() {
        log::info!(
            "{}: model filter kept {} of {} rows",
            spec.tag,
            filtered_rows,
            sheet.n_rows()
        );
    }

    Ok(HarmonizedDataset { records, counts })
}
