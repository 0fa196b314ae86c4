//! Volcano plot: classification and curated labeling

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MetaError, Result};
use crate::io::{read_sheet, Sheet};
use crate::plot::volcano_plot;

const INPUT_FILE: &str = "gene_functional_terms_mapping_w_fc_pval.xlsx";
const OUTPUT_FILE: &str = "volcano_plot_key_genes_top10.png";

const FC_CUTOFF: f64 = 1.0;
const P_CUTOFF: f64 = 0.05;
/// Zero p-values clamp here before the -log10 transform
const MIN_P: f64 = 1e-300;
const TOP_N: usize = 10;

const Y_MIN: f64 = 0.0;
const Y_MAX: f64 = 300.0;
const Y_MARGIN: f64 = 8.0;

/// Genes labeled regardless of ranking, chosen for consistent regulation
/// across the source studies
const KEY_GENES: &[&str] = &[
    "FKBP5", "HIF3A", "RASSF4", "TSC22D3", "PIK3R1", "LIFR", "CHST15",
];

/// Regulation class of one gene record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Regulation {
    Up,
    Down,
    NotSignificant,
}

/// One row of the volcano input after cleaning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolcanoRecord {
    pub gene: String,
    pub log_fc: f64,
    pub p_value: f64,
    pub neg_log10_p: f64,
    pub regulation: Regulation,
}

/// Classification uses the untransformed p-value
pub fn classify(log_fc: f64, p_value: f64) -> Regulation {
    if log_fc > FC_CUTOFF && p_value < P_CUTOFF {
        Regulation::Up
    } else if log_fc < -FC_CUTOFF && p_value < P_CUTOFF {
        Regulation::Down
    } else {
        Regulation::NotSignificant
    }
}

/// Clip a -log10(p) value into the visual range
fn display_y(neg_log10_p: f64) -> f64 {
    neg_log10_p.clamp(Y_MIN + Y_MARGIN, Y_MAX - Y_MARGIN)
}

fn parse_records(sheet: &Sheet) -> Result<Vec<VolcanoRecord>> {
    let gene_col = sheet.column_index("gene")?;
    let fc_col = sheet.column_index("log2FC")?;
    let p_col = sheet.column_index("p_value")?;

    let mut records = Vec::new();
    for row in 0..sheet.n_rows() {
        let Some(gene) = sheet.cell(row, gene_col).as_text() else {
            continue;
        };
        let Some(log_fc) = sheet.cell(row, fc_col).as_number() else {
            continue;
        };
        let Some(raw_p) = sheet.cell(row, p_col).as_number() else {
            continue;
        };
        let p_value = if raw_p == 0.0 { MIN_P } else { raw_p };
        records.push(VolcanoRecord {
            gene: gene.to_uppercase(),
            log_fc,
            p_value,
            neg_log10_p: -p_value.log10(),
            regulation: classify(log_fc, p_value),
        });
    }
    Ok(records)
}

/// Indices of records to label: top-10 Up by descending log2FC and top-10
/// Down by ascending log2FC (each deduped by gene, first after sort wins),
/// unioned with the curated gene list (max |log2FC| row per curated gene),
/// final union deduped by gene.
pub fn select_labels(records: &[VolcanoRecord]) -> Vec<usize> {
    let ranked = |class: Regulation, ascending: bool| -> Vec<usize> {
        let mut idx: Vec<usize> = (0..records.len())
            .filter(|&i| records[i].regulation == class)
            .collect();
        idx.sort_by(|&a, &b| {
            let ord = records[a]
                .log_fc
                .partial_cmp(&records[b].log_fc)
                .unwrap_or(std::cmp::Ordering::Equal);
            if ascending {
                ord
            } else {
                ord.reverse()
            }
        });
        let mut seen = HashSet::new();
        idx.retain(|&i| seen.insert(records[i].gene.clone()));
        idx.truncate(TOP_N);
        idx
    };

    let mut selected = ranked(Regulation::Up, false);
    selected.extend(ranked(Regulation::Down, true));

    for key in KEY_GENES {
        let best = (0..records.len())
            .filter(|&i| records[i].gene == *key)
            .max_by(|&a, &b| {
                records[a]
                    .log_fc
                    .abs()
                    .partial_cmp(&records[b].log_fc.abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        if let Some(i) = best {
            selected.push(i);
        }
    }

    let mut seen = HashSet::new();
    selected.retain(|&i| seen.insert(records[i].gene.clone()));
    selected
}

/// Run the volcano analysis end to end
pub fn run_volcano(data_dir: &Path, out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)?;

    let sheet = read_sheet(data_dir.join(INPUT_FILE))?;
    let records = parse_records(&sheet)?;
    if records.is_empty() {
        return Err(MetaError::EmptyData {
            reason: format!("{} contains no usable records", INPUT_FILE),
        });
    }

    let n_up = records
        .iter()
        .filter(|r| r.regulation == Regulation::Up)
        .count();
    let n_down = records
        .iter()
        .filter(|r| r.regulation == Regulation::Down)
        .count();
    log::info!(
        "{} records: {} Up, {} Down, {} Not significant",
        records.len(),
        n_up,
        n_down,
        records.len() - n_up - n_down
    );

    let points: Vec<(f64, f64, Regulation)> = records
        .iter()
        .map(|r| (r.log_fc, display_y(r.neg_log10_p), r.regulation))
        .collect();
    let labels: Vec<(String, f64, f64, Regulation)> = select_labels(&records)
        .into_iter()
        .map(|i| {
            let r = &records[i];
            (
                r.gene.clone(),
                r.log_fc,
                display_y(r.neg_log10_p),
                r.regulation,
            )
        })
        .collect();
    log::info!("Labeling {} genes", labels.len());

    let out_path = out_dir.join(OUTPUT_FILE);
    volcano_plot(
        &out_path,
        &points,
        &labels,
        (Y_MIN - Y_MARGIN, Y_MAX + Y_MARGIN),
        -P_CUTOFF.log10(),
    )?;
    log::info!("Volcano plot saved to {}", out_path.display());

    Ok(())
}
