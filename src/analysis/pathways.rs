//! Clustered heatmap of top genes x top enriched pathways

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::cluster::leaf_order;
use crate::error::{MetaError, Result};
use crate::io::{read_sheet, Sheet};
use crate::plot::clustered_heatmap;

const INPUT_FILE: &str = "gene_functional_terms_mapping_w_fc.xlsx";
const OUTPUT_FILE: &str = "clustermap_pathways_top_genes.png";
const TOP_TERMS: usize = 50;
const TOP_GENES: usize = 50;
const COLOR_LIMIT: f64 = 3.0;

/// One gene-to-pathway association with its fold change
#[derive(Debug, Clone)]
pub struct PathwayRecord {
    pub gene: String,
    /// "{term_code}: {functional_term}"
    pub term_label: String,
    pub log_fc: f64,
}

/// The selected pathway x gene matrix, missing combinations filled with 0
#[derive(Debug)]
pub struct PathwayMatrix {
    pub terms: Vec<String>,
    pub genes: Vec<String>,
    /// Row-major, terms x genes
    pub values: Vec<Vec<f64>>,
}

fn parse_records(sheet: &Sheet) -> Result<Vec<PathwayRecord>> {
    let gene_col = sheet.column_index("gene")?;
    let term_col = sheet.column_index("functional_term")?;
    let code_col = sheet.column_index("term_code")?;
    let fc_col = sheet.column_index("log2FC")?;

    let mut records = Vec::new();
    for row in 0..sheet.n_rows() {
        let Some(gene) = sheet.cell(row, gene_col).as_text() else {
            continue;
        };
        let Some(log_fc) = sheet.cell(row, fc_col).as_number() else {
            continue;
        };
        let term = sheet.cell(row, term_col).as_text().unwrap_or_default();
        let code = sheet.cell(row, code_col).as_text().unwrap_or_default();
        records.push(PathwayRecord {
            gene: gene.to_uppercase(),
            term_label: format!("{}: {}", code, term),
            log_fc,
        });
    }
    Ok(records)
}

/// Selection pipeline: top terms by row count, (gene, term) dedup keeping
/// the larger |log2FC|, top genes by max |log2FC|, pivot with zero fill.
pub fn select_matrix(
    records: &[PathwayRecord],
    top_terms: usize,
    top_genes: usize,
) -> PathwayMatrix {
    // Most frequent term labels; ties break by label for determinism
    let mut term_counts: HashMap<&str, usize> = HashMap::new();
    for rec in records {
        *term_counts.entry(rec.term_label.as_str()).or_insert(0) += 1;
    }
    let mut ranked: Vec<(&str, usize)> = term_counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    let kept_terms: std::collections::HashSet<&str> =
        ranked.iter().take(top_terms).map(|(t, _)| *t).collect();

    // Dedupe (gene, term), keeping the larger |log2FC| (first wins on tie)
    let mut deduped: HashMap<(&str, &str), f64> = HashMap::new();
    for rec in records {
        if !kept_terms.contains(rec.term_label.as_str()) {
            continue;
        }
        deduped
            .entry((rec.gene.as_str(), rec.term_label.as_str()))
            .and_modify(|v| {
                if rec.log_fc.abs() > v.abs() {
                    *v = rec.log_fc;
                }
            })
            .or_insert(rec.log_fc);
    }

    // Top genes by maximum |log2FC| across the restricted table
    let mut gene_max: HashMap<&str, f64> = HashMap::new();
    for (&(gene, _), &fc) in &deduped {
        let entry = gene_max.entry(gene).or_insert(0.0);
        if fc.abs() > *entry {
            *entry = fc.abs();
        }
    }
    let mut gene_rank: Vec<(&str, f64)> = gene_max.into_iter().collect();
    gene_rank.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });
    let kept_genes: std::collections::HashSet<&str> =
        gene_rank.iter().take(top_genes).map(|(g, _)| *g).collect();

    // Surviving cells; terms or genes losing every cell drop out entirely
    let cells: Vec<(&str, &str, f64)> = deduped
        .iter()
        .filter(|((gene, _), _)| kept_genes.contains(*gene))
        .map(|(&(gene, term), &fc)| (term, gene, fc))
        .collect();

    let mut terms: Vec<String> = cells.iter().map(|c| c.0.to_string()).collect();
    terms.sort();
    terms.dedup();
    let mut genes: Vec<String> = cells.iter().map(|c| c.1.to_string()).collect();
    genes.sort();
    genes.dedup();

    let term_idx: HashMap<&str, usize> =
        terms.iter().enumerate().map(|(i, t)| (t.as_str(), i)).collect();
    let gene_idx: HashMap<&str, usize> =
        genes.iter().enumerate().map(|(i, g)| (g.as_str(), i)).collect();

    let mut values = vec![vec![0.0f64; genes.len()]; terms.len()];
    for (term, gene, fc) in cells {
        values[term_idx[term]][gene_idx[gene]] = fc;
    }

    PathwayMatrix {
        terms,
        genes,
        values,
    }
}

fn reorder<T: Clone>(items: &[T], order: &[usize]) -> Vec<T> {
    order.iter().map(|&i| items[i].clone()).collect()
}

/// Run the pathway clustering analysis end to end
pub fn run_pathways(data_dir: &Path, out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)?;

    let sheet = read_sheet(data_dir.join(INPUT_FILE))?;
    let records = parse_records(&sheet)?;
    log::info!("{}: {} gene-pathway associations", INPUT_FILE, records.len());

    let matrix = select_matrix(&records, TOP_TERMS, TOP_GENES);
    if matrix.terms.is_empty() {
        return Err(MetaError::EmptyData {
            reason: "no pathways left after selection".to_string(),
        });
    }
    log::info!(
        "Selected {} pathways x {} genes for clustering",
        matrix.terms.len(),
        matrix.genes.len()
    );

    // Cluster rows, then columns on the transposed matrix
    let row_order = leaf_order(&matrix.values);
    let transposed: Vec<Vec<f64>> = (0..matrix.genes.len())
        .map(|j| matrix.values.iter().map(|row| row[j]).collect())
        .collect();
    let col_order = leaf_order(&transposed);

    let terms = reorder(&matrix.terms, &row_order);
    let genes = reorder(&matrix.genes, &col_order);
    let values: Vec<Vec<f64>> = row_order
        .iter()
        .map(|&i| col_order.iter().map(|&j| matrix.values[i][j]).collect())
        .collect();

    let out_path = out_dir.join(OUTPUT_FILE);
    clustered_heatmap(&out_path, &terms, &genes, &values, COLOR_LIMIT)?;
    log::info!("Clustered heatmap saved to {}", out_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(gene: &str, term: &str, log_fc: f64) -> PathwayRecord {
        PathwayRecord {
            gene: gene.to_string(),
            term_label: term.to_string(),
            log_fc,
        }
    }

    #[test]
    fn test_duplicate_gene_term_keeps_larger_abs() {
        let records = vec![
            rec("A", "T1: term", 1.0),
            rec("A", "T1: term", -3.0),
            rec("A", "T1: term", 2.0),
        ];
        let m = select_matrix(&records, 10, 10);
        assert_eq!(m.terms, vec!["T1: term".to_string()]);
        assert_eq!(m.values[0][0], -3.0);
    }

    #[test]
    fn test_top_terms_by_frequency() {
        let mut records = Vec::new();
        for i in 0..3 {
            records.push(rec(&format!("G{}", i), "COMMON: a", 1.0));
        }
        records.push(rec("G0", "RARE: b", 5.0));
        let m = select_matrix(&records, 1, 10);
        assert_eq!(m.terms, vec!["COMMON: a".to_string()]);
    }

    #[test]
    fn test_top_genes_by_max_abs_fc() {
        let records = vec![
            rec("BIG", "T: t", -8.0),
            rec("MID", "T: t", 4.0),
            rec("SMALL", "T: t", 0.5),
        ];
        let m = select_matrix(&records, 10, 2);
        assert_eq!(m.genes, vec!["BIG".to_string(), "MID".to_string()]);
    }

    #[test]
    fn test_missing_combinations_fill_zero() {
        let records = vec![rec("A", "T1: t", 2.0), rec("B", "T2: u", -1.0)];
        let m = select_matrix(&records, 10, 10);
        assert_eq!(m.terms.len(), 2);
        assert_eq!(m.genes.len(), 2);
        let total: f64 = m.values.iter().flatten().map(|v| v.abs()).sum();
        assert_eq!(total, 3.0);
        // A has no value for T2
        let t2 = m.terms.iter().position(|t| t == "T2: u").unwrap();
        let a = m.genes.iter().position(|g| g == "A").unwrap();
        assert_eq!(m.values[t2][a], 0.0);
    }

    #[test]
    fn test_term_dropped_when_its_genes_lose_selection() {
        // LONELY's only association is with a gene that misses the top-1 cut
        let records = vec![
            rec("KEEP", "T1: t", 9.0),
            rec("DROP", "T2: u", 0.1),
        ];
        let m = select_matrix(&records, 10, 1);
        assert_eq!(m.terms, vec!["T1: t".to_string()]);
        assert_eq!(m.genes, vec!["KEEP".to_string()]);
    }
}
