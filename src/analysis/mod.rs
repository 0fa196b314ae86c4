//! Analysis subcommands
//!
//! Each submodule is a terminal consumer of the harmonized data: it loads
//! what it needs, computes its selection/statistics, and writes one or two
//! artifacts into the output directory.

mod correlation;
mod pathways;
mod scatter;
mod volcano;

pub use correlation::run_correlation;
pub use pathways::run_pathways;
pub use scatter::run_scatter;
pub use volcano::{run_volcano, Regulation};

use std::collections::BTreeMap;
use std::path::Path;

use crate::data::{all_labels, datasets, harmonize_sheet, LongRecord, WideMatrix};
use crate::error::Result;
use crate::io::read_sheet;

/// Load every registered dataset, harmonize, and merge into the wide
/// gene x dataset matrix. Also returns retained record counts per label.
pub fn load_wide_matrix(data_dir: &Path) -> Result<(WideMatrix, BTreeMap<String, usize>)> {
    let mut records: Vec<LongRecord> = Vec::new();
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();

    for spec in datasets() {
        let sheet = read_sheet(data_dir.join(spec.file))?;
        let harmonized = harmonize_sheet(&sheet, spec)?;
        records.extend(harmonized.records);
        counts.extend(harmonized.counts);
    }

    log::info!("Genes considered per dataset:");
    for (label, n) in &counts {
        log::info!("  {:<12} {}", label, n);
    }

    let wide = WideMatrix::from_long(&records, &all_labels());
    log::info!("Merged matrix: {} genes x {} datasets", wide.n_genes(), wide.labels().len());

    Ok((wide, counts))
}
