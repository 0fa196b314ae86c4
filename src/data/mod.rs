//! Data structures and harmonization for cross-dataset comparison

mod harmonize;
mod merge;
mod registry;

pub use harmonize::{harmonize_sheet, HarmonizedDataset};
pub use merge::WideMatrix;
pub use registry::{all_labels, datasets, DatasetSpec, ModelFilter, ACUTE_LABELS, CHRONIC_LABELS};

use serde::{Deserialize, Serialize};

/// One harmonized observation: a gene's log2 fold change in one dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongRecord {
    /// Gene symbol, uppercased and trimmed
    pub gene: String,
    pub log_fc: f64,
    /// Dataset label (one fold-change column of one source file)
    pub dataset: String,
}
