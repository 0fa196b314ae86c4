//! Fixed registry of the five source datasets
//!
//! Each entry records where a dataset lives on disk, which columns carry the
//! gene symbol and fold changes, the optional row filter, and the output
//! label for every fold-change column. Datasets contributing two cell lines
//! (Dony) emit two labels.

/// Row filter on the categorical `model` column.
/// Applied only when the sheet actually has that column.
#[derive(Debug, Clone, Copy)]
pub enum ModelFilter {
    /// No filtering
    None,
    /// Keep rows whose model equals this value, compared case- and
    /// whitespace-insensitively
    Equals(&'static str),
    /// Keep rows whose model is one of these values. Case-sensitive, but
    /// the harmonizer hands in the trimmed cell text, so surrounding
    /// whitespace in the sheet does not matter.
    OneOf(&'static [&'static str]),
}

impl ModelFilter {
    pub fn keeps(&self, model: &str) -> bool {
        match self {
            ModelFilter::None => true,
            ModelFilter::Equals(wanted) => model.trim().eq_ignore_ascii_case(wanted),
            ModelFilter::OneOf(allowed) => allowed.contains(&model),
        }
    }
}

/// Static description of one source dataset
#[derive(Debug, Clone, Copy)]
pub struct DatasetSpec {
    pub tag: &'static str,
    /// File name under the data directory
    pub file: &'static str,
    /// Column holding the gene symbol
    pub gene_column: &'static str,
    /// (fold-change column, output dataset label) pairs
    pub fc_columns: &'static [(&'static str, &'static str)],
    pub filter: ModelFilter,
}

/// Labels of the acute-exposure group, in registry order
pub const ACUTE_LABELS: &[&str] = &["Babaniyi_H1", "Babaniyi_H9", "Cruceanu"];

/// Labels of the chronic-exposure group, in registry order
pub const CHRONIC_LABELS: &[&str] = &["Dony_409b", "Dony_FOK4", "Krontira"];

const DATASETS: &[DatasetSpec] = &[
    DatasetSpec {
        tag: "babaniyi_H1",
        file: "babaniyih1.xlsx",
        gene_column: "hgnc_symbol",
        fc_columns: &[("log2FoldChange", "Babaniyi_H1")],
        filter: ModelFilter::None,
    },
    DatasetSpec {
        tag: "babaniyi_H9",
        file: "babaniyih9.xlsx",
        gene_column: "hgnc_symbol",
        fc_columns: &[("log2FoldChange", "Babaniyi_H9")],
        filter: ModelFilter::None,
    },
    DatasetSpec {
        tag: "cruceanu_dn",
        file: "cruceanu_dn.xlsx",
        gene_column: "gene",
        fc_columns: &[("log2FC", "Cruceanu")],
        filter: ModelFilter::Equals("NEURONS"),
    },
    DatasetSpec {
        tag: "dony",
        file: "donysemfc.xlsx",
        gene_column: "gene",
        fc_columns: &[
            ("log2FC_Line409b2", "Dony_409b"),
            ("log2FC_LineFOK4", "Dony_FOK4"),
        ],
        filter: ModelFilter::OneOf(&[
            "ChP",
            "Ex.Neurons",
            "Imm.ChP",
            "Inh.Neurons",
            "RGS5Neurons",
        ]),
    },
    DatasetSpec {
        tag: "krontira_dn",
        file: "krontira_dn.xlsx",
        gene_column: "gene",
        fc_columns: &[("log2FoldChange", "Krontira")],
        filter: ModelFilter::None,
    },
];

/// All registered datasets, in processing order
pub fn datasets() -> &'static [DatasetSpec] {
    DATASETS
}

/// All output labels in registry order (matrix column order)
pub fn all_labels() -> Vec<String> {
    DATASETS
        .iter()
        .flat_map(|d| d.fc_columns.iter().map(|(_, label)| label.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_covers_five_datasets_six_labels() {
        assert_eq!(datasets().len(), 5);
        let labels = all_labels();
        assert_eq!(
            labels,
            vec![
                "Babaniyi_H1",
                "Babaniyi_H9",
                "Cruceanu",
                "Dony_409b",
                "Dony_FOK4",
                "Krontira"
            ]
        );
        // Acute + chronic groups partition the label set
        for l in ACUTE_LABELS.iter().chain(CHRONIC_LABELS) {
            assert!(
                labels.iter().any(|x| x.as_str() == *l),
                "unknown group label {}",
                l
            );
        }
        assert_eq!(ACUTE_LABELS.len() + CHRONIC_LABELS.len(), labels.len());
    }

    #[test]
    fn test_model_filters() {
        assert!(ModelFilter::Equals("NEURONS").keeps("  neurons "));
        assert!(!ModelFilter::Equals("NEURONS").keeps("astrocytes"));
        let one_of = ModelFilter::OneOf(&["ChP", "Ex.Neurons"]);
        assert!(one_of.keeps("Ex.Neurons"));
        // OneOf is case-sensitive; trimming happens upstream in the
        // harmonizer
        assert!(!one_of.keeps("ex.neurons"));
        assert!(!one_of.keeps(" ChP "));
        assert!(ModelFilter::None.keeps("anything"));
    }
}
