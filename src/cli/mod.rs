//! Command-line interface for de_meta

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "de_meta")]
#[command(version)]
#[command(about = "Cross-dataset comparison of differential gene-expression results")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the source spreadsheets
    #[arg(long, default_value = "data", global = true)]
    pub data_dir: PathBuf,

    /// Directory for exported artifacts, created if absent
    #[arg(long, default_value = "results", global = true)]
    pub out_dir: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pearson correlation matrix across datasets (CSV + heatmap PNG)
    #[command(
        long_about = "Pearson correlation matrix across datasets\n\n\
            Harmonizes all five datasets, merges them into a gene x dataset\n\
            matrix, and computes pairwise-complete Pearson correlations.\n\
            Exports the matrix as CSV and an annotated heatmap PNG."
    )]
    Correlation,

    /// Acute vs chronic extreme fold-change scatter
    #[command(
        long_about = "Acute vs chronic extreme fold-change scatter\n\n\
            Collapses each exposure group to the per-gene fold change of\n\
            maximum magnitude, correlates the two, and labels the most\n\
            extreme genes per quadrant plus the chronic extremes."
    )]
    Scatter,

    /// Clustered heatmap of top genes x top enriched pathways
    #[command(
        long_about = "Clustered heatmap of top genes x top enriched pathways\n\n\
            Restricts the gene-to-pathway mapping to the 50 most frequent\n\
            pathways and 50 strongest genes, then renders a hierarchically\n\
            clustered fold-change heatmap."
    )]
    Pathways,

    /// Volcano plot with Up/Down classification and curated labels
    #[command(
        long_about = "Volcano plot with Up/Down classification\n\n\
            Classifies genes by |log2FC| > 1 and p < 0.05, labels the top-10\n\
            genes per direction plus a curated list of consistently\n\
            regulated genes."
    )]
    Volcano,

    /// Run all four analyses in sequence
    All,
}
