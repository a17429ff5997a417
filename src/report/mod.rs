//! Ranked result tables
//!
//! Each protein gets a CSV ranking its ligands by best affinity; the screen
//! as a whole gets one summary CSV with the best ligand per protein. Write
//! failures always propagate to the caller.

use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while writing result tables
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("CSV error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
}

/// One successfully docked ligand
#[derive(Debug, Clone, Serialize)]
pub struct LigandRecord {
    #[serde(rename = "Ligand")]
    pub ligand: String,

    /// Best affinity across the reported binding modes, kcal/mol
    #[serde(rename = "Best_Affinity_kcal_mol")]
    pub affinity: f64,

    #[serde(rename = "Output_File")]
    pub output_file: PathBuf,

    #[serde(rename = "Log_File")]
    pub log_file: PathBuf,
}

/// One protein's best result in the global summary
#[derive(Debug, Clone, Serialize)]
pub struct ProteinSummaryRow {
    #[serde(rename = "Protein")]
    pub protein: String,

    #[serde(rename = "Best_Ligand")]
    pub best_ligand: String,

    #[serde(rename = "Best_Affinity_kcal_mol")]
    pub best_affinity: f64,

    #[serde(rename = "Total_Ligands_Tested")]
    pub ligands_tested: usize,
}

/// Sort ligand records ascending by affinity, best (most negative) first.
pub fn rank_ligands(records: &mut [LigandRecord]) {
    records.sort_by(|a, b| a.affinity.total_cmp(&b.affinity));
}

/// Sort summary rows ascending by best affinity across proteins.
pub fn rank_proteins(rows: &mut [ProteinSummaryRow]) {
    rows.sort_by(|a, b| a.best_affinity.total_cmp(&b.best_affinity));
}

/// Condense one protein's ranked records into its global-summary row.
///
/// Returns `None` for a protein without a single successful docking; such
/// proteins are excluded from the summary entirely.
pub fn summarize_protein(protein: &str, ranked: &[LigandRecord]) -> Option<ProteinSummaryRow> {
    let best = ranked.first()?;

    Some(ProteinSummaryRow {
        protein: protein.to_string(),
        best_ligand: best.ligand.clone(),
        best_affinity: best.affinity,
        ligands_tested: ranked.len(),
    })
}

/// Write one protein's ranked table.
pub fn write_protein_table(path: &Path, records: &[LigandRecord]) -> Result<(), ReportError> {
    write_csv(path, records)
}

/// Write the cross-protein summary table.
pub fn write_global_summary(path: &Path, rows: &[ProteinSummaryRow]) -> Result<(), ReportError> {
    write_csv(path, rows)
}

fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), ReportError> {
    let csv_error = |source| ReportError::Csv {
        path: path.display().to_string(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
    for row in rows {
        writer.serialize(row).map_err(csv_error)?;
    }
    writer.flush().map_err(|e| csv_error(e.into()))?;

    Ok(())
}
