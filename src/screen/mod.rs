//! Sequential docking screen across proteins and ligands
//!
//! The screen walks every receptor in the protein directory, derives its
//! search box, writes a config file, and docks every ligand against it, one
//! blocking job at a time. A receptor that fails to parse skips that protein;
//! a failed job skips that ligand; setup problems and output-write failures
//! abort the screen.

use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::affinity::best_affinity;
use crate::config::{write_config, SearchParams};
use crate::engine::{VinaEngine, DOCKING_TIMEOUT};
use crate::grid::{SearchBox, DEFAULT_PADDING};
use crate::io::parse_structure;
use crate::report::{
    rank_ligands, rank_proteins, summarize_protein, write_global_summary, write_protein_table,
    LigandRecord, ProteinSummaryRow, ReportError,
};

/// Errors that abort a screen
#[derive(Error, Debug)]
pub enum ScreenError {
    #[error("docking executable not runnable: {0}")]
    MissingExecutable(PathBuf),

    #[error("no receptor structures (.pdbqt or .pdb) found in {0}")]
    NoProteins(PathBuf),

    #[error("no ligand files (.pdbqt) found in {0}")]
    NoLigands(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Everything a screen run needs, with the stock defaults compiled in.
///
/// Components take their parameters from this value rather than from module
/// globals, so tests can point a screen at temporary directories.
#[derive(Debug, Clone)]
pub struct ScreenConfig {
    /// Docking executable to invoke for every job
    pub executable: PathBuf,

    /// Directory of receptor structures
    pub protein_dir: PathBuf,

    /// Directory of ligand candidates
    pub ligand_dir: PathBuf,

    /// Directory receiving one generated config file per protein
    pub config_dir: PathBuf,

    /// Directory receiving per-protein result subdirectories and the summary
    pub results_dir: PathBuf,

    /// Search parameters written into every config file
    pub params: SearchParams,

    /// Padding added to each axis of the search box, in Angstroms
    pub padding: f64,

    /// Wall-clock limit per docking job
    pub timeout: Duration,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            executable: PathBuf::from("./vina"),
            protein_dir: PathBuf::from("Protein"),
            ligand_dir: PathBuf::from("Ligand"),
            config_dir: PathBuf::from("config_files"),
            results_dir: PathBuf::from("docking_results"),
            params: SearchParams::default(),
            padding: DEFAULT_PADDING,
            timeout: DOCKING_TIMEOUT,
        }
    }
}

/// Counts reported after a completed screen
#[derive(Debug, Default)]
pub struct ScreenSummary {
    pub proteins_processed: usize,
    pub proteins_skipped: usize,
    pub jobs_attempted: usize,
    pub jobs_succeeded: usize,

    /// Path of the global summary table, when at least one protein succeeded
    pub summary_table: Option<PathBuf>,
}

/// List files in `dir` with the given extension, sorted by name.
fn files_with_extension(dir: &Path, extension: &str) -> std::io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
        })
        .collect();

    files.sort();
    Ok(files)
}

/// Receptor discovery prefers PDBQT and falls back to plain PDB.
fn discover_proteins(dir: &Path) -> Result<Vec<PathBuf>, ScreenError> {
    let mut proteins = files_with_extension(dir, "pdbqt")?;
    if proteins.is_empty() {
        proteins = files_with_extension(dir, "pdb")?;
    }
    if proteins.is_empty() {
        return Err(ScreenError::NoProteins(dir.to_path_buf()));
    }
    Ok(proteins)
}

fn discover_ligands(dir: &Path) -> Result<Vec<PathBuf>, ScreenError> {
    let ligands = files_with_extension(dir, "pdbqt")?;
    if ligands.is_empty() {
        return Err(ScreenError::NoLigands(dir.to_path_buf()));
    }
    Ok(ligands)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Run the whole screen: every ligand against every protein, sequentially.
pub fn run_screen(config: &ScreenConfig) -> Result<ScreenSummary, ScreenError> {
    fs::create_dir_all(&config.results_dir)?;
    fs::create_dir_all(&config.config_dir)?;

    let engine = VinaEngine::new(&config.executable, config.timeout);
    if !engine.is_available() {
        return Err(ScreenError::MissingExecutable(config.executable.clone()));
    }

    let proteins = discover_proteins(&config.protein_dir)?;
    let ligands = discover_ligands(&config.ligand_dir)?;

    info!(
        "Found {} protein(s) and {} ligand(s), {} docking job(s) total",
        proteins.len(),
        ligands.len(),
        proteins.len() * ligands.len()
    );

    let mut summary = ScreenSummary::default();
    let mut summary_rows: Vec<ProteinSummaryRow> = Vec::new();

    for (protein_index, protein_path) in proteins.iter().enumerate() {
        let protein_name = file_stem(protein_path);
        info!(
            "[{}/{}] Processing protein: {}",
            protein_index + 1,
            proteins.len(),
            protein_name
        );

        // Malformed or empty receptors skip the protein, not the screen.
        let bbox = match parse_structure(protein_path)
            .map_err(|e| e.to_string())
            .and_then(|coords| {
                SearchBox::padded_enclosing(&coords, config.padding).map_err(|e| e.to_string())
            }) {
            Ok(bbox) => bbox,
            Err(reason) => {
                warn!("Skipping protein {}: {}", protein_name, reason);
                summary.proteins_skipped += 1;
                continue;
            }
        };

        let records = screen_protein(config, &engine, protein_path, &bbox, &ligands, &mut summary)?;
        summary.proteins_processed += 1;

        if records.is_empty() {
            warn!("No successful dockings for {}", protein_name);
            continue;
        }

        let table_path = config
            .results_dir
            .join(&protein_name)
            .join(format!("{protein_name}_results.csv"));
        write_protein_table(&table_path, &records)?;

        let best = &records[0];
        info!(
            "Summary for {}: {}/{} successful, best ligand {} at {:.2} kcal/mol, results in {}",
            protein_name,
            records.len(),
            ligands.len(),
            best.ligand,
            best.affinity,
            table_path.display()
        );

        if let Some(row) = summarize_protein(&protein_name, &records) {
            summary_rows.push(row);
        }
    }

    if summary_rows.is_empty() {
        info!("No successful dockings completed");
        return Ok(summary);
    }

    rank_proteins(&mut summary_rows);
    let summary_path = config.results_dir.join("summary_all_proteins.csv");
    write_global_summary(&summary_path, &summary_rows)?;

    info!("Overall best results:");
    for row in &summary_rows {
        info!(
            "  {}: {} at {:.2} kcal/mol ({} ligand(s) tested)",
            row.protein, row.best_ligand, row.best_affinity, row.ligands_tested
        );
    }
    info!("Summary saved to {}", summary_path.display());

    summary.summary_table = Some(summary_path);
    Ok(summary)
}

/// Dock every ligand against one protein, returning the ranked records.
fn screen_protein(
    config: &ScreenConfig,
    engine: &VinaEngine,
    protein_path: &Path,
    bbox: &SearchBox,
    ligands: &[PathBuf],
    summary: &mut ScreenSummary,
) -> Result<Vec<LigandRecord>, ScreenError> {
    let protein_name = file_stem(protein_path);

    info!(
        "Search box center ({:.2}, {:.2}, {:.2}), size ({:.2}, {:.2}, {:.2})",
        bbox.center.x, bbox.center.y, bbox.center.z, bbox.size.x, bbox.size.y, bbox.size.z
    );

    let config_path = config.config_dir.join(format!("{protein_name}_config.txt"));
    write_config(protein_path, &config_path, bbox, &config.params)?;
    info!("Config file created: {}", config_path.display());

    let protein_results_dir = config.results_dir.join(&protein_name);
    fs::create_dir_all(&protein_results_dir)?;

    let mut records = Vec::new();

    for (ligand_index, ligand_path) in ligands.iter().enumerate() {
        let ligand_name = file_stem(ligand_path);
        summary.jobs_attempted += 1;

        let output_path = protein_results_dir.join(format!("{ligand_name}_out.pdbqt"));
        let log_path = protein_results_dir.join(format!("{ligand_name}_log.txt"));

        info!(
            "  [{}/{}] Docking {} against {}",
            ligand_index + 1,
            ligands.len(),
            ligand_name,
            protein_name
        );

        let log_text = match engine.dock(&config_path, ligand_path, &output_path, &log_path) {
            Ok(text) => text,
            Err(e) => {
                warn!("Docking {} against {} failed: {}", ligand_name, protein_name, e);
                continue;
            }
        };

        match best_affinity(&log_text) {
            Some(affinity) => {
                info!("    Best affinity {:.2} kcal/mol", affinity);
                records.push(LigandRecord {
                    ligand: ligand_name,
                    affinity,
                    output_file: output_path,
                    log_file: log_path,
                });
                summary.jobs_succeeded += 1;
            }
            None => {
                warn!(
                    "No affinity found in docking output for {} against {}",
                    ligand_name, protein_name
                );
            }
        }
    }

    rank_ligands(&mut records);
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn discovery_prefers_pdbqt_over_pdb() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.pdb"), "").unwrap();
        fs::write(dir.path().join("b.pdbqt"), "").unwrap();

        let proteins = discover_proteins(dir.path()).unwrap();

        assert_eq!(proteins.len(), 1);
        assert_eq!(file_stem(&proteins[0]), "b");
    }

    #[test]
    fn discovery_falls_back_to_pdb() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("only.pdb"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let proteins = discover_proteins(dir.path()).unwrap();

        assert_eq!(proteins.len(), 1);
        assert_eq!(file_stem(&proteins[0]), "only");
    }

    #[test]
    fn empty_protein_dir_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            discover_proteins(dir.path()),
            Err(ScreenError::NoProteins(_))
        ));
    }

    #[test]
    fn ligands_must_be_pdbqt() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("lig.pdb"), "").unwrap();

        assert!(matches!(
            discover_ligands(dir.path()),
            Err(ScreenError::NoLigands(_))
        ));
    }

    #[test]
    fn discovery_order_is_sorted_by_name() {
        let dir = tempdir().unwrap();
        for name in ["zeta.pdbqt", "alpha.pdbqt", "mid.pdbqt"] {
            fs::write(dir.path().join(name), "").unwrap();
        }

        let ligands = discover_ligands(dir.path()).unwrap();
        let names: Vec<String> = ligands.iter().map(|p| file_stem(p)).collect();

        assert_eq!(names, ["alpha", "mid", "zeta"]);
    }
}
