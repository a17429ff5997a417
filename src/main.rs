//! Main executable for dockscreen
//!
//! Runs a full docking screen with the compiled-in layout: receptors from
//! `Protein/`, ligands from `Ligand/`, configs into `config_files/`, results
//! into `docking_results/`, docking via `./vina`. Exits 0 on completion even
//! when individual jobs failed; exits 1 on setup errors.

use anyhow::{Context, Result};
use env_logger::Env;
use log::{info, warn};

use dockscreen::screen::{run_screen, ScreenConfig};

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = ScreenConfig::default();

    info!("Automated molecular docking screen (dockscreen {})", dockscreen::VERSION);
    info!(
        "Receptors from {}, ligands from {}, docking with {}",
        config.protein_dir.display(),
        config.ligand_dir.display(),
        config.executable.display()
    );

    let summary = run_screen(&config).context("docking screen aborted")?;

    info!(
        "Screen completed: {}/{} docking job(s) succeeded across {} protein(s)",
        summary.jobs_succeeded, summary.jobs_attempted, summary.proteins_processed
    );
    if summary.proteins_skipped > 0 {
        warn!("{} protein(s) skipped due to parse errors", summary.proteins_skipped);
    }
    match &summary.summary_table {
        Some(path) => info!("Global summary: {}", path.display()),
        None => warn!("No successful dockings completed, no summary written"),
    }

    Ok(())
}
