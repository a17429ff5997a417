//! Dockscreen: an automated molecular docking screen pipeline
//!
//! This library drives an external AutoDock Vina compatible executable across
//! a set of receptor structures and ligand candidates: it derives a search box
//! from receptor coordinates, emits a Vina configuration file, runs one
//! docking subprocess per (receptor, ligand) pair, extracts the best binding
//! affinity from the tool's output, and ranks the results per protein and
//! globally.

pub mod affinity;
pub mod config;
pub mod engine;
pub mod grid;
pub mod io;
pub mod report;
pub mod screen;

// Re-export commonly used types and functions
pub use grid::SearchBox;
pub use report::LigandRecord;
pub use screen::{run_screen, ScreenConfig};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
