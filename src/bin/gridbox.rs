//! Standalone grid-box calculator
//!
//! Prints the unpadded bounding box of a single receptor structure, ready to
//! paste into a Vina config. Unlike the screen pipeline, no padding is added:
//! this tool reports the raw extent of the structure.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use dockscreen::grid::SearchBox;
use dockscreen::io::parse_structure;

#[derive(Parser, Debug)]
#[clap(
    name = "gridbox",
    version = dockscreen::VERSION,
    about = "Print grid box parameters for a receptor structure"
)]
struct Cli {
    /// Structure file (PDB or PDBQT) to measure
    structure: PathBuf,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return ExitCode::FAILURE;
        }
    };

    if !cli.structure.exists() {
        eprintln!("Error: file '{}' not found.", cli.structure.display());
        return ExitCode::FAILURE;
    }

    let coordinates = match parse_structure(&cli.structure) {
        Ok(coordinates) => coordinates,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let bbox = match SearchBox::tight_enclosing(&coordinates) {
        Ok(bbox) => bbox,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("Grid box parameters for {}:", cli.structure.display());
    println!("CENTER_X = {:.3}", bbox.center.x);
    println!("CENTER_Y = {:.3}", bbox.center.y);
    println!("CENTER_Z = {:.3}", bbox.center.z);
    println!("SIZE_X = {:.3}", bbox.size.x);
    println!("SIZE_Y = {:.3}", bbox.size.y);
    println!("SIZE_Z = {:.3}", bbox.size.z);

    ExitCode::SUCCESS
}
