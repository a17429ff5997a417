//! Vina configuration files
//!
//! A docking run is driven by a plain `key = value` text file naming the
//! receptor, the search box, and the search parameters. The file is rewritten
//! for every protein; writes go through a temporary file so a crash never
//! leaves a half-written config behind.

use crate::grid::SearchBox;
use std::fs;
use std::path::Path;

/// Search parameters passed through to the docking executable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchParams {
    /// Exhaustiveness of the search (higher values increase accuracy but take longer)
    pub exhaustiveness: u32,

    /// Number of binding modes to generate
    pub num_modes: u32,

    /// Energy range for output poses (kcal/mol)
    pub energy_range: f64,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            exhaustiveness: 8,
            num_modes: 9,
            energy_range: 3.0,
        }
    }
}

/// Render the config text for one receptor.
///
/// Box coordinates are formatted to 3 decimal places, matching the precision
/// of the fixed-column structure format they came from.
pub fn render_config(receptor: &Path, bbox: &SearchBox, params: &SearchParams) -> String {
    format!(
        "receptor = {}\n\
         center_x = {:.3}\n\
         center_y = {:.3}\n\
         center_z = {:.3}\n\
         size_x = {:.3}\n\
         size_y = {:.3}\n\
         size_z = {:.3}\n\
         exhaustiveness = {}\n\
         num_modes = {}\n\
         energy_range = {}\n",
        receptor.display(),
        bbox.center.x,
        bbox.center.y,
        bbox.center.z,
        bbox.size.x,
        bbox.size.y,
        bbox.size.z,
        params.exhaustiveness,
        params.num_modes,
        params.energy_range,
    )
}

/// Write the config for one receptor to `destination`, replacing any existing
/// file, and return the rendered text for logging.
pub fn write_config(
    receptor: &Path,
    destination: &Path,
    bbox: &SearchBox,
    params: &SearchParams,
) -> std::io::Result<String> {
    let content = render_config(receptor, bbox, params);

    let staging = destination.with_extension("tmp");
    fs::write(&staging, &content)?;
    fs::rename(&staging, destination)?;

    Ok(content)
}
