//! Report files for a generated library
//!
//! Every dataset produces:
//! - `<name>_library.csv`: the final library table
//! - `<name>_<progenitor>_lineage.yaml`: lineage of each recursive progenitor
//! - `<name>_levels.yaml`: levels and decay modes of every nuclide involved

// standard library
use std::fs;
use std::path::{Path, PathBuf};

// external crates
use log::{debug, info};
use serde::Serialize;

// rnlib modules
use rnlib_chain::{
    LabelTemplate, LevelRegistry, Library, LibraryConfig, LibraryRow, LineageNode,
};
use rnlib_iaea::Nuclide;
use rnlib_utils::f;

// internal modules
use crate::error::Result;

/// Flat representation of a library row for the CSV table
///
/// Provider metadata (spin and parity, evaluated half-life, branching and
/// ENSDF provenance) is passed through as it was read.
#[derive(Debug, Serialize)]
struct TableRow<'a> {
    radionuclide: &'a Nuclide,
    radiation_number: usize,
    key_radiation: u8,
    energy: Option<f64>,
    unc_en: Option<f64>,
    intensity: Option<f64>,
    unc_i: Option<f64>,
    parent_level: Option<f64>,
    jp: Option<&'a str>,
    half_life: Option<f64>,
    unc_hl: Option<f64>,
    unit_hl: Option<&'a str>,
    half_life_sec: Option<f64>,
    unc_hls: Option<f64>,
    decay_mode: Option<&'a str>,
    branching: Option<f64>,
    unc_b: Option<f64>,
    daughter: Option<Nuclide>,
    daughter_level: Option<f64>,
    database: &'a str,
    ensdf_cutoff: Option<&'a str>,
    ensdf_authors: Option<&'a str>,
    extraction_date: Option<&'a str>,
    label: String,
}

impl<'a> TableRow<'a> {
    fn new(row: &'a LibraryRow, template: LabelTemplate) -> Self {
        let record = &row.record;
        Self {
            radionuclide: &row.radionuclide,
            radiation_number: row.radiation_number,
            key_radiation: u8::from(row.key_radiation),
            energy: record.energy,
            unc_en: record.unc_en,
            intensity: record.intensity,
            unc_i: record.unc_i,
            parent_level: record.p_energy,
            jp: record.jp.as_deref(),
            half_life: record.half_life,
            unc_hl: record.unc_hl,
            unit_hl: record.unit_hl.as_deref(),
            half_life_sec: record.half_life_sec,
            unc_hls: record.unc_hls,
            decay_mode: record.decay_mode.as_deref(),
            branching: record.branching,
            unc_b: record.unc_b,
            daughter: record.daughter(),
            daughter_level: record.daughter_level_energy,
            database: &row.database,
            ensdf_cutoff: record.ensdf_cutoff.as_deref(),
            ensdf_authors: record.ensdf_authors.as_deref(),
            extraction_date: record.extraction_date.as_deref(),
            label: row.label(template),
        }
    }
}

/// Write the library table as CSV
pub fn write_library<P: AsRef<Path>>(
    path: P,
    rows: &[LibraryRow],
    template: LabelTemplate,
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    for row in rows {
        writer.serialize(TableRow::new(row, template))?;
    }
    writer.flush()?;
    debug!("Wrote {} rows to {:?}", rows.len(), path.as_ref());
    Ok(())
}

/// Write the lineage of a progenitor as nested YAML maps
pub fn write_lineage<P: AsRef<Path>>(path: P, lineage: &LineageNode) -> Result<()> {
    let text = f!(
        "# Identified lineage of {}\n\n{}",
        lineage.nuclide,
        serde_yaml::to_string(lineage)?
    );
    fs::write(path, text)?;
    Ok(())
}

/// Write the level registry as YAML
pub fn write_levels<P: AsRef<Path>>(path: P, registry: &LevelRegistry) -> Result<()> {
    let text = f!(
        "# Energy levels of the involved radionuclides\n\n{}",
        serde_yaml::to_string(registry)?
    );
    fs::write(path, text)?;
    Ok(())
}

/// Write every report of a dataset to its output directory
///
/// Returns the paths written, library table first.
pub fn write_dataset(
    name: &str,
    config: &LibraryConfig,
    library: &Library,
) -> Result<Vec<PathBuf>> {
    let dir = &config.output_dir;
    fs::create_dir_all(dir)?;

    let mut written = Vec::new();

    let path = dir.join(f!("{name}_library.csv"));
    write_library(&path, &library.rows, config.label)?;
    written.push(path);

    for (progenitor, lineage) in library.lineages() {
        let path = dir.join(f!("{name}_{}_lineage.yaml", progenitor.nuclide));
        write_lineage(&path, &lineage)?;
        written.push(path);
    }

    let path = dir.join(f!("{name}_levels.yaml"));
    write_levels(&path, &library.context.registry)?;
    written.push(path);

    info!("Wrote {} reports for \"{name}\" to {dir:?}", written.len());
    Ok(written)
}
