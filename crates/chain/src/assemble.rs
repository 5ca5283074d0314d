//! Library assembly from the radiation tables of every nuclide
//!
//! Each nuclide contributes only the rows that can physically occur given
//! how it was produced, with isomeric rows split out under their own name.

// standard library
use std::cmp::Ordering;

// external crates
use log::{debug, trace};
use serde::Serialize;

// rnlib modules
use rnlib_iaea::{DataProvider, Nuclide, RadType, Record};
use rnlib_utils::{f, SliceExt};

// internal modules
use crate::config::{Cutoffs, SortBy};
use crate::error::{tolerate, Result};
use crate::label::{LabelContext, LabelTemplate};
use crate::levels::{LevelEntry, LevelRegistry};

/// Everything that controls the content and order of the library
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblyOptions {
    /// Radiation type of the spectrum
    pub rad_type: RadType,
    /// Windows every row must fall in
    pub cutoffs: Cutoffs,
    /// Final ordering
    pub sort_by: SortBy,
    /// Database name written to every row
    pub database: String,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        Self {
            rad_type: RadType::Gamma,
            cutoffs: Cutoffs::default(),
            sort_by: SortBy::default(),
            database: "ENSDF".to_string(),
        }
    }
}

/// A single radiation of the final library
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LibraryRow {
    /// Nuclide the radiation belongs to, isomer state included
    pub radionuclide: Nuclide,
    /// Position within the radionuclide, starting at 1
    pub radiation_number: usize,
    /// Most intense radiation of the radionuclide
    pub key_radiation: bool,
    /// Source of the nuclear data
    pub database: String,
    /// The radiation record itself
    pub record: Record,
}

impl LibraryRow {
    /// Annotation label for the row
    pub fn label(&self, template: LabelTemplate) -> String {
        let energies = self.record.energy.map(|e| vec![e]).unwrap_or_default();
        template.render(&LabelContext {
            nuclide: Some(&self.radionuclide),
            energies: &energies,
            decay_mode: self.record.decay_mode.as_deref(),
        })
    }
}

/// Build the library rows of every nuclide in a subset
///
/// Nuclides are processed in subset order. For each one the decay radiation
/// table of the spectrum type is fetched and passed through the cutoffs. If
/// the nuclide has a level entry, only rows starting from a reachable level
/// with a feasible decay mode are kept, and rows from isomeric levels are
/// labelled as the isomer. Unknown decay modes are kept.
///
/// The isomer rows of a nuclide come first, and both groups are numbered
/// from 1 with their own key radiation. Nuclides without data contribute
/// nothing.
pub fn assemble<P: DataProvider>(
    subset: &[Nuclide],
    registry: &LevelRegistry,
    provider: &mut P,
    options: &AssemblyOptions,
) -> Result<Vec<LibraryRow>> {
    let mut rows = Vec::new();

    for nuclide in subset {
        let nuclide = nuclide.intrinsic();
        if provider.is_unavailable(&nuclide, options.rad_type) {
            trace!("{nuclide} has no {} data", options.rad_type);
            continue;
        }

        let what = f!("{nuclide} {}", options.rad_type);
        let Some(records) = tolerate(provider.decay_radiation(&nuclide, options.rad_type), what)?
        else {
            continue;
        };

        let records = records
            .into_iter()
            .filter(|r| options.cutoffs.passes(r))
            .collect::<Vec<Record>>();

        if records.is_empty() {
            debug!("{nuclide} has nothing within the cutoffs");
            continue;
        }

        let labelled = match registry.get(&nuclide) {
            Some(entry) => constrain(&nuclide, entry, records),
            None => records.into_iter().map(|r| (nuclide.clone(), r)).collect(),
        };

        debug!("{nuclide} contributes {} rows", labelled.len());
        rows.extend(number(labelled, &options.database));
    }

    sort(&mut rows, options.sort_by, subset);
    Ok(rows)
}

/// Keep reachable rows with feasible modes and label isomeric ones
fn constrain(nuclide: &Nuclide, entry: &LevelEntry, records: Vec<Record>) -> Vec<(Nuclide, Record)> {
    let mut isomer = Vec::new();
    let mut ground = Vec::new();

    for record in records {
        let Some(level) = record.p_energy else {
            continue;
        };

        if !entry.flattened_levels.contains(&level) {
            trace!("{nuclide} dropped row from unreachable level {level}");
            continue;
        }

        let infeasible = record
            .decay_mode
            .as_ref()
            .and_then(|m| entry.decay_modes.get(m))
            .is_some_and(|m| !m.is_feasible);
        if infeasible {
            continue;
        }

        if entry.isomer_energies.contains(&level) {
            isomer.push((nuclide.isomer(), record));
        } else {
            ground.push((nuclide.clone(), record));
        }
    }

    isomer.extend(ground);
    isomer
}

/// Number each radionuclide from 1 and flag its most intense rows
fn number(labelled: Vec<(Nuclide, Record)>, database: &str) -> Vec<LibraryRow> {
    let mut rows: Vec<LibraryRow> = Vec::with_capacity(labelled.len());
    let mut start = 0;

    for (radionuclide, record) in labelled {
        if rows.last().is_some_and(|r| r.radionuclide != radionuclide) {
            flag_key_radiation(&mut rows[start..]);
            start = rows.len();
        }

        rows.push(LibraryRow {
            radiation_number: rows.len() - start + 1,
            radionuclide,
            key_radiation: false,
            database: database.to_string(),
            record,
        });
    }

    flag_key_radiation(&mut rows[start..]);
    rows
}

fn flag_key_radiation(group: &mut [LibraryRow]) {
    let intensities = group
        .iter()
        .filter_map(|r| r.record.intensity)
        .collect::<Vec<f64>>();

    if let Ok(max) = intensities.try_max() {
        for row in group {
            row.key_radiation = row.record.intensity == Some(max);
        }
    }
}

/// Stable ordering of the whole library
fn sort(rows: &mut [LibraryRow], sort_by: SortBy, subset: &[Nuclide]) {
    match sort_by {
        SortBy::AsIs => {}
        SortBy::Energy => rows.sort_by(|a, b| ascending(a.record.energy, b.record.energy)),
        SortBy::Intensity => {
            rows.sort_by(|a, b| ascending(a.record.intensity, b.record.intensity))
        }
        SortBy::HalfLife => {
            rows.sort_by(|a, b| ascending(a.record.half_life_sec, b.record.half_life_sec))
        }
        SortBy::Radionuclide => {
            let position = |row: &LibraryRow| {
                let intrinsic = row.radionuclide.intrinsic();
                subset
                    .iter()
                    .position(|n| n.intrinsic() == intrinsic)
                    .unwrap_or(subset.len())
            };
            rows.sort_by_key(position);
        }
    }
}

/// Ascending order with missing values last
fn ascending(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
