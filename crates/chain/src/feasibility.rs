//! Decay mode feasibility and isomer inference
//!
//! A decay mode is feasible when a level the nuclide can actually be found in
//! falls inside one of the level windows listed for that mode.

// external crates
use log::{debug, trace};

// rnlib modules
use rnlib_utils::UniqueExt;

// internal modules
use crate::levels::LevelRegistry;

/// Decay mode label of an isomeric transition
pub const ISOMERIC_TRANSITION: &str = "IT";

/// Mark every decay mode of every nuclide as feasible or not
///
/// Nuclides without decay modes are skipped. For the rest, the flattened
/// levels are recomputed and each is tested against the windows of every
/// mode. A matching level makes the mode feasible and is recorded in
/// `feasible_energies`. The match is isomeric if the mode is an isomeric
/// transition or the level was given for an isomeric progenitor, and
/// isomeric levels are collected in `isomer_energies`.
///
/// The isomeric progenitor levels are consumed here. Flags are only ever
/// raised, so evaluating again without new levels changes nothing.
pub fn evaluate(registry: &mut LevelRegistry) {
    for (nuclide, entry) in registry.iter_mut() {
        if entry.decay_modes.is_empty() {
            trace!("{nuclide} has no decay modes");
            continue;
        }

        entry.flatten();
        let progenitor_levels = entry.isomer_progenitor_levels.take().unwrap_or_default();

        for (mode, record) in entry.decay_modes.iter_mut() {
            for &level in &entry.flattened_levels {
                if !record.matches(level) {
                    continue;
                }

                record.is_feasible = true;
                record.feasible_energies.push_unique(level);

                if mode == ISOMERIC_TRANSITION || progenitor_levels.contains(&level) {
                    record.is_isomer = true;
                    entry.isomer_energies.push_unique(level);
                }
            }
        }

        debug!(
            "{nuclide} feasible modes {:?}",
            entry
                .decay_modes
                .iter()
                .filter(|(_, r)| r.is_feasible)
                .map(|(m, _)| m.as_str())
                .collect::<Vec<&str>>()
        );
    }
}
