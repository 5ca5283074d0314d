//! Per-dataset working state

// standard library
use std::collections::BTreeMap;

// external crates
use log::debug;

// rnlib modules
use rnlib_iaea::{DataProvider, GammaTransition, Level, Nuclide};
use rnlib_utils::f;

// internal modules
use crate::error::{tolerate, Result};
use crate::levels::LevelRegistry;
use crate::lineage::LineageTree;

/// Everything built up while processing one dataset
///
/// A fresh context is created for every dataset and passed to each stage, so
/// nothing leaks between datasets. Gamma and level tables are only requested
/// once per nuclide, including the ones found to be unavailable.
#[derive(Debug, Default)]
pub struct RunContext {
    /// Levels and decay modes of every nuclide seen
    pub registry: LevelRegistry,
    /// Decay relationships found by discovery
    pub lineage: LineageTree,
    gammas: BTreeMap<Nuclide, Option<Vec<GammaTransition>>>,
    levels: BTreeMap<Nuclide, Option<Vec<Level>>>,
}

impl RunContext {
    /// Empty context for a new dataset
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the gamma cascade and decay modes of a nuclide up to date
    ///
    /// The gamma cascade is extended from whatever levels have been
    /// inherited so far, and the decay modes are filled in from the level
    /// table if not already known. Missing tables leave the entry as is.
    pub fn resolve_levels<P: DataProvider>(
        &mut self,
        provider: &mut P,
        nuclide: &Nuclide,
    ) -> Result<()> {
        let nuclide = nuclide.intrinsic();
        self.registry.entry(&nuclide);

        if !self.gammas.contains_key(&nuclide) {
            let table = tolerate(provider.gammas(&nuclide), f!("{nuclide} gammas"))?;
            debug!("{nuclide} gammas: {} rows", table.as_ref().map_or(0, Vec::len));
            self.gammas.insert(nuclide.clone(), table);
        }

        if let Some(Some(gammas)) = self.gammas.get(&nuclide) {
            self.registry.resolve_cascade(&nuclide, gammas);
        }

        if !self.levels.contains_key(&nuclide) {
            let table = tolerate(provider.levels(&nuclide), f!("{nuclide} levels"))?;
            debug!("{nuclide} levels: {} rows", table.as_ref().map_or(0, Vec::len));
            self.levels.insert(nuclide.clone(), table);
        }

        if let Some(Some(levels)) = self.levels.get(&nuclide) {
            self.registry.set_decay_modes(&nuclide, levels);
        }

        Ok(())
    }
}
