//! Per-nuclide registry of reachable energy levels
//!
//! Every nuclide touched during a run gets a [LevelEntry], keyed by its
//! intrinsic (ground state) identity. Entries only ever grow: new inheritance
//! sources and decay modes are added, nothing is removed until the run ends.

// standard library
use std::collections::BTreeMap;

// external crates
use log::{debug, trace};
use serde::{Serialize, Serializer};

// rnlib modules
use rnlib_iaea::{GammaTransition, Interval, Level, Nuclide};
use rnlib_utils::UniqueExt;

// internal modules
use crate::cascade::resolve_end_levels;
use crate::config::Progenitor;

/// Where a set of inherited levels came from
///
/// Displayed as the keys used in level reports.
///
/// ```rust
/// # use rnlib_chain::SourceTag;
/// # use rnlib_iaea::Nuclide;
/// # use std::str::FromStr;
/// let parent = SourceTag::Parent(Nuclide::from_str("Mo-99").unwrap());
/// assert_eq!(parent.to_string(), "from_Mo-99");
/// assert_eq!(SourceTag::UserInput.to_string(), "user_input");
/// assert_eq!(SourceTag::GammaCascade.to_string(), "gamma_cascade");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SourceTag {
    /// Levels fed by the decay of a parent nuclide
    Parent(Nuclide),
    /// Levels given explicitly for a progenitor
    UserInput,
    /// Levels reached by gamma de-excitation of inherited levels
    GammaCascade,
}

impl std::fmt::Display for SourceTag {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            SourceTag::Parent(nuclide) => write!(f, "from_{nuclide}"),
            SourceTag::UserInput => write!(f, "user_input"),
            SourceTag::GammaCascade => write!(f, "gamma_cascade"),
        }
    }
}

impl Serialize for SourceTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Level windows and feasibility of a single decay mode
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DecayModeRecord {
    /// Spin and parity of every level with this decay mode
    pub jp: Vec<String>,
    /// Energy windows of every level with this decay mode
    pub level_intervals: Vec<Interval>,
    /// At least one reachable level falls in one of the windows
    pub is_feasible: bool,
    /// The mode is reached from an isomeric level
    pub is_isomer: bool,
    /// Reachable levels that made the mode feasible
    pub feasible_energies: Vec<f64>,
}

impl DecayModeRecord {
    /// Check if a level falls inside any of the windows
    pub fn matches(&self, level: f64) -> bool {
        self.level_intervals.iter().any(|i| i.contains(level))
    }
}

/// Everything known about the levels of one nuclide
#[derive(Debug, Clone, Default, Serialize)]
pub struct LevelEntry {
    /// Parent nuclides in order of discovery
    pub parents: Vec<Nuclide>,
    /// Daughter nuclides in order of discovery
    pub daughters: Vec<Nuclide>,
    /// Inherited levels grouped by source, each free of duplicates
    pub inherited_levels: BTreeMap<SourceTag, Vec<f64>>,
    /// Union of every inherited level, highest first
    pub flattened_levels: Vec<f64>,
    /// Decay modes found in the level table
    pub decay_modes: BTreeMap<String, DecayModeRecord>,
    /// Set once when the nuclide is given as a progenitor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_isomer_progenitor: Option<bool>,
    /// Levels of an isomeric progenitor, consumed by the feasibility check
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isomer_progenitor_levels: Option<Vec<f64>>,
    /// Reachable levels that belong to an isomer
    pub isomer_energies: Vec<f64>,
}

impl LevelEntry {
    /// Add levels from a source, returning how many were new to it
    pub fn inherit<I: IntoIterator<Item = f64>>(&mut self, source: SourceTag, levels: I) -> usize {
        self.inherited_levels
            .entry(source)
            .or_default()
            .extend_unique(levels)
    }

    /// Merge every inherited source into the flattened levels
    ///
    /// Existing flattened levels are never removed, so this can be called
    /// as often as needed.
    pub fn flatten(&mut self) {
        for levels in self.inherited_levels.values() {
            self.flattened_levels.extend_unique(levels.iter().copied());
        }
        self.flattened_levels.sort_by(|a, b| b.total_cmp(a));
    }

    /// Distinct levels inherited from anything other than a gamma cascade
    pub fn cascade_starts(&self) -> Vec<f64> {
        let mut starts = Vec::new();
        for (source, levels) in &self.inherited_levels {
            if *source != SourceTag::GammaCascade {
                starts.extend_unique(levels.iter().copied());
            }
        }
        starts
    }

    /// Fill in decay modes from a level table
    ///
    /// Does nothing if decay modes are already known. Each mode collects the
    /// window and spin/parity of every level listing it, in table order.
    pub fn set_decay_modes(&mut self, levels: &[Level]) {
        if !self.decay_modes.is_empty() {
            return;
        }

        for level in levels {
            let Some(interval) = level.interval() else {
                continue;
            };

            let mut seen = Vec::new();
            for mode in level.modes() {
                if !seen.push_unique(mode) {
                    continue;
                }
                let record = self.decay_modes.entry(mode.to_string()).or_default();
                record.jp.push(level.jp.clone().unwrap_or_default());
                record.level_intervals.push(interval);
            }
        }
    }
}

/// Registry of level entries for every nuclide in a run
///
/// Keyed by intrinsic nuclide, so a ground state and its isomers share one
/// entry.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct LevelRegistry {
    entries: BTreeMap<Nuclide, LevelEntry>,
}

impl LevelRegistry {
    /// Entry for a nuclide, created empty if missing
    pub fn entry(&mut self, nuclide: &Nuclide) -> &mut LevelEntry {
        self.entries.entry(nuclide.intrinsic()).or_default()
    }

    /// Entry for a nuclide if one exists
    pub fn get(&self, nuclide: &Nuclide) -> Option<&LevelEntry> {
        self.entries.get(&nuclide.intrinsic())
    }

    /// Iterate over every entry in nuclide order
    pub fn iter(&self) -> impl Iterator<Item = (&Nuclide, &LevelEntry)> {
        self.entries.iter()
    }

    /// Mutable iteration over every entry in nuclide order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&Nuclide, &mut LevelEntry)> {
        self.entries.iter_mut()
    }

    /// Number of nuclides with an entry
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check for an empty registry
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a user designated progenitor
    ///
    /// The explicit levels are inherited as user input. For isomers the same
    /// levels are also tagged for the feasibility check. Whether the nuclide
    /// is an isomeric progenitor is only ever set the first time.
    pub fn register_progenitor(&mut self, progenitor: &Progenitor) {
        let entry = self.entry(&progenitor.nuclide);
        let is_isomer = progenitor.nuclide.is_isomer();

        if entry.is_isomer_progenitor.is_none() {
            entry.is_isomer_progenitor = Some(is_isomer);
        }

        if is_isomer {
            entry
                .isomer_progenitor_levels
                .get_or_insert_with(Vec::new)
                .extend_unique(progenitor.levels.iter().copied());
        }

        entry.inherit(SourceTag::UserInput, progenitor.levels.iter().copied());
    }

    /// Add decay modes from a level table
    pub fn set_decay_modes(&mut self, nuclide: &Nuclide, levels: &[Level]) {
        let entry = self.entry(nuclide);
        entry.set_decay_modes(levels);
        trace!("{nuclide} has decay modes {:?}", entry.decay_modes.keys());
    }

    /// Extend the gamma cascade source of a nuclide
    ///
    /// Every distinct level inherited from a parent or the user is followed
    /// down the gamma transitions, and newly reached levels are added to the
    /// gamma cascade source without duplicates.
    pub fn resolve_cascade(&mut self, nuclide: &Nuclide, transitions: &[GammaTransition]) {
        let entry = self.entry(nuclide);
        let starts = entry.cascade_starts();

        let mut reached = Vec::new();
        for start in starts {
            reached.extend_unique(resolve_end_levels(transitions, start));
        }

        if reached.is_empty() {
            return;
        }

        let added = entry.inherit(SourceTag::GammaCascade, reached);
        debug!("{nuclide} gamma cascade added {added} levels");
    }

    /// Flatten every entry
    pub fn flatten_all(&mut self) {
        self.entries.values_mut().for_each(LevelEntry::flatten);
    }
}
