//! Persistent record of nuclide and radiation pairs with no data

// standard library
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

// external crates
use log::{debug, warn};

// rnlib modules
use rnlib_utils::f;

// internal modules
use crate::common::{Nuclide, RadType};
use crate::error::Result;

/// Known-unavailable registry
///
/// Pairs of a nuclide and decay radiation type for which the API reported that
/// no dataset exists (error code 0). These are never requested again.
///
/// The file format is one `<nuclide>_<rad type>` entry per line, sorted and
/// free of duplicates, e.g.
///
/// ```text
/// Ac-225_bm
/// Ac-225_bp
/// Tc-99_a
/// ```
///
/// A registry without a path only lives in memory.
#[derive(Debug, Default, Clone)]
pub struct UnavailableRegistry {
    path: Option<PathBuf>,
    entries: BTreeSet<(Nuclide, RadType)>,
}

impl UnavailableRegistry {
    /// Registry that is never written to disk
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load a registry file, creating it if it does not exist yet
    ///
    /// Lines that can not be interpreted are skipped with a warning.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            File::create(&path)?;
            debug!("Created unavailable registry {path:?}");
        }

        let mut entries = BTreeSet::new();
        for line in BufReader::new(File::open(&path)?).lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match parse_entry(line) {
                Some(entry) => {
                    entries.insert(entry);
                }
                None => warn!("Skipping unrecognised registry entry \"{line}\""),
            }
        }

        debug!("Loaded {} unavailable entries from {path:?}", entries.len());
        Ok(Self {
            path: Some(path),
            entries,
        })
    }

    /// Check if a pair is known to have no data
    pub fn contains(&self, nuclide: &Nuclide, rad_type: RadType) -> bool {
        self.entries.contains(&(nuclide.clone(), rad_type))
    }

    /// Add a pair, writing the whole registry back to disk if file backed
    ///
    /// Returns `true` if the pair was not already known.
    pub fn insert(&mut self, nuclide: &Nuclide, rad_type: RadType) -> Result<bool> {
        let added = self.entries.insert((nuclide.clone(), rad_type));
        if added {
            self.persist()?;
        }
        Ok(added)
    }

    /// Number of known pairs
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check for an empty registry
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registry file entries in file order
    pub fn lines(&self) -> Vec<String> {
        let mut lines = self
            .entries
            .iter()
            .map(|(nuclide, rad_type)| entry_name(nuclide, *rad_type))
            .collect::<Vec<String>>();
        lines.sort();
        lines
    }

    fn persist(&self) -> Result<()> {
        if let Some(path) = &self.path {
            let mut f = File::create(path)?;
            for line in self.lines() {
                writeln!(f, "{line}")?;
            }
        }
        Ok(())
    }
}

/// Registry name of a pair, e.g. `Tc-99_g`
pub(crate) fn entry_name(nuclide: &Nuclide, rad_type: RadType) -> String {
    f!("{}_{}", nuclide.name(), rad_type.query_symbol())
}

fn parse_entry(line: &str) -> Option<(Nuclide, RadType)> {
    let (nuclide, rad_type) = line.rsplit_once('_')?;
    Some((nuclide.parse().ok()?, rad_type.parse().ok()?))
}
