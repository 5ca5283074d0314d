//! Batch files of library datasets
//!
//! A batch file names any number of dataset configurations and the subset of
//! them to run.
//!
//! ```yaml
//! active_datasets: [mo99, ac225]
//! datasets:
//!   mo99:
//!     recursive: ["Mo-99"]
//!     output_dir: ./out
//!   ac225:
//!     recursive: ["Ac-225"]
//!     static: ["Tc-99m;142.6836"]
//!     cutoffs: { energy: [0, 3000], intensity: [0.1, 100] }
//!     sort_by: energy
//! ```

// standard library
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

// external crates
use log::{info, warn};
use serde::Deserialize;

// rnlib modules
use rnlib_chain::{generate, LibraryConfig};
use rnlib_iaea::{LiveChart, UnavailableRegistry};

// internal modules
use crate::error::Result;
use crate::report::write_dataset;

/// Contents of a batch file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Batch {
    /// Names of the datasets to run, in order
    pub active_datasets: Vec<String>,
    /// Every dataset configuration by name
    pub datasets: BTreeMap<String, LibraryConfig>,
}

impl Batch {
    /// Read a batch file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    /// Parse batch file contents
    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Active datasets that are defined, in order
    ///
    /// Blank or undefined names are skipped with a warning.
    pub fn active(&self) -> Vec<(&str, &LibraryConfig)> {
        let mut active = Vec::new();
        for name in &self.active_datasets {
            let name = name.trim();
            if name.is_empty() {
                warn!("Skipping blank dataset name");
                continue;
            }
            match self.datasets.get(name) {
                Some(config) => active.push((name, config)),
                None => warn!("Skipping \"{name}\", no such dataset"),
            }
        }
        active
    }
}

/// Generate one dataset from the IAEA chart and write its reports
///
/// The data directory and registry of the dataset configuration are used,
/// and the offline flag is set if either the configuration or the caller
/// asks for it. Returns the paths of every file written.
pub fn run_dataset(name: &str, config: &LibraryConfig, offline: bool) -> Result<Vec<PathBuf>> {
    info!("Generating dataset \"{name}\"");

    let registry = UnavailableRegistry::open(&config.unavailable_registry)?;
    let mut chart = LiveChart::new(&config.data_dir, registry).offline(config.offline || offline);

    let library = generate(config, &mut chart)?;
    write_dataset(name, config, &library)
}
