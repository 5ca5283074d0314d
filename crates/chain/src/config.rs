//! Dataset configuration and progenitor parsing

// standard library
use std::path::PathBuf;
use std::str::FromStr;

// external crates
use log::warn;
use serde::{Deserialize, Serialize};

// rnlib modules
use rnlib_iaea::{Nuclide, RadType, Record};
use rnlib_utils::f;

// internal modules
use crate::error::{Error, Result};
use crate::label::LabelTemplate;

/// A nuclide designated by the user, with optional explicit levels
///
/// Written as the nuclide name followed by any number of `;` separated level
/// energies in keV. Without explicit levels the ground state is assumed.
///
/// ```rust
/// # use rnlib_chain::Progenitor;
/// # use std::str::FromStr;
/// let progenitor = Progenitor::from_str("Nb-92m;135.5").unwrap();
/// assert_eq!(progenitor.nuclide.name(), "Nb-92m");
/// assert_eq!(progenitor.levels, vec![135.5]);
///
/// let progenitor = Progenitor::from_str(" Mo-99 ").unwrap();
/// assert_eq!(progenitor.levels, vec![0.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Progenitor {
    /// Nuclide as given, isomer state included
    pub nuclide: Nuclide,
    /// Levels the progenitor starts from (keV)
    pub levels: Vec<f64>,
}

impl FromStr for Progenitor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split(';').map(str::trim);

        let nuclide = parts
            .next()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| Error::Configuration(f!("empty progenitor \"{s}\"")))?;
        let nuclide = parse_nuclide(nuclide)?;

        let mut levels = Vec::new();
        for part in parts.filter(|p| !p.is_empty()) {
            let level = part
                .parse::<f64>()
                .map_err(|_| Error::Configuration(f!("invalid level \"{part}\" in \"{s}\"")))?;
            levels.push(level);
        }

        if levels.is_empty() {
            if nuclide.is_isomer() {
                warn!("No level given for isomer {nuclide}, assuming 0 keV");
            }
            levels.push(0.0);
        }

        Ok(Self { nuclide, levels })
    }
}

/// Inclusive windows a radiation record must fall in
///
/// A missing value never passes, so records without an energy, intensity, or
/// half-life are always removed.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Cutoffs {
    /// Radiation energy window (keV)
    pub energy: [f64; 2],
    /// Radiation intensity window (%)
    pub intensity: [f64; 2],
    /// Parent half-life window (s)
    pub half_life_sec: [f64; 2],
}

impl Default for Cutoffs {
    fn default() -> Self {
        Self {
            energy: [0.0, f64::INFINITY],
            intensity: [0.0, f64::INFINITY],
            half_life_sec: [0.0, f64::INFINITY],
        }
    }
}

impl Cutoffs {
    /// Check a record against every window
    ///
    /// ```rust
    /// # use rnlib_chain::Cutoffs;
    /// # use rnlib_iaea::Record;
    /// let cutoffs = Cutoffs {
    ///     energy: [100.0, 200.0],
    ///     ..Default::default()
    /// };
    /// let record = Record {
    ///     energy: Some(140.511),
    ///     intensity: Some(89.0),
    ///     half_life_sec: Some(21624.12),
    ///     ..Default::default()
    /// };
    /// assert!(cutoffs.passes(&record));
    /// assert!(!cutoffs.passes(&Record { energy: None, ..record }));
    /// ```
    pub fn passes(&self, record: &Record) -> bool {
        within(record.energy, self.energy)
            && within(record.intensity, self.intensity)
            && within(record.half_life_sec, self.half_life_sec)
    }

    fn validate(&self) -> Result<()> {
        for (name, [low, high]) in [
            ("energy", self.energy),
            ("intensity", self.intensity),
            ("half_life_sec", self.half_life_sec),
        ] {
            if low.is_nan() || high.is_nan() || low > high {
                return Err(Error::Configuration(f!(
                    "{name} cutoff [{low}, {high}] is not a valid range"
                )));
            }
        }
        Ok(())
    }
}

fn within(value: Option<f64>, [low, high]: [f64; 2]) -> bool {
    value.is_some_and(|v| low <= v && v <= high)
}

/// Ordering of the final library rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    /// Nuclide by nuclide, in table order
    #[default]
    AsIs,
    /// Ascending radiation energy
    Energy,
    /// Ascending radiation intensity
    Intensity,
    /// Ascending parent half-life
    HalfLife,
    /// Order in which nuclides were first found
    Radionuclide,
}

/// Configuration of a single library dataset
///
/// Deserialised from the entries of a batch file, e.g.
///
/// ```yaml
/// recursive: ["Ac-225"]
/// static: ["Tc-99m;142.68"]
/// exclusion: []
/// spectrum_radiation: gamma
/// cutoffs: { energy: [0, 3000], intensity: [0.1, 100], half_life_sec: [0, 1e30] }
/// sort_by: energy
/// database: ENSDF
/// data_dir: ./data
/// unavailable_registry: ./data/unavailable.txt
/// output_dir: ./out
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LibraryConfig {
    /// Progenitors whose decay chains are followed
    pub recursive: Vec<String>,
    /// Progenitors included without following their decay
    #[serde(rename = "static")]
    pub statics: Vec<String>,
    /// Nuclides removed from the final library
    pub exclusion: Vec<String>,
    /// Radiation type of the library spectrum
    pub spectrum_radiation: String,
    /// Windows applied to every radiation record
    pub cutoffs: Cutoffs,
    /// Ordering of the final rows
    pub sort_by: SortBy,
    /// Name of the nuclear database, carried into every row
    pub database: String,
    /// Annotation label style
    pub label: LabelTemplate,
    /// Local cache of decay data tables
    pub data_dir: PathBuf,
    /// Known-unavailable registry file
    pub unavailable_registry: PathBuf,
    /// Directory for library and report files
    pub output_dir: PathBuf,
    /// Only use cached tables, never query the API
    pub offline: bool,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            recursive: Vec::new(),
            statics: Vec::new(),
            exclusion: Vec::new(),
            spectrum_radiation: "gamma".to_string(),
            cutoffs: Cutoffs::default(),
            sort_by: SortBy::default(),
            database: "ENSDF".to_string(),
            label: LabelTemplate::default(),
            data_dir: PathBuf::from("data"),
            unavailable_registry: PathBuf::from("data/unavailable.txt"),
            output_dir: PathBuf::from("."),
            offline: false,
        }
    }
}

impl LibraryConfig {
    /// Check everything that can be checked before touching any data
    pub fn validate(&self) -> Result<()> {
        self.spectrum_rad_type()?;
        self.cutoffs.validate()?;

        let recursive = self.recursive_progenitors()?;
        let statics = self.static_progenitors()?;
        if recursive.is_empty() && statics.is_empty() {
            return Err(Error::Configuration("no progenitors given".to_string()));
        }

        self.exclusions()?;
        Ok(())
    }

    /// Radiation type of the spectrum, which must be alpha, beta- or gamma
    pub fn spectrum_rad_type(&self) -> Result<RadType> {
        let rad_type = RadType::from_str(&self.spectrum_radiation)
            .map_err(|e| Error::Configuration(e.to_string()))?;
        match rad_type {
            RadType::Alpha | RadType::BetaMinus | RadType::Gamma => Ok(rad_type),
            _ => Err(Error::Configuration(f!(
                "spectrum radiation must be alpha, beta minus, or gamma, not \"{}\"",
                self.spectrum_radiation
            ))),
        }
    }

    /// Parsed recursive progenitors, blank entries skipped
    pub fn recursive_progenitors(&self) -> Result<Vec<Progenitor>> {
        parse_non_blank(&self.recursive)
    }

    /// Parsed static progenitors, blank entries skipped
    pub fn static_progenitors(&self) -> Result<Vec<Progenitor>> {
        parse_non_blank(&self.statics)
    }

    /// Parsed exclusions as intrinsic nuclides
    pub fn exclusions(&self) -> Result<Vec<Nuclide>> {
        let mut nuclides = Vec::new();
        for name in self.exclusion.iter().filter(|n| !n.trim().is_empty()) {
            nuclides.push(parse_nuclide(name)?.intrinsic());
        }
        Ok(nuclides)
    }
}

fn parse_nuclide(name: &str) -> Result<Nuclide> {
    Nuclide::from_str(name).map_err(|_| Error::Configuration(f!("unrecognised nuclide \"{name}\"")))
}

fn parse_non_blank(names: &[String]) -> Result<Vec<Progenitor>> {
    names
        .iter()
        .filter(|n| !n.trim().is_empty())
        .map(|n| Progenitor::from_str(n))
        .collect()
}
