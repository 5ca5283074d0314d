//! Common data structures

// external crates
use serde::{Serialize, Serializer};

// rnlib modules
use rnlib_utils::{f, StringExt};

// internal modules
use crate::error::{Error, Result};
use crate::parsers::nuclide_from_str;

/// Type of decay radiation
///
/// The IAEA chart of nuclides contains data for the following types:
///
/// - Alpha (`a`)
/// - Beta+ or electron capture (`bp`)
/// - Beta- (`bm`)
/// - Gamma decay (`g`)
/// - Auger and conversion electron (`e`)
/// - X-ray (`x`)
///
/// The `FromStr` trait accepts both the IAEA symbols and the long names used
/// in configuration files.
///
/// ```rust
/// # use rnlib_iaea::RadType;
/// # use std::str::FromStr;
/// assert_eq!(RadType::from_str("a").unwrap(), RadType::Alpha);
/// assert_eq!(RadType::from_str("beta minus").unwrap(), RadType::BetaMinus);
/// assert_eq!(RadType::Alpha.query_symbol(), "a");
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RadType {
    /// Alpha decay (`a`)
    Alpha,
    /// Beta+ or electron capture (`bp`)
    BetaPlus,
    /// Beta- (`bm`)
    BetaMinus,
    /// Gamma decay (`g`)
    Gamma,
    /// Auger and conversion electron (`e`)
    Electron,
    /// X-ray (`x`)
    Xray,
}

impl RadType {
    /// Every radiation type in the order daughters are searched for
    pub const ALL: [RadType; 6] = [
        RadType::Alpha,
        RadType::BetaPlus,
        RadType::BetaMinus,
        RadType::Electron,
        RadType::Gamma,
        RadType::Xray,
    ];

    /// Get corresponding API symbol for a variant
    ///
    /// ```rust
    /// # use rnlib_iaea::RadType;
    /// assert_eq!(RadType::Alpha.query_symbol(), "a");
    /// assert_eq!(RadType::BetaMinus.query_symbol(), "bm");
    /// assert_eq!(RadType::BetaPlus.query_symbol(), "bp");
    /// assert_eq!(RadType::Gamma.query_symbol(), "g");
    /// assert_eq!(RadType::Electron.query_symbol(), "e");
    /// assert_eq!(RadType::Xray.query_symbol(), "x");
    /// ```
    pub fn query_symbol(&self) -> &'static str {
        match self {
            RadType::Alpha => "a",
            RadType::BetaPlus => "bp",
            RadType::BetaMinus => "bm",
            RadType::Gamma => "g",
            RadType::Electron => "e",
            RadType::Xray => "x",
        }
    }

    /// Human readable name, e.g. "beta minus"
    pub fn long_name(&self) -> &'static str {
        match self {
            RadType::Alpha => "alpha",
            RadType::BetaPlus => "beta plus",
            RadType::BetaMinus => "beta minus",
            RadType::Gamma => "gamma",
            RadType::Electron => "electron",
            RadType::Xray => "x-ray",
        }
    }
}

impl std::str::FromStr for RadType {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalised = s
            .split_whitespace()
            .collect::<Vec<&str>>()
            .join(" ")
            .to_lowercase();

        match normalised.as_str() {
            "a" | "alpha" => Ok(RadType::Alpha),
            "bp" | "beta plus" | "beta+" => Ok(RadType::BetaPlus),
            "bm" | "beta minus" | "beta-" => Ok(RadType::BetaMinus),
            "g" | "gamma" => Ok(RadType::Gamma),
            "e" | "electron" => Ok(RadType::Electron),
            "x" | "xray" | "x-ray" => Ok(RadType::Xray),
            _ => Err(Error::CouldNotInferRadType {
                hint: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for RadType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.query_symbol())
    }
}

/// Kind of table requested from a data provider
///
/// Maps onto the `fields` parameter of the IAEA API.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DataKind {
    /// Decay radiation for a single radiation type (`decay_rads`)
    DecayRadiation,
    /// Gamma transitions between levels (`gammas`)
    Gammas,
    /// Level structure (`levels`)
    Levels,
}

impl DataKind {
    /// Value of the `fields` API parameter
    pub fn field(&self) -> &'static str {
        match self {
            DataKind::DecayRadiation => "decay_rads",
            DataKind::Gammas => "gammas",
            DataKind::Levels => "levels",
        }
    }
}

/// Definition for a particular nuclide
///
/// The `FromStr` trait is implemented and will try to parse a string into
/// a nuclide. Accepted forms include:
///
/// - Element only: `Co`, `C`
/// - Isotope: `Co60`, `Co-60`, `co_60`
/// - Metastable: `Tc-99m`, `Eu152m2`, FISPACT-II style `Co60n`
/// - IAEA query alias: `99tc`, `225AC`
///
/// Symbols are normalised so that `tc99` and `Tc-99` are the same nuclide.
///
/// ```rust
/// # use rnlib_iaea::{Nuclide, IsomerState};
/// # use std::str::FromStr;
/// assert_eq!(
///     Nuclide::from_str("eu-152m2").unwrap(),
///     Nuclide {
///         symbol: "Eu".to_string(),
///         isotope: 152,
///         state: IsomerState::Excited(2)
///     }
/// );
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Nuclide {
    /// Element
    pub symbol: String,
    /// Isotope number (Z+N, total nucleons)
    pub isotope: u16,
    /// Excited state status
    pub state: IsomerState,
}

impl Nuclide {
    /// Build a nuclide, normalising the element symbol
    pub fn new(symbol: &str, isotope: u16, state: IsomerState) -> Self {
        Self {
            symbol: symbol.capitalise(),
            isotope,
            state,
        }
    }

    /// Ground state nuclide from element symbol and nucleon counts
    ///
    /// This is how daughters are identified from decay data rows.
    pub fn from_counts(symbol: &str, z: u16, n: u16) -> Self {
        Self::new(symbol, z + n, IsomerState::Ground)
    }

    /// A name for the nuclide with consistent formatting
    ///
    /// ```rust
    /// # use rnlib_iaea::{Nuclide, IsomerState};
    /// let mut nuclide = Nuclide::new("tc", 99, IsomerState::Ground);
    /// assert_eq!(nuclide.name(), "Tc-99");
    ///
    /// nuclide.state = IsomerState::Excited(1);
    /// assert_eq!(nuclide.name(), "Tc-99m");
    ///
    /// nuclide.state = IsomerState::Excited(2);
    /// assert_eq!(nuclide.name(), "Tc-99m2");
    /// ```
    pub fn name(&self) -> String {
        // special case for elements
        if self.isotope == 0 {
            self.symbol.capitalise()
        } else {
            f!("{}-{}{}", self.symbol.capitalise(), self.isotope, self.state)
        }
    }

    /// Alias used by the IAEA API, e.g. `99tc`
    ///
    /// The API has no notion of isomers in the nuclide parameter, so any
    /// excited state is dropped. Elements are not valid queries.
    ///
    /// ```rust
    /// # use rnlib_iaea::Nuclide;
    /// # use std::str::FromStr;
    /// let nuclide = Nuclide::from_str("Tc-99m").unwrap();
    /// assert_eq!(nuclide.query_name().unwrap(), "99tc");
    /// assert!(Nuclide::from_str("Tc").unwrap().query_name().is_err());
    /// ```
    pub fn query_name(&self) -> Result<String> {
        if self.isotope == 0 {
            return Err(Error::InvalidNuclideQuery);
        }
        Ok(f!("{}{}", self.isotope, self.symbol.to_lowercase()))
    }

    /// The underlying ground state shared by a nuclide and its isomers
    pub fn intrinsic(&self) -> Nuclide {
        Nuclide {
            symbol: self.symbol.clone(),
            isotope: self.isotope,
            state: IsomerState::Ground,
        }
    }

    /// The first isomer of the same nuclide
    pub fn isomer(&self) -> Nuclide {
        Nuclide {
            symbol: self.symbol.clone(),
            isotope: self.isotope,
            state: IsomerState::Excited(1),
        }
    }

    /// Check if the nuclide is in an excited state
    pub fn is_isomer(&self) -> bool {
        self.state != IsomerState::Ground
    }
}

impl std::str::FromStr for Nuclide {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (_, nuclide) = nuclide_from_str(s.trim())
            .map_err(|_| Error::ParseError(f!("Could not extract nuclide from \"{s}\"")))?;

        Ok(nuclide)
    }
}

impl std::fmt::Display for Nuclide {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// Serialised by name so that nuclides can be used as keys in report maps
impl Serialize for Nuclide {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Variants of excited states
///
/// A nuclide can either be in the ground state, or some excited state.
///
/// The first excited state is written with a plain `m` suffix as is common
/// for radionuclide libraries (`Tc-99m`), higher states are numbered (`m2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum IsomerState {
    #[default]
    Ground,
    Excited(u8),
}

impl std::fmt::Display for IsomerState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            IsomerState::Ground => Ok(()),
            IsomerState::Excited(1) => write!(f, "m"),
            IsomerState::Excited(e) => write!(f, "m{e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn rad_type_round_trip_symbols() {
        for rad_type in RadType::ALL {
            assert_eq!(RadType::from_str(rad_type.query_symbol()).unwrap(), rad_type);
            assert_eq!(RadType::from_str(rad_type.long_name()).unwrap(), rad_type);
        }
        assert!(RadType::from_str("neutron").is_err());
    }

    #[test]
    fn daughter_identity_from_counts() {
        let nuclide = Nuclide::from_counts("FR", 87, 134);
        assert_eq!(nuclide.name(), "Fr-221");
        assert!(!nuclide.is_isomer());
    }

    #[test]
    fn intrinsic_is_shared() {
        let ground = Nuclide::from_str("Tc-99").unwrap();
        let isomer = Nuclide::from_str("tc99m").unwrap();
        assert_ne!(ground, isomer);
        assert_eq!(ground.intrinsic(), isomer.intrinsic());
        assert_eq!(ground.isomer(), isomer);
    }
}
