//! Gamma transition and level structure tables
//!
//! These are the `gammas` and `levels` tables of the IAEA API, reduced to the
//! fields needed to follow gamma cascades and to decide which decay modes a
//! level can reach.

// external crates
use serde::{Deserialize, Serialize};

// internal modules
use crate::record::level_option;

/// Closed energy window around a level
///
/// Built from an energy and its uncertainty, so a level of `142.68 +/- 0.05`
/// keV becomes `[142.63, 142.73]`. Both bounds are inclusive.
///
/// ```rust
/// # use rnlib_iaea::Interval;
/// let interval = Interval::around(140.511, Some(1.5));
/// assert!(interval.contains(139.1));
/// assert!(interval.contains(142.0));
/// assert!(!interval.contains(142.1));
///
/// // missing uncertainty is treated as exact
/// let exact = Interval::around(0.0, None);
/// assert!(exact.contains(0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Interval {
    pub low: f64,
    pub high: f64,
}

impl Interval {
    /// Interval from explicit bounds
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Interval of `energy +/- uncertainty`, where no uncertainty means zero
    pub fn around(energy: f64, uncertainty: Option<f64>) -> Self {
        let delta = uncertainty.unwrap_or(0.0).abs();
        Self {
            low: energy - delta,
            high: energy + delta,
        }
    }

    /// Inclusive check that a value lies inside the interval
    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }
}

/// Single row of a `gammas` table
///
/// A gamma transition between two levels of the same nuclide.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct GammaTransition {
    /// Gamma energy (keV)
    #[serde(deserialize_with = "csv::invalid_option")]
    pub energy: Option<f64>,

    /// Uncertainty in gamma energy (keV)
    #[serde(deserialize_with = "csv::invalid_option")]
    pub unc_en: Option<f64>,

    /// Relative intensity
    #[serde(deserialize_with = "csv::invalid_option")]
    pub relative_intensity: Option<f64>,

    /// Energy of the level the transition starts from (keV)
    #[serde(deserialize_with = "level_option")]
    pub start_level_energy: Option<f64>,

    /// Uncertainty in the start level energy (keV)
    #[serde(deserialize_with = "csv::invalid_option")]
    pub unc_sle: Option<f64>,

    /// Energy of the level the transition ends on (keV)
    #[serde(deserialize_with = "level_option")]
    pub end_level_energy: Option<f64>,

    /// Uncertainty in the end level energy (keV)
    #[serde(deserialize_with = "csv::invalid_option")]
    pub unc_ele: Option<f64>,

    /// Multipolarity of the transition, e.g. `E2(+M3)`
    #[serde(deserialize_with = "csv::invalid_option")]
    pub multipolarity: Option<String>,
}

impl GammaTransition {
    /// Window of start levels this transition can begin from
    ///
    /// `None` if the start level energy is missing.
    pub fn start_interval(&self) -> Option<Interval> {
        self.start_level_energy
            .map(|energy| Interval::around(energy, self.unc_sle))
    }
}

/// Single row of a `levels` table
///
/// Only the first three decay modes are published per level.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Level {
    /// Level energy (keV)
    #[serde(deserialize_with = "level_option")]
    pub energy: Option<f64>,

    /// Uncertainty in level energy (keV)
    #[serde(deserialize_with = "csv::invalid_option")]
    pub unc_e: Option<f64>,

    /// Spin and parity, e.g. `1/2-`
    #[serde(deserialize_with = "csv::invalid_option")]
    pub jp: Option<String>,

    /// Level half-life (s)
    #[serde(deserialize_with = "csv::invalid_option")]
    pub half_life_sec: Option<f64>,

    #[serde(deserialize_with = "csv::invalid_option")]
    pub decay_1: Option<String>,

    #[serde(deserialize_with = "csv::invalid_option")]
    #[serde(rename = "decay_1_%")]
    pub branching_1: Option<f64>,

    #[serde(deserialize_with = "csv::invalid_option")]
    pub decay_2: Option<String>,

    #[serde(deserialize_with = "csv::invalid_option")]
    #[serde(rename = "decay_2_%")]
    pub branching_2: Option<f64>,

    #[serde(deserialize_with = "csv::invalid_option")]
    pub decay_3: Option<String>,

    #[serde(deserialize_with = "csv::invalid_option")]
    #[serde(rename = "decay_3_%")]
    pub branching_3: Option<f64>,
}

impl Level {
    /// Decay modes of the level in column order, blanks skipped
    pub fn modes(&self) -> impl Iterator<Item = &str> {
        [&self.decay_1, &self.decay_2, &self.decay_3]
            .into_iter()
            .filter_map(|mode| mode.as_deref())
            .map(str::trim)
            .filter(|mode| !mode.is_empty())
    }

    /// Energy window of the level, `None` if the energy is missing
    pub fn interval(&self) -> Option<Interval> {
        self.energy.map(|energy| Interval::around(energy, self.unc_e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::deserialise;

    #[test]
    fn gamma_start_interval() {
        let csv = "start_level_energy,unc_sle,end_level_energy,energy\n\
                   142.6836,0.0010,140.511,2.1726\n\
                   140.511,,0,140.511";
        let gammas: Vec<GammaTransition> = deserialise(csv).unwrap();

        let first = gammas[0].start_interval().unwrap();
        assert!(first.contains(142.684));
        assert!(!first.contains(142.69));

        let second = gammas[1].start_interval().unwrap();
        assert_eq!(second, Interval::new(140.511, 140.511));
        assert_eq!(gammas[1].end_level_energy, Some(0.0));
    }

    #[test]
    fn level_modes_in_column_order() {
        let csv = "energy,unc_e,jp,decay_1,decay_1_%,decay_2,decay_2_%,decay_3,decay_3_%\n\
                   142.6836,0.0011,1/2-,IT,99.9963,B-,0.0037,,\n\
                   140.511,0.001,7/2+,,,,,,";
        let levels: Vec<Level> = deserialise(csv).unwrap();

        assert_eq!(levels[0].modes().collect::<Vec<&str>>(), vec!["IT", "B-"]);
        assert_eq!(levels[1].modes().count(), 0);
        assert!(levels[0].interval().unwrap().contains(142.684));
    }
}
