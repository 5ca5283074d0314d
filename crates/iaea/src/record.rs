// external crates
use serde::{Deserialize, Deserializer, Serialize};

// rnlib modules
use rnlib_utils::{f, OptionExt};

// internal modules
use crate::common::Nuclide;
use crate::parsers;

/// Type alias for `Vec<Record>`
pub type RecordSet = Vec<Record>;

/// Data for a single record from a `decay_rads` request
///
/// This is almost a mirror of the `decay_rads` data from the IAEA chart of
/// nuclides API (see the
/// [guide](https://www-nds.iaea.org/relnsd/vcharthtml/api_v0_guide.html)).
///
/// ## Why Option?
///
/// The guide is frustratingly inconsistent with the data you actually recieve
/// and unfortunately every CSV field appears optional. Blank fields are
/// `None`, and anything that fails to parse as the expected type is also
/// `None` rather than an error.
///
/// ## Radiation type differences
///
/// Only the fields common to every radiation type are kept. The beta tables
/// name their energy and intensity columns differently (`mean_energy`,
/// `intensity_beta`), which are accepted as aliases so that every radiation
/// type deserialises into the same [Record].
///
/// ## Level energies
///
/// Parent and daughter level energies may carry an unknown offset marker, for
/// example `73.92+X`. The marker is stripped so the known part of the energy
/// is usable for level matching.
///
/// ```rust
/// # use rnlib_iaea::deserialise;
/// # use rnlib_iaea::Record;
/// let csv = "energy,intensity,half_life_sec,decay,p_symbol,p_z,p_n,p_energy,d_symbol,d_z,d_n,daughter_level_energy\n\
///            140.511,89,21624.12,IT,Tc,43,56,142.6836,Tc,43,56,0";
///
/// let records: Vec<Record> = deserialise(csv).unwrap();
/// assert_eq!(records[0].energy, Some(140.511));
/// assert_eq!(records[0].parent().unwrap().name(), "Tc-99");
/// ```
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Record {
    /// Radiation energy (keV)
    #[serde(deserialize_with = "csv::invalid_option")]
    #[serde(alias = "mean_energy")]
    pub energy: Option<f64>,

    /// Uncertainty in radiation energy (keV)
    #[serde(deserialize_with = "csv::invalid_option")]
    #[serde(alias = "unc_mean")] // this is changed from unc_me for beta-/+
    pub unc_en: Option<f64>,

    /// Radiation intensity (%)
    #[serde(deserialize_with = "csv::invalid_option")]
    #[serde(alias = "intensity_beta")]
    pub intensity: Option<f64>,

    /// Uncertainty in radiation intensity (%)
    #[serde(deserialize_with = "csv::invalid_option")]
    #[serde(alias = "unc_ib")]
    pub unc_i: Option<f64>,

    /// Energy of the daughter level fed by this decay (keV)
    #[serde(deserialize_with = "level_option")]
    pub daughter_level_energy: Option<f64>,

    /// Parent half-life in the evaluated unit
    #[serde(deserialize_with = "csv::invalid_option")]
    pub half_life: Option<f64>,

    /// Uncertainty in the evaluated half-life
    #[serde(deserialize_with = "csv::invalid_option")]
    pub unc_hl: Option<f64>,

    /// Unit of the evaluated half-life
    #[serde(deserialize_with = "csv::invalid_option")]
    pub unit_hl: Option<String>,

    /// Parent half-life (s)
    #[serde(deserialize_with = "csv::invalid_option")]
    pub half_life_sec: Option<f64>,

    /// Uncertainty in parent half-life (s)
    #[serde(deserialize_with = "csv::invalid_option")]
    pub unc_hls: Option<f64>,

    /// Decay mechanism
    #[serde(deserialize_with = "csv::invalid_option")]
    #[serde(rename = "decay")]
    pub decay_mode: Option<String>,

    /// Decay mechanism branching ratio (%)
    #[serde(deserialize_with = "csv::invalid_option")]
    #[serde(rename = "decay_%")]
    pub branching: Option<f64>,

    /// Decay mechanism branching ratio uncertainty
    #[serde(deserialize_with = "csv::invalid_option")]
    #[serde(rename = "unc_d")]
    pub unc_b: Option<f64>,

    /// Nuclear state of the parent nuclide
    #[serde(deserialize_with = "csv::invalid_option")]
    pub jp: Option<String>,

    /// Q-value (keV)
    #[serde(deserialize_with = "csv::invalid_option")]
    pub q: Option<String>,

    /// Q-value uncertainty (%)
    #[serde(deserialize_with = "csv::invalid_option")]
    pub unc_q: Option<String>,

    // * Parent nuclide
    /// Element of the parent
    #[serde(deserialize_with = "csv::invalid_option")]
    pub p_symbol: Option<String>,

    /// Parent proton number
    #[serde(deserialize_with = "csv::invalid_option")]
    pub p_z: Option<u16>,

    /// Parent neutron number
    #[serde(deserialize_with = "csv::invalid_option")]
    pub p_n: Option<u16>,

    /// Parent energy state (keV)
    #[serde(deserialize_with = "level_option")]
    pub p_energy: Option<f64>,

    /// Uncertainty in parent energy state (keV)
    #[serde(deserialize_with = "csv::invalid_option")]
    pub unc_pe: Option<String>,

    // * Daughter nuclide
    /// Element of the Daughter
    #[serde(deserialize_with = "csv::invalid_option")]
    pub d_symbol: Option<String>,

    /// Daughter proton number
    #[serde(deserialize_with = "csv::invalid_option")]
    pub d_z: Option<u16>,

    /// Daughter neutron number
    #[serde(deserialize_with = "csv::invalid_option")]
    pub d_n: Option<u16>,

    // * Provenance
    /// ENSDF evaluation cut-off date
    #[serde(deserialize_with = "csv::invalid_option")]
    #[serde(rename = "ensdf_publication_cut-off")]
    pub ensdf_cutoff: Option<String>,

    /// ENSDF evaluation authors
    #[serde(deserialize_with = "csv::invalid_option")]
    pub ensdf_authors: Option<String>,

    /// Date the data were extracted for the API
    #[serde(deserialize_with = "csv::invalid_option")]
    #[serde(rename = "Extraction_date")]
    pub extraction_date: Option<String>,
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut s = "Record\n".to_string();
        s += &f!(
            "  Energy           {} +/- {} keV\n",
            self.energy.display(),
            self.unc_en.display()
        );
        s += &f!(
            "  Intensity        {} +/- {} %\n",
            self.intensity.display(),
            self.unc_i.display()
        );
        s += &f!(
            "  Half life        {} +/- {} s\n",
            self.half_life_sec.display(),
            self.unc_hls.display()
        );
        s += &f!("  Decay mode       {}\n", self.decay_mode.display());
        s += &f!(
            "  Branching        {} +/- {} %\n",
            self.branching.display(),
            self.unc_b.display()
        );
        s += &f!(
            "  Parent           {} at {} keV\n",
            self.parent().display(),
            self.p_energy.display()
        );
        s += &f!(
            "  Daughter         {} at {} keV\n",
            self.daughter().display(),
            self.daughter_level_energy.display()
        );
        write!(f, "{s}")
    }
}

impl Record {
    /// Ground state identity of the parent nuclide
    pub fn parent(&self) -> Option<Nuclide> {
        match (&self.p_symbol, self.p_z, self.p_n) {
            (Some(symbol), Some(z), Some(n)) => Some(Nuclide::from_counts(symbol, z, n)),
            _ => None,
        }
    }

    /// Ground state identity of the daughter nuclide
    ///
    /// Daughters are always identified by element and nucleon count, the
    /// level they are fed at is kept separately in `daughter_level_energy`.
    pub fn daughter(&self) -> Option<Nuclide> {
        match (&self.d_symbol, self.d_z, self.d_n) {
            (Some(symbol), Some(z), Some(n)) => Some(Nuclide::from_counts(symbol, z, n)),
            _ => None,
        }
    }
}

/// Level energies with any `+X` style offset marker removed
pub(crate) fn level_option<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parsers::level_energy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::deserialise;

    const PA234: &str = "energy,unc_en,intensity,unc_i,p_symbol,p_z,p_n,p_energy,d_symbol,d_z,d_n,daughter_level_energy,decay\n\
                         63.29,0.02,4.8,0.4,Th,90,144,0,Pa,91,143,73.92+X,B-\n\
                         ,,,,Th,90,144,,Pa,91,143,,B-";

    #[test]
    fn offset_markers_are_stripped() {
        let records: RecordSet = deserialise(PA234).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].daughter_level_energy, Some(73.92));
        assert_eq!(records[0].p_energy, Some(0.0));
        assert_eq!(records[0].daughter().unwrap().name(), "Pa-234");
    }

    #[test]
    fn blank_fields_are_none() {
        let records: RecordSet = deserialise(PA234).unwrap();
        assert_eq!(records[1].energy, None);
        assert_eq!(records[1].p_energy, None);
        assert_eq!(records[1].decay_mode.as_deref(), Some("B-"));
    }

    #[test]
    fn undefined_levels_are_none() {
        let csv = "p_symbol,p_z,p_n,p_energy,daughter_level_energy\n\
                   Tc,43,56,nan,inf";
        let records: RecordSet = deserialise(csv).unwrap();
        assert_eq!(records[0].p_energy, None);
        assert_eq!(records[0].daughter_level_energy, None);
    }

    #[test]
    fn beta_aliases() {
        let csv = "mean_energy,unc_mean,intensity_beta,unc_ib,p_symbol,p_z,p_n\n\
                   68.3,0.3,100,,Tc,43,56";
        let records: RecordSet = deserialise(csv).unwrap();
        assert_eq!(records[0].energy, Some(68.3));
        assert_eq!(records[0].intensity, Some(100.0));
        assert_eq!(records[0].unc_i, None);
    }
}
