//! Sources of decay data tables
//!
//! Everything downstream asks a [DataProvider] for tables and never cares
//! where they come from. `None` always means the data are unavailable.

// standard library
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

// external crates
use log::{debug, trace};
use serde::de::DeserializeOwned;

// rnlib modules
use rnlib_utils::f;

// internal modules
use crate::common::{DataKind, Nuclide, RadType};
use crate::error::{Error, Result};
use crate::fetch::{deserialise, error_message, fetch_raw, ApiResponse};
use crate::record::RecordSet;
use crate::registry::UnavailableRegistry;
use crate::tables::{GammaTransition, Level};

/// Access to decay radiation, gamma transition, and level tables
///
/// Isomer states are irrelevant to every table, so implementations look up
/// the intrinsic nuclide.
pub trait DataProvider {
    /// Decay radiation records for one radiation type
    fn decay_radiation(&mut self, nuclide: &Nuclide, rad_type: RadType)
        -> Result<Option<RecordSet>>;

    /// Gamma transitions between the levels of a nuclide
    fn gammas(&mut self, nuclide: &Nuclide) -> Result<Option<Vec<GammaTransition>>>;

    /// Level structure of a nuclide
    fn levels(&mut self, nuclide: &Nuclide) -> Result<Option<Vec<Level>>>;

    /// Check the known-unavailable registry without querying anything
    fn is_unavailable(&self, nuclide: &Nuclide, rad_type: RadType) -> bool;
}

/// Local CSV cache backed by the IAEA LiveChart API
///
/// Tables are looked for under the data directory first, and only fetched
/// from the API if missing. Fetched tables are written to the cache for next
/// time.
///
/// ```text
/// data/
/// ├── Tc-99/
/// │   ├── Tc-99_g.csv
/// │   ├── Tc-99_gammas.csv
/// │   └── Tc-99_levels.csv
/// └── unavailable.txt
/// ```
///
/// A cached file that can not be parsed is a fatal
/// [CacheCorrupt](Error::CacheCorrupt) error.
#[derive(Debug)]
pub struct LiveChart {
    data_dir: PathBuf,
    registry: UnavailableRegistry,
    offline: bool,
}

impl LiveChart {
    /// Provider with a cache directory and an unavailable registry
    pub fn new<P: AsRef<Path>>(data_dir: P, registry: UnavailableRegistry) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            registry,
            offline: false,
        }
    }

    /// Never query the API, anything not cached is unavailable
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// The unavailable registry in its current state
    pub fn registry(&self) -> &UnavailableRegistry {
        &self.registry
    }

    /// Cache location of a table, e.g. `data/Tc-99/Tc-99_gammas.csv`
    pub fn cache_path(&self, nuclide: &Nuclide, kind: DataKind, rad_type: Option<RadType>) -> PathBuf {
        let name = nuclide.intrinsic().name();
        let suffix = match (kind, rad_type) {
            (DataKind::DecayRadiation, Some(rad_type)) => rad_type.query_symbol(),
            (DataKind::DecayRadiation, None) => "decay_rads",
            (DataKind::Gammas, _) => "gammas",
            (DataKind::Levels, _) => "levels",
        };
        self.data_dir.join(&name).join(f!("{name}_{suffix}.csv"))
    }

    fn load<T: DeserializeOwned>(
        &mut self,
        nuclide: &Nuclide,
        kind: DataKind,
        rad_type: Option<RadType>,
    ) -> Result<Option<Vec<T>>> {
        let nuclide = nuclide.intrinsic();
        let path = self.cache_path(&nuclide, kind, rad_type);

        if path.exists() {
            trace!("Reading cached {path:?}");
            return read_cached(&path).map(Some);
        }

        if self.offline {
            debug!("{} {} not cached, skipping", nuclide, kind.field());
            return Ok(None);
        }

        match fetch_raw(&nuclide, kind, rad_type)? {
            ApiResponse::Csv(text) => store(&path, &text).map(Some),
            ApiResponse::Code(0) => {
                if let Some(rad_type) = rad_type {
                    self.registry.insert(&nuclide, rad_type)?;
                }
                Ok(None)
            }
            ApiResponse::Code(code) => Err(Error::Request {
                code,
                message: error_message(code),
            }),
        }
    }
}

impl DataProvider for LiveChart {
    fn decay_radiation(
        &mut self,
        nuclide: &Nuclide,
        rad_type: RadType,
    ) -> Result<Option<RecordSet>> {
        if self.is_unavailable(nuclide, rad_type) {
            trace!("{nuclide} {rad_type} is known to be unavailable");
            return Ok(None);
        }
        self.load(nuclide, DataKind::DecayRadiation, Some(rad_type))
    }

    fn gammas(&mut self, nuclide: &Nuclide) -> Result<Option<Vec<GammaTransition>>> {
        self.load(nuclide, DataKind::Gammas, None)
    }

    fn levels(&mut self, nuclide: &Nuclide) -> Result<Option<Vec<Level>>> {
        self.load(nuclide, DataKind::Levels, None)
    }

    fn is_unavailable(&self, nuclide: &Nuclide, rad_type: RadType) -> bool {
        self.registry.contains(&nuclide.intrinsic(), rad_type)
    }
}

/// In-memory tables
///
/// Useful for pre-fetched data and for building synthetic charts. Any decay
/// radiation lookup that misses is recorded in the registry exactly like a
/// code 0 response from the API. Other API error codes can be set up for a
/// lookup with [StaticProvider::insert_failure].
///
/// ```rust
/// # use rnlib_iaea::{DataProvider, Nuclide, RadType, Record, StaticProvider};
/// # use std::str::FromStr;
/// let tc99m = Nuclide::from_str("Tc-99m").unwrap();
/// let mut provider = StaticProvider::default();
/// provider.insert_decay(&tc99m, RadType::Gamma, vec![Record::default()]);
///
/// assert_eq!(provider.decay_radiation(&tc99m, RadType::Gamma).unwrap().unwrap().len(), 1);
/// assert!(provider.decay_radiation(&tc99m, RadType::Alpha).unwrap().is_none());
/// assert!(provider.is_unavailable(&tc99m, RadType::Alpha));
/// ```
#[derive(Debug, Default, Clone)]
pub struct StaticProvider {
    decay: BTreeMap<(Nuclide, RadType), RecordSet>,
    gammas: BTreeMap<Nuclide, Vec<GammaTransition>>,
    levels: BTreeMap<Nuclide, Vec<Level>>,
    failures: BTreeMap<(Nuclide, RadType), u8>,
    registry: UnavailableRegistry,
    requests: usize,
}

impl StaticProvider {
    /// Set the decay radiation records of a nuclide
    pub fn insert_decay(&mut self, nuclide: &Nuclide, rad_type: RadType, records: RecordSet) {
        self.decay.insert((nuclide.intrinsic(), rad_type), records);
    }

    /// Set the gamma transitions of a nuclide
    pub fn insert_gammas(&mut self, nuclide: &Nuclide, gammas: Vec<GammaTransition>) {
        self.gammas.insert(nuclide.intrinsic(), gammas);
    }

    /// Set the level structure of a nuclide
    pub fn insert_levels(&mut self, nuclide: &Nuclide, levels: Vec<Level>) {
        self.levels.insert(nuclide.intrinsic(), levels);
    }

    /// Make a decay radiation lookup fail with an API error code
    pub fn insert_failure(&mut self, nuclide: &Nuclide, rad_type: RadType, code: u8) {
        self.failures.insert((nuclide.intrinsic(), rad_type), code);
    }

    /// Number of decay radiation lookups that were not stopped by the registry
    pub fn requests(&self) -> usize {
        self.requests
    }

    /// The unavailable registry in its current state
    pub fn registry(&self) -> &UnavailableRegistry {
        &self.registry
    }
}

impl DataProvider for StaticProvider {
    fn decay_radiation(
        &mut self,
        nuclide: &Nuclide,
        rad_type: RadType,
    ) -> Result<Option<RecordSet>> {
        if self.is_unavailable(nuclide, rad_type) {
            return Ok(None);
        }

        self.requests += 1;
        let key = (nuclide.intrinsic(), rad_type);
        if let Some(&code) = self.failures.get(&key) {
            return Err(Error::Request {
                code,
                message: error_message(code),
            });
        }

        match self.decay.get(&key) {
            Some(records) => Ok(Some(records.clone())),
            None => {
                self.registry.insert(&key.0, rad_type)?;
                Ok(None)
            }
        }
    }

    fn gammas(&mut self, nuclide: &Nuclide) -> Result<Option<Vec<GammaTransition>>> {
        Ok(self.gammas.get(&nuclide.intrinsic()).cloned())
    }

    fn levels(&mut self, nuclide: &Nuclide) -> Result<Option<Vec<Level>>> {
        Ok(self.levels.get(&nuclide.intrinsic()).cloned())
    }

    fn is_unavailable(&self, nuclide: &Nuclide, rad_type: RadType) -> bool {
        self.registry.contains(&nuclide.intrinsic(), rad_type)
    }
}

/// Parse a fetched table and only then write it to the cache
///
/// A body that does not parse is never cached, so the next run asks again.
fn store<T: DeserializeOwned>(path: &Path, body: &str) -> Result<Vec<T>> {
    let table = deserialise(body)?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, body)?;
    debug!("Cached {path:?}");
    Ok(table)
}

/// Parse a cached table, where any CSV failure means the cache is corrupt
fn read_cached<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let text = fs::read_to_string(path)?;
    deserialise(&text).map_err(|e| match e {
        Error::Csv(source) => Error::CacheCorrupt {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Record;
    use std::str::FromStr;

    const TC99_GAMMAS: &str = "start_level_energy,unc_sle,end_level_energy\n\
                               142.6836,0.0011,140.511\n\
                               140.511,0.001,0";

    #[test]
    fn reads_from_cache_without_fetching() {
        let dir = tempfile::tempdir().unwrap();
        let tc99 = Nuclide::from_str("Tc-99m").unwrap();

        let mut chart = LiveChart::new(dir.path(), UnavailableRegistry::in_memory()).offline(true);
        let path = chart.cache_path(&tc99, DataKind::Gammas, None);
        assert!(path.ends_with("Tc-99/Tc-99_gammas.csv"));

        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, TC99_GAMMAS).unwrap();

        let gammas = chart.gammas(&tc99).unwrap().unwrap();
        assert_eq!(gammas.len(), 2);
        assert_eq!(gammas[1].end_level_energy, Some(0.0));

        // nothing cached and offline
        assert!(chart.levels(&tc99).unwrap().is_none());
    }

    #[test]
    fn corrupt_cache_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let tc99 = Nuclide::from_str("Tc-99").unwrap();

        let mut chart = LiveChart::new(dir.path(), UnavailableRegistry::in_memory()).offline(true);
        let path = chart.cache_path(&tc99, DataKind::DecayRadiation, Some(RadType::Gamma));
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "energy,intensity\n1,2\n3,4,5\n").unwrap();

        let error = chart.decay_radiation(&tc99, RadType::Gamma).unwrap_err();
        assert!(matches!(error, Error::CacheCorrupt { .. }));
        assert!(error.is_fatal());
    }

    #[test]
    fn unparsable_bodies_are_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let tc99 = Nuclide::from_str("Tc-99").unwrap();

        let mut chart = LiveChart::new(dir.path(), UnavailableRegistry::in_memory()).offline(true);
        let path = chart.cache_path(&tc99, DataKind::DecayRadiation, Some(RadType::Gamma));

        let error = store::<Record>(&path, "energy,intensity\n1,2\n3,4,5\n").unwrap_err();
        assert!(matches!(error, Error::Csv(_)));
        assert!(!error.is_fatal());
        assert!(!path.exists());

        // nothing was left behind to be read as a corrupt cache
        assert!(chart.decay_radiation(&tc99, RadType::Gamma).unwrap().is_none());
    }

    #[test]
    fn parsed_bodies_are_cached() {
        let dir = tempfile::tempdir().unwrap();
        let tc99 = Nuclide::from_str("Tc-99").unwrap();

        let mut chart = LiveChart::new(dir.path(), UnavailableRegistry::in_memory()).offline(true);
        let path = chart.cache_path(&tc99, DataKind::Gammas, None);

        let gammas = store::<GammaTransition>(&path, TC99_GAMMAS).unwrap();
        assert_eq!(gammas.len(), 2);
        assert!(path.exists());
        assert_eq!(chart.gammas(&tc99).unwrap().unwrap(), gammas);
    }

    #[test]
    fn registry_stops_requests() {
        let dir = tempfile::tempdir().unwrap();
        let tc99 = Nuclide::from_str("Tc-99").unwrap();

        let mut registry = UnavailableRegistry::open(dir.path().join("unavailable.txt")).unwrap();
        registry.insert(&tc99, RadType::Alpha).unwrap();

        // offline would otherwise also give None, so check the registry path
        let mut chart = LiveChart::new(dir.path(), registry);
        assert!(chart.is_unavailable(&tc99.isomer(), RadType::Alpha));
        assert!(chart.decay_radiation(&tc99, RadType::Alpha).unwrap().is_none());
    }

    #[test]
    fn static_misses_are_registered() {
        let tc99 = Nuclide::from_str("Tc-99").unwrap();
        let mut provider = StaticProvider::default();
        provider.insert_decay(&tc99, RadType::BetaMinus, vec![Record::default()]);

        assert!(provider.decay_radiation(&tc99, RadType::Alpha).unwrap().is_none());
        assert!(provider.decay_radiation(&tc99, RadType::Alpha).unwrap().is_none());
        assert!(provider.decay_radiation(&tc99, RadType::BetaMinus).unwrap().is_some());

        // the second alpha lookup never got past the registry
        assert_eq!(provider.requests(), 2);
        assert_eq!(provider.registry().lines(), vec!["Tc-99_a"]);
    }

    #[test]
    fn static_failures_are_request_errors() {
        let tc99 = Nuclide::from_str("Tc-99").unwrap();
        let mut provider = StaticProvider::default();
        provider.insert_failure(&tc99.isomer(), RadType::Gamma, 3);

        let error = provider.decay_radiation(&tc99, RadType::Gamma).unwrap_err();
        assert!(matches!(error, Error::Request { code: 3, .. }));
        assert!(!error.is_fatal());
        assert!(!provider.is_unavailable(&tc99, RadType::Gamma));
    }
}
