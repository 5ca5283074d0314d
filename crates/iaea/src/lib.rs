//! Decay data from the IAEA chart of nuclides
//!
//! This crate is intended to make using decay data from the IAEA chart of
//! nuclides API slightly less painful.
//!
//! Three kinds of table are used:
//! - `decay_rads`: decay radiation of a given type, as [Record]s
//! - `gammas`: gamma transitions between levels, as [GammaTransition]s
//! - `levels`: level structure and decay modes, as [Level]s
//!
//! Tables are obtained through a [DataProvider], either the [LiveChart]
//! (local CSV cache backed by the API) or a [StaticProvider] holding
//! everything in memory.
//!
//! See <https://www-nds.iaea.org/relnsd/vcharthtml/api_v0_guide.html> for
//! further information.
//!
//! ## Unavailable data
//!
//! The API answers a request with no matching dataset with the error code
//! `0`. Such nuclide and radiation pairs are kept in an
//! [UnavailableRegistry] so they are never requested again.
//!
//! ```rust, no_run
//! # use rnlib_iaea::{DataProvider, LiveChart, Nuclide, RadType, UnavailableRegistry};
//! # use std::str::FromStr;
//! let registry = UnavailableRegistry::open("data/unavailable.txt").unwrap();
//! let mut chart = LiveChart::new("data", registry);
//!
//! let co60 = Nuclide::from_str("Co-60").unwrap();
//! if let Some(records) = chart.decay_radiation(&co60, RadType::Gamma).unwrap() {
//!     for record in &records {
//!         println!("{record}");
//!     }
//! }
//! ```
//!
//! Printing a record gives a summary of the most useful fields.
//!
//! ```text
//! Record
//!   Energy           1173.228 +/- 0.003 keV
//!   Intensity        99.85 +/- 0.03 %
//!   Half life        166344192 +/- 12096 s
//!   Decay mode       B-
//!   Branching        100 +/- none %
//!   Parent           Co-60 at 0 keV
//!   Daughter         Ni-60 at 2505.753 keV
//! ```

// Modules
mod common;
mod error;
mod fetch;
mod parsers;
mod provider;
mod record;
mod registry;
mod tables;

// Re-exports of anything important with in-lined documentation for simplicity
#[doc(inline)]
pub use common::{DataKind, IsomerState, Nuclide, RadType};

#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use record::{Record, RecordSet};

#[doc(inline)]
pub use tables::{GammaTransition, Interval, Level};

#[doc(inline)]
pub use fetch::{deserialise, error_message, fetch_raw, query_url, ApiResponse, IAEA_API};

#[doc(inline)]
pub use provider::{DataProvider, LiveChart, StaticProvider};

#[doc(inline)]
pub use registry::UnavailableRegistry;
