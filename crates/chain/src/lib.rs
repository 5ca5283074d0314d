//! Decay chain discovery and energy level feasibility
//!
//! Builds a radionuclide library from user designated progenitors by
//! following every decay path down to stable nuclides, working out which
//! levels each nuclide can actually be left in, and keeping only the
//! radiation that can physically occur.
//!
//! ## Quickstart example
//!
//! ```rust, no_run
//! # use rnlib_chain::{generate, LibraryConfig};
//! # use rnlib_iaea::{LiveChart, UnavailableRegistry};
//! let config = LibraryConfig {
//!     recursive: vec!["Mo-99".to_string()],
//!     ..Default::default()
//! };
//!
//! let registry = UnavailableRegistry::open(&config.unavailable_registry).unwrap();
//! let mut chart = LiveChart::new(&config.data_dir, registry);
//!
//! let library = generate(&config, &mut chart).unwrap();
//! for row in &library.rows {
//!     println!("{} {:?}", row.radionuclide, row.record.energy);
//! }
//! ```
//!
//! ## Core concepts
//!
//! Discovery starts from each recursive progenitor and searches the decay
//! radiation of every type for daughters. A daughter inherits the levels it
//! is fed at, but only from parent levels that are themselves reachable.
//! Inherited levels are then followed down the gamma transitions to find
//! every level passed through on the way to the ground state.
//!
//! ```text
//! Mo-99 (0 keV)
//! └── Tc-99 from_Mo-99 [142.68, 140.51, 0]
//!     │     gamma_cascade [0, 140.51]
//!     └── Ru-99
//! ```
//!
//! Once everything is known, each decay mode is checked against the level
//! windows listed for it in the level table. A mode is feasible if at least
//! one reachable level falls inside one of its windows. Reachable levels that
//! decay by isomeric transition, or that were given for an isomeric
//! progenitor, are isomer levels.
//!
//! The final library keeps only rows from reachable levels with feasible
//! decay modes, and rows from isomer levels are given to the isomer, e.g.
//! `Tc-99m` instead of `Tc-99`.
//!
//! ## Run context
//!
//! All state for a dataset lives in a [RunContext], created fresh for every
//! dataset. Nothing is global, so datasets can not affect each other.

// Modules
mod assemble;
mod cascade;
mod config;
mod context;
mod error;
mod feasibility;
mod label;
mod levels;
mod library;
mod lineage;

// Re-exports of anything important with in-lined documentation for simplicity
#[doc(inline)]
pub use assemble::{assemble, AssemblyOptions, LibraryRow};

#[doc(inline)]
pub use cascade::resolve_end_levels;

#[doc(inline)]
pub use config::{Cutoffs, LibraryConfig, Progenitor, SortBy};

#[doc(inline)]
pub use context::RunContext;

#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use feasibility::{evaluate, ISOMERIC_TRANSITION};

#[doc(inline)]
pub use label::{pretty_mode, LabelContext, LabelTemplate};

#[doc(inline)]
pub use levels::{DecayModeRecord, LevelEntry, LevelRegistry, SourceTag};

#[doc(inline)]
pub use library::{generate, DecayChain, Library};

#[doc(inline)]
pub use lineage::{discover, LineageNode, LineageTree};
