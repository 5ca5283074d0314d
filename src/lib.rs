//! `rnlib` builds radionuclide libraries by following decay chains through
//! IAEA nuclear data
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-exports of the workspace crates.
#[doc(inline)]
pub use rnlib_chain as chain;

#[doc(inline)]
pub use rnlib_iaea as iaea;

#[doc(inline)]
pub use rnlib_utils as utils;

// Batch processing for the command line tool
pub mod batch;
pub mod report;

mod error;

#[doc(inline)]
pub use error::{Error, Result};
