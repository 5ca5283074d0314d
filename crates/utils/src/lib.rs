//! Common utility for extended `std` types
//!
//! These are left public for convenience.
//!
//! For example, capitalising element symbols, printing optional values from
//! nuclear data tables, or keeping ordered lists of level energies free of
//! duplicates are useful everywhere.

// Alias for the format! macro
pub use std::format as f;

// Modules
mod error;
mod option_ext;
mod slice_ext;
mod string_ext;
mod unique_ext;

// Flatten
pub use error::{Error, Result};
pub use option_ext::OptionExt;
pub use slice_ext::SliceExt;
pub use string_ext::StringExt;
pub use unique_ext::UniqueExt;
