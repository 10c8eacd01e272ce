//! Declared build options and the immutable option record.
//!
//! The option schema is fixed at compile time. Overrides are applied exactly
//! once, when an [`Options`] value is constructed; afterwards the record is
//! read-only, so every resolution hook observes the same state.
//!
//! # Submodules
//!
//! - [`types`] - option names, the declared schema and the `Options` record

mod types;

pub use types::*;
