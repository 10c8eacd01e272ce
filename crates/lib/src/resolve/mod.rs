//! Resolution engine: pure functions from [`Options`](crate::options::Options)
//! to dependency, sub-option and build-system data.
//!
//! Nothing here performs I/O. Each hook recomputes its output from the option
//! record, so calling a hook twice with the same options yields identical
//! results.
//!
//! # Submodules
//!
//! - [`guard`] - predicates over options that gate conditional entries
//! - [`requirements`] - pinned package requirements
//! - [`configure`] - sub-options forced onto required packages
//! - [`definitions`] - build-system definitions handed to the build step

pub mod configure;
pub mod definitions;
pub mod guard;
pub mod requirements;

pub use configure::{ForcedOptions, configure};
pub use definitions::{BuildDefinitions, build_definitions};
pub use guard::Guard;
pub use requirements::{Requirement, build_requirements, requirements};
