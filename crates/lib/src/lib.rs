//! touca-recipe-lib: package descriptor for the Touca C++ SDK
//!
//! This crate resolves everything a package tool needs to build and publish
//! the SDK from a set of boolean options:
//! - `Options`: the immutable option record
//! - `resolve`: pinned requirements, forced sub-options and build definitions
//! - `component`: the component descriptor published to consumers
//! - `Lifecycle`: the configure/build/test/package sequence run against a
//!   build-system collaborator such as [`cmake::CMake`]

pub mod cmake;
pub mod component;
pub mod consts;
pub mod error;
pub mod lifecycle;
pub mod options;
pub mod profile;
pub mod recipe;
pub mod resolve;
pub mod settings;
pub mod util;

pub use component::PackageInfo;
pub use error::ConfigurationError;
pub use lifecycle::Lifecycle;
pub use options::Options;
pub use recipe::Recipe;
pub use settings::Settings;
