//! Configuration errors raised while resolving the recipe.
//!
//! Every variant is fatal: resolution is deterministic, so retrying with the
//! same options would fail the same way.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
  /// An option name that is not part of the declared schema.
  #[error("unknown option '{0}'")]
  UnknownOption(String),

  #[error("invalid value '{value}' for option '{name}': expected a boolean")]
  InvalidValue { name: String, value: String },

  /// The same option appeared twice in one override set.
  #[error("option '{0}' is overridden more than once")]
  DuplicateOverride(String),

  #[error("malformed option assignment '{0}': expected NAME=VALUE")]
  MalformedAssignment(String),

  #[error("invalid value '{value}' for setting '{name}'")]
  InvalidSetting { name: String, value: String },

  /// A forced sub-option names a package that is not in the requirement set.
  #[error("forced option '{package}:{option}' targets '{package}', which is not a requirement")]
  UnknownRequirement { package: String, option: String },

  /// A published component links against a package that was never required.
  #[error("component '{component}' requires '{dependency}', which is not a resolved requirement")]
  UndeclaredComponentDependency { component: String, dependency: String },
}
