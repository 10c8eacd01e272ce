//! Types shared by the lifecycle dispatcher and build-system collaborators.

use std::fmt;

use thiserror::Error;

use crate::error::ConfigurationError;
use crate::resolve::BuildDefinitions;

/// Progress of one lifecycle, in the order stages are reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
  #[default]
  Uninitialized,
  Configured,
  Built,
  Tested,
  Packaged,
  Published,
}

impl Stage {
  pub fn as_str(&self) -> &'static str {
    match self {
      Stage::Uninitialized => "uninitialized",
      Stage::Configured => "configured",
      Stage::Built => "built",
      Stage::Tested => "tested",
      Stage::Packaged => "packaged",
      Stage::Published => "published",
    }
  }
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// A single action performed by a build step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildAction {
  Configure,
  Build,
  Test,
  Install,
}

impl BuildAction {
  pub fn as_str(&self) -> &'static str {
    match self {
      BuildAction::Configure => "configure",
      BuildAction::Build => "build",
      BuildAction::Test => "test",
      BuildAction::Install => "install",
    }
  }
}

impl fmt::Display for BuildAction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Errors reported by a build-system collaborator.
#[derive(Debug, Error)]
pub enum BuildError {
  /// The build tool could not be started.
  #[error("failed to run {program}: {source}")]
  Spawn {
    program: String,
    #[source]
    source: std::io::Error,
  },

  /// The build tool ran and exited unsuccessfully.
  #[error("command failed with exit code {code:?}: {command}")]
  CommandFailed { command: String, code: Option<i32> },

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

/// Errors raised by the lifecycle dispatcher.
#[derive(Debug, Error)]
pub enum LifecycleError {
  /// A stage was invoked before `configure` ran in this lifecycle.
  #[error("cannot run '{attempted}' before 'configure'")]
  OutOfOrder { attempted: &'static str },

  #[error("configuration error: {0}")]
  Configuration(#[from] ConfigurationError),

  #[error("build step failed: {0}")]
  Build(#[from] BuildError),
}

/// A build-step handle parametrized with one set of definitions.
///
/// Handles are obtained fresh for every stage and dropped after their single
/// action.
pub trait BuildStep {
  fn configure(&mut self) -> Result<(), BuildError>;
  fn build(&mut self) -> Result<(), BuildError>;
  fn test(&mut self) -> Result<(), BuildError>;
  fn install(&mut self) -> Result<(), BuildError>;
}

/// Source of build-step handles.
pub trait BuildSystem {
  fn step(&mut self, definitions: &BuildDefinitions) -> Result<Box<dyn BuildStep + '_>, BuildError>;
}
