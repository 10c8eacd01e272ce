//! A build system that records actions instead of running them.
//!
//! Used for dry runs and to observe the lifecycle in tests.

use super::types::{BuildAction, BuildError, BuildStep, BuildSystem};
use crate::resolve::BuildDefinitions;

/// One recorded action and the definitions its handle was created with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedAction {
  pub action: BuildAction,
  pub definitions: BuildDefinitions,
  /// Index of the handle that performed the action.
  pub handle: usize,
}

#[derive(Debug, Default)]
pub struct RecordingBuildSystem {
  actions: Vec<RecordedAction>,
  handles: usize,
}

impl RecordingBuildSystem {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn actions(&self) -> &[RecordedAction] {
    &self.actions
  }

  /// Number of handles handed out so far.
  pub fn handles(&self) -> usize {
    self.handles
  }
}

impl BuildSystem for RecordingBuildSystem {
  fn step(&mut self, definitions: &BuildDefinitions) -> Result<Box<dyn BuildStep + '_>, BuildError> {
    let handle = self.handles;
    self.handles += 1;
    Ok(Box::new(RecordingStep {
      log: &mut self.actions,
      definitions: definitions.clone(),
      handle,
    }))
  }
}

struct RecordingStep<'a> {
  log: &'a mut Vec<RecordedAction>,
  definitions: BuildDefinitions,
  handle: usize,
}

impl RecordingStep<'_> {
  fn record(&mut self, action: BuildAction) -> Result<(), BuildError> {
    self.log.push(RecordedAction {
      action,
      definitions: self.definitions.clone(),
      handle: self.handle,
    });
    Ok(())
  }
}

impl BuildStep for RecordingStep<'_> {
  fn configure(&mut self) -> Result<(), BuildError> {
    self.record(BuildAction::Configure)
  }

  fn build(&mut self) -> Result<(), BuildError> {
    self.record(BuildAction::Build)
  }

  fn test(&mut self) -> Result<(), BuildError> {
    self.record(BuildAction::Test)
  }

  fn install(&mut self) -> Result<(), BuildError> {
    self.record(BuildAction::Install)
  }
}
