//! Lifecycle dispatcher.
//!
//! Drives a recipe through `configure → build → test → package →
//! package_info` against a [`BuildSystem`]. Each stage obtains a freshly
//! parametrized [`BuildStep`] and performs exactly one action with it.
//!
//! # Ordering
//!
//! Every stage after `configure` requires that `configure` already ran in the
//! same lifecycle; otherwise [`LifecycleError::OutOfOrder`] is returned and
//! nothing is executed. Stages may be repeated, and the recorded [`Stage`]
//! never moves backwards.
//!
//! # Submodules
//!
//! - [`types`] - stages, actions, errors and collaborator traits
//! - [`recording`] - a collaborator that records actions without running them

pub mod recording;
mod types;

pub use recording::{RecordedAction, RecordingBuildSystem};
pub use types::*;

use tracing::{debug, info};

use crate::component::PackageInfo;
use crate::recipe::Recipe;

#[derive(Debug)]
pub struct Lifecycle<'r, B: BuildSystem> {
  recipe: &'r Recipe,
  build_system: B,
  stage: Stage,
}

impl<'r, B: BuildSystem> Lifecycle<'r, B> {
  pub fn new(recipe: &'r Recipe, build_system: B) -> Self {
    Self {
      recipe,
      build_system,
      stage: Stage::Uninitialized,
    }
  }

  pub fn stage(&self) -> Stage {
    self.stage
  }

  pub fn build_system(&self) -> &B {
    &self.build_system
  }

  pub fn into_build_system(self) -> B {
    self.build_system
  }

  /// Validate the forced sub-options and run the build system's own
  /// configuration.
  pub fn configure(&mut self) -> Result<(), LifecycleError> {
    let forced = self.recipe.configure()?;
    for (package, option, value) in forced.iter() {
      debug!(package, option, value, "forced sub-option");
    }

    self.run(BuildAction::Configure)?;
    self.advance(Stage::Configured);
    Ok(())
  }

  pub fn build(&mut self) -> Result<(), LifecycleError> {
    self.require_configured("build")?;
    self.run(BuildAction::Build)?;
    self.advance(Stage::Built);
    Ok(())
  }

  pub fn test(&mut self) -> Result<(), LifecycleError> {
    self.require_configured("test")?;
    self.run(BuildAction::Test)?;
    self.advance(Stage::Tested);
    Ok(())
  }

  pub fn package(&mut self) -> Result<(), LifecycleError> {
    self.require_configured("package")?;
    self.run(BuildAction::Install)?;
    self.advance(Stage::Packaged);
    Ok(())
  }

  /// Assemble the component descriptor published to consumers.
  pub fn package_info(&mut self) -> Result<PackageInfo, LifecycleError> {
    self.require_configured("package_info")?;
    let info = self.recipe.package_info()?;
    self.advance(Stage::Published);
    Ok(info)
  }

  fn require_configured(&self, attempted: &'static str) -> Result<(), LifecycleError> {
    if self.stage < Stage::Configured {
      return Err(LifecycleError::OutOfOrder { attempted });
    }
    Ok(())
  }

  fn run(&mut self, action: BuildAction) -> Result<(), LifecycleError> {
    let definitions = self.recipe.build_definitions();
    info!(action = %action, "running build step");

    let mut step = self.build_system.step(&definitions)?;
    match action {
      BuildAction::Configure => step.configure()?,
      BuildAction::Build => step.build()?,
      BuildAction::Test => step.test()?,
      BuildAction::Install => step.install()?,
    }
    Ok(())
  }

  fn advance(&mut self, reached: Stage) {
    if reached > self.stage {
      info!(from = %self.stage, to = %reached, "lifecycle advanced");
      self.stage = reached;
    }
  }
}
