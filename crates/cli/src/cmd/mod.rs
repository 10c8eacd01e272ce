mod create;
mod info;
mod inspect;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use touca_recipe_lib::options::layer_overrides;
use touca_recipe_lib::profile::Profile;
use touca_recipe_lib::{Options, Recipe, Settings};

pub use create::{CreateArgs, cmd_create};
pub use info::cmd_info;
pub use inspect::cmd_inspect;

/// Build the recipe from detected settings, an optional profile, and `-o`
/// overrides. Overrides given on the command line win over the profile.
pub fn load_recipe(overrides: &[(String, String)], profile: Option<&Path>) -> Result<Recipe> {
  let profile = match profile {
    Some(path) => Profile::load(path)?,
    None => Profile::default(),
  };

  let layered = layer_overrides(&profile.option_overrides(), overrides);
  let options = Options::from_overrides(layered).context("Invalid options")?;
  let settings = profile
    .apply_settings(Settings::detect())
    .context("Invalid settings")?;

  for (name, value) in options.overridden() {
    debug!(option = %name, value, "option overridden");
  }

  Ok(Recipe::new(options, settings))
}
