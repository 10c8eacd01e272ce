//! Implementation of the `touca-recipe inspect` command.
//!
//! Shows the resolved configuration: options, settings, requirements, forced
//! sub-options, build definitions and the package id.

use anyhow::{Context, Result};

use touca_recipe_lib::Recipe;

use crate::output::{on_off, print_item, print_json, print_section, print_stat};

pub fn cmd_inspect(recipe: &Recipe, json: bool) -> Result<()> {
  let forced = recipe.configure().context("Failed to resolve forced options")?;
  let definitions = recipe.build_definitions();
  let package_id = recipe.package_id().context("Failed to compute package id")?;

  if json {
    let output = serde_json::json!({
      "metadata": recipe.metadata(),
      "package_id": package_id,
      "options": recipe.options(),
      "settings": recipe.settings(),
      "requires": recipe.requirements().iter().map(ToString::to_string).collect::<Vec<_>>(),
      "build_requires": recipe.build_requirements().iter().map(ToString::to_string).collect::<Vec<_>>(),
      "forced_options": forced,
      "definitions": definitions,
    });
    return print_json(&output);
  }

  let metadata = recipe.metadata();
  println!("{}/{}: {}", metadata.name, metadata.version, metadata.description);
  print_stat("License", metadata.license);
  print_stat("Homepage", metadata.homepage);
  print_stat("Package id", &package_id.to_string());

  print_section("Options");
  for (name, value) in recipe.options().iter() {
    print_stat(name.as_str(), on_off(value));
  }

  print_section("Settings");
  let settings = recipe.settings();
  print_stat("os", settings.os.map(|os| os.as_str()).unwrap_or("unknown"));
  print_stat("arch", settings.arch.map(|arch| arch.as_str()).unwrap_or("unknown"));
  print_stat("compiler", settings.compiler.as_deref().unwrap_or("default"));
  print_stat("build_type", settings.build_type.as_str());

  print_section("Requirements");
  for requirement in recipe.requirements() {
    print_item(&requirement.to_string());
  }

  let build_requirements = recipe.build_requirements();
  if !build_requirements.is_empty() {
    print_section("Build requirements");
    for requirement in build_requirements {
      print_item(&requirement.to_string());
    }
  }

  print_section("Forced options");
  for (package, option, value) in forced.iter() {
    print_stat(&format!("{}:{}", package, option), on_off(value));
  }

  print_section("Build definitions");
  for (name, value) in definitions.iter() {
    print_stat(name, on_off(value));
  }

  Ok(())
}
