//! Implementation of the `touca-recipe info` command.
//!
//! Prints the component descriptor a consumer links against.

use anyhow::{Context, Result};

use touca_recipe_lib::{PackageInfo, Recipe};

use crate::output::{print_item, print_json, print_section, print_stat};

pub fn cmd_info(recipe: &Recipe, json: bool) -> Result<()> {
  let info = recipe.package_info().context("Failed to assemble package info")?;

  if json {
    return print_json(&info);
  }

  print_package_info(&info);
  Ok(())
}

pub(crate) fn print_package_info(info: &PackageInfo) {
  println!("Package: {}", info.name);
  for component in info.components.values() {
    print_section(&format!("Component {}::{}", info.name, component.name));
    print_stat("find_package name", &component.find_package_name);
    print_stat("libs", &component.libs.join(", "));
    println!("  requires:");
    for dependency in &component.requires {
      print_item(&dependency.to_string());
    }
  }
}
