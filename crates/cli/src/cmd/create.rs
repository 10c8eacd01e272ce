//! Implementation of the `touca-recipe create` command.
//!
//! Runs the full lifecycle (configure, build, optional test, package) and
//! prints the published package info. With `--dry-run` the CMake commands are
//! recorded instead of executed.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use touca_recipe_lib::cmake::{CMake, Toolchain};
use touca_recipe_lib::lifecycle::{BuildSystem, Lifecycle, LifecycleError, RecordingBuildSystem};
use touca_recipe_lib::{PackageInfo, Recipe};

use super::info::print_package_info;
use crate::output::{format_elapsed, print_info, print_json, print_success, symbols};

#[derive(Debug, Args)]
pub struct CreateArgs {
  /// Directory containing the SDK's top-level CMakeLists.txt
  #[arg(long, default_value = ".")]
  pub source_dir: PathBuf,

  /// Directory for CMake's build tree
  #[arg(long, default_value = "build")]
  pub build_dir: PathBuf,

  /// Install prefix for the packaged artifacts
  #[arg(long, default_value = "package")]
  pub package_dir: PathBuf,

  /// Run the test stage between build and package
  #[arg(long)]
  pub test: bool,

  /// Print the build steps without running them
  #[arg(long)]
  pub dry_run: bool,
}

pub fn cmd_create(recipe: &Recipe, args: &CreateArgs, json: bool) -> Result<()> {
  let started = Instant::now();

  let info = if args.dry_run {
    let (info, recorder) = run_lifecycle(recipe, RecordingBuildSystem::new(), args.test)?;
    if !json {
      for recorded in recorder.actions() {
        print_info(&format!("{} cmake {}", symbols::ARROW, recorded.action));
      }
    }
    info
  } else {
    let source_dir = dunce::canonicalize(&args.source_dir)
      .with_context(|| format!("Source directory not found: {}", args.source_dir.display()))?;
    let cmake = CMake::new(
      &source_dir,
      &absolute(&args.build_dir)?,
      &absolute(&args.package_dir)?,
      Toolchain::from_recipe(recipe),
    );
    let (info, _) = run_lifecycle(recipe, cmake, args.test)?;
    info
  };

  if json {
    return print_json(&info);
  }

  print_success(&format!(
    "Created {}/{} in {}",
    recipe.metadata().name,
    recipe.metadata().version,
    format_elapsed(started.elapsed())
  ));
  println!();
  print_package_info(&info);
  Ok(())
}

fn absolute(path: &Path) -> Result<PathBuf> {
  let cwd = std::env::current_dir().context("Failed to read current directory")?;
  Ok(cwd.join(path))
}

fn run_lifecycle<B: BuildSystem>(recipe: &Recipe, build_system: B, test: bool) -> Result<(PackageInfo, B)> {
  let mut lifecycle = Lifecycle::new(recipe, build_system);

  timed("configure", || lifecycle.configure())?;
  timed("build", || lifecycle.build())?;
  if test {
    timed("test", || lifecycle.test())?;
  }
  timed("package", || lifecycle.package())?;
  let info = lifecycle.package_info().context("Failed to publish package info")?;

  Ok((info, lifecycle.into_build_system()))
}

fn timed(stage: &str, run: impl FnOnce() -> Result<(), LifecycleError>) -> Result<()> {
  let started = Instant::now();
  run().with_context(|| format!("Stage '{}' failed", stage))?;
  info!(stage, elapsed = %format_elapsed(started.elapsed()), "stage complete");
  Ok(())
}
