//! CMake build-system collaborator.
//!
//! Each lifecycle action maps to one `cmake` invocation:
//!
//! | action    | command                                              |
//! |-----------|------------------------------------------------------|
//! | configure | `cmake -S <source> -B <build> <toolchain> <defs>`    |
//! | build     | `cmake --build <build> --config <type>`              |
//! | test      | `cmake --build <build> --config <type> --target test`|
//! | install   | `cmake --install <build> --config <type> --prefix <package>` |
//!
//! The source, build and package directories are fixed when the collaborator
//! is created; only the definitions vary per handle.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use crate::lifecycle::{BuildError, BuildStep, BuildSystem};
use crate::options::OptionName;
use crate::recipe::Recipe;
use crate::resolve::BuildDefinitions;
use crate::settings::BuildType;

/// Toolchain flags CMake derives from the recipe rather than from the
/// build definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toolchain {
  pub shared: bool,
  pub fpic: bool,
  pub build_type: BuildType,
}

impl Toolchain {
  pub fn from_recipe(recipe: &Recipe) -> Self {
    Self {
      shared: recipe.options().value(OptionName::Shared),
      fpic: recipe.options().value(OptionName::Fpic),
      build_type: recipe.settings().build_type,
    }
  }

  pub fn cache_args(&self) -> Vec<String> {
    vec![
      format!("-DCMAKE_BUILD_TYPE={}", self.build_type),
      format!("-DBUILD_SHARED_LIBS={}", on_off(self.shared)),
      format!("-DCMAKE_POSITION_INDEPENDENT_CODE={}", on_off(self.fpic)),
    ]
  }
}

fn on_off(value: bool) -> &'static str {
  if value { "ON" } else { "OFF" }
}

/// Test target name generated by CMake for the host's default generator.
fn test_target() -> &'static str {
  if cfg!(windows) { "RUN_TESTS" } else { "test" }
}

#[derive(Debug, Clone)]
pub struct CMake {
  program: PathBuf,
  source_dir: PathBuf,
  build_dir: PathBuf,
  package_dir: PathBuf,
  toolchain: Toolchain,
}

impl CMake {
  pub fn new(source_dir: &Path, build_dir: &Path, package_dir: &Path, toolchain: Toolchain) -> Self {
    Self {
      program: PathBuf::from("cmake"),
      source_dir: source_dir.to_path_buf(),
      build_dir: build_dir.to_path_buf(),
      package_dir: package_dir.to_path_buf(),
      toolchain,
    }
  }

  /// Use a specific `cmake` executable instead of the one on `PATH`.
  pub fn with_program(mut self, program: &Path) -> Self {
    self.program = program.to_path_buf();
    self
  }

  pub fn build_dir(&self) -> &Path {
    &self.build_dir
  }

  pub fn package_dir(&self) -> &Path {
    &self.package_dir
  }
}

impl BuildSystem for CMake {
  fn step(&mut self, definitions: &BuildDefinitions) -> Result<Box<dyn BuildStep + '_>, BuildError> {
    Ok(Box::new(CMakeStep {
      cmake: self,
      definitions: definitions.to_cmake_args(),
    }))
  }
}

/// A `cmake` handle bound to one set of definitions.
struct CMakeStep<'a> {
  cmake: &'a CMake,
  definitions: Vec<String>,
}

impl CMakeStep<'_> {
  fn run(&self, args: Vec<String>) -> Result<(), BuildError> {
    let program = self.cmake.program.display().to_string();
    let command_line = format!("{} {}", program, args.join(" "));
    info!(cmd = %command_line, "executing command");

    let status = Command::new(&self.cmake.program)
      .args(&args)
      .status()
      .map_err(|source| BuildError::Spawn {
        program: program.clone(),
        source,
      })?;

    if !status.success() {
      return Err(BuildError::CommandFailed {
        command: command_line,
        code: status.code(),
      });
    }

    debug!(cmd = %command_line, "command succeeded");
    Ok(())
  }

  fn path_arg(path: &Path) -> String {
    path.display().to_string()
  }
}

impl BuildStep for CMakeStep<'_> {
  fn configure(&mut self) -> Result<(), BuildError> {
    std::fs::create_dir_all(&self.cmake.build_dir)?;

    let mut args = vec![
      "-S".to_string(),
      Self::path_arg(&self.cmake.source_dir),
      "-B".to_string(),
      Self::path_arg(&self.cmake.build_dir),
    ];
    args.extend(self.cmake.toolchain.cache_args());
    args.extend(self.definitions.iter().cloned());
    self.run(args)
  }

  fn build(&mut self) -> Result<(), BuildError> {
    self.run(vec![
      "--build".to_string(),
      Self::path_arg(&self.cmake.build_dir),
      "--config".to_string(),
      self.cmake.toolchain.build_type.to_string(),
    ])
  }

  fn test(&mut self) -> Result<(), BuildError> {
    self.run(vec![
      "--build".to_string(),
      Self::path_arg(&self.cmake.build_dir),
      "--config".to_string(),
      self.cmake.toolchain.build_type.to_string(),
      "--target".to_string(),
      test_target().to_string(),
    ])
  }

  fn install(&mut self) -> Result<(), BuildError> {
    self.run(vec![
      "--install".to_string(),
      Self::path_arg(&self.cmake.build_dir),
      "--config".to_string(),
      self.cmake.toolchain.build_type.to_string(),
      "--prefix".to_string(),
      Self::path_arg(&self.cmake.package_dir),
    ])
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::options::Options;
  use crate::settings::Settings;

  #[test]
  fn toolchain_follows_options_and_settings() {
    let recipe = Recipe::new(
      Options::from_overrides([("shared", "True"), ("fPIC", "False")]).unwrap(),
      Settings::default().with_build_type(BuildType::Debug),
    );

    let args = Toolchain::from_recipe(&recipe).cache_args();

    assert_eq!(
      args,
      vec![
        "-DCMAKE_BUILD_TYPE=Debug",
        "-DBUILD_SHARED_LIBS=ON",
        "-DCMAKE_POSITION_INDEPENDENT_CODE=OFF",
      ]
    );
  }

  #[cfg(unix)]
  mod process {
    use super::*;
    use crate::lifecycle::{Lifecycle, LifecycleError};
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    /// Write a stand-in `cmake` that appends its arguments to `calls.log`.
    fn fake_cmake(dir: &Path) -> PathBuf {
      let script = dir.join("cmake");
      let log = dir.join("calls.log");
      std::fs::write(&script, format!("#!/bin/sh\necho \"$@\" >> '{}'\n", log.display())).unwrap();
      std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
      script
    }

    fn calls(dir: &Path) -> Vec<String> {
      std::fs::read_to_string(dir.join("calls.log"))
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
    }

    #[test]
    fn lifecycle_invokes_cmake_per_stage() {
      let temp = TempDir::new().unwrap();
      let program = fake_cmake(temp.path());
      let source = temp.path().join("src");
      let build = temp.path().join("build");
      let package = temp.path().join("pkg");
      let recipe = Recipe::new(Options::default(), Settings::default());
      let cmake = CMake::new(&source, &build, &package, Toolchain::from_recipe(&recipe)).with_program(&program);

      let mut lifecycle = Lifecycle::new(&recipe, cmake);
      lifecycle.configure().unwrap();
      lifecycle.build().unwrap();
      lifecycle.package().unwrap();

      let calls = calls(temp.path());
      assert_eq!(calls.len(), 3);
      assert!(calls[0].starts_with(&format!("-S {} -B {}", source.display(), build.display())));
      assert!(calls[0].contains("-DTOUCA_BUILD_FRAMEWORK=ON"));
      assert!(calls[0].contains("-DCMAKE_POSITION_INDEPENDENT_CODE=ON"));
      assert_eq!(calls[1], format!("--build {} --config Release", build.display()));
      assert_eq!(
        calls[2],
        format!("--install {} --config Release --prefix {}", build.display(), package.display())
      );
      assert!(build.is_dir());
    }

    #[test]
    fn non_zero_exit_is_reported() {
      let temp = TempDir::new().unwrap();
      let recipe = Recipe::default();
      let cmake = CMake::new(temp.path(), &temp.path().join("build"), temp.path(), Toolchain::from_recipe(&recipe))
        .with_program(Path::new("false"));

      let mut lifecycle = Lifecycle::new(&recipe, cmake);
      let err = lifecycle.configure().unwrap_err();

      assert!(matches!(
        err,
        LifecycleError::Build(BuildError::CommandFailed { code: Some(1), .. })
      ));
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
      let temp = TempDir::new().unwrap();
      let recipe = Recipe::default();
      let cmake = CMake::new(temp.path(), &temp.path().join("build"), temp.path(), Toolchain::from_recipe(&recipe))
        .with_program(&temp.path().join("no-such-cmake"));

      let mut lifecycle = Lifecycle::new(&recipe, cmake);
      let err = lifecycle.configure().unwrap_err();

      assert!(matches!(err, LifecycleError::Build(BuildError::Spawn { .. })));
    }
  }
}
