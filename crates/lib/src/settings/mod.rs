//! Build settings: the machine and toolchain configuration a binary package
//! is produced for.
//!
//! Unlike options, settings are not part of the recipe's own schema. They are
//! detected from the build machine and may be adjusted by a profile.

pub mod arch;
pub mod os;

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::ConfigurationError;
use arch::Arch;
use os::Os;

/// CMake-style build configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BuildType {
  Debug,
  #[default]
  Release,
  RelWithDebInfo,
  MinSizeRel,
}

impl BuildType {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Debug => "Debug",
      Self::Release => "Release",
      Self::RelWithDebInfo => "RelWithDebInfo",
      Self::MinSizeRel => "MinSizeRel",
    }
  }
}

impl fmt::Display for BuildType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for BuildType {
  type Err = ConfigurationError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "Debug" => Ok(Self::Debug),
      "Release" => Ok(Self::Release),
      "RelWithDebInfo" => Ok(Self::RelWithDebInfo),
      "MinSizeRel" => Ok(Self::MinSizeRel),
      _ => Err(ConfigurationError::InvalidSetting {
        name: "build_type".to_string(),
        value: s.to_string(),
      }),
    }
  }
}

impl Serialize for BuildType {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.as_str())
  }
}

/// Settings for one recipe invocation.
///
/// `os` and `arch` are `None` on build machines this recipe does not know
/// about; `compiler` is only known when a profile names it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Settings {
  pub os: Option<Os>,
  pub arch: Option<Arch>,
  pub compiler: Option<String>,
  pub build_type: BuildType,
}

impl Settings {
  /// Settings for the current build machine with a release build type.
  pub fn detect() -> Self {
    Self {
      os: Os::current(),
      arch: Arch::current(),
      compiler: None,
      build_type: BuildType::default(),
    }
  }

  pub fn with_build_type(mut self, build_type: BuildType) -> Self {
    self.build_type = build_type;
    self
  }

  pub fn with_compiler(mut self, compiler: &str) -> Self {
    self.compiler = Some(compiler.to_string());
    self
  }
}
